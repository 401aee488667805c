//! Skinetic USB identifiers and udev rule handling.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Actronika USB vendor id.
pub const SKINETIC_VENDOR_ID: &str = "34a8";

/// A USB product the SDK talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkineticProduct {
    pub product_id: &'static str,
    pub name: &'static str,
}

pub const SKINETIC_PRODUCTS: &[SkineticProduct] = &[
    SkineticProduct {
        product_id: "0110",
        name: "Skinetic vest",
    },
    SkineticProduct {
        product_id: "0122",
        name: "HSD mk.II",
    },
    SkineticProduct {
        product_id: "0123",
        name: "HSD mk.III",
    },
];

#[allow(clippy::expect_used)] // compile-time constant pattern
static VENDOR_MATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)ATTRS?\{idVendor\}\s*==\s*"([0-9a-f]{4})""#).expect("valid regex")
});

/// Look up a product by its hex id (case-insensitive).
#[must_use]
pub fn product_by_id(product_id: &str) -> Option<&'static SkineticProduct> {
    SKINETIC_PRODUCTS
        .iter()
        .find(|p| p.product_id.eq_ignore_ascii_case(product_id))
}

/// Render a udev rule granting unprivileged access to every known product.
#[must_use]
pub fn render_rule() -> String {
    let mut out = String::from("# Skinetic haptic devices: allow unprivileged USB access\n");
    for product in SKINETIC_PRODUCTS {
        out.push_str(&format!(
            "# {}\nSUBSYSTEM==\"usb\", ATTRS{{idVendor}}==\"{SKINETIC_VENDOR_ID}\", ATTRS{{idProduct}}==\"{}\", MODE=\"0666\"\n",
            product.name, product.product_id
        ));
    }
    out
}

/// Whether a rule file's content matches the Skinetic vendor id.
///
/// Commented-out lines are ignored.
#[must_use]
pub fn rule_grants_vendor(content: &str) -> bool {
    content
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| VENDOR_MATCH.captures_iter(line))
        .any(|caps| caps[1].eq_ignore_ascii_case(SKINETIC_VENDOR_ID))
}
