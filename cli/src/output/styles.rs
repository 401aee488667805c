//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
///
/// Every field stays `Style::new()` (plain text) until [`Styles::colorize`]
/// runs, which `OutputContext` only does on a color-capable TTY.
#[derive(Default, Clone)]
pub struct Styles {
    /// Success glyphs and messages (green)
    pub success: Style,
    /// Warnings (yellow)
    pub warning: Style,
    /// Errors and failed checks (red)
    pub error: Style,
    /// Informational glyph (blue)
    pub info: Style,
    /// Step arrows (cyan)
    pub step: Style,
    /// Dimmed/secondary text, e.g. resolved command lines
    pub dim: Style,
    /// Bold text
    pub bold: Style,
    /// Headers/section titles
    pub header: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.step = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
    }
}
