//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Lets the bootstrap runner emit progress without depending on any
//! presentation type.

use std::cell::RefCell;
use std::io::{self, Write};

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` writes `"  ! {message}"` to the warning sink (stderr)
///
/// Steps and successes are suppressed when `ctx.quiet`; warnings never are,
/// so an unverified archive is flagged under `--quiet` and `--json` too.
pub struct TerminalReporter<'a, E = io::Stderr> {
    ctx: &'a OutputContext,
    warnings: RefCell<E>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self::with_warning_sink(ctx, io::stderr())
    }
}

impl<'a, E: Write> TerminalReporter<'a, E> {
    /// Reporter writing warnings to `sink` instead of stderr.
    #[must_use]
    pub fn with_warning_sink(ctx: &'a OutputContext, sink: E) -> Self {
        Self {
            ctx,
            warnings: RefCell::new(sink),
        }
    }

    /// Consume the reporter, returning the warning sink.
    #[must_use]
    pub fn into_warning_sink(self) -> E {
        self.warnings.into_inner()
    }
}

impl<E: Write> ProgressReporter for TerminalReporter<'_, E> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        let line = self.ctx.warning_line(message);
        if let Err(e) = writeln!(self.warnings.borrow_mut(), "{line}") {
            tracing::debug!(error = %e, "cannot write warning");
        }
    }
}
