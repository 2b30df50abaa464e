//! Plain UI for pipes, CI and automation agents.

use super::{OutputMode, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Messages go to stdout unstyled; details, warnings and errors go to
/// stderr so a JSON report on stdout is never interleaved with diagnostics.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            eprintln!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", title);
            println!();
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
