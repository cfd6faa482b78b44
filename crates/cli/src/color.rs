//! ANSI status coloring with a tri-state mode.
//!
//! Auto mode enables color only when stdout is a terminal, so piped output
//! stays clean.

use std::io::IsTerminal;

use clap::ValueEnum;

mod ansi {
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const RED: &str = "\x1b[1;31m"; // Bold red
    pub const GRAY: &str = "\x1b[90m";
    pub const RESET: &str = "\x1b[0m";
}

/// When to emit ANSI color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Applies a [`ColorMode`] to status lines.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    enabled: bool,
}

impl Paint {
    /// Resolve the mode against the current stdout.
    pub fn new(mode: ColorMode) -> Self {
        let enabled = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        };
        Self { enabled }
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    /// Success and all-clear lines.
    pub fn green(&self, text: &str) -> String {
        self.wrap(ansi::GREEN, text)
    }

    /// Attention lines ("found N failed tests").
    pub fn yellow(&self, text: &str) -> String {
        self.wrap(ansi::YELLOW, text)
    }

    /// Informational lines ("targeting specs").
    pub fn blue(&self, text: &str) -> String {
        self.wrap(ansi::BLUE, text)
    }

    /// Fatal errors.
    pub fn red(&self, text: &str) -> String {
        self.wrap(ansi::RED, text)
    }

    /// Low-importance detail ("running: ...").
    pub fn gray(&self, text: &str) -> String {
        self.wrap(ansi::GRAY, text)
    }
}
