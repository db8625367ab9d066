//! What `updoc` says on stderr besides the document itself.

use std::fmt::Display;

/// How chatty the command line is. Ordered from silent to loudest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Debug,
}

impl Verbosity {
    /// `--quiet` wins when both flags are given.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    fn shows(self, level: Verbosity) -> bool {
        self >= level
    }
}

/// Message for a fatal error, meant for `bail!("{}", ...)`.
pub fn error_message(message: impl Display) -> String {
    format!("updoc: {}", message)
}

pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows(Verbosity::Normal) {
        eprintln!("warning: {}", message);
    }
}

pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows(Verbosity::Debug) {
        eprintln!("[debug] {}", message);
    }
}
