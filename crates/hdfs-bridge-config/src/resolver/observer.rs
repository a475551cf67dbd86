//! Diagnostic sink for resolution decisions.

use log::debug;

/// Receives one note per resolution decision (resource found, skipped, ...).
pub trait ResolveObserver {
    fn note(&self, message: &str);
}

/// Forwards notes to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ResolveObserver for LogObserver {
    fn note(&self, message: &str) {
        debug!("{message}");
    }
}
