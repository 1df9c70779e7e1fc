//! Diagnostics sink for non-fatal notices.
//!
//! The engine never owns a logger; callers inject a sink. Notices are
//! informational only — a warning never changes a processing result.

use std::sync::Mutex;

/// Sink for non-fatal processing notices.
pub trait DiagnosticsSink {
    /// Informational notice (e.g., association counts).
    fn info(&self, message: &str);
    /// Non-fatal problem notice (e.g., missing image geometry).
    fn warn(&self, message: &str);
}

/// Sink forwarding to the `tracing` macros.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

/// Severity of a collected diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warn,
}

/// Sink that buffers messages, mainly for tests and batch reporting.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<(DiagnosticLevel, String)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected messages at the given level, in arrival order.
    pub fn messages(&self, level: DiagnosticLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Collected warnings, in arrival order.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(DiagnosticLevel::Warn)
    }

    /// Collected info notices, in arrival order.
    pub fn infos(&self) -> Vec<String> {
        self.messages(DiagnosticLevel::Info)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(DiagnosticLevel, String)>> {
        // A poisoned mutex still holds valid message data.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticsSink for CollectingSink {
    fn info(&self, message: &str) {
        self.lock().push((DiagnosticLevel::Info, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.lock().push((DiagnosticLevel::Warn, message.to_string()));
    }
}
