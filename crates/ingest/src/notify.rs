//! User-facing notifications.

use derive_more::Display;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    #[display("info")]
    Info,
    #[display("warn")]
    Warn,
    #[display("error")]
    Error,
}

/// Fire-and-forget sink for messages meant for the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

/// Emits notifications as `tracing` events under the `minup::notify` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "minup::notify", "{message}"),
            Severity::Warn => tracing::warn!(target: "minup::notify", "{message}"),
            Severity::Error => tracing::error!(target: "minup::notify", "{message}"),
        }
    }
}

/// Keeps every notification in memory, for hosts that render them later
/// and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    /// Every notification so far, in order.
    pub fn seen(&self) -> Vec<(Severity, String)> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Only the messages of the given severity.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.seen().into_iter().filter(|(s, _)| *s == severity).map(|(_, m)| m).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).push((severity, message.to_string()));
    }
}
