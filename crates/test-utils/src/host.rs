//! Recording editor host.

use a11y_scheduler::{EditorHost, LogLevel};
use a11y_types::{Diagnostic, DocumentUri};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Captures everything the scheduler sends to the editor.
#[derive(Debug, Default)]
pub struct RecordingHost {
    published: Mutex<Vec<(DocumentUri, Vec<Diagnostic>)>>,
    progress: Mutex<Vec<String>>,
    messages: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All publications, in order.
    #[must_use]
    pub fn published(&self) -> Vec<(DocumentUri, Vec<Diagnostic>)> {
        self.published.lock().clone()
    }

    /// Number of publish calls seen so far.
    #[must_use]
    pub fn publish_count(&self) -> usize {
        self.published.lock().len()
    }

    /// The most recently published diagnostics for a URI, if any
    /// publication happened.
    #[must_use]
    pub fn latest_for(&self, uri: &DocumentUri) -> Option<Vec<Diagnostic>> {
        self.published
            .lock()
            .iter()
            .rev()
            .find(|(published_uri, _)| published_uri == uri)
            .map(|(_, diagnostics)| diagnostics.clone())
    }

    /// Progress notifications, in order, formatted as `begin`/`report`/`end`
    /// lines.
    #[must_use]
    pub fn progress_log(&self) -> Vec<String> {
        self.progress.lock().clone()
    }

    /// Log messages sent to the editor's log channel, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl EditorHost for RecordingHost {
    async fn publish_diagnostics(&self, uri: &DocumentUri, diagnostics: Vec<Diagnostic>) {
        self.published.lock().push((uri.clone(), diagnostics));
    }

    async fn progress_begin(&self, token: u64, title: &str) {
        self.progress.lock().push(format!("begin:{token}:{title}"));
    }

    async fn progress_report(&self, token: u64, message: &str) {
        self.progress.lock().push(format!("report:{token}:{message}"));
    }

    async fn progress_end(&self, token: u64) {
        self.progress.lock().push(format!("end:{token}"));
    }

    async fn log_message(&self, level: LogLevel, message: &str) {
        self.messages.lock().push((level, message.to_string()));
    }
}
