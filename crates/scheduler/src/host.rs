//! Editor host boundary.

use a11y_types::{Diagnostic, DocumentUri};
use async_trait::async_trait;

/// Severity of a host-directed log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
}

/// The editor side of the scheduler.
///
/// The transport behind this trait is out of scope; the scheduler only
/// requires that diagnostics can be published per URI (full replacement,
/// no incremental patching) and that progress notifications can be keyed
/// by an opaque per-request token.
#[async_trait]
pub trait EditorHost: Send + Sync + 'static {
    /// Replace the document's diagnostics wholesale. An empty vector is an
    /// explicit clear.
    async fn publish_diagnostics(&self, uri: &DocumentUri, diagnostics: Vec<Diagnostic>);

    /// A validation run started.
    async fn progress_begin(&self, token: u64, title: &str);

    /// A validation run passed a checkpoint.
    async fn progress_report(&self, token: u64, message: &str);

    /// A validation run finished (successfully or not).
    async fn progress_end(&self, token: u64);

    /// Surface an operator-facing message in the editor's log channel.
    async fn log_message(&self, level: LogLevel, message: &str);
}
