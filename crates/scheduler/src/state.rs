//! Per-document validation state.

use std::sync::Arc;

use a11y_types::Language;

/// Where a document currently sits in the validation lifecycle.
///
/// One tagged state per URI makes the illegal combinations (two timers, two
/// concurrent runs) unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// No timer armed, no analysis in flight.
    Idle,
    /// Debounce timer armed. `generation` identifies the newest timer;
    /// older timers observe a mismatch when they fire and stand down,
    /// which is what re-arming means.
    Pending { generation: u64 },
    /// Analysis in flight, no edit seen since it started.
    Running,
    /// Analysis in flight and an edit arrived meanwhile; completion
    /// re-arms the debounce timer instead of going idle.
    RunningWithFollowup,
}

impl ValidationState {
    /// Whether an analysis is currently in flight.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running | Self::RunningWithFollowup)
    }
}

/// Everything the scheduler tracks for one open document.
///
/// The text snapshot mirrors the editor's copy so that settings changes and
/// follow-up runs can re-validate without asking the host for content.
#[derive(Debug, Clone)]
pub(crate) struct DocumentEntry {
    pub state: ValidationState,
    /// Raw editor language id, checked against `includedLanguages`.
    pub language_id: String,
    /// Parsed language kind; `None` for ids the analyzer cannot handle.
    pub language: Option<Language>,
    /// Monotonic editor version, bumped on every edit.
    pub version: i32,
    /// Latest text snapshot.
    pub text: Arc<str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_running() {
        assert!(!ValidationState::Idle.is_running());
        assert!(!ValidationState::Pending { generation: 1 }.is_running());
        assert!(ValidationState::Running.is_running());
        assert!(ValidationState::RunningWithFollowup.is_running());
    }
}
