//! Scripted rule engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use a11y_analysis::{AnalysisError, DomDocument, RuleEngine, RuleSelection};
use a11y_types::Violation;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Rule engine that returns a fixed violation list and records every
/// selection it was invoked with.
///
/// An optional artificial delay keeps a run in flight long enough for
/// scheduling tests to race edits against it; `max_overlap` then reports
/// the largest number of runs that were ever in flight at once.
#[derive(Debug, Default)]
pub struct ScriptedRuleEngine {
    violations: Vec<Violation>,
    fail: bool,
    delay: Option<Duration>,
    selections: Mutex<Vec<RuleSelection>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedRuleEngine {
    /// Engine returning the given violations on every run.
    #[must_use]
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            ..Self::default()
        }
    }

    /// Engine reporting no violations.
    #[must_use]
    pub fn clean() -> Self {
        Self::new(Vec::new())
    }

    /// Engine that fails every run.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Hold each run in flight for `delay` before returning.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Selections passed to `run`, in call order.
    #[must_use]
    pub fn selections(&self) -> Vec<RuleSelection> {
        self.selections.lock().clone()
    }

    /// Number of `run` invocations so far.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.selections.lock().len()
    }

    /// Largest number of runs ever in flight simultaneously.
    #[must_use]
    pub fn max_overlap(&self) -> usize {
        self.max_active.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RuleEngine for ScriptedRuleEngine {
    async fn run(
        &self,
        _document: &dyn DomDocument,
        selection: &RuleSelection,
    ) -> Result<Vec<Violation>, AnalysisError> {
        self.selections.lock().push(selection.clone());
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        if self.fail {
            return Err(AnalysisError::RuleEvaluation(
                "scripted rule failure".to_string(),
            ));
        }
        Ok(self.violations.clone())
    }
}
