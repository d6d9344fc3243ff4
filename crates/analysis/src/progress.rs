//! Progress reporting checkpoints for one analysis run.
//!
//! Purely observational: a sink may forward these to the editor host's
//! progress UI, but nothing about the run's outcome depends on them. The
//! engine awaits each report, so a sink sees checkpoints strictly in
//! pipeline order and strictly before the run completes.

use async_trait::async_trait;

/// The four checkpoints an analysis run passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    DomConstructed,
    RuntimeInjected,
    RulesEvaluated,
    ResultsProcessed,
}

impl ProgressStage {
    /// Short human-readable label for progress UI.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DomConstructed => "Constructing document",
            Self::RuntimeInjected => "Injecting rule runtime",
            Self::RulesEvaluated => "Evaluating accessibility rules",
            Self::ResultsProcessed => "Processing results",
        }
    }
}

/// Receives progress checkpoints during an analysis run.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn report(&self, stage: ProgressStage);
}

/// Sink that discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

#[async_trait]
impl ProgressSink for NullProgress {
    async fn report(&self, _stage: ProgressStage) {}
}
