//! Failure classes surfaced by the collaborator boundaries.

/// Errors the analysis engine recovers from.
///
/// These cross the [`DomEngine`](crate::DomEngine) and
/// [`RuleEngine`](crate::RuleEngine) boundaries; the engine catches all of
/// them, logs, and resolves to an empty diagnostic list for the run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The DOM engine could not construct a document from the input.
    #[error("document construction failed: {0}")]
    DomConstruction(String),

    /// The rule-engine runtime could not be injected into the document's
    /// isolated global scope.
    #[error("rule runtime injection failed: {0}")]
    RuntimeInjection(String),

    /// Rule evaluation itself failed.
    #[error("rule evaluation failed: {0}")]
    RuleEvaluation(String),
}
