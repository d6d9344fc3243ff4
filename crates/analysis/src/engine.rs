//! The document analysis engine: one run, end to end.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use a11y_config::RuleConfiguration;
use a11y_types::{Diagnostic, DocumentUri, Language, LineIndex, Severity};

use crate::dom::DomEngine;
use crate::neutralize::neutralize;
use crate::progress::{ProgressSink, ProgressStage};
use crate::reconcile::resolve_range;
use crate::rules::{RuleEngine, RuleSelection};

/// Caveat appended to a diagnostic whose range came from a weak resolution.
const IMPRECISE_RANGE_CAVEAT: &str = "(position may be imprecise)";

/// Everything one triggered validation needs, immutable once created.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Document identity.
    pub uri: DocumentUri,
    /// Text snapshot at trigger time. The engine holds no authoritative
    /// copy of the document.
    pub text: Arc<str>,
    /// Language kind; decides whether neutralization applies.
    pub language: Language,
    /// Document version at request time, for stale-result suppression by
    /// the caller.
    pub version: i32,
    /// Rule selection resolved from settings at trigger time.
    pub rules: RuleConfiguration,
}

/// Owns one analysis run: neutralize, parse, inject runtime, evaluate rules,
/// reconcile violations into positioned diagnostics.
#[derive(Debug)]
pub struct AnalysisEngine<D, R> {
    dom: D,
    rules: R,
}

impl<D: DomEngine, R: RuleEngine> AnalysisEngine<D, R> {
    #[must_use]
    pub const fn new(dom: D, rules: R) -> Self {
        Self { dom, rules }
    }

    /// Analyze one document snapshot.
    ///
    /// Never fails the caller: pre-processing, DOM construction, runtime
    /// injection and rule evaluation errors are logged with the document URI
    /// and resolve to an empty list; per-node reconciliation failures
    /// degrade only that node's diagnostic.
    #[tracing::instrument(skip(self, request, progress), fields(uri = %request.uri))]
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        progress: &dyn ProgressSink,
    ) -> Vec<Diagnostic> {
        let started = Instant::now();
        let original = request.text.as_ref();

        let analyzed: Cow<'_, str> = match request.language {
            Language::Php => neutralize(original),
            Language::Html => Cow::Borrowed(original),
        };

        let document = match self.dom.parse(&analyzed, request.uri.as_str()) {
            Ok(document) => document,
            Err(error) => {
                tracing::error!(uri = %request.uri, %error, "document construction failed");
                return Vec::new();
            }
        };
        progress.report(ProgressStage::DomConstructed).await;

        if let Err(error) = document.inject_rule_runtime() {
            tracing::error!(uri = %request.uri, %error, "rule runtime unavailable");
            return Vec::new();
        }
        progress.report(ProgressStage::RuntimeInjected).await;

        let selection = RuleSelection::resolve(&request.rules);
        let violations = match self.rules.run(document.as_ref(), &selection).await {
            Ok(violations) => violations,
            Err(error) => {
                tracing::error!(uri = %request.uri, %error, "rule evaluation failed");
                return Vec::new();
            }
        };
        progress.report(ProgressStage::RulesEvaluated).await;

        // Ranges are reconciled against the original, un-neutralized text.
        let line_index = LineIndex::new(original);
        let mut diagnostics = Vec::new();
        for violation in &violations {
            let severity = Severity::from_impact(violation.impact);
            // One diagnostic per offending node: each element needs its own
            // range for the editor to highlight.
            for node in &violation.nodes {
                let resolution = resolve_range(node, document.as_ref(), original, &line_index);
                let message = if resolution.confident {
                    violation.message.clone()
                } else {
                    format!("{} {IMPRECISE_RANGE_CAVEAT}", violation.message)
                };
                diagnostics.push(Diagnostic {
                    range: resolution.range,
                    severity,
                    message,
                    rule_id: violation.rule_id.clone(),
                    help_url: violation.help_url.clone(),
                });
            }
        }
        progress.report(ProgressStage::ResultsProcessed).await;

        tracing::debug!(
            uri = %request.uri,
            diagnostics = diagnostics.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "analysis complete"
        );
        diagnostics
    }
}
