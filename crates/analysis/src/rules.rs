//! Rule-set resolution and the rule-engine boundary.

use a11y_config::RuleConfiguration;
use a11y_types::Violation;
use async_trait::async_trait;

use crate::dom::DomDocument;
use crate::error::AnalysisError;

/// Guideline tags applied when the configuration names neither rules nor
/// tags.
pub const DEFAULT_TAGS: &[&str] = &["wcag2a", "wcag2aa", "wcag21a", "wcag21aa", "best-practice"];

/// Built-in rule-id allow-list, the last resort of the resolution chain.
pub const DEFAULT_RULE_IDS: &[&str] = &[
    "area-alt",
    "aria-allowed-attr",
    "aria-hidden-body",
    "aria-required-attr",
    "aria-roles",
    "aria-valid-attr",
    "aria-valid-attr-value",
    "button-name",
    "duplicate-id-aria",
    "empty-heading",
    "image-alt",
    "input-image-alt",
    "label",
    "link-name",
    "list",
    "listitem",
    "meta-refresh",
    "meta-viewport",
    "object-alt",
    "role-img-alt",
    "select-name",
    "td-headers-attr",
    "th-has-data-cells",
    "video-caption",
];

/// The effective rule set for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSelection {
    /// Run exactly these rules by id.
    Rules(Vec<String>),
    /// Run every rule carrying one of these guideline tags.
    Tags(Vec<String>),
}

impl RuleSelection {
    /// Resolve the effective rule set from a request's configuration.
    ///
    /// A configuration-supplied rule list always wins; otherwise supplied
    /// tags, otherwise the fixed default tag set. Empty lists count as not
    /// supplied, and an explicitly emptied tag list falls through to the
    /// built-in default rule-id list.
    #[must_use]
    pub fn resolve(config: &RuleConfiguration) -> Self {
        if let Some(rules) = &config.rules {
            if !rules.is_empty() {
                return Self::Rules(rules.clone());
            }
        }
        match &config.tags {
            Some(tags) if !tags.is_empty() => Self::Tags(tags.clone()),
            Some(_) => Self::Rules(DEFAULT_RULE_IDS.iter().map(ToString::to_string).collect()),
            None => Self::Tags(DEFAULT_TAGS.iter().map(ToString::to_string).collect()),
        }
    }
}

/// Rule engine boundary.
///
/// Given a document and a rule selection, returns structured violations.
/// Only violation-type results are reported; passes, incomplete and
/// inapplicable results never cross this boundary. This call is the single
/// suspension point of an analysis run.
#[async_trait]
pub trait RuleEngine: Send + Sync {
    async fn run(
        &self,
        document: &dyn DomDocument,
        selection: &RuleSelection,
    ) -> Result<Vec<Violation>, AnalysisError>;
}

#[async_trait]
impl<T: RuleEngine + ?Sized> RuleEngine for std::sync::Arc<T> {
    async fn run(
        &self,
        document: &dyn DomDocument,
        selection: &RuleSelection,
    ) -> Result<Vec<Violation>, AnalysisError> {
        (**self).run(document, selection).await
    }
}
