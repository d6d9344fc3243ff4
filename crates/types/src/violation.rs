//! Rule-engine result types and the diagnostics produced from them.

use crate::{Impact, Range, Severity};

/// One fragment of a violation node's selector path.
///
/// The rule engine reports node targets as CSS-like selector paths. Nested
/// contexts (shadow roots, frames) appear as paths the DOM engine cannot
/// address with a plain selector query; those are modeled explicitly so the
/// reconciler can skip straight to its text-search fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorFragment {
    /// A plain CSS selector the DOM engine can query.
    Plain(String),
    /// A path the DOM engine cannot address (shadow/frame context).
    Unaddressable,
}

impl SelectorFragment {
    /// The selector string, if this fragment is queryable.
    #[must_use]
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            Self::Plain(selector) => Some(selector),
            Self::Unaddressable => None,
        }
    }
}

/// One concrete DOM element implicated by a violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationNode {
    /// Ordered selector path, outermost context first. At least one entry.
    pub target: Vec<SelectorFragment>,
    /// Serialized HTML snippet of the offending element, when the rule
    /// engine recorded one.
    pub html: Option<String>,
}

impl ViolationNode {
    /// Create a node from a single plain selector.
    #[must_use]
    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            target: vec![SelectorFragment::Plain(selector.into())],
            html: None,
        }
    }

    /// Attach the element's recorded markup snippet.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

/// A single rule failure reported by the rule engine, possibly spanning
/// multiple elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule identifier, e.g. `image-alt`.
    pub rule_id: String,
    /// Human-readable description of the failure.
    pub message: String,
    /// Link to the rule's help page.
    pub help_url: String,
    /// The rule engine's severity classification, when recognized.
    pub impact: Option<Impact>,
    /// The offending elements. One diagnostic is emitted per node.
    pub nodes: Vec<ViolationNode>,
}

/// A positioned accessibility diagnostic for the editor host.
///
/// Produced fresh per analysis request and never mutated afterwards; the
/// full diagnostic array for a document replaces the previous one at the
/// host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Range in the original source (0-based line and character).
    pub range: Range,
    /// Display severity, derived from the violation's impact.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Rule identifier the violation came from.
    pub rule_id: String,
    /// Link to the rule's help page.
    pub help_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = ViolationNode::selector("img").with_html("<img src=\"a.png\">");
        assert_eq!(node.target.len(), 1);
        assert_eq!(node.target[0].as_plain(), Some("img"));
        assert_eq!(node.html.as_deref(), Some("<img src=\"a.png\">"));
    }

    #[test]
    fn test_unaddressable_fragment() {
        let fragment = SelectorFragment::Unaddressable;
        assert_eq!(fragment.as_plain(), None);
    }
}
