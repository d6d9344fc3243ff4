//! DOM engine boundary.
//!
//! The analyzer does not implement an HTML parser. Any engine that can turn
//! text into a selector-queryable tree with per-element source locations
//! plugs in behind these traits. Implementations must never execute script
//! content found in the analyzed document itself; only the rule runtime
//! injected through [`DomDocument::inject_rule_runtime`] may evaluate, in an
//! isolated global scope.

use a11y_types::{Position, Range};

use crate::error::AnalysisError;

/// Recorded source location of an element, in the DOM engine's convention:
/// 1-based lines, 0-based columns on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceLocation {
    /// Convert to the diagnostic coordinate system (0-based lines).
    ///
    /// Only line numbers shift; columns pass through unchanged.
    #[must_use]
    pub const fn to_range(self) -> Range {
        Range::new(
            Position::new(self.start_line.saturating_sub(1), self.start_column),
            Position::new(self.end_line.saturating_sub(1), self.end_column),
        )
    }
}

/// Parses text into a queryable document tree.
pub trait DomEngine: Send + Sync {
    /// Parse `text` into a document, retaining per-node source locations.
    ///
    /// `base_uri` identifies the document for resolution and logging; the
    /// engine must not fetch it.
    fn parse(&self, text: &str, base_uri: &str) -> Result<Box<dyn DomDocument>, AnalysisError>;
}

/// A parsed document tree.
pub trait DomDocument: Send + Sync {
    /// First element matching a CSS-like selector, if any.
    fn query_selector(&self, selector: &str) -> Option<Box<dyn DomElement + '_>>;

    /// Inject the rule engine's runtime into this document's isolated
    /// global scope.
    fn inject_rule_runtime(&self) -> Result<(), AnalysisError>;
}

impl<T: DomEngine + ?Sized> DomEngine for std::sync::Arc<T> {
    fn parse(&self, text: &str, base_uri: &str) -> Result<Box<dyn DomDocument>, AnalysisError> {
        (**self).parse(text, base_uri)
    }
}

/// A single element within a parsed document.
pub trait DomElement {
    /// The engine's recorded source location for this element, when the
    /// parse retained one.
    fn source_location(&self) -> Option<SourceLocation>;

    /// Serialized outer markup of this element.
    fn outer_html(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_conversion_shifts_lines_only() {
        let location = SourceLocation {
            start_line: 3,
            start_column: 4,
            end_line: 3,
            end_column: 20,
        };
        let range = location.to_range();
        assert_eq!(range.start, Position::new(2, 4));
        assert_eq!(range.end, Position::new(2, 20));
    }

    #[test]
    fn test_location_conversion_never_negative() {
        let location = SourceLocation {
            start_line: 0,
            start_column: 0,
            end_line: 0,
            end_column: 0,
        };
        let range = location.to_range();
        assert_eq!(range, Range::zero());
    }
}
