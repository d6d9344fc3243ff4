//! Selector reconciliation: mapping a violation node back to a character
//! range in the original source text.
//!
//! The rule engine sees the neutralized DOM; the user sees the original
//! file. Reconciliation bridges the two under imperfect information, through
//! an ordered fallback chain where the first success wins:
//!
//! 1. query the DOM with the node's outermost selector fragment and read the
//!    engine's recorded source location,
//! 2. text-search the original text for the element's serialized markup (or
//!    the node's recorded snippet) and convert the match offsets through the
//!    document's [`LineIndex`],
//! 3. give up with the zero range.
//!
//! The chain always returns a range; confidence is communicated separately
//! so the caller can annotate weakly-resolved diagnostics.

use a11y_types::{LineIndex, OffsetRange, Range, SelectorFragment, ViolationNode};

use crate::dom::DomDocument;

/// Outcome of reconciling one violation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Range in the original text. The zero range when every strategy
    /// failed.
    pub range: Range,
    /// `true` only when the range came from the DOM engine's recorded
    /// source location. Text-search results carry the first-occurrence
    /// tie-break and are reported as weak.
    pub confident: bool,
}

/// Resolve the best-effort range for a violation node.
///
/// `original_text` and `line_index` refer to the un-neutralized document;
/// all returned ranges are in original-text coordinates and never exceed its
/// bounds.
#[must_use]
pub fn resolve_range(
    node: &ViolationNode,
    document: &dyn DomDocument,
    original_text: &str,
    line_index: &LineIndex<'_>,
) -> Resolution {
    // Nested contexts are queried with the outermost fragment only. A
    // deliberate simplification, not shadow-tree traversal.
    let selector = node.target.first().and_then(SelectorFragment::as_plain);
    let element = selector.and_then(|selector| document.query_selector(selector));

    if let Some(element) = &element {
        if let Some(location) = element.source_location() {
            return Resolution {
                range: location.to_range(),
                confident: true,
            };
        }
    }

    // No recorded location, unresolvable selector, or an unaddressable
    // path: fall back to searching the original text for the element's
    // markup. First occurrence wins when the snippet repeats.
    let snippet = element
        .map(|element| element.outer_html())
        .filter(|html| !html.is_empty())
        .or_else(|| node.html.clone());
    if let Some(snippet) = snippet {
        if let Some(offset) = original_text.find(&snippet) {
            let offsets = OffsetRange::new(offset, offset + snippet.len());
            return Resolution {
                range: line_index.range(offsets),
                confident: false,
            };
        }
    }

    Resolution {
        range: Range::zero(),
        confident: false,
    }
}
