//! Scripted DOM engine.

use a11y_analysis::{AnalysisError, DomDocument, DomElement, DomEngine, SourceLocation};
use parking_lot::Mutex;

/// An element the fake document can return from a selector query.
#[derive(Debug, Clone)]
pub struct FakeElement {
    outer_html: String,
    location: Option<SourceLocation>,
}

impl FakeElement {
    /// Create an element with the given serialized markup and no recorded
    /// source location.
    #[must_use]
    pub fn new(outer_html: impl Into<String>) -> Self {
        Self {
            outer_html: outer_html.into(),
            location: None,
        }
    }

    /// Record a source location (1-based lines, 0-based columns).
    #[must_use]
    pub const fn with_location(
        mut self,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        self.location = Some(SourceLocation {
            start_line,
            start_column,
            end_line,
            end_column,
        });
        self
    }
}

impl DomElement for FakeElement {
    fn source_location(&self) -> Option<SourceLocation> {
        self.location
    }

    fn outer_html(&self) -> String {
        self.outer_html.clone()
    }
}

/// Scripted DOM engine: a selector-to-element map plus failure switches.
///
/// Records every text handed to [`DomEngine::parse`], so tests can assert
/// what the analysis engine actually fed the parser (e.g. neutralized PHP).
#[derive(Debug, Default)]
pub struct FakeDomEngine {
    elements: Vec<(String, FakeElement)>,
    fail_parse: bool,
    fail_injection: bool,
    parsed_texts: Mutex<Vec<String>>,
}

impl FakeDomEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the element returned for `selector`.
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, element: FakeElement) -> Self {
        self.elements.push((selector.into(), element));
        self
    }

    /// Make every parse fail.
    #[must_use]
    pub const fn failing_parse(mut self) -> Self {
        self.fail_parse = true;
        self
    }

    /// Make runtime injection fail on every parsed document.
    #[must_use]
    pub const fn failing_injection(mut self) -> Self {
        self.fail_injection = true;
        self
    }

    /// Texts handed to `parse`, in call order.
    #[must_use]
    pub fn parsed_texts(&self) -> Vec<String> {
        self.parsed_texts.lock().clone()
    }
}

impl DomEngine for FakeDomEngine {
    fn parse(&self, text: &str, base_uri: &str) -> Result<Box<dyn DomDocument>, AnalysisError> {
        self.parsed_texts.lock().push(text.to_string());
        if self.fail_parse {
            return Err(AnalysisError::DomConstruction(format!(
                "scripted parse failure for {base_uri}"
            )));
        }
        Ok(Box::new(FakeDocument {
            elements: self.elements.clone(),
            fail_injection: self.fail_injection,
        }))
    }
}

struct FakeDocument {
    elements: Vec<(String, FakeElement)>,
    fail_injection: bool,
}

impl DomDocument for FakeDocument {
    fn query_selector(&self, selector: &str) -> Option<Box<dyn DomElement + '_>> {
        self.elements
            .iter()
            .find(|(key, _)| key == selector)
            .map(|(_, element)| Box::new(element.clone()) as Box<dyn DomElement>)
    }

    fn inject_rule_runtime(&self) -> Result<(), AnalysisError> {
        if self.fail_injection {
            Err(AnalysisError::RuntimeInjection(
                "scripted injection failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
