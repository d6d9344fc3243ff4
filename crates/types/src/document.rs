//! Document identity and language types.

use std::sync::Arc;

/// Stable identity of a document, as supplied by the editor host.
///
/// Cheap to clone; used as the key for all per-document state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentUri(Arc<str>);

impl DocumentUri {
    /// Create a URI from any string-like value.
    #[must_use]
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    /// The URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// Language kind of an analyzed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Plain markup.
    Html,
    /// Markup with embedded server-side script blocks that must be
    /// neutralized before parsing.
    Php,
}

impl Language {
    /// Map an editor language id onto a supported language kind.
    ///
    /// Returns `None` for language ids the analyzer does not understand;
    /// whether such documents are analyzed at all is a settings decision
    /// made by the scheduler.
    #[must_use]
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id {
            "html" => Some(Self::Html),
            "php" => Some(Self::Php),
            _ => None,
        }
    }

    /// The canonical editor language id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Php => "php",
        }
    }
}
