//! Accessibility analysis core.
//!
//! This crate owns one analysis run: it neutralizes embedded server-side
//! script, builds a DOM through the [`DomEngine`] boundary, evaluates
//! accessibility rules through the [`RuleEngine`] boundary, and reconciles
//! each violation node back onto a character range in the original text.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler (a11y-scheduler)
//!     ↓ AnalysisRequest
//! AnalysisEngine (this crate)
//!     neutralize → parse → inject runtime → run rules → reconcile
//!     ↓
//! Vec<Diagnostic> (a11y-types)
//! ```
//!
//! The engine never returns an error to its caller: every failure class is
//! caught, logged with the document URI, and degrades to an empty or partial
//! diagnostic list. A broken analysis must not take the editor session down
//! with it.

mod dom;
mod engine;
mod error;
mod neutralize;
mod progress;
mod reconcile;
mod rules;

pub use dom::{DomDocument, DomElement, DomEngine, SourceLocation};
pub use engine::{AnalysisEngine, AnalysisRequest};
pub use error::AnalysisError;
pub use neutralize::neutralize;
pub use progress::{NullProgress, ProgressSink, ProgressStage};
pub use reconcile::{resolve_range, Resolution};
pub use rules::{RuleEngine, RuleSelection, DEFAULT_RULE_IDS, DEFAULT_TAGS};
