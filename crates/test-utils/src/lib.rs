//! Shared test doubles for the analyzer crates.
//!
//! The real DOM and rule engines are external collaborators; tests exercise
//! the pipeline against scripted stand-ins instead:
//!
//! - [`FakeDomEngine`] - selector-to-element map with optional recorded
//!   source locations, plus failure switches for parse and runtime injection
//! - [`ScriptedRuleEngine`] - returns a fixed violation list, records the
//!   rule selections it was invoked with, and tracks run overlap
//! - [`RecordingProgress`] - captures progress checkpoints in order
//! - [`RecordingHost`] - editor host capturing published diagnostics and
//!   progress notifications

mod dom;
mod host;
mod progress;
mod rules;

pub use dom::{FakeDomEngine, FakeElement};
pub use host::RecordingHost;
pub use progress::RecordingProgress;
pub use rules::ScriptedRuleEngine;

use a11y_types::{Impact, Violation, ViolationNode};

/// Build a violation with one node per selector, for test brevity.
#[must_use]
pub fn violation(rule_id: &str, impact: Option<Impact>, selectors: &[&str]) -> Violation {
    Violation {
        rule_id: rule_id.to_string(),
        message: format!("{rule_id} failed"),
        help_url: format!("https://example.com/rules/{rule_id}"),
        impact,
        nodes: selectors
            .iter()
            .map(|selector| ViolationNode::selector(*selector))
            .collect(),
    }
}
