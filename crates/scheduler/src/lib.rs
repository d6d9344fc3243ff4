//! Per-document validation scheduling.
//!
//! The scheduler sits between the editor host's document lifecycle events
//! and the analysis engine. Per document URI it enforces:
//!
//! - debounce-on-type with classic timer re-arming,
//! - at most one in-flight analysis, with a queued follow-up run when an
//!   edit arrives mid-flight,
//! - enablement, language and file-size gates that clear diagnostics
//!   explicitly instead of going silent,
//! - stale-result suppression by captured document version.
//!
//! Concurrency is logical: multiple documents may be mid-analysis at once,
//! but each URI's runs are strictly serialized through its state slot. The
//! state slots are sharded by URI in a `DashMap` and need no cross-URI
//! coordination.

mod host;
mod scheduler;
mod state;

pub use host::{EditorHost, LogLevel};
pub use scheduler::ValidationScheduler;
pub use state::ValidationState;
