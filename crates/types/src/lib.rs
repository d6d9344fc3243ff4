//! Foundation types for the accessibility analyzer.
//!
//! This crate provides shared types used across the analyzer stack.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **Document types**: [`DocumentUri`], [`Language`]
//! - **Position types**: [`Position`], [`Range`], [`OffsetRange`], [`LineIndex`]
//! - **Severity types**: [`Severity`], [`Impact`]
//! - **Result types**: [`Violation`], [`ViolationNode`], [`Diagnostic`]

mod document;
mod position;
mod severity;
mod violation;

pub use document::{DocumentUri, Language};
pub use position::{LineIndex, OffsetRange, Position, Range};
pub use severity::{Impact, Severity};
pub use violation::{Diagnostic, SelectorFragment, Violation, ViolationNode};
