//! Common utilities for the quill HTML toolkit.
//!
//! This crate provides shared infrastructure used by the other quill crates:
//! - **Warning System** - deduplicated, colored stderr diagnostics for
//!   recoverable oddities in the input (unterminated markup, nesting limits)

pub mod warning;
