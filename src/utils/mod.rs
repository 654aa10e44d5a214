//! Shared table helpers
//!
//! - LazyFrame helpers: column projection with schema validation

pub mod lazy_helpers;

pub use lazy_helpers::{cast_to_string, select_required_columns};
