//! Shared CLI presentation utilities.
//!
//! Format-only: no domain transforms here.

pub mod drill_view;
pub mod tables;

pub use drill_view::{DrillKey, DrillView, drill_key};
pub use tables::{format_optional, print_separator, truncate_string};
