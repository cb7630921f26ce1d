//! CLI commands
//!
//! Command implementations for the `subaudit` binary.

mod check;
pub mod style;

pub use check::{CheckOptions, run_check};
