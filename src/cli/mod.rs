//! Command-line interface for textlens.

mod commands;
pub mod icons;
pub mod progress;

pub use commands::{is_verbose, run};
