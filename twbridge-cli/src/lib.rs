//! CLI library for testing purposes

pub mod export;
pub mod generate;
pub mod logging;

pub use export::{ExportOptions, run_export_command};
pub use generate::{GenerateOptions, run_generate_command};
