/// Command-line parsing and dispatch
pub mod cli;
/// Compile-time constants
pub mod configuration;
/// Error type and helpers
pub mod error;
/// PNG import and export
pub mod image;
/// Terminal progress bars
pub mod progress;
