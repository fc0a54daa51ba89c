//! Input/output, configuration and error handling

/// Command-line interface
pub mod cli;
/// Algorithm constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Progress bars for batch filling
pub mod progress;
/// Plain-text grid reading and writing
pub mod text;
