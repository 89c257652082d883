//! Input/output, configuration and error handling

/// Command-line interface and pipeline orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Training image decoding and generated image export
pub mod image;
/// Terminal progress display
pub mod progress;
