//! Input/output, rendering, configuration and error handling

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Crate error type
pub mod error;
/// Correlation profile plots
pub mod graph;
/// Image loading, saving and output naming
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Grid overlay rendering
pub mod overlay;
/// Batch progress display
pub mod progress;
