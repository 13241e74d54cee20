//! Publine Core - Common infrastructure for literature pipelines
//!
//! Shared HTTP client and runtime, logging, progress bars, and the CSV
//! output sink.

pub mod http;
pub mod logging;
pub mod progress;
pub mod sink;

// Re-exports for convenience
pub use http::{HttpError, get_text};
pub use logging::init_logging;
pub use progress::ProgressContext;
pub use sink::CsvSink;
