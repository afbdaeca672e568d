//! Songlake ETL Library
//!
//! Converts a raw music-catalog feed and an application event log into a
//! five-table analytical star schema. This library exposes the internal
//! modules for testing and potential reuse.

pub mod config;
pub mod context;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod schema;
pub mod stats;
pub mod tables;

// Re-export commonly used types for convenience
pub use config::{CliConfig, EtlConfig, FileConfig};
pub use context::EtlContext;
pub use stats::{RecordingReporter, StageReporter, TracingReporter};
