//! actionseq – action-sequence backed filter sources and bean utilities
//!
//! This crate provides:
//! - Filter definitions whose rows come from running an action sequence
//!   and picking a result set out of its named outputs
//! - The solution-engine, runtime-context and result-set seams those
//!   sources execute against, plus an in-memory engine
//! - A bean property-setting utility whose failure handling is delegated
//!   to a caller-supplied callback

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Bean property assignment and failure callbacks
pub mod beans;
/// Extractor configuration
pub mod config;
/// Action descriptors
pub mod descriptor;
/// Solution engine abstractions
pub mod engine;
/// Error types
pub mod error;
/// Filter definitions and sources
pub mod filter;
/// Tabular result sets
pub mod resultset;
/// Session handle
pub mod session;
/// Shared helpers
pub mod util;

// Re-export key types for convenience
pub use config::ExtractorConfig;
pub use descriptor::ActionDescriptor;
pub use engine::EngineRegistry;
pub use error::{Error, Result};
pub use filter::{ActionFilterSource, FilterDefinition};

/// Current version of actionseq
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
