//! Skywatch Common Library
//!
//! Shared error handling and logging bootstrap for the Skywatch workspace.
//!
//! # Overview
//!
//! This crate provides the functionality used by both the ingestion
//! pipelines and the HTTP server:
//!
//! - **Error Handling**: the [`IngestError`] sum type every pipeline entry
//!   point returns, so callers must handle both outcomes explicitly
//! - **Logging**: `tracing`-based logging configured from the environment

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{IngestError, Result};
