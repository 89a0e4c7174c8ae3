//! Cross-cutting error types for Ferry.
//!
//! Domain-specific errors (e.g., `PlatformError`, `SourceError`) are defined in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Ferry crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A mapping configuration is unusable as written.
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    /// A normalized record lacks a value the builder needs.
    #[error("Record {index}: field '{field}' {reason}")]
    MissingField {
        index: usize,
        field: String,
        reason: String,
    },
}
