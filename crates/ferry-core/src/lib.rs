//! # ferry-core
//!
//! Core types shared across all Ferry crates:
//! - Field mapping configuration (target field → external key + type tag)
//! - Normalized records produced by the field mapper
//! - Minimal rich-text documents for `RichText` fields
//! - `Link` references from entry fields to assets
//! - Cross-cutting error types

pub mod errors;
pub mod link;
pub mod mapping;
pub mod record;
pub mod rich_text;

pub use errors::CoreError;
pub use link::Link;
pub use mapping::{AssetLabels, FieldMapping, MappingConfig, RICH_TEXT};
pub use record::{MappedField, NormalizedRecord, stringify};
pub use rich_text::RichTextDocument;
