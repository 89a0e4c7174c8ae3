//! # ferry-import
//!
//! Moves records from an external JSON source into the content platform.
//!
//! A run validates the target content type and locale, reads the source's
//! `data` array, maps each raw record through the configured field mapping,
//! then imports every record (entry, asset, link, publish) through a bounded
//! worker pool. Per-record failures never abort the run; they are collected
//! into the [`ImportReport`].

pub mod batch;
pub mod builder;
pub mod error;
pub mod mapper;
pub mod pipeline;
pub mod report;
pub mod source;

pub use batch::{RecordOutcome, run_batch};
pub use builder::{ImportSettings, ImportedRecord, import_record};
pub use error::{ImportError, RunError, SourceError, Step};
pub use mapper::{SAMPLE_LIMIT, map_record, map_records};
pub use pipeline::{ImportPlan, RunContext, preview, run};
pub use report::{FailureDetail, ImportReport, summarize};
pub use source::Source;
