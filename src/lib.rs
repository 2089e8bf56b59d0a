//! a11ymap core library.
//!
//! Maps accessibility-scanner issues onto WCAG success criteria and
//! aggregates them into per-criterion buckets for report renderers.
//!
//! High-level modules:
//! - `criterion`: rule-code to criterion-id parsing with ordered pattern rules.
//! - `aggregate`: per-page dedup, bucket grouping, impact tallies.
//! - `models`: scanner input records and the aggregate result types.
//! - `input`: lenient loading of scanner JSON files.
//! - `config`: discovery and effective configuration resolution.
//! - `output`: human/JSON/Markdown printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: terminal helpers.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod criterion;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod utils;

pub use aggregate::{ImpactPolicy, ViolationAggregator};
pub use criterion::CriterionCodeParser;
pub use error::{Error, Result};
pub use models::{AnalysisAggregate, CriterionBucket, CriterionId, PageScan, RawIssue, Status};
