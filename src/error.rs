use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures surfaced by loading, configuration and parser setup.
///
/// Per-issue data problems are never errors; they are defaulted where they
/// are read.
#[derive(Error, Debug)]
pub enum Error {
    #[error("scan input is not a sequence of issues or pages (found {found})")]
    NotIterable { found: &'static str },

    #[error("invalid JSON in {label}: {source}")]
    Json {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad input pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no scan files matched: {0}")]
    NoInputs(String),

    #[error("invalid pattern for rule '{rule}': {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{rule}': {reason}")]
    RuleGroups { rule: String, reason: String },

    #[error("invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
