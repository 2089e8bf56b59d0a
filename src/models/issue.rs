//! Scanner-side input records: one raw issue per detected problem, grouped
//! into pages.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Severity tag reported by the scanner.
///
/// Matching is exact: `"Error"` is not an error, it lands in `Other`.
pub enum IssueType {
    Error,
    Warning,
    Notice,
    Other(String),
    #[default]
    Missing,
}

impl IssueType {
    pub fn as_str(&self) -> &str {
        match self {
            IssueType::Error => "error",
            IssueType::Warning => "warning",
            IssueType::Notice => "notice",
            IssueType::Other(s) => s.as_str(),
            IssueType::Missing => "",
        }
    }
}

impl From<&str> for IssueType {
    fn from(s: &str) -> Self {
        match s {
            "error" => IssueType::Error,
            "warning" => IssueType::Warning,
            "notice" => IssueType::Notice,
            "" => IssueType::Missing,
            other => IssueType::Other(other.to_string()),
        }
    }
}

impl From<String> for IssueType {
    fn from(s: String) -> Self {
        IssueType::from(s.as_str())
    }
}

impl From<IssueType> for String {
    fn from(t: IssueType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn one() -> u64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One issue as emitted by the scanner. Every field is optional on the wire.
pub struct RawIssue {
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "type")]
    pub kind: IssueType,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub context: String,
    #[serde(default = "one", alias = "affected_elements")]
    pub affected_elements: u64,
}

impl Default for RawIssue {
    fn default() -> Self {
        RawIssue {
            code: String::new(),
            kind: IssueType::Missing,
            message: String::new(),
            selector: String::new(),
            context: String::new(),
            affected_elements: 1,
        }
    }
}

impl RawIssue {
    /// Shorthand used by adapters and tests.
    pub fn new(code: &str, kind: &str, message: &str, selector: &str) -> Self {
        RawIssue {
            code: code.to_string(),
            kind: IssueType::from(kind),
            message: message.to_string(),
            selector: selector.to_string(),
            ..RawIssue::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Scanner output for a single page. `url` is absent for flat inputs.
pub struct PageScan {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

impl PageScan {
    pub fn new(url: Option<&str>, issues: Vec<RawIssue>) -> Self {
        PageScan {
            url: url.map(str::to_string),
            issues,
        }
    }
}
