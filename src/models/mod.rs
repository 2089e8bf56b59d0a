//! Shared data models: scanner input records and the per-criterion
//! aggregate handed to renderers.

pub mod issue;

pub use issue::{IssueType, PageScan, RawIssue};

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Normalized success-criterion id, `"X.Y.Z"`.
///
/// Any numeric triple is accepted; it is not checked against the WCAG
/// catalog.
pub struct CriterionId(String);

impl CriterionId {
    /// Build from the three numeric segments as matched.
    pub fn from_segments(a: &str, b: &str, c: &str) -> Self {
        CriterionId(format!("{}.{}.{}", a, b, c))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for CriterionId {
    /// Numeric per segment so `1.4.10` follows `1.4.3`; raw text breaks ties.
    fn cmp(&self, other: &Self) -> Ordering {
        for (x, y) in self.0.split('.').zip(other.0.split('.')) {
            let o = cmp_digits(x, y);
            if o != Ordering::Equal {
                return o;
            }
        }
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for CriterionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A deduplicated issue inside a bucket.
pub struct IssueSummary {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: IssueType,
    pub message: String,
    pub selector: String,
    pub affected_elements: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
/// Display status of one criterion.
pub enum Status {
    #[serde(rename = "not compliant")]
    NotCompliant,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "compliant")]
    Compliant,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::NotCompliant => "not compliant",
            Status::Warning => "warning",
            Status::Compliant => "compliant",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// All deduplicated issues resolved to one criterion, in first-seen order.
///
/// Counts are derived from `issues` on every read.
pub struct CriterionBucket {
    pub criterion: CriterionId,
    pub issues: Vec<IssueSummary>,
}

impl CriterionBucket {
    pub fn new(criterion: CriterionId) -> Self {
        CriterionBucket {
            criterion,
            issues: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueType::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueType::Warning)
            .count()
    }

    pub fn total_affected_elements(&self) -> u64 {
        self.issues
            .iter()
            .map(|i| i.affected_elements)
            .fold(0, u64::saturating_add)
    }

    /// Any error wins over any number of warnings.
    pub fn status(&self) -> Status {
        if self.error_count() > 0 {
            Status::NotCompliant
        } else if self.warning_count() > 0 {
            Status::Warning
        } else {
            Status::Compliant
        }
    }

    /// Up to `n` issues with the most affected elements; ties keep
    /// first-seen order.
    pub fn top_issues(&self, n: usize) -> Vec<&IssueSummary> {
        let mut ranked: Vec<&IssueSummary> = self.issues.iter().collect();
        // stable sort
        ranked.sort_by(|a, b| b.affected_elements.cmp(&a.affected_elements));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Global severity tally across every raw occurrence.
pub struct ImpactTally {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl ImpactTally {
    pub fn add(&mut self, other: &ImpactTally) {
        self.critical += other.critical;
        self.serious += other.serious;
        self.moderate += other.moderate;
        self.minor += other.minor;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Criterion counts per status, for summary banners.
pub struct StatusSummary {
    pub not_compliant: usize,
    pub warning: usize,
    pub compliant: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Result of one analysis run (a page or a whole crawl).
pub struct AnalysisAggregate {
    pub by_criterion: BTreeMap<CriterionId, CriterionBucket>,
    pub issues_by_impact: ImpactTally,
    /// Raw occurrences seen, matched or not.
    pub total_issues: usize,
    /// Raw occurrences whose code resolved to no criterion.
    pub unmatched: usize,
    pub pages: usize,
}

impl AnalysisAggregate {
    /// Fold `other` into `self`, keeping `self`'s issues first.
    ///
    /// Associative: merging page aggregates one at a time or in any grouping
    /// gives the same result as aggregating all pages together.
    pub fn merge(mut self, other: AnalysisAggregate) -> AnalysisAggregate {
        for (id, bucket) in other.by_criterion {
            self.by_criterion
                .entry(id)
                .or_insert_with_key(|k| CriterionBucket::new(k.clone()))
                .issues
                .extend(bucket.issues);
        }
        self.issues_by_impact.add(&other.issues_by_impact);
        self.total_issues += other.total_issues;
        self.unmatched += other.unmatched;
        self.pages += other.pages;
        self
    }

    pub fn status_summary(&self) -> StatusSummary {
        let mut s = StatusSummary::default();
        for bucket in self.by_criterion.values() {
            match bucket.status() {
                Status::NotCompliant => s.not_compliant += 1,
                Status::Warning => s.warning += 1,
                Status::Compliant => s.compliant += 1,
            }
        }
        s
    }

    pub fn bucket(&self, id: &str) -> Option<&CriterionBucket> {
        self.by_criterion.get(&CriterionId(id.to_string()))
    }
}
