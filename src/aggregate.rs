//! Folding raw scanner issues into per-criterion buckets.
//!
//! Each page is analyzed on its own: codes are resolved, occurrences sharing
//! `(code, type)` collapse into one summary, and the global impact tally is
//! counted over raw occurrences. Page results are then combined with
//! `AnalysisAggregate::merge` in page order.
//!
//! A merged summary's `affected_elements` is the sum of its occurrences'
//! `affected_elements` (each 1 unless the adapter pre-aggregated).

use crate::criterion::CriterionCodeParser;
use crate::models::{
    AnalysisAggregate, CriterionBucket, ImpactTally, IssueSummary, IssueType, PageScan, RawIssue,
};
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Caller policy for the global impact tally.
pub struct ImpactPolicy {
    /// Count issues whose code resolves to no criterion.
    pub include_unmatched: bool,
    /// Count `notice` issues as `minor` instead of `moderate`.
    pub notice_as_minor: bool,
}

impl Default for ImpactPolicy {
    /// `minor` stays zero: everything that is not an error or a warning is
    /// moderate.
    fn default() -> Self {
        ImpactPolicy {
            include_unmatched: true,
            notice_as_minor: false,
        }
    }
}

impl ImpactPolicy {
    fn tally(&self, tally: &mut ImpactTally, kind: &IssueType) {
        match kind {
            IssueType::Error => tally.critical += 1,
            IssueType::Warning => tally.serious += 1,
            IssueType::Notice if self.notice_as_minor => tally.minor += 1,
            _ => tally.moderate += 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Stateless aggregator; construct per run.
pub struct ViolationAggregator {
    parser: CriterionCodeParser,
    policy: ImpactPolicy,
}

impl ViolationAggregator {
    pub fn new(parser: CriterionCodeParser, policy: ImpactPolicy) -> Self {
        ViolationAggregator { parser, policy }
    }

    /// Aggregate a flat issue list as a single unlabeled page.
    pub fn aggregate(&self, issues: &[RawIssue]) -> AnalysisAggregate {
        self.analyze_page(None, issues)
    }

    /// Aggregate page-partitioned scanner output.
    ///
    /// Pages are analyzed in parallel and merged in input order, so bucket
    /// contents keep page order then within-page order.
    pub fn aggregate_pages(&self, pages: &[PageScan]) -> AnalysisAggregate {
        pages
            .par_iter()
            .map(|p| self.analyze_page(p.url.as_deref(), &p.issues))
            .reduce(AnalysisAggregate::default, AnalysisAggregate::merge)
    }

    /// Analyze one page's issues.
    pub fn analyze_page(&self, url: Option<&str>, issues: &[RawIssue]) -> AnalysisAggregate {
        let mut out = AnalysisAggregate {
            pages: 1,
            ..AnalysisAggregate::default()
        };
        // (code, type) -> position of its summary in the bucket
        let mut seen: HashMap<(&str, &IssueType), usize> = HashMap::new();

        for issue in issues {
            out.total_issues += 1;
            let Some(criterion) = self.parser.parse(&issue.code) else {
                out.unmatched += 1;
                tracing::trace!(code = %issue.code, "no criterion for code");
                if self.policy.include_unmatched {
                    self.policy.tally(&mut out.issues_by_impact, &issue.kind);
                }
                continue;
            };
            self.policy.tally(&mut out.issues_by_impact, &issue.kind);

            let bucket = out
                .by_criterion
                .entry(criterion)
                .or_insert_with_key(|k| CriterionBucket::new(k.clone()));
            match seen.get(&(issue.code.as_str(), &issue.kind)) {
                Some(&idx) => {
                    let merged = &mut bucket.issues[idx].affected_elements;
                    *merged = merged.saturating_add(issue.affected_elements);
                }
                None => {
                    seen.insert((issue.code.as_str(), &issue.kind), bucket.issues.len());
                    bucket.issues.push(IssueSummary {
                        code: issue.code.clone(),
                        kind: issue.kind.clone(),
                        message: issue.message.clone(),
                        selector: issue.selector.clone(),
                        affected_elements: issue.affected_elements,
                        page: url.map(str::to_string),
                    });
                }
            }
        }

        tracing::debug!(
            page = url.unwrap_or("-"),
            issues = out.total_issues,
            criteria = out.by_criterion.len(),
            unmatched = out.unmatched,
            "analyzed page"
        );
        out
    }
}
