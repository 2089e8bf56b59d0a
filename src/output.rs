//! Output rendering for aggregates.
//!
//! Supports `human` (default), `json` and `markdown`. The JSON form carries
//! the derived per-criterion counts and status next to the bucket issues.

use crate::models::{AnalysisAggregate, CriterionBucket, Status};
use crate::utils::{pluralize, use_colors};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::NotCompliant => "✖",
        Status::Warning => "▲",
        Status::Compliant => "✔",
    }
}

/// Print an aggregate in the requested format.
pub fn print_aggregate(res: &AnalysisAggregate, output: &str, top: usize) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_aggregate_json(res, top))
                .unwrap_or_else(|_| "{}".to_string())
        ),
        "markdown" | "md" => print!("{}", render_markdown(res, top)),
        _ => print_human(res, output, top),
    }
}

fn print_human(res: &AnalysisAggregate, output: &str, top: usize) {
    let color = use_colors(output);
    for b in res.by_criterion.values() {
        let status = b.status();
        let icon = status_icon(status);
        let (icon, label) = if color {
            match status {
                Status::NotCompliant => (
                    icon.red().to_string(),
                    format!("⟦{}⟧", status).red().bold().to_string(),
                ),
                Status::Warning => (
                    icon.yellow().to_string(),
                    format!("⟦{}⟧", status).yellow().bold().to_string(),
                ),
                Status::Compliant => (
                    icon.green().to_string(),
                    format!("⟦{}⟧", status).green().bold().to_string(),
                ),
            }
        } else {
            (icon.to_string(), format!("⟦{}⟧", status))
        };
        let id = if color {
            b.criterion.as_str().bold().to_string()
        } else {
            b.criterion.to_string()
        };
        println!(
            "{} {} {} errors={} warnings={} elements={}",
            icon,
            label,
            id,
            b.error_count(),
            b.warning_count(),
            b.total_affected_elements()
        );
        for is in b.top_issues(top) {
            println!(
                "    ❲{}❳ {} — {} ({})",
                is.kind,
                is.message,
                is.selector,
                is.affected_elements
            );
        }
    }
    let st = res.status_summary();
    let imp = &res.issues_by_impact;
    let summary = format!(
        "— Summary — {} {} scanned, {} issues ({} unmatched); criteria: not compliant={} warning={} compliant={}; impact: critical={} serious={} moderate={} minor={}",
        res.pages,
        pluralize("page", res.pages),
        res.total_issues,
        res.unmatched,
        st.not_compliant,
        st.warning,
        st.compliant,
        imp.critical,
        imp.serious,
        imp.moderate,
        imp.minor
    );
    if color {
        println!("{}", summary.bold());
    } else {
        println!("{}", summary);
    }
}

fn bucket_json(b: &CriterionBucket, top: usize) -> JsonVal {
    json!({
        "criterion": b.criterion,
        "status": b.status(),
        "errorCount": b.error_count(),
        "warningCount": b.warning_count(),
        "totalAffectedElements": b.total_affected_elements(),
        "topIssues": b.top_issues(top),
        "issues": b.issues,
    })
}

/// Compose aggregate JSON object (pure) for testing/snapshot purposes.
pub fn compose_aggregate_json(res: &AnalysisAggregate, top: usize) -> JsonVal {
    let by_criterion: serde_json::Map<String, JsonVal> = res
        .by_criterion
        .iter()
        .map(|(id, b)| (id.to_string(), bucket_json(b, top)))
        .collect();
    json!({
        "byCriterion": by_criterion,
        "issuesByImpact": res.issues_by_impact,
        "summary": {
            "pages": res.pages,
            "totalIssues": res.total_issues,
            "unmatched": res.unmatched,
            "criteria": res.status_summary(),
        },
    })
}

fn md_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Render the criterion and impact tables as Markdown.
pub fn render_markdown(res: &AnalysisAggregate, top: usize) -> String {
    let mut out = String::new();
    out.push_str("| Criterion | Status | Errors | Warnings | Elements | Top issues |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for b in res.by_criterion.values() {
        let examples: Vec<String> = b
            .top_issues(top)
            .iter()
            .map(|i| format!("{} ({})", md_cell(&i.message), i.affected_elements))
            .collect();
        out.push_str(&format!(
            "| {} | {} {} | {} | {} | {} | {} |\n",
            b.criterion,
            status_icon(b.status()),
            b.status(),
            b.error_count(),
            b.warning_count(),
            b.total_affected_elements(),
            examples.join("<br>")
        ));
    }
    let imp = &res.issues_by_impact;
    out.push('\n');
    out.push_str("| Critical | Serious | Moderate | Minor |\n");
    out.push_str("|---|---|---|---|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} |\n",
        imp.critical, imp.serious, imp.moderate, imp.minor
    ));
    out
}
