use a11ymap::input::parse_scan_json;
use a11ymap::models::ImpactTally;
use a11ymap::{CriterionCodeParser, PageScan, RawIssue, Status, ViolationAggregator};
use pretty_assertions::assert_eq;

fn aggregator() -> ViolationAggregator {
    ViolationAggregator::default()
}

#[test]
fn structured_code_resolves_and_fails_criterion() {
    let pages = parse_scan_json(
        r#"[{"code":"WCAG2AA.Principle1.Guideline1_4.1_4_3.G18.Fail","type":"error","message":"Low contrast","selector":"p.x"}]"#,
        None,
    )
    .unwrap();
    let out = aggregator().aggregate_pages(&pages);
    let b = out.bucket("1.4.3").unwrap();
    assert_eq!(b.error_count(), 1);
    assert_eq!(b.status(), Status::NotCompliant);
    assert_eq!(b.status().label(), "not compliant");
}

#[test]
fn bare_triple_uses_fallback() {
    let out = aggregator().aggregate(&[RawIssue::new("2.4.2", "warning", "Title missing", "")]);
    let b = out.bucket("2.4.2").unwrap();
    assert_eq!(b.warning_count(), 1);
    assert_eq!(b.status(), Status::Warning);
}

#[test]
fn unreferenced_code_is_excluded_from_grouping() {
    let out = aggregator().aggregate(&[RawIssue::new("no-reference-here", "error", "x", "")]);
    assert!(out.by_criterion.is_empty());
    assert_eq!(out.unmatched, 1);
}

#[test]
fn same_code_and_type_merge_across_selectors() {
    let out = aggregator().aggregate(&[
        RawIssue::new("WCAG2AA.Principle1.Guideline1_1.1_1_1.H37", "error", "alt", "img.a"),
        RawIssue::new("WCAG2AA.Principle1.Guideline1_1.1_1_1.H37", "error", "alt", "img.b"),
    ]);
    let b = out.bucket("1.1.1").unwrap();
    assert_eq!(b.issues.len(), 1);
    assert_eq!(b.issues[0].affected_elements, 2);
    assert_eq!(b.issues[0].selector, "img.a");
}

#[test]
fn empty_input_yields_empty_aggregate() {
    let out = aggregator().aggregate(&[]);
    assert!(out.by_criterion.is_empty());
    assert_eq!(
        out.issues_by_impact,
        ImpactTally {
            critical: 0,
            serious: 0,
            moderate: 0,
            minor: 0
        }
    );
}

#[test]
fn one_error_beats_five_warnings() {
    let mut issues = vec![RawIssue::new("4.1.2", "error", "name", "button")];
    for i in 0..5 {
        issues.push(RawIssue::new(&format!("4.1.2-w{}", i), "warning", "w", ""));
    }
    let out = aggregator().aggregate(&issues);
    let b = out.bucket("4.1.2").unwrap();
    assert_eq!(b.warning_count(), 5);
    assert_eq!(b.status(), Status::NotCompliant);
}

#[test]
fn page_order_does_not_change_counts() {
    let page_a = PageScan::new(
        Some("/a"),
        vec![
            RawIssue::new("1.4.3", "error", "contrast", "p"),
            RawIssue::new("1.4.3", "error", "contrast", "h1"),
            RawIssue::new("2.4.2", "warning", "title", "head"),
        ],
    );
    let page_b = PageScan::new(
        Some("/b"),
        vec![
            RawIssue::new("1.4.3", "warning", "contrast?", "a"),
            RawIssue::new("3.1.1", "notice", "lang", "html"),
        ],
    );
    let ab = aggregator().aggregate_pages(&[page_a.clone(), page_b.clone()]);
    let ba = aggregator().aggregate_pages(&[page_b, page_a]);

    let counts = |agg: &a11ymap::AnalysisAggregate| {
        agg.by_criterion
            .iter()
            .map(|(id, b)| {
                (
                    id.to_string(),
                    b.error_count(),
                    b.warning_count(),
                    b.total_affected_elements(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(counts(&ab), counts(&ba));
    assert_eq!(ab.issues_by_impact, ba.issues_by_impact);
    // first-seen order inside a bucket follows page order
    assert_eq!(ab.bucket("1.4.3").unwrap().issues[0].page.as_deref(), Some("/a"));
    assert_eq!(ba.bucket("1.4.3").unwrap().issues[0].page.as_deref(), Some("/b"));
}

#[test]
fn aggregation_is_repeatable() {
    let issues = vec![
        RawIssue::new("1.3.1", "error", "table", "td"),
        RawIssue::new("odd", "warning", "?", ""),
    ];
    let a = aggregator();
    assert_eq!(a.aggregate(&issues), a.aggregate(&issues));
}

#[test]
fn parser_contract() {
    let p = CriterionCodeParser::new();
    for (a, b, c) in [("1", "1", "1"), ("2", "5", "8"), ("4", "1", "3")] {
        let code = format!("WCAG2AAA.Principle{a}.Guideline{a}_{b}.{a}_{b}_{c}.X");
        assert_eq!(p.parse(&code).unwrap().as_str(), format!("{a}.{b}.{c}"));
    }
    assert_eq!(p.parse("see 3.3.2 and 1.1.1").unwrap().as_str(), "3.3.2");
    assert!(p.parse("Guideline-without-numbers").is_none());
}
