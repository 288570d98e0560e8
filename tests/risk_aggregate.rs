// tests/risk_aggregate.rs
use apec_signals::enrich::EnrichedArticle;
use apec_signals::risk::{aggregate, RiskAggregator, RiskRecord, Scenario};
use apec_signals::source::SourceType;
use apec_signals::tags::{Alignment, Sentiment, Workstreams};
use chrono::{TimeZone, Utc};

fn article(
    economy: &str,
    workstreams: &[&str],
    sentiment: Sentiment,
    aligned: Alignment,
) -> EnrichedArticle {
    EnrichedArticle {
        title: format!("{economy} item"),
        summary: String::new(),
        link: String::new(),
        published: String::new(),
        source_name: "Test Feed".into(),
        source_type: SourceType::Media,
        economy: economy.into(),
        workstreams: Workstreams::from(
            workstreams.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        ),
        sentiment,
        aligned_with_us: aligned,
        matched_alignment_phrase: None,
        people: vec![],
        leadership_terms: vec![],
        reform_themes: vec![],
        matched_us_objective: None,
        enriched_at: Utc.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap(),
    }
}

fn find<'a>(records: &'a [RiskRecord], economy: &str, ws: &str) -> &'a RiskRecord {
    records
        .iter()
        .find(|r| r.economy == economy && r.workstream == ws)
        .unwrap_or_else(|| panic!("missing record {economy}/{ws}"))
}

#[test]
fn opposite_articles_cancel_out() {
    let records = aggregate(&[
        article("Japan", &["Cybersecurity"], Sentiment::Positive, Alignment::Yes),
        article("Japan", &["Cybersecurity"], Sentiment::Negative, Alignment::No),
    ]);
    assert_eq!(records.len(), 1);
    let r = find(&records, "Japan", "Cybersecurity");
    assert_eq!(r.score, 0);
    assert_eq!(r.scenario, Scenario::Baseline);
    assert_eq!(
        r.justification,
        vec![
            "Positive sentiment",
            "U.S. cooperation",
            "Negative sentiment",
            "Misalignment with U.S."
        ]
    );
}

#[test]
fn unknown_economy_contributes_nothing() {
    let records = aggregate(&[article(
        "Unknown",
        &["Digital Trade"],
        Sentiment::Positive,
        Alignment::Yes,
    )]);
    assert!(records.is_empty());
}

#[test]
fn uncategorized_contributes_nothing() {
    let records = aggregate(&[
        article("Chile", &[], Sentiment::Positive, Alignment::Yes),
        article("Chile", &["Uncategorized"], Sentiment::Negative, Alignment::No),
    ]);
    assert!(records.is_empty());
}

#[test]
fn each_workstream_gets_the_same_adjustments() {
    let records = aggregate(&[
        article(
            "Vietnam",
            &["Digital Trade", "Supply Chain Connectivity"],
            Sentiment::Positive,
            Alignment::Yes,
        ),
        article("Vietnam", &["Digital Trade"], Sentiment::Positive, Alignment::Unclear),
    ]);
    assert_eq!(records.len(), 2);

    let dt = find(&records, "Vietnam", "Digital Trade");
    assert_eq!(dt.score, 3);
    assert_eq!(dt.scenario, Scenario::Optimistic);
    assert_eq!(dt.justification.len(), 3);

    let sc = find(&records, "Vietnam", "Supply Chain Connectivity");
    assert_eq!(sc.score, 2);
    assert_eq!(sc.scenario, Scenario::Optimistic);
}

#[test]
fn pessimistic_at_minus_two() {
    let records = aggregate(&[article(
        "Russia",
        &["Water Quality"],
        Sentiment::Negative,
        Alignment::No,
    )]);
    let r = find(&records, "Russia", "Water Quality");
    assert_eq!(r.score, -2);
    assert_eq!(r.scenario, Scenario::Pessimistic);
}

#[test]
fn neutral_unclear_article_opens_an_empty_record() {
    let records = aggregate(&[article(
        "Peru",
        &["Technical Barriers to Trade"],
        Sentiment::Neutral,
        Alignment::Unclear,
    )]);
    let r = find(&records, "Peru", "Technical Barriers to Trade");
    assert_eq!(r.score, 0);
    assert!(r.justification.is_empty());
    assert_eq!(r.scenario, Scenario::Baseline);
}

#[test]
fn incremental_fold_matches_batch() {
    let batch = vec![
        article("Japan", &["Cybersecurity"], Sentiment::Positive, Alignment::Yes),
        article("China", &["Digital Trade"], Sentiment::Negative, Alignment::Unclear),
        article("Japan", &["Cybersecurity"], Sentiment::Neutral, Alignment::No),
    ];
    let mut agg = RiskAggregator::new();
    for a in &batch {
        agg.add(a);
    }
    assert_eq!(agg.finish(), aggregate(&batch));
}
