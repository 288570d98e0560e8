//! # Risk Aggregator
//! Folds enriched articles into per-(economy, workstream) risk records.
//!
//! Per article and per workstream:
//! - sentiment Positive +1 / Negative -1 (Neutral: nothing),
//! - alignment Yes +1 / No -1 (Unclear: nothing),
//!
//! each adjustment appending its reason to the record's trail. Articles with
//! an `Unknown` economy or no real workstream contribute nothing. Once every
//! article is folded in, the final score picks the scenario.

use metrics::counter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::economy::UNKNOWN_ECONOMY;
use crate::enrich::EnrichedArticle;
use crate::tags::{Alignment, Sentiment};

/// Scores at or below this are `Pessimistic`.
pub const PESSIMISTIC_MAX: i32 = -2;
/// Scores at or above this are `Optimistic`.
pub const OPTIMISTIC_MIN: i32 = 2;

pub const REASON_POSITIVE: &str = "Positive sentiment";
pub const REASON_NEGATIVE: &str = "Negative sentiment";
pub const REASON_ALIGNED: &str = "U.S. cooperation";
pub const REASON_MISALIGNED: &str = "Misalignment with U.S.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    Optimistic,
    Baseline,
    Pessimistic,
}

impl Scenario {
    pub fn from_score(score: i32) -> Self {
        if score <= PESSIMISTIC_MAX {
            Scenario::Pessimistic
        } else if score >= OPTIMISTIC_MIN {
            Scenario::Optimistic
        } else {
            Scenario::Baseline
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Optimistic => "Optimistic",
            Scenario::Baseline => "Baseline",
            Scenario::Pessimistic => "Pessimistic",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub economy: String,
    pub workstream: String,
    pub score: i32,
    pub justification: Vec<String>,
    pub scenario: Scenario,
}

#[derive(Debug, Default)]
struct Accum {
    score: i32,
    justification: Vec<String>,
}

/// Incremental fold; call `add` per article, then `finish` once.
#[derive(Debug, Default)]
pub struct RiskAggregator {
    records: BTreeMap<(String, String), Accum>,
    skipped: usize,
}

impl RiskAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one article into every (economy, workstream) record it touches.
    pub fn add(&mut self, article: &EnrichedArticle) {
        let workstreams = article.workstreams.names();
        if article.economy == UNKNOWN_ECONOMY || workstreams.is_empty() {
            self.skipped += 1;
            return;
        }

        let mut adjustments: Vec<(i32, &'static str)> = Vec::with_capacity(2);
        match article.sentiment {
            Sentiment::Positive => adjustments.push((1, REASON_POSITIVE)),
            Sentiment::Negative => adjustments.push((-1, REASON_NEGATIVE)),
            Sentiment::Neutral => {}
        }
        match article.aligned_with_us {
            Alignment::Yes => adjustments.push((1, REASON_ALIGNED)),
            Alignment::No => adjustments.push((-1, REASON_MISALIGNED)),
            Alignment::Unclear => {}
        }

        for ws in workstreams {
            let acc = self
                .records
                .entry((article.economy.clone(), ws.clone()))
                .or_default();
            for (delta, reason) in &adjustments {
                acc.score += delta;
                acc.justification.push(reason.to_string());
            }
        }
    }

    /// Assign scenarios; records come out sorted by (economy, workstream).
    pub fn finish(self) -> Vec<RiskRecord> {
        counter!("risk_records_total").increment(self.records.len() as u64);
        tracing::info!(
            target: "risk",
            records = self.records.len(),
            skipped_articles = self.skipped,
            "risk aggregation finished"
        );

        self.records
            .into_iter()
            .map(|((economy, workstream), acc)| RiskRecord {
                economy,
                workstream,
                scenario: Scenario::from_score(acc.score),
                score: acc.score,
                justification: acc.justification,
            })
            .collect()
    }
}

pub fn aggregate(enriched: &[EnrichedArticle]) -> Vec<RiskRecord> {
    crate::telemetry::ensure_metrics_described();
    let mut agg = RiskAggregator::new();
    for article in enriched {
        agg.add(article);
    }
    agg.finish()
}
