// src/output.rs
//! Flat-file persistence for enriched articles and risk records.
//!
//! JSON keeps list fields as native arrays. CSV joins them with ", " and
//! writes `-` for an empty list or a missing phrase.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::enrich::EnrichedArticle;
use crate::risk::RiskRecord;

/// Placeholder for an empty list or absent value in flat output.
pub const EMPTY_FIELD: &str = "-";

/// Join with ", "; an empty list becomes `-`.
pub fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY_FIELD.to_string()
    } else {
        items.join(", ")
    }
}

/// Flat row for one risk record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskRow {
    #[serde(rename = "Economy")]
    pub economy: String,
    #[serde(rename = "Workstream")]
    pub workstream: String,
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "Justification")]
    pub justification: String,
}

impl From<&RiskRecord> for RiskRow {
    fn from(r: &RiskRecord) -> Self {
        Self {
            economy: r.economy.clone(),
            workstream: r.workstream.clone(),
            scenario: r.scenario.to_string(),
            justification: r.justification.join("; "),
        }
    }
}

/// Flat row for one enriched article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRow {
    pub title: String,
    pub link: String,
    pub published: String,
    pub summary: String,
    pub source: String,
    pub source_type: String,
    pub economy: String,
    pub workstreams: String,
    pub sentiment: String,
    pub aligned_with_us: String,
    pub matched_alignment_phrase: String,
    pub people: String,
    pub leadership_terms: String,
    pub reform_themes: String,
    pub matched_us_objective: String,
    pub timestamp: String,
}

impl From<&EnrichedArticle> for ArticleRow {
    fn from(a: &EnrichedArticle) -> Self {
        Self {
            title: a.title.clone(),
            link: a.link.clone(),
            published: a.published.clone(),
            summary: a.summary.clone(),
            source: a.source_name.clone(),
            source_type: a.source_type.to_string(),
            economy: a.economy.clone(),
            workstreams: a.workstreams.joined(),
            sentiment: a.sentiment.to_string(),
            aligned_with_us: a.aligned_with_us.to_string(),
            matched_alignment_phrase: a
                .matched_alignment_phrase
                .clone()
                .unwrap_or_else(|| EMPTY_FIELD.to_string()),
            people: join_or_dash(&a.people),
            leadership_terms: join_or_dash(&a.leadership_terms),
            reform_themes: join_or_dash(&a.reform_themes),
            matched_us_objective: a
                .matched_us_objective
                .clone()
                .unwrap_or_else(|| EMPTY_FIELD.to_string()),
            timestamp: a.enriched_at.to_rfc3339(),
        }
    }
}

pub fn write_articles_json(path: &Path, articles: &[EnrichedArticle]) -> Result<()> {
    write_json(path, articles)
}

pub fn write_articles_csv(path: &Path, articles: &[EnrichedArticle]) -> Result<()> {
    write_csv(path, articles.iter().map(ArticleRow::from))
}

pub fn write_risk_json(path: &Path, records: &[RiskRecord]) -> Result<()> {
    let rows: Vec<RiskRow> = records.iter().map(RiskRow::from).collect();
    write_json(path, &rows)
}

pub fn write_risk_csv(path: &Path, records: &[RiskRecord]) -> Result<()> {
    write_csv(path, records.iter().map(RiskRow::from))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut w = create(path)?;
    serde_json::to_writer_pretty(&mut w, value)
        .with_context(|| format!("serializing {}", path.display()))?;
    w.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

fn write_csv<R, I>(path: &Path, rows: I) -> Result<()>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut wtr = csv::Writer::from_writer(create(path)?);
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("writing row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::Scenario;

    #[test]
    fn join_uses_dash_for_empty() {
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(
            join_or_dash(&["minister".to_string(), "director".to_string()]),
            "minister, director"
        );
    }

    #[test]
    fn risk_row_joins_trail_with_semicolons() {
        let rec = RiskRecord {
            economy: "Japan".into(),
            workstream: "Cybersecurity".into(),
            score: 2,
            justification: vec!["Positive sentiment".into(), "U.S. cooperation".into()],
            scenario: Scenario::Optimistic,
        };
        let row = RiskRow::from(&rec);
        assert_eq!(row.scenario, "Optimistic");
        assert_eq!(row.justification, "Positive sentiment; U.S. cooperation");
    }
}
