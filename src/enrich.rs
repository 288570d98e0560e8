//! # Article Enricher
//! Runs the source classifier, economy resolver and tag extractor over a
//! batch of raw articles, one `EnrichedArticle` per usable input.
//!
//! Articles whose title and summary are both blank after trimming are
//! dropped silently. Output order matches input order.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::economy::EconomyResolver;
use crate::ingest::types::RawArticle;
use crate::lexicon::Lexicon;
use crate::nlp::{EntityExtractor, PolarityScorer};
use crate::source::{classify_with, SourceType};
use crate::tags::{content_of, Alignment, Sentiment, TagExtractor, Workstreams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub published: String,
    pub source_name: String,
    pub source_type: SourceType,
    pub economy: String,
    pub workstreams: Workstreams,
    pub sentiment: Sentiment,
    pub aligned_with_us: Alignment,
    pub matched_alignment_phrase: Option<String>,
    pub people: Vec<String>,
    pub leadership_terms: Vec<String>,
    pub reform_themes: Vec<String>,
    pub matched_us_objective: Option<String>,
    /// Provenance only; no later stage reads it.
    pub enriched_at: DateTime<Utc>,
}

pub struct Enricher<'a> {
    lexicon: &'a Lexicon,
    ner: &'a dyn EntityExtractor,
    resolver: EconomyResolver<'a>,
    tags: TagExtractor<'a>,
}

impl<'a> Enricher<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        ner: &'a dyn EntityExtractor,
        polarity: &'a dyn PolarityScorer,
    ) -> Self {
        Self {
            lexicon,
            ner,
            resolver: EconomyResolver::new(lexicon),
            tags: TagExtractor::new(lexicon, ner, polarity),
        }
    }

    /// Enrich a batch, stamping every record with the current time.
    pub fn enrich(&self, raw: &[RawArticle]) -> Result<Vec<EnrichedArticle>> {
        self.enrich_at(raw, Utc::now())
    }

    /// Enrich a batch with a fixed provenance timestamp.
    pub fn enrich_at(
        &self,
        raw: &[RawArticle],
        enriched_at: DateTime<Utc>,
    ) -> Result<Vec<EnrichedArticle>> {
        crate::telemetry::ensure_metrics_described();

        let mut out = Vec::with_capacity(raw.len());
        let mut skipped = 0usize;
        for (idx, article) in raw.iter().enumerate() {
            match self
                .enrich_one(article, enriched_at)
                .with_context(|| format!("enriching article #{idx} from {}", article.source_name))?
            {
                Some(enriched) => out.push(enriched),
                None => skipped += 1,
            }
        }

        counter!("enrich_articles_total").increment(out.len() as u64);
        counter!("enrich_skipped_total").increment(skipped as u64);
        tracing::info!(
            target: "enrich",
            input = raw.len(),
            enriched = out.len(),
            skipped,
            "enrichment pass finished"
        );
        Ok(out)
    }

    /// `None` when the article has neither title nor summary.
    pub fn enrich_one(
        &self,
        raw: &RawArticle,
        enriched_at: DateTime<Utc>,
    ) -> Result<Option<EnrichedArticle>> {
        let title = raw.title.trim();
        let summary = raw.summary.trim();
        if title.is_empty() && summary.is_empty() {
            tracing::debug!(target: "enrich", link = %raw.link, "blank article dropped");
            return Ok(None);
        }

        let content = content_of(title, summary);
        // One extractor call serves both people and the economy fallback.
        let entities = self.ner.extract_entities(&content)?;
        let economy = self
            .resolver
            .resolve_with(&content, || Ok(entities.clone()))?;
        let tags = self.tags.extract_with_entities(&content, &entities)?;

        Ok(Some(EnrichedArticle {
            title: title.to_string(),
            summary: summary.to_string(),
            link: raw.link.trim().to_string(),
            published: raw.published.clone(),
            source_name: raw.source_name.clone(),
            source_type: classify_with(&raw.source_name, &self.lexicon.source_rules),
            economy,
            workstreams: tags.workstreams,
            sentiment: tags.sentiment,
            aligned_with_us: tags.aligned_with_us,
            matched_alignment_phrase: tags.matched_alignment_phrase,
            people: tags.people,
            leadership_terms: tags.leadership_terms,
            reform_themes: tags.reform_themes,
            matched_us_objective: tags.matched_us_objective,
            enriched_at,
        }))
    }
}
