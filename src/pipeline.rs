// src/pipeline.rs
//! One-call batch pipeline: RawArticle[] → EnrichedArticle[] → RiskRecord[].

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::enrich::{EnrichedArticle, Enricher};
use crate::ingest::types::RawArticle;
use crate::lexicon::Lexicon;
use crate::nlp::{EntityExtractor, PolarityScorer};
use crate::risk::{aggregate, RiskRecord};

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub articles: Vec<EnrichedArticle>,
    pub risks: Vec<RiskRecord>,
}

pub struct Pipeline {
    lexicon: Lexicon,
    ner: Box<dyn EntityExtractor>,
    polarity: Box<dyn PolarityScorer>,
}

impl Pipeline {
    /// `lexicon` should already be normalized (the loaders return it that way).
    pub fn new(
        lexicon: Lexicon,
        ner: Box<dyn EntityExtractor>,
        polarity: Box<dyn PolarityScorer>,
    ) -> Self {
        Self {
            lexicon,
            ner,
            polarity,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn run(&self, raw: &[RawArticle]) -> Result<PipelineOutput> {
        self.run_at(raw, Utc::now())
    }

    /// Deterministic variant: same input and capabilities give identical output.
    pub fn run_at(&self, raw: &[RawArticle], enriched_at: DateTime<Utc>) -> Result<PipelineOutput> {
        let enricher = Enricher::new(&self.lexicon, self.ner.as_ref(), self.polarity.as_ref());
        let articles = enricher.enrich_at(raw, enriched_at)?;
        let risks = aggregate(&articles);
        Ok(PipelineOutput { articles, risks })
    }
}
