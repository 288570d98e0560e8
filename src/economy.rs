//! # Entity & Economy Resolver
//! Picks the single most likely APEC economy for an article.
//!
//! Two phases, the first match wins:
//! 1) capital/city substring scan over the lower-cased text, in lexicon order;
//! 2) GPE entities from the extractor, checked against the economy list
//!    (entities in extraction order, economies in list order).
//!
//! Matching is plain substring containment, so "tokyo" also hits inside a
//! longer word. The result is always a listed economy or `"Unknown"`.

use anyhow::Result;

use crate::lexicon::Lexicon;
use crate::nlp::{Entity, EntityExtractor, EntityLabel};

pub const UNKNOWN_ECONOMY: &str = "Unknown";

/// One-shot resolution against `lexicon`.
pub fn resolve_economy(
    lexicon: &Lexicon,
    text: &str,
    ner: &dyn EntityExtractor,
) -> Result<String> {
    EconomyResolver::new(lexicon).resolve(text, ner)
}

pub struct EconomyResolver<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> EconomyResolver<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Resolve `text`, calling the extractor only when no capital matches.
    pub fn resolve(&self, text: &str, ner: &dyn EntityExtractor) -> Result<String> {
        self.resolve_with(text, || ner.extract_entities(text))
    }

    /// Same as `resolve`, with the entity source supplied lazily (lets the
    /// caller reuse entities it already extracted for the same text).
    pub fn resolve_with<F>(&self, text: &str, entities: F) -> Result<String>
    where
        F: FnOnce() -> Result<Vec<Entity>>,
    {
        if text.trim().is_empty() {
            return Ok(UNKNOWN_ECONOMY.to_string());
        }

        if let Some(economy) = self.match_capital(text) {
            return Ok(economy.to_string());
        }

        let entities = entities()?;
        Ok(self
            .match_entities(&entities)
            .unwrap_or(UNKNOWN_ECONOMY)
            .to_string())
    }

    /// Phase 1: first capital (lexicon order) found anywhere in the text.
    pub fn match_capital(&self, text: &str) -> Option<&'a str> {
        let lexicon: &'a Lexicon = self.lexicon;
        let lower = text.to_lowercase();
        lexicon
            .capitals
            .iter()
            .find(|rule| lower.contains(rule.city.as_str()))
            .map(|rule| rule.economy.as_str())
    }

    /// Phase 2: first listed economy named inside a GPE entity.
    pub fn match_entities(&self, entities: &[Entity]) -> Option<&'a str> {
        let lexicon: &'a Lexicon = self.lexicon;
        entities
            .iter()
            .filter(|e| e.label == EntityLabel::Gpe)
            .find_map(|e| {
                let span = e.text.to_lowercase();
                lexicon
                    .economies
                    .iter()
                    .find(|eco| span.contains(eco.to_lowercase().as_str()))
                    .map(String::as_str)
            })
    }
}
