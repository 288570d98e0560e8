// src/nlp/mod.rs
//! Text capabilities consumed by the enrichment stage: entity extraction and
//! sentiment polarity. Both are traits so callers can swap in a real model
//! (or a deterministic stub in tests); the crate ships lightweight
//! pattern/lexicon implementations for offline runs.

pub mod ner;
pub mod sentiment;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use crate::nlp::ner::PatternEntityExtractor;
pub use crate::nlp::sentiment::LexiconPolarity;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    /// Geo-political entity (country, city, state).
    Gpe,
    Org,
    Other(String),
}

impl EntityLabel {
    /// Parse a category tag (`PERSON`, `GPE`, `ORG`, anything else) case-insensitively.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "PERSON" => EntityLabel::Person,
            "GPE" => EntityLabel::Gpe,
            "ORG" => EntityLabel::Org,
            other => EntityLabel::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Named-entity recognition. Must be deterministic for identical input within a run.
pub trait EntityExtractor: Send + Sync {
    fn extract_entities(&self, text: &str) -> Result<Vec<Entity>>;
}

/// Continuous sentiment polarity in [-1.0, 1.0].
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f32>;
}
