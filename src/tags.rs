//! # Tag Extractor
//! Turns an article's title + summary into the full tag set.
//!
//! - `content` = title + " " + summary; a lower-cased copy drives all keyword matching.
//! - People come from the entity extractor run on the original-case `content`.
//! - Every keyword/phrase check is plain substring containment (no word boundaries).
//! - Alignment: affirmative phrases are checked before negative ones, so a
//!   text carrying both reads as `Yes`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lexicon::Lexicon;
use crate::nlp::{Entity, EntityExtractor, EntityLabel, PolarityScorer};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Polarity above this is `Positive`.
pub const POSITIVE_POLARITY: f32 = 0.1;
/// Polarity below this is `Negative`.
pub const NEGATIVE_POLARITY: f32 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > POSITIVE_POLARITY {
            Sentiment::Positive
        } else if polarity < NEGATIVE_POLARITY {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Yes,
    No,
    Unclear,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Yes => "Yes",
            Alignment::No => "No",
            Alignment::Unclear => "Unclear",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matched workstream categories, or the `Uncategorized` sentinel.
///
/// Serialized as a plain list; the sentinel is `["Uncategorized"]`. The
/// sentinel is never a real workstream, so `names()` is empty for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub enum Workstreams {
    Matched(Vec<String>),
    Uncategorized,
}

impl Workstreams {
    pub fn is_uncategorized(&self) -> bool {
        matches!(self, Workstreams::Uncategorized)
    }

    /// Real workstream names, lexicon order.
    pub fn names(&self) -> &[String] {
        match self {
            Workstreams::Matched(names) => names,
            Workstreams::Uncategorized => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }

    /// Comma-joined display form (`"Uncategorized"` for the sentinel).
    pub fn joined(&self) -> String {
        match self {
            Workstreams::Matched(names) => names.join(", "),
            Workstreams::Uncategorized => UNCATEGORIZED.to_string(),
        }
    }
}

impl From<Vec<String>> for Workstreams {
    fn from(names: Vec<String>) -> Self {
        let names: Vec<String> = names.into_iter().filter(|n| n != UNCATEGORIZED).collect();
        if names.is_empty() {
            Workstreams::Uncategorized
        } else {
            Workstreams::Matched(names)
        }
    }
}

impl From<Workstreams> for Vec<String> {
    fn from(ws: Workstreams) -> Self {
        match ws {
            Workstreams::Matched(names) => names,
            Workstreams::Uncategorized => vec![UNCATEGORIZED.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSet {
    pub people: Vec<String>,
    pub leadership_terms: Vec<String>,
    pub workstreams: Workstreams,
    pub aligned_with_us: Alignment,
    pub matched_alignment_phrase: Option<String>,
    pub sentiment: Sentiment,
    pub reform_themes: Vec<String>,
    pub matched_us_objective: Option<String>,
}

pub struct TagExtractor<'a> {
    lexicon: &'a Lexicon,
    ner: &'a dyn EntityExtractor,
    polarity: &'a dyn PolarityScorer,
}

impl<'a> TagExtractor<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        ner: &'a dyn EntityExtractor,
        polarity: &'a dyn PolarityScorer,
    ) -> Self {
        Self {
            lexicon,
            ner,
            polarity,
        }
    }

    /// Full tag set for one article. Capability errors propagate.
    pub fn extract(&self, title: &str, summary: &str) -> Result<TagSet> {
        let content = content_of(title, summary);
        let entities = self.ner.extract_entities(&content)?;
        self.extract_with_entities(&content, &entities)
    }

    /// Tag set for an already-joined `content` whose entities are known.
    pub fn extract_with_entities(&self, content: &str, entities: &[Entity]) -> Result<TagSet> {
        let text = content.to_lowercase();
        let polarity = self.polarity.polarity(content)?;
        let (aligned_with_us, matched_alignment_phrase) = self.alignment(&text);

        Ok(TagSet {
            people: people(entities),
            leadership_terms: matching(&self.lexicon.leadership_terms, &text),
            workstreams: self.workstreams(&text),
            aligned_with_us,
            matched_alignment_phrase,
            sentiment: Sentiment::from_polarity(polarity),
            reform_themes: matching(&self.lexicon.reform_themes, &text),
            matched_us_objective: first_matching(&self.lexicon.us_objectives, &text),
        })
    }

    /// Categories with at least one keyword in the lower-cased `text`.
    pub fn workstreams(&self, text: &str) -> Workstreams {
        let hits: Vec<String> = self
            .lexicon
            .workstreams
            .iter()
            .filter(|ws| ws.keywords.iter().any(|kw| text.contains(kw.as_str())))
            .map(|ws| ws.name.clone())
            .collect();
        Workstreams::from(hits)
    }

    /// Verdict plus the phrase that decided it.
    pub fn alignment(&self, text: &str) -> (Alignment, Option<String>) {
        if let Some(p) = first_matching(&self.lexicon.alignment_phrases, text) {
            return (Alignment::Yes, Some(p));
        }
        if let Some(p) = first_matching(&self.lexicon.non_alignment_phrases, text) {
            return (Alignment::No, Some(p));
        }
        (Alignment::Unclear, None)
    }
}

/// Title and summary joined by one space.
pub fn content_of(title: &str, summary: &str) -> String {
    format!("{title} {summary}")
}

fn people(entities: &[Entity]) -> Vec<String> {
    entities
        .iter()
        .filter(|e| e.label == EntityLabel::Person)
        .map(|e| e.text.clone())
        .collect()
}

fn matching(phrases: &[String], text: &str) -> Vec<String> {
    phrases
        .iter()
        .filter(|p| text.contains(p.as_str()))
        .cloned()
        .collect()
}

fn first_matching(phrases: &[String], text: &str) -> Option<String> {
    phrases.iter().find(|p| text.contains(p.as_str())).cloned()
}
