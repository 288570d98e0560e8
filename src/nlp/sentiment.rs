// src/nlp/sentiment.rs
//! Lexicon polarity scorer.
//!
//! Word weights live in `sentiment_lexicon.json` (word → integer in [-3, 3]).
//! Polarity = mean weight of matched words / 3, clamped to [-1, 1]; 0.0 when
//! nothing matches.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

use super::PolarityScorer;

const MAX_WEIGHT: f32 = 3.0;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

#[derive(Debug, Clone)]
pub struct LexiconPolarity {
    /// Custom word list; `None` means the bundled lexicon.
    words: Option<HashMap<String, i32>>,
}

impl Default for LexiconPolarity {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconPolarity {
    pub fn new() -> Self {
        Self { words: None }
    }

    pub fn with_words(words: HashMap<String, i32>) -> Self {
        let words = words
            .into_iter()
            .map(|(w, s)| (w.to_lowercase(), s.clamp(-3, 3)))
            .collect();
        Self { words: Some(words) }
    }

    /// Load a word list from a JSON object file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading sentiment lexicon {}", path.display()))?;
        let words: HashMap<String, i32> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing sentiment lexicon {}", path.display()))?;
        Ok(Self::with_words(words))
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        let table = self.words.as_ref().unwrap_or(&*LEXICON);
        *table.get(w).unwrap_or(&0)
    }

    /// Returns (sum of weights, matched word count).
    /// A negator in the previous 1..=3 tokens flips a word's sign.
    pub fn score_text(&self, text: &str) -> (i32, usize) {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut score: i32 = 0;
        let mut hits = 0usize;

        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            score += if negated { -base } else { base };
            hits += 1;
        }

        (score, hits)
    }
}

impl PolarityScorer for LexiconPolarity {
    fn polarity(&self, text: &str) -> Result<f32> {
        let (score, hits) = self.score_text(text);
        if hits == 0 {
            return Ok(0.0);
        }
        let mean = score as f32 / hits as f32;
        Ok((mean / MAX_WEIGHT).clamp(-1.0, 1.0))
    }
}

/// Alphanumeric tokens, lower-case.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not" | "no" | "never" | "cannot" | "without" | "nor" | "neither" | "lack" | "lacks"
    )
}
