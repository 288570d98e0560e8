//! # Source Classifier
//! Maps a feed's display name to a coarse source type.
//!
//! Rules are checked top to bottom; the first rule whose phrase appears in
//! the lower-cased name wins. Anything unmatched is `media`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lexicon::{Lexicon, SourceRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Embassy,
    Official,
    Aggregator,
    Media,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Embassy => "embassy",
            SourceType::Official => "official",
            SourceType::Aggregator => "aggregator",
            SourceType::Media => "media",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static DEFAULT_RULES: Lazy<Vec<SourceRule>> =
    Lazy::new(|| Lexicon::default().normalized().source_rules);

/// Classify with the built-in rules.
pub fn classify_source(name: &str) -> SourceType {
    classify_with(name, &DEFAULT_RULES)
}

/// Classify with an explicit, already-normalized rule list.
pub fn classify_with(name: &str, rules: &[SourceRule]) -> SourceType {
    let name = name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.any_contains.iter().any(|p| name.contains(p.as_str())))
        .map(|rule| rule.source_type)
        .unwrap_or(SourceType::Media)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embassy_beats_state() {
        // "State" would also hit the official rule.
        assert_eq!(
            classify_source("U.S. Department of State Embassy Notes"),
            SourceType::Embassy
        );
        assert_eq!(classify_source("Consulate General Osaka"), SourceType::Embassy);
    }

    #[test]
    fn aggregator_query_terms_do_not_make_it_official() {
        assert_eq!(
            classify_source("Google News – APEC Reforms"),
            SourceType::Aggregator
        );
        assert_eq!(classify_source("APEC Newsroom"), SourceType::Official);
        assert_eq!(
            classify_source("U.S. Department of State – EAP"),
            SourceType::Official
        );
    }

    #[test]
    fn empty_rules_fall_back_to_media() {
        assert_eq!(classify_with("U.S. Embassy", &[]), SourceType::Media);
        assert_eq!(classify_source(""), SourceType::Media);
    }
}
