// src/nlp/ner.rs
//! Pattern-based entity extraction from JSON configs.
//!
//! Patterns are read from `*.json` files in `$APEC_NER_DIR` (or `config/ner`
//! relative to the current working directory). Each file holds a list of
//! `{ regex, group }` patterns; the file stem is the entity label
//! (`person.json` → PERSON, `gpe.json` → GPE).
//!
//! Notes:
//! - Files are read once at construction; regexes are compiled up front.
//! - `group` selects a capture group as the entity span (default 0 = whole match).
//! - Spans come back in text order; overlapping spans keep the leftmost-longest.
//! - Without a config dir the built-in seed is used.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Entity, EntityExtractor, EntityLabel};
use crate::lexicon::APEC_ECONOMIES;

pub const ENV_NER_DIR: &str = "APEC_NER_DIR";

#[derive(Debug, Deserialize)]
struct PatternSpec {
    /// Regex string (compatible with the `regex` crate).
    regex: String,
    /// Capture group holding the entity text.
    #[serde(default)]
    group: usize,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    patterns: Vec<PatternSpec>,
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    re: Regex,
    group: usize,
    label: EntityLabel,
}

#[derive(Debug, Clone)]
pub struct PatternEntityExtractor {
    patterns: Vec<CompiledPattern>,
}

/// Honorifics and titles that introduce a person's name.
const PERSON_TITLES: &str = r"(?:Prime Minister|Deputy Prime Minister|Foreign Minister|Trade Minister|Minister|Secretary of State|Secretary|Deputy Director|Director|Commissioner|President|Vice President|Premier|Ambassador|Chancellor|Governor|Chairman|Chairwoman|Chair|Senator|Dr\.|Mr\.|Mrs\.|Ms\.)";

/// Places outside APEC that show up in regional coverage.
const EXTRA_PLACES: [&str; 12] = [
    "Korea",
    "Taiwan",
    "Viet Nam",
    "India",
    "Cambodia",
    "Laos",
    "Myanmar",
    "Fiji",
    "Ukraine",
    "European Union",
    "United Kingdom",
    "France",
];

impl PatternEntityExtractor {
    /// Built-in patterns: title-led person names and known place names.
    pub fn default_seed() -> Self {
        let person = format!(
            r"\b{PERSON_TITLES}\s+((?:[A-Z][a-zA-Z'\-]+)(?:\s+[A-Z][a-zA-Z'\-]+){{0,2}})"
        );

        let mut places: Vec<&str> = APEC_ECONOMIES.iter().copied().collect();
        places.extend(EXTRA_PLACES);
        // Longest first so "South Korea" wins over "Korea" at the same offset.
        places.sort_by_key(|p| std::cmp::Reverse(p.len()));
        let gpe = format!(
            r"\b(?:{})\b",
            places
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|")
        );

        // Both patterns are static and known-valid.
        let compile = |re: &str| Regex::new(re).expect("valid built-in NER regex");
        Self {
            patterns: vec![
                CompiledPattern {
                    re: compile(&person),
                    group: 1,
                    label: EntityLabel::Person,
                },
                CompiledPattern {
                    re: compile(&gpe),
                    group: 0,
                    label: EntityLabel::Gpe,
                },
            ],
        }
    }

    /// Load patterns from every `*.json` file in `dir` (sorted by file name).
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("reading NER config dir {}", dir.display()))?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();

        let mut patterns = Vec::new();
        for path in paths {
            let label = EntityLabel::from_tag(
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown"),
            );
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let cfg: ConfigFile = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;

            for spec in cfg.patterns {
                match Regex::new(&spec.regex) {
                    Ok(re) => patterns.push(CompiledPattern {
                        re,
                        group: spec.group,
                        label: label.clone(),
                    }),
                    Err(e) => {
                        tracing::warn!(
                            target: "nlp",
                            file = %path.display(),
                            error = %e,
                            "skipping invalid NER regex"
                        );
                    }
                }
            }
        }
        Ok(Self { patterns })
    }

    /// Resolve the config dir:
    /// - `$APEC_NER_DIR` if set (must exist),
    /// - else `<current_dir>/config/ner` if present,
    /// - else the built-in seed.
    pub fn load_default() -> Result<Self> {
        if let Ok(dir) = std::env::var(ENV_NER_DIR) {
            return Self::from_dir(Path::new(&dir));
        }
        let dir = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("config")
            .join("ner");
        if dir.is_dir() {
            return Self::from_dir(&dir);
        }
        Ok(Self::default_seed())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl EntityExtractor for PatternEntityExtractor {
    fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        // (start, end, label)
        let mut spans: Vec<(usize, usize, &EntityLabel)> = Vec::new();
        for pat in &self.patterns {
            for caps in pat.re.captures_iter(text) {
                if let Some(m) = caps.get(pat.group) {
                    if !m.as_str().trim().is_empty() {
                        spans.push((m.start(), m.end(), &pat.label));
                    }
                }
            }
        }

        spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut out = Vec::with_capacity(spans.len());
        let mut last_end = 0usize;
        for (start, end, label) in spans {
            if start < last_end {
                continue;
            }
            out.push(Entity::new(&text[start..end], label.clone()));
            last_end = end;
        }
        Ok(out)
    }
}
