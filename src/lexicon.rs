//! # Lexicon Tables
//!
//! Static keyword/phrase tables that drive every tagging rule: leadership
//! terms, U.S. objectives, reform themes, workstream keyword sets, alignment
//! and non-alignment phrases, the capital/city → economy map, the APEC economy
//! list and the source-type rules.
//!
//! - Every table is an ordered list; list order is the tie-break order.
//! - `Lexicon::default()` is the built-in seed.
//! - Config files (TOML or JSON) override individual tables; absent tables keep the seed.
//! - `normalized()` must run before matching (loaders do it for you).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::SourceType;

pub const ENV_LEXICON_PATH: &str = "APEC_LEXICON_PATH";
pub const DEFAULT_LEXICON_TOML: &str = "config/lexicon.toml";
pub const DEFAULT_LEXICON_JSON: &str = "config/lexicon.json";

/// One workstream category and the phrases that signal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkstreamRule {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Capital or major city (lower-case) mapped to an economy name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRule {
    pub city: String,
    pub economy: String,
}

/// Source-type rule: matches when the feed name contains any of the phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRule {
    pub source_type: SourceType,
    #[serde(default)]
    pub any_contains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub leadership_terms: Vec<String>,
    pub us_objectives: Vec<String>,
    pub reform_themes: Vec<String>,
    pub workstreams: Vec<WorkstreamRule>,
    pub alignment_phrases: Vec<String>,
    pub non_alignment_phrases: Vec<String>,
    pub capitals: Vec<CityRule>,
    pub economies: Vec<String>,
    pub source_rules: Vec<SourceRule>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            leadership_terms: strings(&["minister", "secretary", "director", "commissioner"]),
            us_objectives: strings(&[
                "trade facilitation",
                "digital economy",
                "regulatory reform",
                "supply chain resilience",
            ]),
            reform_themes: strings(&[
                "customs",
                "digital",
                "infrastructure",
                "investment",
                "logistics",
                "interoperability",
            ]),
            workstreams: vec![
                workstream(
                    "Digital Trade",
                    &[
                        "digital trade",
                        "e-commerce",
                        "data flow",
                        "cross-border data",
                        "digital economy",
                    ],
                ),
                workstream(
                    "Cybersecurity",
                    &[
                        "cybersecurity",
                        "cyber attack",
                        "data breach",
                        "information security",
                    ],
                ),
                workstream(
                    "Supply Chain Connectivity",
                    &["supply chain", "logistics", "port", "shipping"],
                ),
                workstream(
                    "Water Quality",
                    &["water quality", "wastewater", "pollution", "sanitation"],
                ),
                workstream(
                    "Technical Barriers to Trade",
                    &["standards", "tbt", "technical regulation", "certification"],
                ),
                workstream(
                    "Emerging Technology Standards",
                    &[
                        "ai standards",
                        "emerging technology",
                        "artificial intelligence",
                        "5g",
                    ],
                ),
            ],
            alignment_phrases: strings(&[
                "support from u.s.",
                "technical assistance",
                "aligned with apec goals",
                "strategic alignment",
                "bilateral cooperation",
                "u.s.-backed",
                "u.s.-supported",
                "partnership with the u.s.",
                "cooperation with the united states",
                "engagement with the united states",
                "funded by the united states",
            ]),
            non_alignment_phrases: strings(&[
                "not aligned",
                "no alignment",
                "not support",
                "no support",
                "without support",
                "not backed",
                "not supported",
                "disengaged from the united states",
                "opposed by the u.s.",
                "rejected by the u.s.",
            ]),
            capitals: [
                ("canberra", "Australia"),
                ("bandar seri begawan", "Brunei"),
                ("ottawa", "Canada"),
                ("santiago", "Chile"),
                ("beijing", "China"),
                ("jakarta", "Indonesia"),
                ("tokyo", "Japan"),
                ("seoul", "South Korea"),
                ("kuala lumpur", "Malaysia"),
                ("mexico city", "Mexico"),
                ("wellington", "New Zealand"),
                ("port moresby", "Papua New Guinea"),
                ("manila", "Philippines"),
                ("moscow", "Russia"),
                ("bangkok", "Thailand"),
                ("washington", "United States"),
                ("hanoi", "Vietnam"),
            ]
            .into_iter()
            .map(|(city, economy)| CityRule {
                city: city.to_string(),
                economy: economy.to_string(),
            })
            .collect(),
            economies: strings(&APEC_ECONOMIES),
            source_rules: vec![
                source_rule(SourceType::Embassy, &["embassy", "consulate"]),
                source_rule(SourceType::Aggregator, &["google news"]),
                source_rule(SourceType::Official, &["apec", "state"]),
            ],
        }
    }
}

/// The 21 APEC member economies, in canonical order.
pub const APEC_ECONOMIES: [&str; 21] = [
    "Australia",
    "Brunei",
    "Canada",
    "Chile",
    "China",
    "Hong Kong",
    "Indonesia",
    "Japan",
    "South Korea",
    "Malaysia",
    "Mexico",
    "New Zealand",
    "Papua New Guinea",
    "Peru",
    "Philippines",
    "Russia",
    "Singapore",
    "Chinese Taipei",
    "Thailand",
    "United States",
    "Vietnam",
];

impl Lexicon {
    /// Lower-case and trim every matching phrase, drop empty and repeated
    /// phrases, merge workstream rules sharing a name (first position wins)
    /// and drop capital rules that point outside the economy list.
    pub fn normalized(mut self) -> Self {
        self.leadership_terms = clean_phrases(self.leadership_terms);
        self.us_objectives = clean_phrases(self.us_objectives);
        self.reform_themes = clean_phrases(self.reform_themes);
        self.alignment_phrases = clean_phrases(self.alignment_phrases);
        self.non_alignment_phrases = clean_phrases(self.non_alignment_phrases);

        self.economies = self
            .economies
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        dedup_in_order(&mut self.economies);

        let mut workstreams: Vec<WorkstreamRule> = Vec::with_capacity(self.workstreams.len());
        for ws in std::mem::take(&mut self.workstreams) {
            let name = ws.name.trim().to_string();
            if name.is_empty() {
                continue;
            }
            match workstreams.iter_mut().find(|w| w.name == name) {
                Some(existing) => existing.keywords.extend(ws.keywords),
                None => workstreams.push(WorkstreamRule {
                    name,
                    keywords: ws.keywords,
                }),
            }
        }
        for ws in &mut workstreams {
            ws.keywords = clean_phrases(std::mem::take(&mut ws.keywords));
        }
        self.workstreams = workstreams;

        for rule in &mut self.source_rules {
            rule.any_contains = clean_phrases(std::mem::take(&mut rule.any_contains));
        }

        let economies = &self.economies;
        self.capitals = self
            .capitals
            .into_iter()
            .filter_map(|rule| {
                let city = rule.city.trim().to_lowercase();
                let economy = rule.economy.trim().to_string();
                if city.is_empty() {
                    return None;
                }
                if !economies.iter().any(|e| *e == economy) {
                    tracing::warn!(
                        target: "lexicon",
                        %city,
                        %economy,
                        "capital rule maps to an economy outside the list; dropped"
                    );
                    return None;
                }
                Some(CityRule { city, economy })
            })
            .collect();

        self
    }

    /// True when `name` is one of the configured economies.
    pub fn is_known_economy(&self, name: &str) -> bool {
        self.economies.iter().any(|e| e == name)
    }
}

/// Load a lexicon from an explicit path. TOML or JSON, picked by extension.
pub fn load_lexicon_from(path: &Path) -> Result<Lexicon> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading lexicon from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let lexicon = parse_lexicon(&content, ext.as_str())
        .with_context(|| format!("parsing lexicon {}", path.display()))?;
    Ok(lexicon.normalized())
}

/// Load the lexicon using env var + fallbacks:
/// 1) $APEC_LEXICON_PATH
/// 2) config/lexicon.toml
/// 3) config/lexicon.json
/// 4) built-in seed
pub fn load_lexicon_default() -> Result<Lexicon> {
    if let Ok(p) = std::env::var(ENV_LEXICON_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_lexicon_from(&pb);
        } else {
            return Err(anyhow!("{ENV_LEXICON_PATH} points to non-existent path"));
        }
    }
    for candidate in [DEFAULT_LEXICON_TOML, DEFAULT_LEXICON_JSON] {
        let pb = PathBuf::from(candidate);
        if pb.exists() {
            return load_lexicon_from(&pb);
        }
    }
    Ok(Lexicon::default().normalized())
}

fn parse_lexicon(s: &str, hint_ext: &str) -> Result<Lexicon> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => serde_json::from_str(s)
            .or_else(|_| toml::from_str(s))
            .map_err(|_| anyhow!("unsupported lexicon format")),
    }
}

fn clean_phrases(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = items
        .into_iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    dedup_in_order(&mut out);
    out
}

/// Keep the first occurrence of each entry.
fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn workstream(name: &str, keywords: &[&str]) -> WorkstreamRule {
    WorkstreamRule {
        name: name.to_string(),
        keywords: strings(keywords),
    }
}

fn source_rule(source_type: SourceType, any_contains: &[&str]) -> SourceRule {
    SourceRule {
        source_type,
        any_contains: strings(any_contains),
    }
}
