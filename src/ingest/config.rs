// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "APEC_FEEDS_PATH";

/// A named syndication feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

/// Load the feed table from an explicit path. Supports TOML or JSON formats.
pub fn load_feeds_from(path: &Path) -> Result<Vec<FeedSpec>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed table from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load the feed table using env var + fallbacks:
/// 1) $APEC_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
/// 4) built-in table
pub fn load_feeds_default() -> Result<Vec<FeedSpec>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("APEC_FEEDS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(default_feeds())
}

/// The built-in feed table: APEC and U.S. government channels, embassy
/// press releases, regional media and one news aggregator.
pub fn default_feeds() -> Vec<FeedSpec> {
    [
        ("APEC Newsroom", "https://www.apec.org/Press/News-Releases"),
        ("APEC Events Calendar", "https://www.apec.org/Press/Calendar"),
        ("U.S. Department of State – RSS", "https://www.state.gov/rss-feeds/"),
        ("U.S. Department of State – EAP", "https://www.state.gov/rss.xml"),
        (
            "U.S. Embassy – Canberra Press Releases",
            "https://au.usembassy.gov/tag/press-releases/feed/",
        ),
        (
            "U.S. Embassy – Tokyo Press Releases",
            "https://jp.usembassy.gov/category/press-releases/feed/",
        ),
        (
            "U.S. Embassy – Beijing Press Releases",
            "https://china.usembassy.gov/category/press-releases/feed/",
        ),
        (
            "U.S. Embassy – Singapore Press Releases",
            "https://sg.usembassy.gov/category/press-releases/feed/",
        ),
        ("Nikkei Asia", "https://asia.nikkei.com/rss"),
        ("The Diplomat", "https://thediplomat.com/feed/"),
        ("South China Morning Post", "https://www.scmp.com/rss"),
        (
            "Reuters Asia Pacific",
            "http://feeds.reuters.com/reuters/asiaPacificNews",
        ),
        ("Channel News Asia", "https://www.channelnewsasia.com/rss"),
        (
            "Straits Times",
            "https://www.straitstimes.com/news/singapore/rss.xml",
        ),
        ("Lowy Institute", "https://www.lowyinstitute.org/rss.xml"),
        (
            "Google News – APEC Reforms",
            "https://news.google.com/rss/search?q=APEC+reform+digital+policy",
        ),
    ]
    .into_iter()
    .map(|(name, url)| FeedSpec {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<FeedSpec>> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("[[feeds]]");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    // Try JSON array
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    // Fallback: also try TOML if not attempted
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feed table format"))
}

fn parse_toml(s: &str) -> Result<Vec<FeedSpec>> {
    #[derive(Deserialize)]
    struct TomlFeeds {
        feeds: Vec<FeedSpec>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    Ok(clean_list(v.feeds))
}

fn parse_json(s: &str) -> Result<Vec<FeedSpec>> {
    let v: Vec<FeedSpec> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Trim, drop incomplete entries, keep the first entry per name.
fn clean_list(items: Vec<FeedSpec>) -> Vec<FeedSpec> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|f| {
            let name = f.name.trim().to_string();
            let url = f.url.trim().to_string();
            if name.is_empty() || url.is_empty() || !seen.insert(name.clone()) {
                return None;
            }
            Some(FeedSpec { name, url })
        })
        .collect()
}
