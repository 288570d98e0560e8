// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use crate::ingest::types::{FeedProvider, RawArticle};
use metrics::counter;
use once_cell::sync::OnceCell;
use regex::Regex;

/// Max characters kept from one feed field.
pub const MAX_FIELD_CHARS: usize = 4000;

/// Normalize feed text: decode entities, strip HTML tags, fold typographic
/// quotes, collapse whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace (incl. NBSP)
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    // 5) Length cap
    if out.chars().count() > MAX_FIELD_CHARS {
        out = out.chars().take(MAX_FIELD_CHARS).collect();
    }

    out
}

/// Fetch from every provider in order. A failing provider is logged and
/// skipped; the others still contribute.
pub async fn collect_articles(providers: &[Box<dyn FeedProvider>]) -> Vec<RawArticle> {
    crate::telemetry::ensure_metrics_described();

    let mut raw = Vec::new();
    for p in providers {
        match p.fetch_latest().await {
            Ok(mut v) => {
                tracing::debug!(target: "ingest", provider = p.name(), items = v.len(), "feed fetched");
                counter!("ingest_articles_total").increment(v.len() as u64);
                raw.append(&mut v);
            }
            Err(e) => {
                tracing::warn!(target: "ingest", error = ?e, provider = p.name(), "provider error");
                counter!("ingest_provider_errors_total").increment(1);
            }
        }
    }

    tracing::info!(
        target: "ingest",
        providers = providers.len(),
        articles = raw.len(),
        "ingest pass finished"
    );
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_strips_tags_and_entities() {
        let s = "<p>APEC&nbsp;ministers <b>meet</b></p>\n\n in &ldquo;Lima&rdquo;.";
        assert_eq!(normalize_text(s), r#"APEC ministers meet in "Lima"."#);
    }

    #[test]
    fn normalize_text_keeps_sentence_punctuation() {
        assert_eq!(normalize_text("  Talks resume!  "), "Talks resume!");
        assert_eq!(normalize_text(""), "");
    }
}
