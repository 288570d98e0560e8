//! Batch driver: fetch feeds (or read a raw-article dump), enrich, aggregate
//! risk, and write the results under the output directory.
//!
//! Configuration is read from the environment (a `.env` file is honoured):
//! - `APEC_INPUT_PATH`   JSON array of raw articles; skips feed fetching
//! - `APEC_FEEDS_PATH`   feed table (TOML/JSON), see `ingest::config`
//! - `APEC_LEXICON_PATH` lexicon tables (TOML/JSON), see `lexicon`
//! - `APEC_NER_DIR`      entity pattern dir, see `nlp::ner`
//! - `APEC_OUTPUT_DIR`   output dir (default `data`)
//! - `APEC_LOG_JSON=1`   JSON log lines instead of compact text

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use apec_signals::ingest::config::load_feeds_default;
use apec_signals::ingest::providers::rss::RssFeedProvider;
use apec_signals::ingest::types::{FeedProvider, RawArticle};
use apec_signals::ingest::collect_articles;
use apec_signals::lexicon::load_lexicon_default;
use apec_signals::nlp::{LexiconPolarity, PatternEntityExtractor};
use apec_signals::output::{
    write_articles_csv, write_articles_json, write_risk_csv, write_risk_json,
};
use apec_signals::telemetry::Metrics;
use apec_signals::Pipeline;

const ENV_INPUT_PATH: &str = "APEC_INPUT_PATH";
const ENV_OUTPUT_DIR: &str = "APEC_OUTPUT_DIR";
const DEFAULT_OUTPUT_DIR: &str = "data";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("apec_signals=info,ingest=info,enrich=info,risk=info,warn")
    });

    let json = std::env::var("APEC_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

fn read_raw_articles(path: &Path) -> Result<Vec<RawArticle>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading raw articles from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing raw articles from {}", path.display()))
}

async fn fetch_raw_articles() -> Result<Vec<RawArticle>> {
    let feeds = load_feeds_default().context("loading feed table")?;
    let mut providers: Vec<Box<dyn FeedProvider>> = Vec::with_capacity(feeds.len());
    for spec in &feeds {
        providers.push(Box::new(RssFeedProvider::from_spec(spec)?));
    }
    Ok(collect_articles(&providers).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let metrics = Metrics::init()?;

    let lexicon = load_lexicon_default().context("loading lexicon")?;
    let ner = PatternEntityExtractor::load_default().context("loading entity patterns")?;
    let pipeline = Pipeline::new(lexicon, Box::new(ner), Box::new(LexiconPolarity::new()));

    let raw = match std::env::var(ENV_INPUT_PATH) {
        Ok(p) => read_raw_articles(Path::new(&p))?,
        Err(_) => fetch_raw_articles().await?,
    };

    let out = pipeline.run(&raw)?;

    let dir = std::env::var(ENV_OUTPUT_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));
    write_articles_json(&dir.join("processed_articles.json"), &out.articles)?;
    write_articles_csv(&dir.join("processed_articles.csv"), &out.articles)?;
    write_risk_json(&dir.join("risk_scores.json"), &out.risks)?;
    write_risk_csv(&dir.join("risk_scores.csv"), &out.risks)?;
    metrics.write_snapshot(&dir.join("metrics.prom"))?;

    tracing::info!(
        articles = out.articles.len(),
        risk_records = out.risks.len(),
        output = %dir.display(),
        "run complete"
    );
    Ok(())
}
