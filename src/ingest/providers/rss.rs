// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::config::FeedSpec;
use crate::ingest::normalize_text;
use crate::ingest::types::{FeedProvider, RawArticle};

const HTTP_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str = concat!("apec-signals/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

/// RSS 2.0 feed provider, fed either from an in-memory document or over HTTP.
pub struct RssFeedProvider {
    name: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RssFeedProvider {
    pub fn from_fixture_str(name: &str, xml: &str) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    pub fn from_url(name: &str, url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("building http client")?;
        Ok(Self {
            name: name.to_string(),
            mode: Mode::Http {
                url: url.to_string(),
                client,
            },
        })
    }

    pub fn from_spec(spec: &FeedSpec) -> Result<Self> {
        Self::from_url(&spec.name, &spec.url)
    }

    /// Parse an RSS document into raw articles; entries with neither
    /// title nor summary are dropped here already.
    pub fn parse_items(&self, xml: &str) -> Result<Vec<RawArticle>> {
        let xml_clean = scrub_html_entities_for_xml(xml);
        let rss: Rss = from_str(&xml_clean)
            .with_context(|| format!("parsing rss xml for {}", self.name))?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let title = normalize_text(it.title.as_deref().unwrap_or_default());
            let summary = normalize_text(it.description.as_deref().unwrap_or_default());
            if title.is_empty() && summary.is_empty() {
                continue;
            }
            out.push(RawArticle {
                title,
                summary,
                link: it.link.unwrap_or_default().trim().to_string(),
                published: it.pub_date.unwrap_or_default().trim().to_string(),
                source_name: self.name.clone(),
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl FeedProvider for RssFeedProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawArticle>> {
        match &self.mode {
            Mode::Fixture(s) => self.parse_items(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url.as_str())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .with_context(|| format!("GET {url}"))?
                    .text()
                    .await
                    .with_context(|| format!("reading body of {url}"))?;
                self.parse_items(&body)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Feeds often carry HTML entities that are not valid XML.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}
