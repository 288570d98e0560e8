// src/ingest/types.rs
use anyhow::Result;

/// One feed entry as delivered by a provider. Immutable once created.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, Default)]
pub struct RawArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub published: String, // raw feed date string, e.g. RFC 2822
    pub source_name: String, // feed display name, e.g. "APEC Newsroom"
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawArticle>>;
    fn name(&self) -> &str;
}
