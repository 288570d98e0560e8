// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod economy;
pub mod enrich;
pub mod lexicon;
pub mod nlp;
pub mod output;
pub mod pipeline;
pub mod risk;
pub mod source;
pub mod tags;
pub mod telemetry;

// Feed retrieval collaborator (RSS fetch + HTML normalization)
pub mod ingest;

// ---- Re-exports for stable public API ----
pub use crate::economy::{resolve_economy, EconomyResolver, UNKNOWN_ECONOMY};
pub use crate::enrich::{EnrichedArticle, Enricher};
pub use crate::ingest::types::RawArticle;
pub use crate::lexicon::Lexicon;
pub use crate::pipeline::{Pipeline, PipelineOutput};
pub use crate::risk::{aggregate, RiskRecord, Scenario};
pub use crate::source::{classify_source, SourceType};
pub use crate::tags::{Alignment, Sentiment, TagExtractor, TagSet, Workstreams, UNCATEGORIZED};
