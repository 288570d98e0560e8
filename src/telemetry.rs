use anyhow::{Context, Result};
use metrics::{describe_counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::path::Path;

/// One-time metrics registration (so series show up in the rendered output).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_articles_total",
            "Raw articles returned by feed providers."
        );
        describe_counter!(
            "ingest_provider_errors_total",
            "Feed provider fetch/parse errors."
        );
        describe_counter!("enrich_articles_total", "Articles enriched.");
        describe_counter!(
            "enrich_skipped_total",
            "Articles dropped for blank title and summary."
        );
        describe_counter!(
            "risk_records_total",
            "Risk records produced by aggregation."
        );
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder for this process.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Write the Prometheus exposition text to `path`, stamping the run time first.
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        gauge!("pipeline_last_run_ts").set(chrono::Utc::now().timestamp() as f64);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        std::fs::write(path, self.handle.render())
            .with_context(|| format!("writing metrics to {}", path.display()))
    }
}
