//! Prometheus metrics
//!
//! Counters for tokens counted and prompts truncated. Recording is a no-op
//! until a recorder is installed with `init_metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::error::{TokenError, TokenResult};

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder (idempotent)
pub fn init_metrics() -> TokenResult<&'static PrometheusHandle> {
    let handle = PROMETHEUS_HANDLE.get_or_try_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| TokenError::Internal(anyhow::anyhow!("Failed to install Prometheus recorder: {}", e)))
    })?;

    register_metrics();
    Ok(handle)
}

/// Render all metrics in Prometheus text format, if a recorder is installed
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "tokengauge_tokens_counted_total",
        "Total tokens counted, by kind (prompt or completion)"
    );
    metrics::describe_counter!(
        "tokengauge_truncations_total",
        "Total number of texts truncated to fit a context window"
    );
}

/// Record tokens counted
pub fn record_tokens(kind: &str, count: u64, tokenizer: &str) {
    metrics::counter!(
        "tokengauge_tokens_counted_total",
        "kind" => kind.to_string(),
        "tokenizer" => tokenizer.to_string()
    )
    .increment(count);
}

/// Record a truncation
pub fn record_truncation(tokenizer: &str) {
    metrics::counter!("tokengauge_truncations_total", "tokenizer" => tokenizer.to_string())
        .increment(1);
}
