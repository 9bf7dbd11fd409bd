//! Prometheus metrics collection for chatrelay
//!
//! Tracks:
//! - `/chat` requests by outcome
//! - Provider call latency
//!
//! Metrics are exposed via the `/metrics` endpoint in Prometheus text format.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Outcome of a `/chat` request, used as a metric label
///
/// Restricting labels to an enum keeps cardinality fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    UpstreamError,
}

impl Outcome {
    /// Convert outcome to Prometheus label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::UpstreamError => "upstream_error",
        }
    }
}

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    chat_requests: IntCounterVec,
    upstream_duration: HistogramVec,
}

impl Metrics {
    /// Create a new Metrics instance registered with a fresh registry
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let chat_requests = IntCounterVec::new(
            Opts::new(
                "chatrelay_chat_requests_total",
                "Total number of /chat requests that reached the provider, by outcome",
            ),
            &["outcome"],
        )?;

        let upstream_duration = HistogramVec::new(
            HistogramOpts::new(
                "chatrelay_upstream_duration_ms",
                "Provider call latency in milliseconds",
            )
            .buckets(vec![
                50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 30000.0, 60000.0,
            ]),
            &["outcome"],
        )?;

        registry.register(Box::new(chat_requests.clone()))?;
        registry.register(Box::new(upstream_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            chat_requests,
            upstream_duration,
        })
    }

    /// Record a finished provider call
    ///
    /// Negative or non-finite durations are dropped from the histogram but
    /// the request is still counted.
    pub fn record_chat(&self, outcome: Outcome, duration_ms: f64) {
        self.chat_requests
            .with_label_values(&[outcome.as_str()])
            .inc();

        if duration_ms.is_finite() && duration_ms >= 0.0 {
            self.upstream_duration
                .with_label_values(&[outcome.as_str()])
                .observe(duration_ms);
        } else {
            tracing::warn!(
                duration_ms = duration_ms,
                outcome = outcome.as_str(),
                "Skipping invalid provider duration"
            );
        }
    }

    /// Number of recorded requests with `outcome`
    pub fn chat_count(&self, outcome: Outcome) -> u64 {
        self.chat_requests
            .with_label_values(&[outcome.as_str()])
            .get()
    }

    /// Gather all metrics in Prometheus text format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("Metrics output is not valid UTF-8: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new_registers_families() {
        let metrics = Metrics::new().expect("metrics should register");
        metrics.record_chat(Outcome::Success, 12.0);

        let names: Vec<String> = metrics
            .registry
            .gather()
            .iter()
            .map(|mf| mf.name().to_string())
            .collect();
        assert!(names.contains(&"chatrelay_chat_requests_total".to_string()));
        assert!(names.contains(&"chatrelay_upstream_duration_ms".to_string()));
    }

    #[test]
    fn test_record_chat_counts_by_outcome() {
        let metrics = Metrics::new().unwrap();
        metrics.record_chat(Outcome::Success, 10.0);
        metrics.record_chat(Outcome::Success, 20.0);
        metrics.record_chat(Outcome::UpstreamError, 5.0);

        assert_eq!(metrics.chat_count(Outcome::Success), 2);
        assert_eq!(metrics.chat_count(Outcome::UpstreamError), 1);
    }

    #[test]
    fn test_record_chat_with_nan_duration_still_counts() {
        let metrics = Metrics::new().unwrap();
        metrics.record_chat(Outcome::UpstreamError, f64::NAN);
        assert_eq!(metrics.chat_count(Outcome::UpstreamError), 1);
    }

    #[test]
    fn test_gather_produces_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_chat(Outcome::Success, 42.0);

        let output = metrics.gather().unwrap();
        assert!(output.contains("# TYPE chatrelay_chat_requests_total counter"));
        assert!(output.contains("chatrelay_chat_requests_total{outcome=\"success\"} 1"));
    }
}
