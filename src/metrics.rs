//! Request, outcome and latency metrics for the survival prediction path.
//!
//! Counters are process-wide atomics so concurrent handler tasks cannot
//! lose increments. Exposition follows the Prometheus text format under
//! the metric names the scrape dashboards already use.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

/// Histogram bucket upper bounds in seconds.
pub const LATENCY_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Metrics collector for the prediction pipeline
pub struct AppMetrics {
    /// Total prediction requests
    requests_total: AtomicU64,
    /// Predictions that came back "survives" (label 0)
    survival_predicted_total: AtomicU64,
    /// Predictions that came back "does not survive" (label 1)
    non_survival_predicted_total: AtomicU64,
    /// Per-bucket observation counts (non-cumulative)
    latency_buckets: [AtomicU64; LATENCY_BUCKETS.len()],
    /// Observations above the last bucket bound
    latency_overflow: AtomicU64,
    /// Sum of observed latencies in nanoseconds
    latency_sum_nanos: AtomicU64,
    /// Total latency observations
    latency_count: AtomicU64,
}

impl AppMetrics {
    /// Create a new metrics collector with all counters at zero
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            survival_predicted_total: AtomicU64::new(0),
            non_survival_predicted_total: AtomicU64::new(0),
            latency_buckets: std::array::from_fn(|_| AtomicU64::new(0)),
            latency_overflow: AtomicU64::new(0),
            latency_sum_nanos: AtomicU64::new(0),
            latency_count: AtomicU64::new(0),
        }
    }

    /// Count one prediction request
    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one survival outcome (label 0)
    pub fn inc_survival(&self) {
        self.survival_predicted_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one non-survival outcome (label 1)
    pub fn inc_non_survival(&self) {
        self.non_survival_predicted_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record the duration of one encode+infer+label span
    pub fn observe_latency(&self, duration: Duration) {
        let seconds = duration.as_secs_f64();

        match LATENCY_BUCKETS.iter().position(|&bound| seconds <= bound) {
            Some(i) => {
                self.latency_buckets[i].fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.latency_overflow.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.latency_sum_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Total prediction requests so far
    pub fn requests(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    /// Survival predictions so far
    pub fn survival_predicted(&self) -> u64 {
        self.survival_predicted_total.load(Ordering::Relaxed)
    }

    /// Non-survival predictions so far
    pub fn non_survival_predicted(&self) -> u64 {
        self.non_survival_predicted_total.load(Ordering::Relaxed)
    }

    /// Number of latency observations
    pub fn latency_count(&self) -> u64 {
        self.latency_count.load(Ordering::Relaxed)
    }

    /// Render all metrics in Prometheus text exposition format
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(1024);

        writeln!(
            out,
            "# HELP app_requests_total Total number of prediction requests"
        )
        .ok();
        writeln!(out, "# TYPE app_requests_total counter").ok();
        writeln!(out, "app_requests_total {}", self.requests()).ok();

        writeln!(
            out,
            "# HELP app_prediction_latency_seconds Latency of predictions"
        )
        .ok();
        writeln!(out, "# TYPE app_prediction_latency_seconds histogram").ok();
        let mut cumulative = 0u64;
        for (i, bound) in LATENCY_BUCKETS.iter().enumerate() {
            cumulative += self.latency_buckets[i].load(Ordering::Relaxed);
            writeln!(
                out,
                "app_prediction_latency_seconds_bucket{{le=\"{}\"}} {}",
                bound, cumulative
            )
            .ok();
        }
        cumulative += self.latency_overflow.load(Ordering::Relaxed);
        writeln!(
            out,
            "app_prediction_latency_seconds_bucket{{le=\"+Inf\"}} {}",
            cumulative
        )
        .ok();
        let sum_seconds = self.latency_sum_nanos.load(Ordering::Relaxed) as f64 / 1e9;
        writeln!(out, "app_prediction_latency_seconds_sum {}", sum_seconds).ok();
        writeln!(
            out,
            "app_prediction_latency_seconds_count {}",
            self.latency_count()
        )
        .ok();

        writeln!(
            out,
            "# HELP app_survival_predicted_total Total number of survival predictions (Yes)"
        )
        .ok();
        writeln!(out, "# TYPE app_survival_predicted_total counter").ok();
        writeln!(
            out,
            "app_survival_predicted_total {}",
            self.survival_predicted()
        )
        .ok();

        writeln!(
            out,
            "# HELP app_non_survival_predicted_total Total number of non-survival predictions (No)"
        )
        .ok();
        writeln!(out, "# TYPE app_non_survival_predicted_total counter").ok();
        writeln!(
            out,
            "app_non_survival_predicted_total {}",
            self.non_survival_predicted()
        )
        .ok();

        out
    }

    /// Log a one-line summary of the counters
    pub fn log_summary(&self) {
        let requests = self.requests();
        let survived = self.survival_predicted();
        let died = self.non_survival_predicted();
        let mean_ms = if self.latency_count() > 0 {
            self.latency_sum_nanos.load(Ordering::Relaxed) as f64
                / self.latency_count() as f64
                / 1e6
        } else {
            0.0
        };

        info!(
            requests = requests,
            survived = survived,
            died = died,
            mean_latency_ms = format!("{:.3}", mean_ms),
            "Prediction metrics summary"
        );
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_recording() {
        let metrics = AppMetrics::new();

        metrics.inc_requests();
        metrics.inc_requests();
        metrics.inc_survival();
        metrics.inc_non_survival();

        assert_eq!(metrics.requests(), 2);
        assert_eq!(metrics.survival_predicted(), 1);
        assert_eq!(metrics.non_survival_predicted(), 1);
    }

    #[test]
    fn test_requests_equal_outcome_sum() {
        let metrics = AppMetrics::new();

        for i in 0..10 {
            metrics.inc_requests();
            if i % 3 == 0 {
                metrics.inc_non_survival();
            } else {
                metrics.inc_survival();
            }
        }

        assert_eq!(
            metrics.requests(),
            metrics.survival_predicted() + metrics.non_survival_predicted()
        );
    }

    #[test]
    fn test_latency_observation() {
        let metrics = AppMetrics::new();

        metrics.observe_latency(Duration::from_millis(3));
        metrics.observe_latency(Duration::from_millis(80));
        metrics.observe_latency(Duration::from_secs(60));

        assert_eq!(metrics.latency_count(), 3);

        let rendered = metrics.render();
        // 3ms lands in the first bucket; cumulative counts stay monotonic.
        assert!(rendered.contains("app_prediction_latency_seconds_bucket{le=\"0.005\"} 1"));
        assert!(rendered.contains("app_prediction_latency_seconds_bucket{le=\"+Inf\"} 3"));
        assert!(rendered.contains("app_prediction_latency_seconds_count 3"));
    }

    #[test]
    fn test_render_contains_all_metric_families() {
        let metrics = AppMetrics::new();
        metrics.inc_requests();
        metrics.inc_survival();

        let rendered = metrics.render();
        assert!(rendered.contains("app_requests_total 1"));
        assert!(rendered.contains("app_survival_predicted_total 1"));
        assert!(rendered.contains("app_non_survival_predicted_total 0"));
        assert!(rendered.contains("# TYPE app_prediction_latency_seconds histogram"));
    }
}
