//! Prometheus metrics for the dashboard API.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Database query duration histogram
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!(
            "dashboard_db_query_duration_seconds",
            "Database query duration"
        ),
        &["operation"]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Chart data requests by chart name
pub static CHART_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Chart data failures by chart name
pub static CHART_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    CHART_REQUESTS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "dashboard_chart_requests_total",
                "Total chart data requests by chart"
            ),
            &["chart"]
        )
        .expect("Failed to register CHART_REQUESTS_TOTAL")
    });

    CHART_ERRORS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "dashboard_chart_errors_total",
                "Total failed chart data requests by chart"
            ),
            &["chart"]
        )
        .expect("Failed to register CHART_ERRORS_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*DB_QUERY_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record a chart data request.
pub fn record_chart_request(chart: &str) {
    if let Some(counter) = CHART_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[chart]).inc();
    }
}

/// Record a failed chart data request.
pub fn record_chart_error(chart: &str) {
    if let Some(counter) = CHART_ERRORS_TOTAL.get() {
        counter.with_label_values(&[chart]).inc();
    }
}
