use once_cell::sync::Lazy;
use prometheus::{
    exponential_buckets, histogram_opts, register_histogram, register_int_counter_vec,
    Histogram, IntCounterVec,
};

pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bangla_transcribe_requests_total",
        "Total number of HTTP requests by status code",
        &["status"]
    )
    .unwrap()
});

pub static LATENCY: Lazy<Histogram> = Lazy::new(|| {
    let opts = histogram_opts!(
        "bangla_transcribe_latency_seconds",
        "End-to-end latency in seconds",
        exponential_buckets(0.01, 2.0, 15).unwrap()
    );
    register_histogram!(opts).unwrap()
});

pub static UPSTREAM_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bangla_transcribe_upstream_errors_total",
        "Non-success responses from the transcription service by status code",
        &["status"]
    )
    .unwrap()
});

pub static TRANSLATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bangla_transcribe_translations_total",
        "Translation step outcomes (translated, skipped, fallback)",
        &["outcome"]
    )
    .unwrap()
});

pub fn record_translation(outcome: &str) {
    TRANSLATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_upstream_error(status: u16) {
    let status = status.to_string();
    UPSTREAM_ERRORS_TOTAL
        .with_label_values(&[status.as_str()])
        .inc();
}
