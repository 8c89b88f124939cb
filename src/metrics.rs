use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("gate_requests_total", "Total admission checks received").unwrap();
    pub static ref ADMITTED_TOTAL: Counter =
        register_counter!("gate_admitted_total", "Total admitted requests").unwrap();
    pub static ref DENIED_TOTAL: Counter =
        register_counter!("gate_denied_total", "Total denied requests").unwrap();
    pub static ref DECISION_LATENCY: Histogram = register_histogram!(
        "gate_decision_latency_seconds",
        "Admission decision latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_KEYS: Gauge =
        register_gauge!("gate_tracked_keys", "Current number of live buckets").unwrap();
    pub static ref EVICTED_TOTAL: Counter =
        register_counter!("gate_evicted_buckets_total", "Total buckets evicted as idle").unwrap();
}
