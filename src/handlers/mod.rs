mod admit;
mod health;
mod metrics;

pub use admit::admit_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
