//! Admission gate service for TripOtter.
//!
//! Request handling lives in the app; this service answers one question:
//! may this caller perform one more action right now? It keeps a token
//! bucket per derived key (capacity 3, one token back every 3 minutes by
//! default) and the preflight endpoint turns the gate's boolean into a
//! 200 or a 429.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod errors;
pub mod gate;
pub mod handlers;
pub mod keys;
pub mod metrics;
pub mod models;
pub mod state;
pub mod sweep;

use config::Args;
use gate::AdmissionGate;
use state::AppState;

// creating the router with routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/admit", post(handlers::admit_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}

pub async fn start_server(args: Args) {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let state = Arc::new(AppState {
        gate: AdmissionGate::new(args.capacity, Duration::from_secs(args.refill_secs)),
    });

    // spawn the background sweeper only when eviction is asked for
    if args.idle_expiry_intervals > 0 {
        let idle_after = Duration::from_secs(args.refill_secs) * args.idle_expiry_intervals;
        let sweeper_state = Arc::clone(&state);
        tokio::spawn(async move {
            sweep::idle_sweeper(
                sweeper_state,
                idle_after,
                Duration::from_secs(args.sweep_secs),
            )
            .await;
        });
    }

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    info!("Gate running on http://localhost:{}", args.port);
    info!(
        "Admission policy: {} tokens per key, one back every {}s",
        args.capacity, args.refill_secs
    );
    if args.idle_expiry_intervals > 0 {
        info!(
            "Idle buckets dropped after {} refill intervals",
            args.idle_expiry_intervals
        );
    } else {
        info!("Idle bucket eviction disabled, registry grows with distinct keys");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
