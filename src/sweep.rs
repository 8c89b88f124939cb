use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::metrics::{EVICTED_TOTAL, TRACKED_KEYS};
use crate::state::AppState;

// Background sweep - drops buckets whose last top-up is older than
// `idle_after`. Spawned only when eviction is configured; the default
// behavior keeps every bucket for the life of the process.

pub async fn idle_sweeper(state: Arc<AppState>, idle_after: Duration, every: Duration) {
    let mut ticker = interval(every);

    info!("Idle sweeper started (every {:?}, expiry {:?})", every, idle_after);

    loop {
        ticker.tick().await;

        let evicted = state.gate.sweep_idle(idle_after, Instant::now());
        TRACKED_KEYS.set(state.gate.tracked_keys() as f64);

        if evicted > 0 {
            EVICTED_TOTAL.inc_by(evicted as f64);
            info!(
                "Swept {} idle buckets, {} remain",
                evicted,
                state.gate.tracked_keys()
            );
        }
    }
}
