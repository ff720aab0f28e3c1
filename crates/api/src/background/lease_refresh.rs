//! Periodic lease status refresh.
//!
//! Advances lease statuses as calendar days pass and re-syncs property
//! availability, then purges expired admin sessions. The first tick of
//! `tokio::time::interval` completes immediately, so a pass also runs at
//! startup.

use std::sync::Arc;
use std::time::Duration;

use rentals_core::clock::Clock;
use rentals_db::DbPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionStore;
use crate::engine::refresh::refresh_lease_statuses;

/// Run the refresh loop until `cancel` is triggered.
pub async fn run(
    pool: DbPool,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    every: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = every.as_secs(), "Lease refresh job started");

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Lease refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                tick(&pool, sessions.as_ref(), clock.as_ref()).await;
            }
        }
    }
}

/// One pass. Failures are logged and retried on the next tick.
async fn tick(pool: &DbPool, sessions: &dyn SessionStore, clock: &dyn Clock) {
    let today = clock.today();
    if let Err(e) = refresh_lease_statuses(pool, today).await {
        tracing::error!(error = %e, %today, "Lease refresh failed");
    }

    let purged = sessions.purge_expired().await;
    if purged > 0 {
        tracing::info!(purged, "Expired admin sessions purged");
    }
}
