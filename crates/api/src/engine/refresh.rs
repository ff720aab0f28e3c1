//! Time-driven lease status refresh.
//!
//! Moves leases forward as days pass (`upcoming -> active -> ended`) and
//! re-syncs the availability flag of every property that gained or lost an
//! active lease, all in one transaction. An `upcoming -> ended` transition
//! never held the property, so a manually set flag survives it.

use std::collections::BTreeSet;

use rentals_core::lease::{refreshed_status, DateRange, LeaseStatus};
use rentals_core::types::{Date, DbId};
use rentals_db::models::lease::LeaseWindow;
use rentals_db::repositories::{LeaseRepo, PropertyRepo};
use rentals_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub activated: u64,
    pub ended: u64,
    /// Properties whose `available` flag actually changed.
    pub properties_synced: u64,
}

/// Transitions a refresh pass will apply.
#[derive(Debug, Default, PartialEq, Eq)]
struct RefreshPlan {
    activate: Vec<DbId>,
    end: Vec<DbId>,
    properties: BTreeSet<DbId>,
}

/// Work out which candidate leases move, and where to.
fn plan(candidates: &[LeaseWindow], today: Date) -> RefreshPlan {
    let mut plan = RefreshPlan::default();
    for lease in candidates {
        let range = match DateRange::new(lease.start_date, lease.end_date) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!(lease_id = lease.id, error = %e, "Skipping lease with invalid window");
                continue;
            }
        };
        let Some(next) = refreshed_status(lease.status, &range, today) else {
            continue;
        };
        match next {
            LeaseStatus::Active => plan.activate.push(lease.id),
            LeaseStatus::Ended => plan.end.push(lease.id),
            LeaseStatus::Upcoming => continue,
        }
        if lease.status == LeaseStatus::Active || next == LeaseStatus::Active {
            plan.properties.insert(lease.property_id);
        }
    }
    plan
}

/// Apply every due status transition as of `today`.
pub async fn refresh_lease_statuses(pool: &DbPool, today: Date) -> AppResult<RefreshSummary> {
    let mut tx = pool.begin().await?;

    let candidates = LeaseRepo::list_refresh_candidates(&mut *tx, today).await?;
    let plan = plan(&candidates, today);

    let activated = LeaseRepo::set_status(&mut *tx, &plan.activate, LeaseStatus::Active).await?;
    let ended = LeaseRepo::set_status(&mut *tx, &plan.end, LeaseStatus::Ended).await?;

    let mut properties_synced = 0;
    for &property_id in &plan.properties {
        let sync = PropertyRepo::sync_availability(&mut *tx, property_id).await?;
        if sync.is_some_and(|s| s.changed) {
            properties_synced += 1;
        }
    }

    tx.commit().await?;

    let summary = RefreshSummary {
        activated,
        ended,
        properties_synced,
    };
    if activated > 0 || ended > 0 {
        tracing::info!(%today, activated, ended, properties_synced, "Lease statuses refreshed");
    } else {
        tracing::debug!(%today, "Lease status refresh: nothing to do");
    }
    Ok(summary)
}
