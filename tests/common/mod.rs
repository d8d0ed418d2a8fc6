// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Duration, TimeZone, Utc};
use run_tracker::config::Config;
use run_tracker::db::MemoryDb;
use run_tracker::models::{NewFix, NewRun, Run};
use run_tracker::routes::create_router;
use run_tracker::services::RunTracker;
use run_tracker::AppState;
use std::sync::Arc;

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState<MemoryDb>>) {
    let state = Arc::new(AppState::new(Config::test_default(), MemoryDb::new()));
    (create_router(state.clone()), state)
}

/// Fixed reference time for fixes.
#[allow(dead_code)]
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

/// Build a fix `offset_secs` after `t0()`.
#[allow(dead_code)]
pub fn fix(run_id: u64, latitude: f64, longitude: f64, offset_secs: i64) -> NewFix {
    NewFix {
        run_id,
        latitude,
        longitude,
        date_time: t0() + Duration::seconds(offset_secs),
    }
}

/// Create a run for `athlete_id` and start it.
#[allow(dead_code)]
pub async fn started_run(tracker: &RunTracker<MemoryDb>, athlete_id: u64) -> Run {
    let run = tracker
        .create_run(NewRun {
            athlete_id,
            comment: String::new(),
        })
        .await
        .expect("Failed to create run");
    tracker
        .start_run(run.id)
        .await
        .expect("Failed to start run")
}

/// Create, start, and finish a run whose path is roughly `km` long along the equator.
#[allow(dead_code)]
pub async fn finished_run(tracker: &RunTracker<MemoryDb>, athlete_id: u64, km: f64) -> Run {
    let run = started_run(tracker, athlete_id).await;
    if km > 0.0 {
        // 1 degree of longitude at the equator is ~111.32 km
        let degrees = km / 111.319_491;
        tracker
            .ingest_position(fix(run.id, 0.0, 0.0, 0))
            .await
            .expect("Failed to ingest first fix");
        tracker
            .ingest_position(fix(run.id, 0.0, degrees, 600))
            .await
            .expect("Failed to ingest second fix");
    }
    tracker.stop_run(run.id).await.expect("Failed to stop run")
}
