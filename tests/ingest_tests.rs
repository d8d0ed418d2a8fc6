// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Position ingest pipeline tests.

use run_tracker::db::PositionRepository;
use run_tracker::error::AppError;
use run_tracker::models::{LatLon, NewRun, RunStatus};
use run_tracker::services::geo_math::path_distance_km;

mod common;

#[tokio::test]
async fn test_second_fix_speed_and_distance() {
    let (_, state) = common::create_test_app();
    let run = common::started_run(&state.tracker, 1).await;

    let first = state
        .tracker
        .ingest_position(common::fix(run.id, 0.0, 0.0, 0))
        .await
        .unwrap()
        .position;
    assert_eq!(first.speed, 0.0);
    assert_eq!(first.distance, None);

    let second = state
        .tracker
        .ingest_position(common::fix(run.id, 0.0, 0.001, 10))
        .await
        .unwrap()
        .position;
    assert_eq!(second.distance, Some(0.11));
    assert_eq!(second.speed, 11.13);
    assert!((second.path_km - 0.1113).abs() < 0.0001);
}

#[tokio::test]
async fn test_same_timestamp_gives_zero_speed() {
    let (_, state) = common::create_test_app();
    let run = common::started_run(&state.tracker, 1).await;

    state
        .tracker
        .ingest_position(common::fix(run.id, 0.0, 0.0, 5))
        .await
        .unwrap();
    let second = state
        .tracker
        .ingest_position(common::fix(run.id, 0.0, 0.001, 5))
        .await
        .unwrap()
        .position;
    assert_eq!(second.speed, 0.0);
    assert_eq!(second.distance, Some(0.11));
}

#[tokio::test]
async fn test_out_of_range_persists_nothing() {
    let (_, state) = common::create_test_app();
    let run = common::started_run(&state.tracker, 1).await;

    let err = state
        .tracker
        .ingest_position(common::fix(run.id, 95.0, 0.0, 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::OutOfRange {
            field: "latitude",
            ..
        }
    ));

    let err = state
        .tracker
        .ingest_position(common::fix(run.id, 0.0, 200.0, 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::OutOfRange {
            field: "longitude",
            ..
        }
    ));

    assert!(state.db.list_positions_for_run(run.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inactive_runs_reject_fixes() {
    let (_, state) = common::create_test_app();

    let init_run = state
        .tracker
        .create_run(NewRun {
            athlete_id: 1,
            comment: String::new(),
        })
        .await
        .unwrap();
    let err = state
        .tracker
        .ingest_position(common::fix(init_run.id, 0.0, 0.0, 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::RunNotActive {
            status: RunStatus::Init,
            ..
        }
    ));

    let finished = common::finished_run(&state.tracker, 1, 0.0).await;
    let err = state
        .tracker
        .ingest_position(common::fix(finished.id, 0.0, 0.0, 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::RunNotActive {
            status: RunStatus::Finished,
            ..
        }
    ));

    assert!(state
        .db
        .list_positions_for_run(init_run.id)
        .await
        .unwrap()
        .is_empty());
    assert!(state
        .db
        .list_positions_for_run(finished.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_unknown_run_is_not_found() {
    let (_, state) = common::create_test_app();
    let err = state
        .tracker
        .ingest_position(common::fix(12345, 0.0, 0.0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_running_total_matches_full_recompute() {
    let (_, state) = common::create_test_app();
    let run = common::started_run(&state.tracker, 1).await;

    // A wandering loop around a park
    let path = [
        (37.3318, -122.0312),
        (37.3325, -122.0301),
        (37.3340, -122.0299),
        (37.3352, -122.0315),
        (37.3349, -122.0336),
        (37.3331, -122.0341),
        (37.3318, -122.0312),
    ];
    for (i, (lat, lon)) in path.iter().enumerate() {
        state
            .tracker
            .ingest_position(common::fix(run.id, *lat, *lon, i as i64 * 20))
            .await
            .unwrap();
    }

    let stored = state.db.list_positions_for_run(run.id).await.unwrap();
    for n in 2..=stored.len() {
        let coords: Vec<LatLon> = stored[..n].iter().map(|p| p.coords()).collect();
        let recomputed = path_distance_km(&coords);
        assert!(
            (stored[n - 1].path_km - recomputed).abs() < 1e-9,
            "fix {}: running {} vs recomputed {}",
            n,
            stored[n - 1].path_km,
            recomputed
        );
    }

    let finished = state.tracker.stop_run(run.id).await.unwrap();
    assert_eq!(finished.distance, stored.last().unwrap().distance);
}

#[tokio::test]
async fn test_out_of_order_fix_uses_insertion_order() {
    let (_, state) = common::create_test_app();
    let run = common::started_run(&state.tracker, 1).await;

    state
        .tracker
        .ingest_position(common::fix(run.id, 0.0, 0.0, 60))
        .await
        .unwrap();
    // Older timestamp arrives second: still treated as the latest fix.
    let late = state
        .tracker
        .ingest_position(common::fix(run.id, 0.0, 0.001, 30))
        .await
        .unwrap()
        .position;
    assert_eq!(late.speed, 0.0);
    assert_eq!(late.distance, Some(0.11));

    let stored = state.db.list_positions_for_run(run.id).await.unwrap();
    assert_eq!(stored.last().unwrap().id, late.id);
}

#[tokio::test]
async fn test_concurrent_fixes_keep_consistent_total() {
    let (_, state) = common::create_test_app();
    let run = common::started_run(&state.tracker, 1).await;

    let tasks = (0..20).map(|i| {
        let tracker = state.tracker.clone();
        tokio::spawn(async move {
            tracker
                .ingest_position(common::fix(run.id, 0.0, i as f64 * 0.001, i))
                .await
        })
    });
    for result in futures_util::future::join_all(tasks).await {
        result.expect("Task join failed").expect("Ingest failed");
    }

    let stored = state.db.list_positions_for_run(run.id).await.unwrap();
    assert_eq!(stored.len(), 20);
    assert_eq!(stored.iter().filter(|p| p.distance.is_none()).count(), 1);

    let coords: Vec<LatLon> = stored.iter().map(|p| p.coords()).collect();
    let recomputed = path_distance_km(&coords);
    assert!((stored.last().unwrap().path_km - recomputed).abs() < 1e-9);
}
