// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run lifecycle: start and stop transitions.

use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::{Position, Run, RunAction, RunStatus};
use crate::services::geo_math::{path_distance_km, round2};
use crate::services::{KeyedLocks, MilestoneEvaluator};

/// Owns the `Init -> InProgress -> Finished` transitions of runs.
#[derive(Clone)]
pub struct RunLifecycle<S> {
    db: S,
    run_locks: KeyedLocks,
    athlete_locks: KeyedLocks,
    milestones: MilestoneEvaluator<S>,
}

impl<S: Storage> RunLifecycle<S> {
    pub fn new(db: S, run_locks: KeyedLocks) -> Self {
        Self {
            milestones: MilestoneEvaluator::new(db.clone()),
            db,
            run_locks,
            athlete_locks: KeyedLocks::new(),
        }
    }

    /// Move a run from `Init` to `InProgress`.
    pub async fn start(&self, run_id: u64) -> Result<Run> {
        let _guard = self.run_locks.lock(run_id).await;

        let run = self.load(run_id).await?;
        let started = transition(&run, RunAction::Start)?;
        self.commit(&started, run.status, RunAction::Start).await?;

        tracing::info!(run_id, athlete_id = run.athlete_id, "Run started");
        Ok(started)
    }

    /// Move a run from `InProgress` to `Finished`, storing its rollups and
    /// then evaluating the athlete's milestones.
    pub async fn stop(&self, run_id: u64) -> Result<Run> {
        let _guard = self.run_locks.lock(run_id).await;

        let run = self.load(run_id).await?;
        let mut finished = transition(&run, RunAction::Stop)?;

        let positions = self.db.list_positions_for_run(run_id).await?;
        apply_rollups(&mut finished, &positions);

        // Serialize finishes per athlete so each one sees a distinct finished count.
        let _athlete_guard = self.athlete_locks.lock(run.athlete_id).await;
        self.commit(&finished, run.status, RunAction::Stop).await?;

        tracing::info!(
            run_id,
            athlete_id = run.athlete_id,
            distance = ?finished.distance,
            run_time_seconds = ?finished.run_time_seconds,
            "Run finished"
        );

        let granted = self.milestones.evaluate(run.athlete_id).await;
        if !granted.is_empty() {
            tracing::debug!(run_id, athlete_id = run.athlete_id, ?granted, "Milestones granted");
        }

        Ok(finished)
    }

    async fn load(&self, run_id: u64) -> Result<Run> {
        self.db
            .get_run(run_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Run {}", run_id)))
    }

    /// Conditionally write `run`; a lost race surfaces as `InvalidTransition`.
    async fn commit(&self, run: &Run, expected: RunStatus, action: RunAction) -> Result<()> {
        if self.db.save_run_if_status(run, expected).await? {
            return Ok(());
        }

        let current = self
            .db
            .get_run(run.id)
            .await?
            .map(|r| r.status)
            .unwrap_or(expected);
        tracing::warn!(
            run_id = run.id,
            status = %current,
            action = action.as_str(),
            "Concurrent run transition lost"
        );
        Err(AppError::InvalidTransition {
            run_id: run.id,
            status: current,
            action: action.as_str(),
        })
    }
}

/// Copy of `run` with the status `action` leads to, or `InvalidTransition`.
fn transition(run: &Run, action: RunAction) -> Result<Run> {
    let status = run
        .status
        .apply(action)
        .ok_or(AppError::InvalidTransition {
            run_id: run.id,
            status: run.status,
            action: action.as_str(),
        })?;

    Ok(Run {
        status,
        ..run.clone()
    })
}

/// Fill in total distance and elapsed time from the full fix history.
///
/// Runs with fewer than two fixes keep their rollups unset.
fn apply_rollups(run: &mut Run, positions: &[Position]) {
    if positions.len() < 2 {
        return;
    }

    let coords: Vec<_> = positions.iter().map(Position::coords).collect();
    run.distance = Some(round2(path_distance_km(&coords)));

    let first = positions.iter().map(|p| p.date_time).min();
    let last = positions.iter().map(|p| p.date_time).max();
    if let (Some(first), Some(last)) = (first, last) {
        run.run_time_seconds = Some((last - first).num_seconds());
    }
}
