// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entry point into the run tracking core.

use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::{NewFix, NewRun, Position, Run};
use crate::services::{IngestOutcome, KeyedLocks, PositionIngest, RunLifecycle};

/// Facade used by the request layer.
#[derive(Clone)]
pub struct RunTracker<S> {
    db: S,
    lifecycle: RunLifecycle<S>,
    ingest: PositionIngest<S>,
}

impl<S: Storage> RunTracker<S> {
    pub fn new(db: S) -> Self {
        let run_locks = KeyedLocks::new();
        Self {
            lifecycle: RunLifecycle::new(db.clone(), run_locks.clone()),
            ingest: PositionIngest::new(db.clone(), run_locks),
            db,
        }
    }

    /// Create a run in the `Init` state.
    pub async fn create_run(&self, new_run: NewRun) -> Result<Run> {
        let run = self.db.insert_run(new_run).await?;
        tracing::info!(run_id = run.id, athlete_id = run.athlete_id, "Run created");
        Ok(run)
    }

    pub async fn get_run(&self, run_id: u64) -> Result<Run> {
        self.db
            .get_run(run_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Run {}", run_id)))
    }

    /// Runs of an athlete, oldest first.
    pub async fn runs_for_athlete(&self, athlete_id: u64) -> Result<Vec<Run>> {
        self.db.list_runs_for_athlete(athlete_id).await
    }

    pub async fn start_run(&self, run_id: u64) -> Result<Run> {
        self.lifecycle.start(run_id).await
    }

    pub async fn stop_run(&self, run_id: u64) -> Result<Run> {
        self.lifecycle.stop(run_id).await
    }

    pub async fn ingest_position(&self, fix: NewFix) -> Result<IngestOutcome> {
        self.ingest.ingest(fix).await
    }

    /// Fixes of an existing run in insertion order.
    pub async fn positions_for_run(&self, run_id: u64) -> Result<Vec<Position>> {
        self.get_run(run_id).await?;
        self.db.list_positions_for_run(run_id).await
    }
}
