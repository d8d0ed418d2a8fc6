// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Position ingest pipeline.
//!
//! Handles one fix at a time:
//! 1. Validate coordinates and run status
//! 2. Derive speed from the previous fix
//! 3. Extend the running path total
//! 4. Store the fix
//! 5. Check for nearby collectibles

use crate::db::{PositionRecord, Storage};
use crate::error::{AppError, Result};
use crate::models::{CollectibleItem, NewFix, Position, RunStatus};
use crate::services::geo_math::{distance_km, round2, speed_mps};
use crate::services::{CollectibleDiscovery, KeyedLocks};

/// Result of ingesting a fix.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub position: Position,
    /// Item found at this fix, if any
    pub discovered: Option<CollectibleItem>,
}

/// Ingests GPS fixes for runs in progress.
#[derive(Clone)]
pub struct PositionIngest<S> {
    db: S,
    run_locks: KeyedLocks,
    discovery: CollectibleDiscovery<S>,
}

impl<S: Storage> PositionIngest<S> {
    /// `run_locks` must be shared with the run lifecycle so that a stop
    /// cannot interleave with an ingest on the same run.
    pub fn new(db: S, run_locks: KeyedLocks) -> Self {
        Self {
            discovery: CollectibleDiscovery::new(db.clone()),
            db,
            run_locks,
        }
    }

    pub async fn ingest(&self, fix: NewFix) -> Result<IngestOutcome> {
        let coords = fix.coords();
        coords.validate()?;

        let guard = self.run_locks.lock(fix.run_id).await;

        let run = self
            .db
            .get_run(fix.run_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Run {}", fix.run_id)))?;

        if run.status != RunStatus::InProgress {
            return Err(AppError::RunNotActive {
                run_id: run.id,
                status: run.status,
            });
        }

        // Insertion order defines the previous fix, even if timestamps disagree.
        let prior = self.db.last_position_for_run(run.id).await?;

        let record = match &prior {
            Some(prev) => {
                let speed = speed_mps(prev.coords(), prev.date_time, coords, fix.date_time);
                let path_km = prev.path_km + distance_km(prev.coords(), coords);
                PositionRecord {
                    run_id: run.id,
                    latitude: fix.latitude,
                    longitude: fix.longitude,
                    date_time: fix.date_time,
                    speed: round2(speed),
                    distance: Some(round2(path_km)),
                    path_km,
                }
            }
            None => PositionRecord {
                run_id: run.id,
                latitude: fix.latitude,
                longitude: fix.longitude,
                date_time: fix.date_time,
                speed: 0.0,
                distance: None,
                path_km: 0.0,
            },
        };

        let position = self.db.insert_position(record).await?;
        drop(guard);

        tracing::debug!(
            run_id = run.id,
            position_id = position.id,
            speed = position.speed,
            distance = ?position.distance,
            "Fix stored"
        );

        // The fix is already stored, so a failed scan only loses the announcement.
        let discovered = match self.discovery.discover(coords, run.athlete_id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    run_id = run.id,
                    athlete_id = run.athlete_id,
                    error = %e,
                    "Collectible discovery failed"
                );
                None
            }
        };

        Ok(IngestOutcome {
            position,
            discovered,
        })
    }
}
