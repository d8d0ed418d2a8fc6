// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process storage backend built on `DashMap`.
//!
//! Conditional writes and insert-if-absent operations are performed while
//! holding the shard lock for the affected key, which makes them atomic with
//! respect to other callers sharing the same `MemoryDb`.

use crate::db::{
    AthleteStats, ChallengeRepository, CollectibleRepository, PositionRecord, PositionRepository,
    RunRepository,
};
use crate::error::AppError;
use crate::models::{
    Challenge, CollectibleItem, NewCollectibleItem, NewRun, Position, Run, RunStatus,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Tables {
    runs: DashMap<u64, Run>,
    /// Fixes keyed by run, in insertion order
    positions: DashMap<u64, Vec<Position>>,
    /// Position id -> run id
    position_runs: DashMap<u64, u64>,
    items: DashMap<u64, CollectibleItem>,
    /// Keyed by (full_name, athlete_id)
    challenges: DashMap<(String, u64), Challenge>,
    next_run_id: AtomicU64,
    next_position_id: AtomicU64,
    next_item_id: AtomicU64,
    next_challenge_id: AtomicU64,
}

fn next_id(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

/// In-memory database. Cloning shares the same tables.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunRepository for MemoryDb {
    async fn get_run(&self, run_id: u64) -> Result<Option<Run>, AppError> {
        Ok(self.tables.runs.get(&run_id).map(|r| r.clone()))
    }

    async fn insert_run(&self, new_run: NewRun) -> Result<Run, AppError> {
        let run = Run {
            id: next_id(&self.tables.next_run_id),
            athlete_id: new_run.athlete_id,
            comment: new_run.comment,
            created_at: chrono::Utc::now(),
            status: RunStatus::Init,
            distance: None,
            run_time_seconds: None,
        };
        self.tables.runs.insert(run.id, run.clone());
        Ok(run)
    }

    async fn save_run_if_status(&self, run: &Run, expected: RunStatus) -> Result<bool, AppError> {
        let Some(mut stored) = self.tables.runs.get_mut(&run.id) else {
            return Err(AppError::NotFound(format!("Run {}", run.id)));
        };
        if stored.status != expected {
            return Ok(false);
        }
        *stored = run.clone();
        Ok(true)
    }

    async fn list_runs_for_athlete(&self, athlete_id: u64) -> Result<Vec<Run>, AppError> {
        let mut runs: Vec<Run> = self
            .tables
            .runs
            .iter()
            .filter(|r| r.athlete_id == athlete_id)
            .map(|r| r.clone())
            .collect();
        runs.sort_by_key(|r| r.id);
        Ok(runs)
    }
}

impl PositionRepository for MemoryDb {
    async fn get_position(&self, position_id: u64) -> Result<Option<Position>, AppError> {
        let Some(run_id) = self.tables.position_runs.get(&position_id).map(|r| *r) else {
            return Ok(None);
        };
        Ok(self.tables.positions.get(&run_id).and_then(|fixes| {
            fixes.iter().find(|p| p.id == position_id).cloned()
        }))
    }

    async fn list_positions_for_run(&self, run_id: u64) -> Result<Vec<Position>, AppError> {
        Ok(self
            .tables
            .positions
            .get(&run_id)
            .map(|fixes| fixes.clone())
            .unwrap_or_default())
    }

    async fn last_position_for_run(&self, run_id: u64) -> Result<Option<Position>, AppError> {
        Ok(self
            .tables
            .positions
            .get(&run_id)
            .and_then(|fixes| fixes.last().cloned()))
    }

    async fn insert_position(&self, record: PositionRecord) -> Result<Position, AppError> {
        let position = Position {
            id: next_id(&self.tables.next_position_id),
            run_id: record.run_id,
            latitude: record.latitude,
            longitude: record.longitude,
            date_time: record.date_time,
            speed: record.speed,
            distance: record.distance,
            path_km: record.path_km,
        };
        self.tables
            .positions
            .entry(record.run_id)
            .or_default()
            .push(position.clone());
        self.tables
            .position_runs
            .insert(position.id, position.run_id);
        Ok(position)
    }
}

impl CollectibleRepository for MemoryDb {
    async fn list_items(&self) -> Result<Vec<CollectibleItem>, AppError> {
        let mut items: Vec<CollectibleItem> =
            self.tables.items.iter().map(|i| i.clone()).collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn insert_item(&self, item: NewCollectibleItem) -> Result<CollectibleItem, AppError> {
        let item = CollectibleItem {
            id: next_id(&self.tables.next_item_id),
            name: item.name,
            uid: item.uid,
            latitude: item.latitude,
            longitude: item.longitude,
            picture: item.picture,
            value: item.value,
            found_by: BTreeSet::new(),
        };
        self.tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn add_finder(&self, item_id: u64, athlete_id: u64) -> Result<bool, AppError> {
        let mut item = self
            .tables
            .items
            .get_mut(&item_id)
            .ok_or_else(|| AppError::NotFound(format!("Collectible item {}", item_id)))?;
        Ok(item.found_by.insert(athlete_id))
    }
}

impl ChallengeRepository for MemoryDb {
    async fn create_challenge_if_absent(
        &self,
        full_name: &str,
        athlete_id: u64,
    ) -> Result<bool, AppError> {
        match self
            .tables
            .challenges
            .entry((full_name.to_string(), athlete_id))
        {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(Challenge {
                    id: next_id(&self.tables.next_challenge_id),
                    full_name: full_name.to_string(),
                    athlete_id,
                    granted_at: chrono::Utc::now(),
                });
                Ok(true)
            }
        }
    }

    async fn list_challenges(&self, athlete_id: Option<u64>) -> Result<Vec<Challenge>, AppError> {
        let mut challenges: Vec<Challenge> = self
            .tables
            .challenges
            .iter()
            .filter(|c| athlete_id.is_none_or(|id| c.athlete_id == id))
            .map(|c| c.clone())
            .collect();
        challenges.sort_by_key(|c| c.id);
        Ok(challenges)
    }
}

impl AthleteStats for MemoryDb {
    async fn finished_run_count(&self, athlete_id: u64) -> Result<u64, AppError> {
        Ok(self
            .tables
            .runs
            .iter()
            .filter(|r| r.athlete_id == athlete_id && r.status == RunStatus::Finished)
            .count() as u64)
    }

    async fn finished_run_total_distance(&self, athlete_id: u64) -> Result<f64, AppError> {
        Ok(self
            .tables
            .runs
            .iter()
            .filter(|r| r.athlete_id == athlete_id && r.status == RunStatus::Finished)
            .filter_map(|r| r.distance)
            .sum())
    }
}
