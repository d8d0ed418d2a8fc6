//! Storage layer.
//!
//! The core is written against these repository traits; `MemoryDb` is the
//! bundled backend.

pub mod memory;

pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{
    Challenge, CollectibleItem, NewCollectibleItem, NewRun, Position, Run, RunStatus,
};
use chrono::{DateTime, Utc};
use std::future::Future;

/// Run storage.
pub trait RunRepository: Send + Sync {
    fn get_run(&self, run_id: u64) -> impl Future<Output = Result<Option<Run>, AppError>> + Send;

    fn insert_run(&self, new_run: NewRun) -> impl Future<Output = Result<Run, AppError>> + Send;

    /// Overwrite the stored run only if its stored status is still `expected`.
    ///
    /// Returns `false` without writing if the status changed underneath us.
    fn save_run_if_status(
        &self,
        run: &Run,
        expected: RunStatus,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn list_runs_for_athlete(
        &self,
        athlete_id: u64,
    ) -> impl Future<Output = Result<Vec<Run>, AppError>> + Send;
}

/// Fix to be stored; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct PositionRecord {
    pub run_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub date_time: DateTime<Utc>,
    pub speed: f64,
    pub distance: Option<f64>,
    pub path_km: f64,
}

/// GPS fix storage. Fixes of a run are returned in insertion order.
pub trait PositionRepository: Send + Sync {
    fn get_position(
        &self,
        position_id: u64,
    ) -> impl Future<Output = Result<Option<Position>, AppError>> + Send;

    fn list_positions_for_run(
        &self,
        run_id: u64,
    ) -> impl Future<Output = Result<Vec<Position>, AppError>> + Send;

    fn last_position_for_run(
        &self,
        run_id: u64,
    ) -> impl Future<Output = Result<Option<Position>, AppError>> + Send;

    fn insert_position(
        &self,
        record: PositionRecord,
    ) -> impl Future<Output = Result<Position, AppError>> + Send;
}

/// Collectible catalog storage.
pub trait CollectibleRepository: Send + Sync {
    /// All items in ascending id order.
    fn list_items(&self) -> impl Future<Output = Result<Vec<CollectibleItem>, AppError>> + Send;

    fn insert_item(
        &self,
        item: NewCollectibleItem,
    ) -> impl Future<Output = Result<CollectibleItem, AppError>> + Send;

    /// Atomically add `athlete_id` to the item's found-set.
    ///
    /// Returns `true` if the athlete was newly added.
    fn add_finder(
        &self,
        item_id: u64,
        athlete_id: u64,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Challenge storage backed by a `(full_name, athlete_id)` uniqueness rule.
pub trait ChallengeRepository: Send + Sync {
    /// Insert the challenge unless the pair already exists.
    ///
    /// Returns `true` if a new challenge was created.
    fn create_challenge_if_absent(
        &self,
        full_name: &str,
        athlete_id: u64,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn list_challenges(
        &self,
        athlete_id: Option<u64>,
    ) -> impl Future<Output = Result<Vec<Challenge>, AppError>> + Send;
}

/// Aggregates over an athlete's finished runs.
pub trait AthleteStats: Send + Sync {
    fn finished_run_count(
        &self,
        athlete_id: u64,
    ) -> impl Future<Output = Result<u64, AppError>> + Send;

    /// Sum of `distance` over finished runs in kilometers.
    fn finished_run_total_distance(
        &self,
        athlete_id: u64,
    ) -> impl Future<Output = Result<f64, AppError>> + Send;
}

/// Everything the core needs from a storage backend.
pub trait Storage:
    RunRepository
    + PositionRepository
    + CollectibleRepository
    + ChallengeRepository
    + AthleteStats
    + Clone
    + 'static
{
}

impl<T> Storage for T where
    T: RunRepository
        + PositionRepository
        + CollectibleRepository
        + ChallengeRepository
        + AthleteStats
        + Clone
        + 'static
{
}
