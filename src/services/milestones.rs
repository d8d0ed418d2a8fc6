// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Milestone evaluation on run completion.

use crate::db::{AthleteStats, ChallengeRepository};
use crate::models::Milestone;

/// Grants one-time challenges when an athlete crosses a threshold.
///
/// Grants are best effort: failures are logged and never reach the caller.
/// The repository's `(full_name, athlete_id)` uniqueness is what keeps
/// concurrent grants from duplicating.
#[derive(Clone)]
pub struct MilestoneEvaluator<S> {
    db: S,
}

impl<S: AthleteStats + ChallengeRepository> MilestoneEvaluator<S> {
    pub fn new(db: S) -> Self {
        Self { db }
    }

    /// Check both milestones for `athlete_id`, returning the ones newly granted.
    pub async fn evaluate(&self, athlete_id: u64) -> Vec<Milestone> {
        let mut granted = Vec::new();

        match self.db.finished_run_count(athlete_id).await {
            // Exact match so the grant happens at the crossing, not on every later run
            Ok(count) if count == Milestone::RUN_COUNT => {
                if self.grant(Milestone::TenRuns, athlete_id).await {
                    granted.push(Milestone::TenRuns);
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(athlete_id, error = %e, "Failed to count finished runs");
            }
        }

        match self.db.finished_run_total_distance(athlete_id).await {
            Ok(total_km) if total_km >= Milestone::TOTAL_DISTANCE_KM => {
                if self.grant(Milestone::FiftyKilometers, athlete_id).await {
                    granted.push(Milestone::FiftyKilometers);
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(athlete_id, error = %e, "Failed to total finished distance");
            }
        }

        granted
    }

    async fn grant(&self, milestone: Milestone, athlete_id: u64) -> bool {
        match self
            .db
            .create_challenge_if_absent(milestone.full_name(), athlete_id)
            .await
        {
            Ok(true) => {
                tracing::info!(
                    athlete_id,
                    challenge = milestone.full_name(),
                    "Challenge granted"
                );
                true
            }
            Ok(false) => {
                tracing::debug!(
                    athlete_id,
                    challenge = milestone.full_name(),
                    "Challenge already granted"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    athlete_id,
                    challenge = milestone.full_name(),
                    error = %e,
                    "Failed to grant challenge"
                );
                false
            }
        }
    }
}
