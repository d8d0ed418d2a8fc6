// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Milestone challenges granted to athletes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A granted challenge. `(full_name, athlete_id)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u64,
    pub full_name: String,
    pub athlete_id: u64,
    pub granted_at: DateTime<Utc>,
}

/// Athlete-level thresholds that grant a challenge once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// Exactly ten finished runs
    TenRuns,
    /// At least 50 km across finished runs
    FiftyKilometers,
}

impl Milestone {
    pub const RUN_COUNT: u64 = 10;
    pub const TOTAL_DISTANCE_KM: f64 = 50.0;

    pub fn full_name(&self) -> &'static str {
        match self {
            Milestone::TenRuns => "Make 10 runs!",
            Milestone::FiftyKilometers => "Run 50 kilometers!",
        }
    }
}
