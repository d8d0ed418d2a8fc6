// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run model and its lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a run.
///
/// A run only ever moves forward: `Init` -> `InProgress` -> `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Init,
    InProgress,
    Finished,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Init => "init",
            RunStatus::InProgress => "in_progress",
            RunStatus::Finished => "finished",
        }
    }

    /// Status reached by applying `action`, or `None` if the transition is illegal.
    pub fn apply(self, action: RunAction) -> Option<RunStatus> {
        match (self, action) {
            (RunStatus::Init, RunAction::Start) => Some(RunStatus::InProgress),
            (RunStatus::InProgress, RunAction::Stop) => Some(RunStatus::Finished),
            _ => None,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle request made against a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Start,
    Stop,
}

impl RunAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunAction::Start => "start",
            RunAction::Stop => "stop",
        }
    }
}

/// Stored run record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: u64,
    /// Athlete who owns the run
    pub athlete_id: u64,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub status: RunStatus,
    /// Total path distance in kilometers, set when the run finishes
    pub distance: Option<f64>,
    /// Seconds between the first and last fix, set when the run finishes
    pub run_time_seconds: Option<i64>,
}

/// Fields supplied when creating a run.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRun {
    pub athlete_id: u64,
    #[serde(default)]
    pub comment: String,
}
