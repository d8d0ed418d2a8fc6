// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod challenge;
pub mod collectible;
pub mod position;
pub mod run;

pub use challenge::{Challenge, Milestone};
pub use collectible::{CollectibleItem, NewCollectibleItem};
pub use position::{LatLon, NewFix, Position};
pub use run::{NewRun, Run, RunAction, RunStatus};
