// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod discovery;
pub mod geo_math;
pub mod ingest;
pub mod lifecycle;
pub mod locks;
pub mod milestones;
pub mod tracker;

pub use catalog::CatalogLoader;
pub use discovery::CollectibleDiscovery;
pub use ingest::{IngestOutcome, PositionIngest};
pub use lifecycle::RunLifecycle;
pub use locks::KeyedLocks;
pub use milestones::MilestoneEvaluator;
pub use tracker::RunTracker;
