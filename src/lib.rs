// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run-Tracker: record runs, ingest GPS fixes, and award discoveries.
//!
//! This crate provides the core run lifecycle and position ingest pipeline,
//! plus a thin HTTP layer that exposes it.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Storage;
use services::RunTracker;

/// Shared application state.
pub struct AppState<S: Storage> {
    pub config: Config,
    pub db: S,
    pub tracker: RunTracker<S>,
}

impl<S: Storage> AppState<S> {
    pub fn new(config: Config, db: S) -> Self {
        let tracker = RunTracker::new(db.clone());
        Self {
            config,
            db,
            tracker,
        }
    }
}
