// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Collectible catalog items.

use crate::models::LatLon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A collectible placed at a fixed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleItem {
    pub id: u64,
    pub name: String,
    /// External catalog identifier
    pub uid: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Image reference (URL)
    pub picture: String,
    /// Point value
    pub value: i64,
    /// Athletes who have found this item
    #[serde(default)]
    pub found_by: BTreeSet<u64>,
}

impl CollectibleItem {
    pub fn coords(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }

    pub fn is_found_by(&self, athlete_id: u64) -> bool {
        self.found_by.contains(&athlete_id)
    }
}

/// Catalog entry before it has been stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollectibleItem {
    pub name: String,
    pub uid: String,
    pub latitude: f64,
    pub longitude: f64,
    pub picture: String,
    pub value: i64,
}
