// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Collectible discovery: award the first unfound item near a fix.

use crate::db::CollectibleRepository;
use crate::error::Result;
use crate::models::{CollectibleItem, LatLon};
use crate::services::geo_math::distance_m;

/// Geofence radius around each collectible, in meters (inclusive).
pub const DISCOVERY_RADIUS_METERS: f64 = 100.0;

/// Scans the catalog for items within reach of a fix.
#[derive(Clone)]
pub struct CollectibleDiscovery<S> {
    db: S,
}

impl<S: CollectibleRepository> CollectibleDiscovery<S> {
    pub fn new(db: S) -> Self {
        Self { db }
    }

    /// Record and return at most one newly found item for `athlete_id` at `point`.
    ///
    /// Items are scanned in ascending id order. Items already found by the
    /// athlete never trigger again.
    pub async fn discover(&self, point: LatLon, athlete_id: u64) -> Result<Option<CollectibleItem>> {
        let items = self.db.list_items().await?;

        for mut item in items {
            if !item.coords().is_valid() {
                tracing::warn!(
                    item_id = item.id,
                    latitude = item.latitude,
                    longitude = item.longitude,
                    "Skipping collectible with invalid coordinates"
                );
                continue;
            }

            if item.is_found_by(athlete_id) || !within_geofence(point, item.coords()) {
                continue;
            }

            // Lost race: another fix for this athlete claimed it first.
            if !self.db.add_finder(item.id, athlete_id).await? {
                continue;
            }

            item.found_by.insert(athlete_id);
            tracing::info!(
                item_id = item.id,
                athlete_id,
                name = %item.name,
                "Collectible found"
            );
            return Ok(Some(item));
        }

        Ok(None)
    }
}

/// Whether `item` lies within the discovery radius of `point`.
pub fn within_geofence(point: LatLon, item: LatLon) -> bool {
    distance_m(point, item) <= DISCOVERY_RADIUS_METERS
}
