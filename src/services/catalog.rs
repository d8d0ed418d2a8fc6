// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Collectible catalog seeding from GeoJSON.

use crate::db::CollectibleRepository;
use crate::error::AppError;
use crate::models::{CollectibleItem, LatLon, NewCollectibleItem};
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// Parsed catalog entries ready to be stored, in file order.
#[derive(Debug, Default, Clone)]
pub struct CatalogLoader {
    items: Vec<NewCollectibleItem>,
}

impl CatalogLoader {
    /// Load catalog entries from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load catalog entries from a GeoJSON `FeatureCollection` of points.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| CatalogError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(CatalogError::NotFeatureCollection);
        };

        let mut items = Vec::new();
        for feature in collection.features {
            let Some(geojson::Value::Point(coords)) = feature.geometry.as_ref().map(|g| &g.value)
            else {
                tracing::debug!("Skipping non-point catalog feature");
                continue;
            };
            // GeoJSON positions are [lng, lat]
            let (Some(&longitude), Some(&latitude)) = (coords.first(), coords.get(1)) else {
                continue;
            };

            let text = |key: &str| {
                feature
                    .property(key)
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string()
            };

            let name = text("name");
            if !LatLon::new(latitude, longitude).is_valid() {
                tracing::warn!(
                    name = %name,
                    latitude,
                    longitude,
                    "Catalog item has out-of-range coordinates"
                );
            }

            items.push(NewCollectibleItem {
                uid: text("uid"),
                picture: text("picture"),
                value: feature
                    .property("value")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0),
                name,
                latitude,
                longitude,
            });
        }

        tracing::info!(count = items.len(), "Loaded catalog");
        Ok(Self { items })
    }

    /// Get the parsed entries.
    pub fn items(&self) -> &[NewCollectibleItem] {
        &self.items
    }

    /// Insert every entry into `db`, preserving file order.
    pub async fn seed<S: CollectibleRepository>(
        &self,
        db: &S,
    ) -> Result<Vec<CollectibleItem>, AppError> {
        let mut stored = Vec::with_capacity(self.items.len());
        for item in &self.items {
            stored.push(db.insert_item(item.clone()).await?);
        }
        Ok(stored)
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Catalog must be a GeoJSON FeatureCollection")]
    NotFeatureCollection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;

    const CATALOG: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-122.0857, 37.3318] },
                "properties": { "name": "Bronze Medal", "uid": "bm-01", "value": 10, "picture": "https://example.com/bm.png" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                "properties": { "name": "Not a point" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [10.0, 95.0] },
                "properties": { "name": "Bad Latitude", "uid": "bad-01" }
            }
        ]
    }"#;

    #[test]
    fn test_parses_points_in_order() {
        let catalog = CatalogLoader::load_from_json(CATALOG).unwrap();
        let names: Vec<&str> = catalog.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Bronze Medal", "Bad Latitude"]);

        let first = &catalog.items()[0];
        assert_eq!(first.latitude, 37.3318);
        assert_eq!(first.longitude, -122.0857);
        assert_eq!(first.value, 10);
        assert_eq!(first.uid, "bm-01");

        // Missing properties fall back to defaults
        assert_eq!(catalog.items()[1].value, 0);
        assert_eq!(catalog.items()[1].picture, "");
    }

    #[test]
    fn test_rejects_non_collection() {
        let err = CatalogLoader::load_from_json(r#"{"type": "Point", "coordinates": [0, 0]}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFeatureCollection));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = CatalogLoader::load_from_json("not json").unwrap_err();
        assert!(matches!(err, CatalogError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_seed_assigns_ids_in_file_order() {
        let db = MemoryDb::new();
        let catalog = CatalogLoader::load_from_json(CATALOG).unwrap();
        let stored = catalog.seed(&db).await.unwrap();

        assert_eq!(stored.len(), 2);
        assert!(stored[0].id < stored[1].id);
        assert_eq!(stored[0].name, "Bronze Medal");
    }
}
