// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! GPS fix model and coordinate validation.

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check both components, latitude first, naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AppError::OutOfRange {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AppError::OutOfRange {
                field: "longitude",
                value: self.longitude,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// geo uses (x, y) = (lng, lat) order
impl From<LatLon> for geo::Point<f64> {
    fn from(c: LatLon) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

/// Stored GPS fix belonging to a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: u64,
    pub run_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub date_time: DateTime<Utc>,
    /// Speed since the previous fix in meters/second
    pub speed: f64,
    /// Cumulative distance in kilometers, unset for a lone first fix
    pub distance: Option<f64>,
    /// Unrounded cumulative path length in kilometers
    #[serde(default)]
    pub path_km: f64,
}

impl Position {
    pub fn coords(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }
}

/// Candidate fix submitted for ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFix {
    #[serde(rename = "run")]
    pub run_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub date_time: DateTime<Utc>,
}

impl NewFix {
    pub fn coords(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(LatLon::new(90.0, 180.0).is_valid());
        assert!(LatLon::new(-90.0, -180.0).is_valid());
        assert!(LatLon::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn test_validate_names_latitude_first() {
        let err = LatLon::new(95.0, 200.0).validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::OutOfRange {
                field: "latitude",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_longitude() {
        let err = LatLon::new(10.0, -180.5).validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::OutOfRange {
                field: "longitude",
                ..
            }
        ));
    }

    #[test]
    fn test_nan_is_out_of_range() {
        assert!(!LatLon::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_point_uses_lng_lat_order() {
        let p: geo::Point<f64> = LatLon::new(37.4, -122.1).into();
        assert_eq!(p.x(), -122.1);
        assert_eq!(p.y(), 37.4);
    }
}
