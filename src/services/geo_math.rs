// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geodesic distance and speed helpers.
//!
//! Everything here works at full precision; callers round with [`round2`]
//! when they persist a value.

use crate::models::LatLon;
use chrono::{DateTime, Utc};
use geo::{Distance, Geodesic, Point};

/// Geodesic (WGS84) distance in meters.
pub fn distance_m(a: LatLon, b: LatLon) -> f64 {
    Geodesic.distance(Point::from(a), Point::from(b))
}

/// Geodesic (WGS84) distance in kilometers.
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    distance_m(a, b) / 1000.0
}

/// Total length of the path through `points` in order, in kilometers.
pub fn path_distance_km(points: &[LatLon]) -> f64 {
    points.windows(2).map(|w| distance_km(w[0], w[1])).sum()
}

/// Average speed between two fixes in meters/second.
///
/// Zero or negative elapsed time yields 0.
pub fn speed_mps(a: LatLon, t1: DateTime<Utc>, b: LatLon, t2: DateTime<Utc>) -> f64 {
    let elapsed = (t2 - t1).num_milliseconds() as f64 / 1000.0;
    if elapsed <= 0.0 {
        return 0.0;
    }
    distance_m(a, b) / elapsed
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
