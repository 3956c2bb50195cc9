//! Polyline representation for route geometries.
//!
//! A route projected onto coordinates. This is what the exporter writes and
//! the map draws, and what route lengths are measured on.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;

/// A polyline representing a route geometry as decoded coordinates.
///
/// Each point is a (latitude, longitude) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Great-circle length in kilometers, summed over consecutive points.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .fold(0.0, |total, km| total + km)
    }
}
