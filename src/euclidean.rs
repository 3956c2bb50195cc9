//! Planar distance on raw latitude/longitude values.
//!
//! Not a real distance: degrees of longitude shrink away from the equator.
//! It is the default sequencing proxy because only the ordering of
//! candidate distances matters to the nearest-neighbor pick.

use crate::error::Result;
use crate::traits::DistanceMatrixProvider;

/// Straight-line distance between two (lat, lng) pairs, in degrees.
pub fn euclidean(from: (f64, f64), to: (f64, f64)) -> f64 {
    (from.0 - to.0).hypot(from.1 - to.1)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMatrix;

impl DistanceMatrixProvider for EuclideanMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<Vec<Vec<f64>>> {
        Ok(locations
            .iter()
            .map(|from| locations.iter().map(|to| euclidean(*from, *to)).collect())
            .collect())
    }
}
