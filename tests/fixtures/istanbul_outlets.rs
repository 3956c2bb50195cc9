//! Outlet fixtures around the Istanbul depot.
//!
//! Coordinates are approximate neighbourhood centres on both sides of the
//! Bosphorus, close enough to the depot for a day's delivery round.

use delivery_planner::{Depot, Outlet};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const DEPOT: Depot = Depot::new(41.08919085025256, 29.04999926199514);

// ============================================================================
// European side
// ============================================================================

pub const EUROPEAN_SIDE: &[Location] = &[
    Location::new("Bebek", 41.0771, 29.0434),
    Location::new("Arnavutkoy", 41.0683, 29.0430),
    Location::new("Ortakoy", 41.0475, 29.0265),
    Location::new("Besiktas", 41.0422, 29.0083),
    Location::new("Levent", 41.0820, 29.0110),
    Location::new("Etiler", 41.0810, 29.0330),
    Location::new("Sariyer", 41.1667, 29.0500),
    Location::new("Istinye", 41.1130, 29.0580),
    Location::new("Maslak", 41.1090, 29.0200),
    Location::new("Sisli", 41.0602, 28.9877),
    Location::new("Mecidiyekoy", 41.0670, 28.9960),
    Location::new("Taksim", 41.0370, 28.9850),
];

// ============================================================================
// Asian side
// ============================================================================

pub const ASIAN_SIDE: &[Location] = &[
    Location::new("Kandilli", 41.0740, 29.0600),
    Location::new("Anadoluhisari", 41.0830, 29.0680),
    Location::new("Kanlica", 41.0990, 29.0660),
    Location::new("Beykoz", 41.1320, 29.0950),
    Location::new("Cengelkoy", 41.0500, 29.0600),
    Location::new("Beylerbeyi", 41.0440, 29.0470),
    Location::new("Uskudar", 41.0260, 29.0150),
    Location::new("Umraniye", 41.0160, 29.1240),
    Location::new("Kadikoy", 40.9900, 29.0290),
    Location::new("Atasehir", 40.9920, 29.1240),
];

/// Returns all locations as a single list.
pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(EUROPEAN_SIDE.len() + ASIAN_SIDE.len());
    all.extend_from_slice(EUROPEAN_SIDE);
    all.extend_from_slice(ASIAN_SIDE);
    all
}

/// Outlets for every fixture location with frequencies cycling 1, 2, 0, 3.
///
/// Identifiers are numeric strings, as in a typical outlet export.
pub fn weekly_outlets() -> Vec<Outlet> {
    const FREQUENCIES: [u8; 4] = [1, 2, 0, 3];

    all_locations()
        .iter()
        .enumerate()
        .map(|(i, location)| {
            Outlet::new(
                format!("{}", 1000 + i),
                location.lat,
                location.lng,
                FREQUENCIES[i % FREQUENCIES.len()],
            )
        })
        .collect()
}

/// The same outlets without any frequency-3 entries, which can be
/// infeasible depending on the draw.
pub fn always_feasible_outlets() -> Vec<Outlet> {
    weekly_outlets()
        .into_iter()
        .map(|mut outlet| {
            outlet.frequency = outlet.frequency.min(2);
            outlet
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations_near_depot() {
        for location in all_locations() {
            let (lat, lng) = location.coords();
            assert!((lat - DEPOT.latitude).abs() < 0.2, "{} too far", location.name);
            assert!((lng - DEPOT.longitude).abs() < 0.2, "{} too far", location.name);
        }
    }
}
