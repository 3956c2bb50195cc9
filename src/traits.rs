//! Seams between the planning core and its collaborators.
//!
//! These are intentionally minimal. The crate ships CSV/XLSX/HTML/OSRM
//! implementations, but callers can plug in their own.

use crate::error::Result;
use crate::export::RouteRow;
use crate::map::DayMap;
use crate::model::Outlet;

/// Provides a pairwise distance matrix for a set of locations.
///
/// The matrix is indexed by the provided location order. Only relative
/// magnitudes matter to the sequencer, so units are up to the provider.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<Vec<Vec<f64>>>;
}

impl<T: DistanceMatrixProvider + ?Sized> DistanceMatrixProvider for Box<T> {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<Vec<Vec<f64>>> {
        (**self).matrix_for(locations)
    }
}

/// Supplies the outlet records to plan for.
pub trait OutletSource {
    fn load(&self) -> Result<Vec<Outlet>>;
}

/// Writes flattened route rows somewhere durable.
pub trait RouteExporter {
    fn export(&self, rows: &[RouteRow]) -> Result<()>;
}

/// Renders one day's routes into a document.
pub trait MapRenderer {
    fn render(&self, map: &DayMap<'_>) -> Result<String>;
}
