//! Per-truck stop ordering with the nearest-neighbor heuristic.

use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::model::{DayRoutes, DaySchedule, Depot, OutletId, OutletTable, Route, Stop};
use crate::traits::DistanceMatrixProvider;

/// Sequences every truck with a non-empty assignment on one day.
///
/// Trucks without outlets produce no route.
pub fn sequence_day<M>(
    day_schedule: &DaySchedule,
    table: &OutletTable,
    depot: &Depot,
    matrix_provider: &M,
) -> Result<DayRoutes>
where
    M: DistanceMatrixProvider + ?Sized,
{
    let mut routes = DayRoutes::new();
    for (&truck, assigned) in day_schedule {
        if assigned.is_empty() {
            continue;
        }
        let route = sequence_truck(assigned, table, depot, matrix_provider)?;
        debug!(truck, stops = route.visit_count(), "sequenced route");
        routes.insert(truck, route);
    }
    Ok(routes)
}

/// Orders one truck's outlets: depot, nearest unvisited outlet, ..., depot.
pub fn sequence_truck<M>(
    assigned: &[OutletId],
    table: &OutletTable,
    depot: &Depot,
    matrix_provider: &M,
) -> Result<Route>
where
    M: DistanceMatrixProvider + ?Sized,
{
    let mut points = Vec::with_capacity(assigned.len() + 2);
    points.push(Stop::Depot);
    points.extend(assigned.iter().cloned().map(Stop::Outlet));
    points.push(Stop::Depot);

    let locations = points
        .iter()
        .map(|stop| table.resolve(stop, depot))
        .collect::<Result<Vec<_>>>()?;

    let matrix = matrix_provider.matrix_for(&locations)?;
    if matrix.len() != locations.len() || matrix.iter().any(|row| row.len() != locations.len()) {
        return Err(PlannerError::Matrix(format!(
            "expected a {n}x{n} matrix, got {} rows",
            matrix.len(),
            n = locations.len()
        )));
    }

    let order = nearest_neighbor_order(&matrix, assigned.len());
    Ok(Route::from_visits(
        order.into_iter().map(|point| assigned[point - 1].clone()),
    ))
}

/// Visiting order over matrix indices `1..=interior`, starting from index 0.
///
/// Ties go to the lowest index.
fn nearest_neighbor_order(matrix: &[Vec<f64>], interior: usize) -> Vec<usize> {
    let mut unvisited: Vec<usize> = (1..=interior).collect();
    let mut order = Vec::with_capacity(interior);
    let mut current = 0;

    while !unvisited.is_empty() {
        let mut best = 0;
        for (position, &candidate) in unvisited.iter().enumerate().skip(1) {
            if matrix[current][candidate] < matrix[current][unvisited[best]] {
                best = position;
            }
        }

        let next = unvisited.remove(best);
        order.push(next);
        current = next;
    }

    order
}
