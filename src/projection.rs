//! Projection of identifier routes onto coordinates.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{DAYS_PER_WEEK, Day, Depot, OutletTable, Route, WeeklyRoutePlan};
use crate::polyline::Polyline;

/// Truck index to projected route for one day.
pub type DayPolylines = BTreeMap<usize, Polyline>;

/// Every route of the week as coordinate sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPlan {
    days: Vec<DayPolylines>,
}

impl ProjectedPlan {
    pub(crate) fn from_days(days: Vec<DayPolylines>) -> Self {
        debug_assert_eq!(days.len(), DAYS_PER_WEEK);
        Self { days }
    }

    pub fn day(&self, day: Day) -> &DayPolylines {
        &self.days[day.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayPolylines)> {
        Day::ALL.into_iter().zip(self.days.iter())
    }

    pub fn day_length_km(&self, day: Day) -> f64 {
        self.day(day)
            .values()
            .map(Polyline::length_km)
            .fold(0.0, |total, km| total + km)
    }

    pub fn weekly_length_km(&self) -> f64 {
        Day::ALL
            .into_iter()
            .map(|day| self.day_length_km(day))
            .fold(0.0, |total, km| total + km)
    }
}

/// Coordinates of each stop; the depot sentinel becomes the depot location.
pub fn project_route(route: &Route, table: &OutletTable, depot: &Depot) -> Result<Polyline> {
    let points = route
        .stops()
        .iter()
        .map(|stop| table.resolve(stop, depot))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polyline::new(points))
}

pub fn project_plan(
    plan: &WeeklyRoutePlan,
    table: &OutletTable,
    depot: &Depot,
) -> Result<ProjectedPlan> {
    let mut days = Vec::with_capacity(DAYS_PER_WEEK);
    for (_, routes) in plan.iter() {
        let projected = routes
            .iter()
            .map(|(&truck, route)| -> Result<(usize, Polyline)> {
                Ok((truck, project_route(route, table, depot)?))
            })
            .collect::<Result<DayPolylines>>()?;
        days.push(projected);
    }
    Ok(ProjectedPlan::from_days(days))
}
