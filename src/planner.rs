//! Weekly orchestration: schedule once, then sequence each day.

use rand::Rng;
use rayon::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::model::{Day, DayRoutes, Depot, OutletTable, TruckCounts, WeeklyRoutePlan};
use crate::scheduler::{DayPolicy, build_weekly_schedule};
use crate::sequencer::sequence_day;
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub day_policy: DayPolicy,
}

/// Builds the weekly schedule and sequences each day's trucks.
///
/// Days are independent once the schedule exists, so they are sequenced in
/// parallel. The schedule itself is dropped after sequencing.
pub fn plan_week<M, R>(
    table: &OutletTable,
    depot: &Depot,
    trucks: &TruckCounts,
    matrix_provider: &M,
    options: &PlanOptions,
    rng: &mut R,
) -> Result<WeeklyRoutePlan>
where
    M: DistanceMatrixProvider + Sync + ?Sized,
    R: Rng + ?Sized,
{
    let schedule = build_weekly_schedule(table.outlets(), trucks, options.day_policy, rng)?;

    let days = Day::ALL
        .as_slice()
        .par_iter()
        .map(|day| sequence_day(schedule.day(*day), table, depot, matrix_provider))
        .collect::<Result<Vec<DayRoutes>>>()?;

    let plan = WeeklyRoutePlan::from_days(days);
    info!(routes = plan.route_count(), "weekly route plan ready");
    Ok(plan)
}
