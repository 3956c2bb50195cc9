//! Weekly assignment of outlets to days and trucks.
//!
//! Each outlet is visited `frequency` times on pairwise non-adjacent days.
//! Outlets are placed in descending frequency order so the most constrained
//! ones pick their days first.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};
use crate::model::{Day, Outlet, TruckCounts, WeeklySchedule};

/// How the scheduler chooses among an outlet's remaining candidate days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPolicy {
    /// Uniformly at random.
    #[default]
    Random,
    /// The candidate day with the fewest stops so far; ties broken at random.
    LeastLoaded,
}

impl FromStr for DayPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "random" => Ok(DayPolicy::Random),
            "least_loaded" => Ok(DayPolicy::LeastLoaded),
            other => Err(format!("unknown day policy '{other}' (expected random or least_loaded)")),
        }
    }
}

impl fmt::Display for DayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPolicy::Random => f.write_str("random"),
            DayPolicy::LeastLoaded => f.write_str("least_loaded"),
        }
    }
}

/// Builds the weekly truck assignment.
///
/// Fails with [`PlannerError::SchedulingInfeasible`] as soon as one outlet runs
/// out of candidate days; there is no retry with a different draw.
pub fn build_weekly_schedule<R>(
    outlets: &[Outlet],
    trucks: &TruckCounts,
    policy: DayPolicy,
    rng: &mut R,
) -> Result<WeeklySchedule>
where
    R: Rng + ?Sized,
{
    let mut ordered: Vec<&Outlet> = outlets.iter().collect();
    ordered.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for day in Day::ALL {
        if trucks.on(day) == 0 {
            warn!(%day, "no trucks available, day excluded from scheduling");
        }
    }

    let mut schedule = WeeklySchedule::default();
    for outlet in ordered {
        if outlet.frequency == 0 {
            warn!(outlet = %outlet.id, "outlet has zero frequency, not scheduled");
            continue;
        }
        assign_outlet(&mut schedule, outlet, trucks, policy, rng)?;
    }

    info!(
        outlets = outlets.len(),
        visits = Day::ALL.iter().map(|day| schedule.load_on(*day)).sum::<usize>(),
        %policy,
        "weekly schedule built"
    );

    Ok(schedule)
}

fn assign_outlet<R>(
    schedule: &mut WeeklySchedule,
    outlet: &Outlet,
    trucks: &TruckCounts,
    policy: DayPolicy,
    rng: &mut R,
) -> Result<()>
where
    R: Rng + ?Sized,
{
    let mut candidates: BTreeSet<Day> = Day::ALL
        .into_iter()
        .filter(|day| trucks.on(*day) > 0)
        .collect();
    let mut remaining = outlet.frequency;

    while remaining > 0 {
        let day = pick_day(&candidates, schedule, policy, rng).ok_or_else(|| {
            PlannerError::SchedulingInfeasible {
                outlet: outlet.id.clone(),
                required: outlet.frequency,
                remaining,
            }
        })?;
        let truck = rng.random_range(0..trucks.on(day));

        debug!(outlet = %outlet.id, %day, truck, "assigned visit");
        schedule.assign(day, truck, outlet.id.clone());
        remaining -= 1;

        candidates.remove(&day);
        for neighbour in day.neighbours() {
            candidates.remove(&neighbour);
        }
    }

    Ok(())
}

fn pick_day<R>(
    candidates: &BTreeSet<Day>,
    schedule: &WeeklySchedule,
    policy: DayPolicy,
    rng: &mut R,
) -> Option<Day>
where
    R: Rng + ?Sized,
{
    let pool: Vec<Day> = match policy {
        DayPolicy::Random => candidates.iter().copied().collect(),
        DayPolicy::LeastLoaded => {
            let lightest = candidates.iter().map(|day| schedule.load_on(*day)).min()?;
            candidates
                .iter()
                .copied()
                .filter(|day| schedule.load_on(*day) == lightest)
                .collect()
        }
    };

    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.random_range(0..pool.len())])
}
