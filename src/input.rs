//! Validation of user-supplied request parameters.
//!
//! Everything here runs before the planner; malformed input never reaches it.

use crate::error::{PlannerError, Result};
use crate::model::{DAYS_PER_WEEK, Day, TruckCounts};

/// Parses a comma-separated list of exactly five truck counts, e.g. `"2, 3, 2, 2, 1"`.
pub fn parse_truck_counts(input: &str) -> Result<TruckCounts> {
    let counts = input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<usize>().map_err(|_| {
                PlannerError::InvalidTruckInput(format!("'{part}' is not a non-negative integer"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if counts.len() != DAYS_PER_WEEK {
        return Err(PlannerError::InvalidTruckInput(format!(
            "please enter exactly {DAYS_PER_WEEK} numbers, got {}",
            counts.len()
        )));
    }

    TruckCounts::try_from(counts)
}

/// Parses a 1-based day number (1 = Monday .. 5 = Friday).
pub fn parse_day(input: &str) -> Result<Day> {
    let input = input.trim();
    input
        .parse::<usize>()
        .ok()
        .and_then(Day::from_ordinal)
        .ok_or_else(|| {
            PlannerError::InvalidDaySelection(format!(
                "'{input}' is not a day number between 1 and {DAYS_PER_WEEK}"
            ))
        })
}
