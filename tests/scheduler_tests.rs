//! Weekly scheduler tests
//!
//! Visit counts, adjacency, truck bounds and infeasibility.

mod fixtures;

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use delivery_planner::scheduler::{DayPolicy, build_weekly_schedule};
use delivery_planner::{Day, Outlet, OutletId, PlannerError, TruckCounts, WeeklySchedule};

// ============================================================================
// Helpers
// ============================================================================

fn outlet(id: &str, frequency: u8) -> Outlet {
    Outlet::new(id, 41.0, 29.0, frequency)
}

fn visit_counts(schedule: &WeeklySchedule) -> HashMap<OutletId, usize> {
    let mut counts = HashMap::new();
    for day in Day::ALL {
        for outlets in schedule.day(day).values() {
            for id in outlets {
                *counts.entry(id.clone()).or_default() += 1;
            }
        }
    }
    counts
}

/// Checks every invariant a finished schedule must satisfy.
fn assert_valid(schedule: &WeeklySchedule, outlets: &[Outlet], trucks: &TruckCounts) {
    let counts = visit_counts(schedule);
    for outlet in outlets {
        let visits = counts.get(&outlet.id).copied().unwrap_or(0);
        assert_eq!(
            visits, outlet.frequency as usize,
            "outlet {} visited {} times, wants {}",
            outlet.id, visits, outlet.frequency
        );

        let days = schedule.days_for(&outlet.id);
        for pair in days.windows(2) {
            assert!(
                !pair[0].is_adjacent_to(pair[1]) && pair[0] != pair[1],
                "outlet {} scheduled on {:?}",
                outlet.id,
                days
            );
        }
    }

    for day in Day::ALL {
        for &truck in schedule.day(day).keys() {
            assert!(truck < trucks.on(day), "truck {} out of range on {}", truck, day);
        }
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn frequencies_met_without_adjacent_days() {
    let outlets = fixtures::always_feasible_outlets();
    let trucks = TruckCounts::new([2, 3, 2, 1, 2]);

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let schedule = build_weekly_schedule(&outlets, &trucks, DayPolicy::Random, &mut rng)
            .expect("frequencies up to 2 always fit");
        assert_valid(&schedule, &outlets, &trucks);
    }
}

#[test]
fn least_loaded_policy_keeps_invariants() {
    let outlets = fixtures::always_feasible_outlets();
    let trucks = TruckCounts::uniform(2);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let schedule = build_weekly_schedule(&outlets, &trucks, DayPolicy::LeastLoaded, &mut rng)
            .expect("frequencies up to 2 always fit");
        assert_valid(&schedule, &outlets, &trucks);
    }
}

#[test]
fn least_loaded_policy_spreads_single_visits() {
    let outlets: Vec<Outlet> = (0..10).map(|i| outlet(&format!("o{i}"), 1)).collect();
    let trucks = TruckCounts::uniform(1);
    let mut rng = StdRng::seed_from_u64(3);

    let schedule =
        build_weekly_schedule(&outlets, &trucks, DayPolicy::LeastLoaded, &mut rng).unwrap();

    for day in Day::ALL {
        assert_eq!(schedule.load_on(day), 2, "{} should carry 2 stops", day);
    }
}

#[test]
fn same_seed_same_schedule() {
    let outlets = fixtures::weekly_outlets();
    let trucks = TruckCounts::uniform(3);

    for seed in 0..20 {
        let first = build_weekly_schedule(
            &outlets,
            &trucks,
            DayPolicy::Random,
            &mut StdRng::seed_from_u64(seed),
        );
        let second = build_weekly_schedule(
            &outlets,
            &trucks,
            DayPolicy::Random,
            &mut StdRng::seed_from_u64(seed),
        );
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => panic!("seed {} gave different outcomes", seed),
        }
    }
}

#[test]
fn zero_frequency_outlets_are_not_scheduled() {
    let outlets = vec![outlet("idle", 0), outlet("busy", 2)];
    let trucks = TruckCounts::uniform(1);
    let mut rng = StdRng::seed_from_u64(11);

    let schedule = build_weekly_schedule(&outlets, &trucks, DayPolicy::Random, &mut rng).unwrap();

    assert!(schedule.days_for(&"idle".into()).is_empty());
    assert_eq!(schedule.days_for(&"busy".into()).len(), 2);
}

#[test]
fn trucks_drawn_within_daily_bounds() {
    let outlets: Vec<Outlet> = (0..40).map(|i| outlet(&format!("o{i}"), 2)).collect();
    let trucks = TruckCounts::new([1, 4, 2, 3, 5]);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let schedule =
            build_weekly_schedule(&outlets, &trucks, DayPolicy::Random, &mut rng).unwrap();
        assert_valid(&schedule, &outlets, &trucks);
    }
}

#[test]
fn days_without_trucks_are_skipped() {
    // Only Monday, Wednesday and Friday run: a frequency of 3 has exactly one fit
    let outlets = vec![outlet("tri", 3), outlet("solo", 1)];
    let trucks = TruckCounts::new([1, 0, 2, 0, 1]);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let schedule =
            build_weekly_schedule(&outlets, &trucks, DayPolicy::Random, &mut rng).unwrap();

        assert_eq!(
            schedule.days_for(&"tri".into()),
            vec![Day::ALL[0], Day::ALL[2], Day::ALL[4]]
        );
        assert!(schedule.day(Day::ALL[1]).is_empty());
        assert!(schedule.day(Day::ALL[3]).is_empty());
    }
}

#[test]
fn empty_outlet_list_gives_empty_schedule() {
    let mut rng = StdRng::seed_from_u64(0);
    let schedule =
        build_weekly_schedule(&[], &TruckCounts::uniform(2), DayPolicy::Random, &mut rng).unwrap();

    for day in Day::ALL {
        assert_eq!(schedule.load_on(day), 0);
    }
}

// ============================================================================
// Infeasibility
// ============================================================================

#[test]
fn frequency_four_is_infeasible() {
    let outlets = vec![outlet("a", 1), outlet("four", 4)];
    let trucks = TruckCounts::uniform(2);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let err =
            build_weekly_schedule(&outlets, &trucks, DayPolicy::Random, &mut rng).unwrap_err();
        match err {
            PlannerError::SchedulingInfeasible {
                outlet,
                required,
                remaining,
            } => {
                assert_eq!(outlet.as_str(), "four");
                assert_eq!(required, 4);
                assert!(remaining >= 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn frequency_five_with_singles_is_infeasible() {
    // Five visits would need consecutive days, which the adjacency rule forbids
    let outlets = vec![outlet("daily", 5), outlet("b", 1), outlet("c", 1)];
    let trucks = TruckCounts::uniform(2);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let err =
            build_weekly_schedule(&outlets, &trucks, DayPolicy::LeastLoaded, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::SchedulingInfeasible { ref outlet, .. } if outlet.as_str() == "daily"
        ));
    }
}

#[test]
fn frequency_three_fails_when_draw_blocks_it() {
    let outlets = vec![outlet("tri", 3)];
    let trucks = TruckCounts::uniform(1);

    let mut successes = 0;
    let mut failures = 0;
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        match build_weekly_schedule(&outlets, &trucks, DayPolicy::Random, &mut rng) {
            Ok(schedule) => {
                assert_eq!(
                    schedule.days_for(&"tri".into()),
                    vec![Day::ALL[0], Day::ALL[2], Day::ALL[4]]
                );
                successes += 1;
            }
            Err(PlannerError::SchedulingInfeasible { .. }) => failures += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert!(successes > 0, "some draws should fit Mon/Wed/Fri");
    assert!(failures > 0, "some draws should block the third visit");
}

#[test]
fn no_trucks_at_all_is_infeasible() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = build_weekly_schedule(
        &[outlet("a", 1)],
        &TruckCounts::uniform(0),
        DayPolicy::Random,
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, PlannerError::SchedulingInfeasible { .. }));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn schedule_is_valid_or_infeasible(
        frequencies in prop::collection::vec(0u8..=3, 0..30),
        trucks in prop::array::uniform5(1usize..4),
        seed in any::<u64>(),
    ) {
        let outlets: Vec<Outlet> = frequencies
            .iter()
            .enumerate()
            .map(|(i, f)| outlet(&format!("p{i}"), *f))
            .collect();
        let trucks = TruckCounts::new(trucks);
        let mut rng = StdRng::seed_from_u64(seed);

        match build_weekly_schedule(&outlets, &trucks, DayPolicy::Random, &mut rng) {
            Ok(schedule) => assert_valid(&schedule, &outlets, &trucks),
            Err(PlannerError::SchedulingInfeasible { required, .. }) => prop_assert!(required >= 3),
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
