//! Domain types: outlets, the depot, days, trucks, schedules and routes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Number of working days modelled per week (Monday to Friday).
pub const DAYS_PER_WEEK: usize = 5;

/// Highest weekly frequency an outlet may ask for (one visit per day).
pub const MAX_FREQUENCY: u8 = DAYS_PER_WEEK as u8;

/// Stable identifier of an outlet as it appears in the source table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutletId(String);

impl OutletId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OutletId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A retail location with the number of visits it needs per week.
#[derive(Debug, Clone, PartialEq)]
pub struct Outlet {
    pub id: OutletId,
    pub latitude: f64,
    pub longitude: f64,
    pub frequency: u8,
}

impl Outlet {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, frequency: u8) -> Self {
        Self {
            id: OutletId::new(id),
            latitude,
            longitude,
            frequency,
        }
    }

    /// Location coordinates (lat, lng).
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// The fixed origin and destination of every route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub latitude: f64,
    pub longitude: f64,
}

impl Depot {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Location coordinates (lat, lng).
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl Default for Depot {
    fn default() -> Self {
        Self::new(41.08919085025256, 29.04999926199514)
    }
}

/// A working day, 0 (Monday) through 4 (Friday).
///
/// Monday and Friday are not adjacent: the week does not wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Day(u8);

impl Day {
    pub const ALL: [Day; DAYS_PER_WEEK] = [Day(0), Day(1), Day(2), Day(3), Day(4)];

    /// Builds a day from its 0-based index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < DAYS_PER_WEEK).then(|| Day(index as u8))
    }

    /// Builds a day from its 1-based ordinal as shown to users.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        ordinal.checked_sub(1).and_then(Self::from_index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn ordinal(self) -> usize {
        self.index() + 1
    }

    /// Days immediately before and after this one, when they exist.
    pub fn neighbours(self) -> impl Iterator<Item = Day> {
        let previous = self.index().checked_sub(1).and_then(Day::from_index);
        let next = Day::from_index(self.index() + 1);
        previous.into_iter().chain(next)
    }

    pub fn is_adjacent_to(self, other: Day) -> bool {
        self.0.abs_diff(other.0) == 1
    }

    pub fn name(self) -> &'static str {
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"][self.index()]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of trucks available on each working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruckCounts([usize; DAYS_PER_WEEK]);

impl TruckCounts {
    pub fn new(counts: [usize; DAYS_PER_WEEK]) -> Self {
        Self(counts)
    }

    /// The same number of trucks every day.
    pub fn uniform(count: usize) -> Self {
        Self([count; DAYS_PER_WEEK])
    }

    pub fn on(&self, day: Day) -> usize {
        self.0[day.index()]
    }

    pub fn as_array(&self) -> [usize; DAYS_PER_WEEK] {
        self.0
    }
}

impl TryFrom<Vec<usize>> for TruckCounts {
    type Error = PlannerError;

    fn try_from(counts: Vec<usize>) -> Result<Self> {
        let len = counts.len();
        let counts: [usize; DAYS_PER_WEEK] = counts.try_into().map_err(|_| {
            PlannerError::InvalidTruckInput(format!(
                "expected exactly {DAYS_PER_WEEK} truck counts, got {len}"
            ))
        })?;
        Ok(Self(counts))
    }
}

/// A stop within a route: the depot sentinel or an outlet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stop {
    Depot,
    Outlet(OutletId),
}

impl Stop {
    pub fn outlet_id(&self) -> Option<&OutletId> {
        match self {
            Stop::Depot => None,
            Stop::Outlet(id) => Some(id),
        }
    }
}

/// Ordered stops for one truck on one day, depot to depot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    /// Wraps an outlet visiting order with the depot at both ends.
    pub fn from_visits(visits: impl IntoIterator<Item = OutletId>) -> Self {
        let mut stops = vec![Stop::Depot];
        stops.extend(visits.into_iter().map(Stop::Outlet));
        stops.push(Stop::Depot);
        Self { stops }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Outlets in visiting order, without the depot.
    pub fn outlet_ids(&self) -> impl Iterator<Item = &OutletId> {
        self.stops.iter().filter_map(Stop::outlet_id)
    }

    pub fn visit_count(&self) -> usize {
        self.stops.len().saturating_sub(2)
    }
}

/// Truck index to the outlets that truck serves on one day.
pub type DaySchedule = BTreeMap<usize, Vec<OutletId>>;

/// Truck index to the sequenced route on one day.
pub type DayRoutes = BTreeMap<usize, Route>;

/// Day-by-day truck assignments for the week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklySchedule {
    days: [DaySchedule; DAYS_PER_WEEK],
}

impl WeeklySchedule {
    pub fn day(&self, day: Day) -> &DaySchedule {
        &self.days[day.index()]
    }

    pub(crate) fn assign(&mut self, day: Day, truck: usize, outlet: OutletId) {
        self.days[day.index()].entry(truck).or_default().push(outlet);
    }

    /// Days on which the outlet is visited, in week order.
    pub fn days_for(&self, outlet: &OutletId) -> Vec<Day> {
        let mut days = Vec::new();
        for day in Day::ALL {
            let visits = self
                .day(day)
                .values()
                .flatten()
                .filter(|id| *id == outlet)
                .count();
            days.extend(std::iter::repeat_n(day, visits));
        }
        days
    }

    /// Number of stops assigned on the given day across all trucks.
    pub fn load_on(&self, day: Day) -> usize {
        self.day(day).values().map(Vec::len).sum()
    }
}

/// Sequenced routes for every day of the week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRoutePlan {
    days: Vec<DayRoutes>,
}

impl WeeklyRoutePlan {
    pub(crate) fn from_days(days: Vec<DayRoutes>) -> Self {
        debug_assert_eq!(days.len(), DAYS_PER_WEEK);
        Self { days }
    }

    pub fn day(&self, day: Day) -> &DayRoutes {
        &self.days[day.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayRoutes)> {
        Day::ALL.into_iter().zip(self.days.iter())
    }

    pub fn route_count(&self) -> usize {
        self.days.iter().map(BTreeMap::len).sum()
    }
}

/// Read-only lookup of outlet coordinates by identifier.
///
/// The depot is never stored here; [`OutletTable::resolve`] substitutes it for
/// [`Stop::Depot`].
#[derive(Debug, Clone, Default)]
pub struct OutletTable {
    outlets: Vec<Outlet>,
    index: HashMap<OutletId, usize>,
}

impl OutletTable {
    pub fn new(outlets: Vec<Outlet>) -> Result<Self> {
        let mut index = HashMap::with_capacity(outlets.len());
        for (position, outlet) in outlets.iter().enumerate() {
            if index.insert(outlet.id.clone(), position).is_some() {
                return Err(PlannerError::DuplicateOutlet(outlet.id.clone()));
            }
        }
        Ok(Self { outlets, index })
    }

    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    pub fn len(&self) -> usize {
        self.outlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlets.is_empty()
    }

    pub fn get(&self, id: &OutletId) -> Option<&Outlet> {
        self.index.get(id).map(|&position| &self.outlets[position])
    }

    pub fn location(&self, id: &OutletId) -> Result<(f64, f64)> {
        self.get(id)
            .map(Outlet::location)
            .ok_or_else(|| PlannerError::UnknownOutlet(id.clone()))
    }

    /// Coordinates of a stop; the depot sentinel resolves to the depot.
    pub fn resolve(&self, stop: &Stop, depot: &Depot) -> Result<(f64, f64)> {
        match stop {
            Stop::Depot => Ok(depot.location()),
            Stop::Outlet(id) => self.location(id),
        }
    }
}
