//! delivery-planner
//!
//! Assigns outlets to trucks across a five-day week and orders each truck's
//! stops from a fixed depot with a nearest-neighbor heuristic.

pub mod config;
pub mod error;
pub mod euclidean;
pub mod export;
pub mod haversine;
pub mod input;
pub mod loader;
pub mod map;
pub mod model;
pub mod osrm;
pub mod planner;
pub mod polyline;
pub mod projection;
pub mod scheduler;
pub mod sequencer;
pub mod traits;

pub use error::{PlannerError, Result};
pub use model::{
    DAYS_PER_WEEK, Day, DayRoutes, DaySchedule, Depot, Outlet, OutletId, OutletTable, Route,
    Stop, TruckCounts, WeeklyRoutePlan, WeeklySchedule,
};
pub use planner::{PlanOptions, plan_week};
