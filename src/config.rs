//! Planner configuration, optionally read from a TOML file.
//!
//! ```toml
//! metric = "euclidean"      # euclidean | haversine | osrm
//! day_policy = "random"     # random | least_loaded
//! seed = 42
//!
//! [depot]
//! latitude = 41.08919085025256
//! longitude = 29.04999926199514
//!
//! [osrm]
//! base_url = "http://localhost:5000"
//! profile = "car"
//! timeout_secs = 10
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::euclidean::EuclideanMatrix;
use crate::haversine::HaversineMatrix;
use crate::model::Depot;
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::planner::PlanOptions;
use crate::scheduler::DayPolicy;
use crate::traits::DistanceMatrixProvider;

/// Distance used when picking the next stop of a route.
///
/// Reported lengths are always great-circle kilometers, whatever is chosen here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencingMetric {
    /// Planar distance on raw degrees.
    #[default]
    Euclidean,
    Haversine,
    /// Road distance from an OSRM server.
    Osrm,
}

impl FromStr for SequencingMetric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(SequencingMetric::Euclidean),
            "haversine" => Ok(SequencingMetric::Haversine),
            "osrm" => Ok(SequencingMetric::Osrm),
            other => Err(format!(
                "unknown metric '{other}' (expected euclidean, haversine or osrm)"
            )),
        }
    }
}

impl fmt::Display for SequencingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequencingMetric::Euclidean => "euclidean",
            SequencingMetric::Haversine => "haversine",
            SequencingMetric::Osrm => "osrm",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub depot: Depot,
    pub metric: SequencingMetric,
    pub day_policy: DayPolicy,
    /// Fixes the scheduler's random draws for a reproducible plan.
    pub seed: Option<u64>,
    pub osrm: OsrmConfig,
}

impl PlannerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            day_policy: self.day_policy,
        }
    }

    /// Builds the matrix provider for the configured sequencing metric.
    pub fn matrix_provider(&self) -> Result<Box<dyn DistanceMatrixProvider + Send + Sync>> {
        let provider: Box<dyn DistanceMatrixProvider + Send + Sync> = match self.metric {
            SequencingMetric::Euclidean => Box::new(EuclideanMatrix),
            SequencingMetric::Haversine => Box::new(HaversineMatrix),
            SequencingMetric::Osrm => Box::new(OsrmClient::new(self.osrm.clone())?),
        };
        Ok(provider)
    }
}
