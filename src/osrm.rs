//! OSRM HTTP adapter for road-network distance matrices.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Table service URL requesting road distances between all locations.
    pub fn table_url(&self, locations: &[(f64, f64)]) -> String {
        let coords = locations
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<Vec<Vec<f64>>> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.table_url(locations);
        debug!(locations = locations.len(), "requesting OSRM table");

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        parse_table(status, &body, locations.len())
    }
}

/// OSRM reports failures such as `InvalidQuery` or `NoTable` with a 4xx status
/// and a JSON body, so the body is read before the status.
fn parse_table(status: StatusCode, body: &str, expected: usize) -> Result<Vec<Vec<f64>>> {
    match serde_json::from_str::<OsrmTableResponse>(body) {
        Ok(table) => table.into_kilometers(expected),
        Err(_) if !status.is_success() => {
            Err(PlannerError::Matrix(format!("OSRM answered HTTP {status}")))
        }
        Err(err) => Err(PlannerError::Matrix(format!("unreadable OSRM response: {err}"))),
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    /// Converts meter distances to kilometers. Unroutable pairs become infinite
    /// so the sequencer never prefers them.
    fn into_kilometers(self, expected: usize) -> Result<Vec<Vec<f64>>> {
        if self.code != "Ok" {
            let detail = self.message.map(|m| format!(": {m}")).unwrap_or_default();
            return Err(PlannerError::Matrix(format!("OSRM answered {}{detail}", self.code)));
        }

        let rows = self
            .distances
            .ok_or_else(|| PlannerError::Matrix("OSRM response has no distances".to_string()))?;

        if rows.len() != expected || rows.iter().any(|row| row.len() != expected) {
            return Err(PlannerError::Matrix(format!(
                "OSRM returned a {}-row table for {} locations",
                rows.len(),
                expected
            )));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|meters| meters.map_or(f64::INFINITY, |m| m / 1000.0))
                    .collect()
            })
            .collect())
    }
}
