//! CSV loader for outlet tables.
//!
//! Expected header: `OUTLET_ID,LATITUDE,LONGITUDE,FREQUENCY`. Extra columns are
//! ignored.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::model::{MAX_FREQUENCY, Outlet};
use crate::traits::OutletSource;

#[derive(Debug, Deserialize)]
struct OutletRecord {
    #[serde(rename = "OUTLET_ID")]
    id: String,
    #[serde(rename = "LATITUDE")]
    latitude: f64,
    #[serde(rename = "LONGITUDE")]
    longitude: f64,
    #[serde(rename = "FREQUENCY")]
    frequency: i64,
}

impl OutletRecord {
    fn into_outlet(self, row: usize) -> Result<Outlet> {
        let invalid = |reason: String| PlannerError::InvalidOutlet { row, reason };

        if self.id.is_empty() {
            return Err(invalid("empty OUTLET_ID".to_string()));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(invalid(format!("latitude {} out of range", self.latitude)));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(invalid(format!("longitude {} out of range", self.longitude)));
        }
        let frequency = u8::try_from(self.frequency)
            .ok()
            .filter(|f| *f <= MAX_FREQUENCY)
            .ok_or_else(|| {
                invalid(format!(
                    "frequency {} outside 0..={MAX_FREQUENCY}",
                    self.frequency
                ))
            })?;

        Ok(Outlet::new(self.id, self.latitude, self.longitude, frequency))
    }
}

/// Reads outlets from any CSV byte stream.
pub fn read_outlets<R: Read>(reader: R) -> Result<Vec<Outlet>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<OutletRecord>()
        .enumerate()
        .map(|(index, record)| record?.into_outlet(index + 1))
        .collect()
}

/// Outlet table stored as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvOutletSource {
    path: PathBuf,
}

impl CsvOutletSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutletSource for CsvOutletSource {
    fn load(&self) -> Result<Vec<Outlet>> {
        let file = std::fs::File::open(&self.path)?;
        let outlets = read_outlets(file)?;
        info!(path = %self.path.display(), outlets = outlets.len(), "loaded outlets");
        Ok(outlets)
    }
}
