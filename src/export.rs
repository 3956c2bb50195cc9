//! Flat route tables for spreadsheets.
//!
//! One row per stop: day, truck and step numbers are 1-based.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde::Serialize;
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::projection::ProjectedPlan;
use crate::traits::RouteExporter;

pub const HEADERS: [&str; 5] = ["Day", "Truck ID", "Step", "Latitude", "Longitude"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRow {
    #[serde(rename = "Day")]
    pub day: usize,
    #[serde(rename = "Truck ID")]
    pub truck: usize,
    #[serde(rename = "Step")]
    pub step: usize,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl RouteRow {
    /// Cell values in `HEADERS` order.
    pub fn values(&self) -> [f64; 5] {
        [
            self.day as f64,
            self.truck as f64,
            self.step as f64,
            self.latitude,
            self.longitude,
        ]
    }
}

/// Flattens the plan, ordered by day, truck and step.
///
/// Truck numbers keep the truck's index within its day, so a truck that had
/// nothing to deliver leaves a gap rather than shifting the others down.
pub fn route_rows(plan: &ProjectedPlan) -> Vec<RouteRow> {
    let mut rows = Vec::new();
    for (day, polylines) in plan.iter() {
        for (&truck, polyline) in polylines {
            for (step, &(latitude, longitude)) in polyline.points().iter().enumerate() {
                rows.push(RouteRow {
                    day: day.ordinal(),
                    truck: truck + 1,
                    step: step + 1,
                    latitude,
                    longitude,
                });
            }
        }
    }
    rows
}

#[derive(Debug, Clone)]
pub struct CsvRouteExporter {
    path: PathBuf,
}

impl CsvRouteExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RouteExporter for CsvRouteExporter {
    fn export(&self, rows: &[RouteRow]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        if rows.is_empty() {
            writer.write_record(HEADERS)?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!(path = %self.path.display(), rows = rows.len(), "routes saved");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct XlsxRouteExporter {
    path: PathBuf,
}

impl XlsxRouteExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RouteExporter for XlsxRouteExporter {
    fn export(&self, rows: &[RouteRow]) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Routes").map_err(excel_error)?;
        write_sheet(sheet, rows)?;

        workbook.save(&self.path).map_err(excel_error)?;

        info!(path = %self.path.display(), rows = rows.len(), "routes saved");
        Ok(())
    }
}

fn excel_error(err: XlsxError) -> PlannerError {
    PlannerError::Excel(err.to_string())
}

/// Writes a bold header line followed by one line per row. Returns the number
/// of sheet lines written.
fn write_sheet(sheet: &mut Worksheet, rows: &[RouteRow]) -> Result<u32> {
    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_error)?;
    }

    let mut line = 0;
    for row in rows {
        line += 1;
        for (col, value) in row.values().into_iter().enumerate() {
            sheet
                .write_number(line, col as u16, value)
                .map_err(excel_error)?;
        }
    }
    Ok(line + 1)
}

/// Picks the exporter from the file extension: `.csv` writes CSV, anything else XLSX.
pub fn exporter_for(path: &Path) -> Box<dyn RouteExporter> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Box::new(CsvRouteExporter::new(path))
    } else {
        Box::new(XlsxRouteExporter::new(path))
    }
}
