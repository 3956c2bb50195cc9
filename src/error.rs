//! Error type shared by the planner core and its adapters.

use thiserror::Error;

use crate::model::OutletId;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error(
        "cannot schedule outlet {outlet}: {remaining} of {required} visits left with no non-adjacent day available"
    )]
    SchedulingInfeasible {
        outlet: OutletId,
        required: u8,
        remaining: u8,
    },

    #[error("route references unknown outlet {0}")]
    UnknownOutlet(OutletId),

    #[error("invalid truck input: {0}")]
    InvalidTruckInput(String),

    #[error("invalid day selection: {0}")]
    InvalidDaySelection(String),

    #[error("invalid outlet record in row {row}: {reason}")]
    InvalidOutlet { row: usize, reason: String },

    #[error("duplicate outlet identifier {0}")]
    DuplicateOutlet(OutletId),

    #[error("distance matrix unavailable: {0}")]
    Matrix(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("failed to render map: {0}")]
    Render(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
