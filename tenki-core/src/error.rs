use chrono::NaiveDate;
use thiserror::Error;

use crate::model::DayPart;

/// Everything that can abort a single forecast render.
#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    /// Location text matched neither the `/` form nor a prefecture suffix.
    #[error("Unrecognized location '{0}'. Use e.g. 滋賀県大津市 or 滋賀県/大津市.")]
    ParseFailure(String),

    /// The geolocation collaborator has no position yet.
    #[error("Current location is not available yet. Allow location access or pass --lat/--lon.")]
    LocationUnavailable,

    /// Transport error, non-2xx response or a body without the forecast list.
    #[error("Could not fetch the forecast: {0}")]
    FetchFailure(String),

    #[error("No forecast data for {0}")]
    NoDataForDate(NaiveDate),

    #[error("Not enough {0} forecast entries to compute an average")]
    InsufficientPartitionData(DayPart),
}

impl ForecastError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchFailure(message.into())
    }
}
