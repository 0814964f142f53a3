use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// One 3-hourly entry of a forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    /// Weather group as reported by the source, e.g. "Rain" or "Clouds".
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the forecast source is queried with.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Named { region: String, city: String },
    Coordinates(Coordinates),
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::Named { region, city } => write!(f, "{region}{city}"),
            LocationQuery::Coordinates(c) => {
                write!(f, "lat={:.4}, lon={:.4}", c.latitude, c.longitude)
            }
        }
    }
}

/// Raw location as the user supplied it.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    Text(String),
    Coordinates(Coordinates),
}

/// Inputs of a single user action.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub date: NaiveDate,
    pub location: LocationInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Daytime,
    Nighttime,
}

impl std::fmt::Display for DayPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayPart::Daytime => f.write_str("daytime"),
            DayPart::Nighttime => f.write_str("nighttime"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingAdvice {
    Light,
    Layered,
    Heavy,
    InsufficientData,
}

impl ClothingAdvice {
    pub fn message(&self) -> &'static str {
        match self {
            ClothingAdvice::Light => "light clothing",
            ClothingAdvice::Layered => "layered clothing",
            ClothingAdvice::Heavy => "heavy clothing",
            ClothingAdvice::InsufficientData => "insufficient data",
        }
    }
}

impl std::fmt::Display for ClothingAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Average temperature of one part of the day. `average_c` is `None` when the
/// part had no samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionSummary {
    pub part: DayPart,
    pub average_c: Option<f64>,
    pub advice: ClothingAdvice,
}

/// Aggregates for one date. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub description: String,
    pub rain_expected: bool,
    pub average_c: f64,
    pub min_c: f64,
    pub max_c: f64,
    pub daytime: PartitionSummary,
    pub nighttime: PartitionSummary,
    pub sample_count: usize,
}

impl DaySummary {
    /// Both partition averages, or the first part that had no samples.
    pub fn partition_averages(&self) -> Result<(f64, f64), ForecastError> {
        let day = self
            .daytime
            .average_c
            .ok_or(ForecastError::InsufficientPartitionData(DayPart::Daytime))?;
        let night = self
            .nighttime
            .average_c
            .ok_or(ForecastError::InsufficientPartitionData(DayPart::Nighttime))?;

        Ok((day, night))
    }

    pub fn rain_message(&self) -> &'static str {
        if self.rain_expected {
            "rain gear needed"
        } else {
            "no rain gear needed"
        }
    }
}
