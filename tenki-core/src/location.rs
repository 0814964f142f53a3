//! Turning user input into something the forecast source can be queried with.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    error::ForecastError,
    model::{Coordinates, LocationInput, LocationQuery},
};

const SEPARATOR: char = '/';

/// Prefecture suffixes, checked in this order.
const REGION_MARKERS: [char; 4] = ['都', '道', '府', '県'];

/// Split free text into a `(region, city)` pair.
///
/// `region/city` is split once on the first `/`. Otherwise the first marker
/// from [`REGION_MARKERS`] that occurs in the text ends the region, and the
/// rest is the city. A trailing marker yields an empty city, which is accepted.
pub fn parse_location(text: &str) -> Result<(String, String), ForecastError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some((region, city)) = compact.split_once(SEPARATOR) {
        return Ok((region.to_string(), city.to_string()));
    }

    for marker in REGION_MARKERS {
        if let Some((head, city)) = compact.split_once(marker) {
            let mut region = head.to_string();
            region.push(marker);
            return Ok((region, city.to_string()));
        }
    }

    Err(ForecastError::ParseFailure(text.to_string()))
}

/// Source of the device position. `None` means no fix yet.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Option<Coordinates>;
}

/// A position handed in from outside, e.g. command-line flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Option<Coordinates> {
        self.0
    }
}

/// Build the query for a collaborator-supplied position.
pub async fn locate(geolocator: &dyn Geolocator) -> Result<LocationInput, ForecastError> {
    let position = geolocator
        .current_position()
        .await
        .ok_or(ForecastError::LocationUnavailable)?;

    debug!(lat = position.latitude, lon = position.longitude, "position acquired");
    Ok(LocationInput::Coordinates(position))
}

/// Resolve user input into a source query.
pub fn resolve(input: &LocationInput) -> Result<LocationQuery, ForecastError> {
    let query = match input {
        LocationInput::Text(text) => {
            let (region, city) = parse_location(text)?;
            LocationQuery::Named { region, city }
        }
        LocationInput::Coordinates(c) => LocationQuery::Coordinates(*c),
    };

    debug!(%query, "resolved location");
    Ok(query)
}
