//! Core library for the `tenki` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast source abstraction and its OpenWeather client
//! - Location parsing and the per-day forecast summary
//!
//! It is used by `tenki-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod handler;
pub mod location;
pub mod model;
pub mod provider;
pub mod summary;

pub use config::Config;
pub use error::ForecastError;
pub use handler::handle_request;
pub use location::{FixedPosition, Geolocator, parse_location};
pub use model::{
    ClothingAdvice, Coordinates, DayPart, DaySummary, ForecastRequest, ForecastSample,
    LocationInput, LocationQuery, PartitionSummary,
};
pub use provider::{ForecastSource, source_from_config};
pub use summary::summarize;
