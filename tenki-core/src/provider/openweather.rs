use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::ForecastError,
    model::{ForecastSample, LocationQuery},
};

use super::ForecastSource;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the OpenWeather client needs, resolved from config and env.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWeatherSettings {
    pub api_key: String,
    pub lang: String,
    pub country: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retries: u32,
}

/// Client for the 5-day / 3-hour forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    settings: OpenWeatherSettings,
    http: Client,
}

enum Failure {
    Retryable(String),
    Fatal(String),
}

impl OpenWeatherSource {
    pub fn new(settings: OpenWeatherSettings) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ForecastError::fetch(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { settings, http })
    }

    fn query_params(&self, query: &LocationQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            LocationQuery::Named { region, city } => {
                vec![("q", format!("{city},{region},{}", self.settings.country))]
            }
            LocationQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        };

        params.push(("appid", self.settings.api_key.clone()));
        params.push(("units", "metric".to_string()));
        params.push(("lang", self.settings.lang.clone()));
        params
    }

    async fn fetch_body(&self, params: &[(&'static str, String)]) -> Result<String, ForecastError> {
        let url = format!("{}/forecast", self.settings.base_url);
        let mut attempt = 0;

        loop {
            match self.request_once(&url, params).await {
                Ok(body) => return Ok(body),
                Err(Failure::Retryable(msg)) if attempt < self.settings.retries => {
                    attempt += 1;
                    warn!(attempt, error = %msg, "retrying OpenWeather forecast request");
                }
                Err(Failure::Retryable(msg) | Failure::Fatal(msg)) => {
                    return Err(ForecastError::FetchFailure(msg));
                }
            }
        }
    }

    async fn request_once(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, Failure> {
        let res = self.http.get(url).query(params).send().await.map_err(|e| {
            Failure::Retryable(format!("Failed to send request to OpenWeather: {}", e.without_url()))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            Failure::Retryable(format!(
                "Failed to read OpenWeather forecast response body: {}",
                e.without_url()
            ))
        })?;

        if status.is_success() {
            return Ok(body);
        }

        let msg = format!(
            "OpenWeather forecast request failed with status {}: {}",
            status,
            truncate_body(&body),
        );

        if status.is_server_error() {
            Err(Failure::Retryable(msg))
        } else {
            Err(Failure::Fatal(msg))
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Option<Vec<OwForecastEntry>>,
}

impl TryFrom<OwForecastEntry> for ForecastSample {
    type Error = ForecastError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, TIMESTAMP_FORMAT).map_err(
            |_| ForecastError::fetch(format!("Unexpected timestamp '{}' in OpenWeather response", entry.dt_txt)),
        )?;

        let (category, description) = entry
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_default();

        Ok(ForecastSample {
            timestamp,
            temperature_c: entry.main.temp,
            category,
            description,
        })
    }
}

/// Turn a forecast response body into samples, in the order received.
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastSample>, ForecastError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)
        .map_err(|e| ForecastError::fetch(format!("Failed to parse OpenWeather forecast JSON: {e}")))?;

    let list = parsed
        .list
        .ok_or_else(|| ForecastError::fetch("OpenWeather response contained no forecast list"))?;

    list.into_iter().map(ForecastSample::try_from).collect()
}

#[async_trait]
impl ForecastSource for OpenWeatherSource {
    async fn fetch(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, ForecastError> {
        debug!(%query, "requesting OpenWeather forecast");

        let params = self.query_params(query);
        let body = self.fetch_body(&params).await?;
        let samples = parse_forecast(&body)?;

        debug!(count = samples.len(), "OpenWeather forecast received");
        Ok(samples)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
