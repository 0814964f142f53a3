use crate::{
    Config,
    error::ForecastError,
    model::{ForecastSample, LocationQuery},
    provider::openweather::{OpenWeatherSettings, OpenWeatherSource},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Anything that can turn a location query into a forecast series.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, ForecastError>;
}

/// Construct the OpenWeather source from resolved settings.
pub fn source_from_settings(settings: OpenWeatherSettings) -> anyhow::Result<Box<dyn ForecastSource>> {
    let source = OpenWeatherSource::new(settings)?;
    Ok(Box::new(source))
}

/// Construct the forecast source from config plus environment overrides.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastSource>> {
    source_from_settings(config.source_settings()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn source_from_settings_builds_client() {
        let settings = OpenWeatherSettings {
            api_key: "KEY".into(),
            lang: "ja".into(),
            country: "JP".into(),
            base_url: "http://localhost".into(),
            timeout: Duration::from_secs(1),
            retries: 0,
        };

        assert!(source_from_settings(settings).is_ok());
    }
}
