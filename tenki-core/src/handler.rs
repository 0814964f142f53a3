//! One user action: resolve the location, fetch the forecast, summarize it.

use tracing::debug;

use crate::{
    error::ForecastError,
    location,
    model::{DaySummary, ForecastRequest},
    provider::ForecastSource,
    summary::summarize,
};

/// Run a single request. Nothing is carried over between calls.
pub async fn handle_request(
    source: &dyn ForecastSource,
    request: &ForecastRequest,
) -> Result<DaySummary, ForecastError> {
    let query = location::resolve(&request.location)?;
    let samples = source.fetch(&query).await?;

    debug!(date = %request.date, count = samples.len(), "summarizing forecast");
    summarize(&samples, request.date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClothingAdvice, Coordinates, ForecastSample, LocationInput, LocationQuery};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct StubSource {
        samples: Vec<ForecastSample>,
        fail: bool,
        queries: Mutex<Vec<LocationQuery>>,
    }

    #[async_trait]
    impl ForecastSource for StubSource {
        async fn fetch(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, ForecastError> {
            self.queries.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(ForecastError::fetch("status 401"));
            }
            Ok(self.samples.clone())
        }
    }

    fn sample(ts: &str, temp: f64) -> ForecastSample {
        ForecastSample {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            temperature_c: temp,
            category: "Clouds".into(),
            description: "曇りがち".into(),
        }
    }

    fn request(location: LocationInput) -> ForecastRequest {
        ForecastRequest {
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            location,
        }
    }

    #[tokio::test]
    async fn text_request_is_resolved_and_summarized() {
        let source = StubSource {
            samples: vec![
                sample("2026-10-20 03:00:00", 12.0),
                sample("2026-10-20 12:00:00", 24.0),
            ],
            ..StubSource::default()
        };

        let summary = handle_request(&source, &request(LocationInput::Text("滋賀県大津市".into())))
            .await
            .unwrap();

        assert_eq!(summary.daytime.advice, ClothingAdvice::Light);
        assert_eq!(summary.nighttime.advice, ClothingAdvice::Heavy);
        assert_eq!(
            source.queries.lock().unwrap().as_slice(),
            &[LocationQuery::Named {
                region: "滋賀県".into(),
                city: "大津市".into()
            }]
        );
    }

    #[tokio::test]
    async fn parse_failure_skips_the_fetch() {
        let source = StubSource::default();

        let err = handle_request(&source, &request(LocationInput::Text("Otsu".into())))
            .await
            .unwrap_err();

        assert_eq!(err, ForecastError::ParseFailure("Otsu".into()));
        assert!(source.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_aborts() {
        let source = StubSource {
            fail: true,
            ..StubSource::default()
        };
        let coords = Coordinates {
            latitude: 35.0,
            longitude: 135.9,
        };

        let err = handle_request(&source, &request(LocationInput::Coordinates(coords)))
            .await
            .unwrap_err();

        assert!(matches!(err, ForecastError::FetchFailure(_)));
    }

    #[tokio::test]
    async fn other_dates_only_is_no_data() {
        let source = StubSource {
            samples: vec![sample("2026-10-19 12:00:00", 20.0)],
            ..StubSource::default()
        };

        let err = handle_request(&source, &request(LocationInput::Text("滋賀県/大津市".into())))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ForecastError::NoDataForDate(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
        );
    }
}
