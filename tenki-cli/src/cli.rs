use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use tenki_core::{
    Config, Coordinates, DaySummary, FixedPosition, ForecastRequest, LocationInput, handle_request,
    location::locate, source_from_config,
};
use tracing::debug;

use crate::{prompt, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tenki", version, about = "Forecast summary and clothing advice")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display preferences.
    Configure,

    /// Print where the config file lives.
    ConfigPath,

    /// Show the forecast summary for a day.
    ///
    /// Without a location or coordinates the location and date are asked for
    /// interactively.
    Show {
        /// Prefecture and city, e.g. 滋賀県大津市 or 滋賀県/大津市.
        #[arg(conflicts_with_all = ["lat", "lon"])]
        location: Option<String>,

        /// Latitude of the current position.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the current position.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Day to summarize (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,

        /// Fail when the daytime or nighttime part of the day has no data.
        #[arg(long)]
        strict: bool,
    },
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
            Command::Show {
                location,
                lat,
                lon,
                date,
                json,
                strict,
            } => {
                let config = Config::load()?;
                let source = source_from_config(&config)?;

                let request = match (location, lat.zip(lon)) {
                    (Some(text), _) => ForecastRequest {
                        date: date.unwrap_or_else(today),
                        location: LocationInput::Text(text),
                    },
                    (None, Some((latitude, longitude))) => {
                        let position = FixedPosition(Some(Coordinates {
                            latitude,
                            longitude,
                        }));
                        ForecastRequest {
                            date: date.unwrap_or_else(today),
                            location: locate(&position).await?,
                        }
                    }
                    (None, None) => prompt::ask_request(date).await?,
                };

                debug!(?request, "handling forecast request");
                let summary = handle_request(source.as_ref(), &request).await?;

                print!("{}", format_output(&request, &summary, json, strict)?);
            }
        }

        Ok(())
    }
}

/// What `show` prints for a computed summary.
///
/// With `strict`, a day part without samples is an error instead of an advisory.
pub fn format_output(
    request: &ForecastRequest,
    summary: &DaySummary,
    json: bool,
    strict: bool,
) -> anyhow::Result<String> {
    if strict {
        summary.partition_averages()?;
    }

    if json {
        let out = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
        Ok(format!("{out}\n"))
    } else {
        Ok(render::render_summary(&request.location, summary))
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let lang = Text::new("Forecast language (empty = host locale):")
        .with_initial_value(config.lang.as_deref().unwrap_or_default())
        .prompt()?;
    config.lang = Some(lang.trim().to_string()).filter(|l| !l.is_empty());

    let country = Text::new("Country code for named locations:")
        .with_initial_value(&config.country)
        .prompt()?;
    if !country.trim().is_empty() {
        config.country = country.trim().to_uppercase();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_accepts_text_location_and_date() {
        let cli = Cli::try_parse_from(["tenki", "show", "滋賀県大津市", "--date", "2026-10-20"]).unwrap();

        match cli.command {
            Command::Show { location, date, json, strict, .. } => {
                assert_eq!(location.as_deref(), Some("滋賀県大津市"));
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 20));
                assert!(!json);
                assert!(!strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["tenki", "show", "--lat", "-33.86", "--lon", "151.2"]).unwrap();

        match cli.command {
            Command::Show { lat, lon, location, .. } => {
                assert_eq!(lat, Some(-33.86));
                assert_eq!(lon, Some(151.2));
                assert!(location.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_rejects_partial_coordinates() {
        assert!(Cli::try_parse_from(["tenki", "show", "--lat", "35.0"]).is_err());
    }

    #[test]
    fn show_rejects_location_with_coordinates() {
        assert!(
            Cli::try_parse_from(["tenki", "show", "滋賀県大津市", "--lat", "35", "--lon", "135"])
                .is_err()
        );
    }

    fn sample(ts: &str, temp: f64) -> tenki_core::ForecastSample {
        tenki_core::ForecastSample {
            timestamp: chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            temperature_c: temp,
            category: "Clear".into(),
            description: "晴天".into(),
        }
    }

    fn daytime_only() -> (ForecastRequest, DaySummary) {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let samples = vec![
            sample("2026-10-20 09:00:00", 10.0),
            sample("2026-10-20 12:00:00", 15.0),
            sample("2026-10-20 15:00:00", 20.0),
        ];
        let request = ForecastRequest {
            date,
            location: LocationInput::Text("滋賀県大津市".into()),
        };
        (request, tenki_core::summarize(&samples, date).unwrap())
    }

    #[test]
    fn output_shows_advisory_for_empty_night() {
        let (request, summary) = daytime_only();
        let out = format_output(&request, &summary, false, false).unwrap();

        assert!(out.contains("📍 滋賀県大津市 on 2026-10-20"));
        assert!(out.contains("Nighttime: insufficient data"));
    }

    #[test]
    fn strict_output_fails_on_empty_night() {
        let (request, summary) = daytime_only();

        for json in [false, true] {
            let err = format_output(&request, &summary, json, true).unwrap_err();
            assert_eq!(
                err.downcast_ref::<tenki_core::ForecastError>(),
                Some(&tenki_core::ForecastError::InsufficientPartitionData(
                    tenki_core::DayPart::Nighttime
                ))
            );
        }
    }

    #[test]
    fn json_output_is_the_summary() {
        let (request, summary) = daytime_only();
        let out = format_output(&request, &summary, true, false).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["date"], "2026-10-20");
        assert_eq!(value["average_c"], 15.0);
        assert_eq!(value["daytime"]["advice"], "heavy");
        assert_eq!(value["nighttime"]["average_c"], serde_json::Value::Null);
        assert_eq!(value["nighttime"]["advice"], "insufficient_data");
    }

    #[test]
    fn show_rejects_bad_date() {
        assert!(Cli::try_parse_from(["tenki", "show", "滋賀県大津市", "--date", "20/10/2026"]).is_err());
    }
}
