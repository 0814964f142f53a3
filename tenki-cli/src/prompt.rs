//! Interactive collection of a forecast request.

use chrono::NaiveDate;
use inquire::{CustomType, DateSelect, Select, Text};
use std::fmt;
use tenki_core::{Coordinates, FixedPosition, ForecastRequest, LocationInput, location::locate};

use crate::cli::today;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Manual,
    Position,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Manual => f.write_str("Type a location"),
            Mode::Position => f.write_str("Use my current position"),
        }
    }
}

/// Ask for the location (and the date unless one was given on the command line).
pub async fn ask_request(date: Option<NaiveDate>) -> anyhow::Result<ForecastRequest> {
    let date = match date {
        Some(d) => d,
        None => DateSelect::new("Which day?").with_default(today()).prompt()?,
    };

    let mode = Select::new("How should the location be given?", vec![Mode::Manual, Mode::Position])
        .prompt()?;

    let location = match mode {
        Mode::Manual => {
            let text = Text::new("Location:")
                .with_help_message("e.g. 滋賀県大津市 or 滋賀県/大津市")
                .prompt()?;
            LocationInput::Text(text)
        }
        Mode::Position => locate(&FixedPosition(ask_position()?)).await?,
    };

    Ok(ForecastRequest { date, location })
}

fn ask_position() -> anyhow::Result<Option<Coordinates>> {
    let Some(latitude) = CustomType::<f64>::new("Latitude:")
        .with_help_message("Esc if no position is available")
        .prompt_skippable()?
    else {
        return Ok(None);
    };

    let Some(longitude) = CustomType::<f64>::new("Longitude:").prompt_skippable()? else {
        return Ok(None);
    };

    Ok(Some(Coordinates {
        latitude,
        longitude,
    }))
}
