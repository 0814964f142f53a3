use std::ops::RangeInclusive;

use chrono::{NaiveDate, Timelike};

use crate::{
    error::ForecastError,
    model::{ClothingAdvice, DayPart, DaySummary, ForecastSample, PartitionSummary},
};

/// Hours counted as daytime; everything else is nighttime.
pub const DAYTIME_HOURS: RangeInclusive<u32> = 9..=17;

/// Clothing recommendation for an average temperature in °C.
///
/// Averages strictly between 22 and 23 fall through to `Heavy`.
pub fn clothing_advice(temperature_c: Option<f64>) -> ClothingAdvice {
    match temperature_c {
        None => ClothingAdvice::InsufficientData,
        Some(t) if t >= 23.0 => ClothingAdvice::Light,
        Some(t) if (16.0..=22.0).contains(&t) => ClothingAdvice::Layered,
        Some(_) => ClothingAdvice::Heavy,
    }
}

/// Aggregate the samples falling on `date`.
///
/// Samples keep their input order; the description is taken from the first
/// matching one.
pub fn summarize(samples: &[ForecastSample], date: NaiveDate) -> Result<DaySummary, ForecastError> {
    let day: Vec<&ForecastSample> = samples
        .iter()
        .filter(|s| s.timestamp.date() == date)
        .collect();

    let first = day.first().ok_or(ForecastError::NoDataForDate(date))?;

    let rain_expected = day
        .iter()
        .any(|s| s.category.to_lowercase().contains("rain"));

    let temps: Vec<f64> = day.iter().map(|s| s.temperature_c).collect();
    let min_c = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let max_c = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (daytime, nighttime): (Vec<&ForecastSample>, Vec<&ForecastSample>) = day
        .iter()
        .copied()
        .partition(|s| DAYTIME_HOURS.contains(&s.timestamp.hour()));

    Ok(DaySummary {
        date,
        description: first.description.clone(),
        rain_expected,
        average_c: mean(&temps).unwrap_or_default(),
        min_c,
        max_c,
        daytime: partition_summary(DayPart::Daytime, &daytime),
        nighttime: partition_summary(DayPart::Nighttime, &nighttime),
        sample_count: day.len(),
    })
}

fn partition_summary(part: DayPart, samples: &[&ForecastSample]) -> PartitionSummary {
    let temps: Vec<f64> = samples.iter().map(|s| s.temperature_c).collect();
    let average_c = mean(&temps);

    PartitionSummary {
        part,
        average_c,
        advice: clothing_advice(average_c),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
