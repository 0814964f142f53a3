use std::fmt;

use tenki_core::{DaySummary, LocationInput, PartitionSummary};

/// Human-readable name of what was asked for.
pub fn location_label(location: &LocationInput) -> String {
    match location {
        LocationInput::Text(text) => text.split_whitespace().collect(),
        LocationInput::Coordinates(c) => format!("lat={:.4}, lon={:.4}", c.latitude, c.longitude),
    }
}

struct PartitionLine<'a>(&'a PartitionSummary);

impl fmt::Display for PartitionLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.average_c {
            Some(avg) => write!(f, "{avg:.1}°C → {}", self.0.advice),
            None => write!(f, "{}", self.0.advice),
        }
    }
}

/// The summary panel printed by `tenki show`.
pub struct Panel<'a> {
    pub location: &'a LocationInput,
    pub summary: &'a DaySummary,
}

impl fmt::Display for Panel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let rain_icon = if s.rain_expected { "☔" } else { "✅" };

        writeln!(f, "📍 {} on {}", location_label(self.location), s.date)?;
        writeln!(f, "🌤 Weather: {}", s.description)?;
        writeln!(f, "{rain_icon} {}", s.rain_message())?;
        writeln!(f, "---")?;
        writeln!(f, "🌡 Average: {:.1}°C", s.average_c)?;
        writeln!(f, "⬇ Min: {:.1}°C", s.min_c)?;
        writeln!(f, "⬆ Max: {:.1}°C", s.max_c)?;
        writeln!(f, "---")?;
        writeln!(f, "☀️ Daytime: {}", PartitionLine(&s.daytime))?;
        writeln!(f, "🌙 Nighttime: {}", PartitionLine(&s.nighttime))
    }
}

pub fn render_summary(location: &LocationInput, summary: &DaySummary) -> String {
    Panel { location, summary }.to_string()
}
