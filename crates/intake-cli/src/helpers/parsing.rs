//! Parsing helpers for calorie amounts, timezones, and output format.

use chrono_tz::Tz;
use intake_core::{parse_calories, parse_calories_strict};

use crate::errors::{classify, CliError};

/// List output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

/// Parse an IANA timezone name. Empty or "auto" means the system zone.
pub fn parse_timezone(value: &str) -> anyhow::Result<Option<Tz>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }

    trimmed
        .parse::<Tz>()
        .map(Some)
        .map_err(|_| anyhow::anyhow!("Invalid timezone: {}", trimmed))
}

/// Turn typed text into a calorie amount.
///
/// Lenient mode logs anything unparseable as 0; strict mode rejects it.
pub fn calories_from_text(text: &str, strict: bool) -> anyhow::Result<i64> {
    if strict {
        parse_calories_strict(text).map_err(classify)
    } else {
        Ok(parse_calories(text))
    }
}
