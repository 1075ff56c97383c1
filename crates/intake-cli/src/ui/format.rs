//! Timestamp and number formatting.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

use crate::config::DEFAULT_DATE_FORMAT;

/// Renders record timestamps in the configured zone and format.
#[derive(Debug, Clone)]
pub struct TimeDisplay {
    timezone: Option<Tz>,
    format: String,
}

impl TimeDisplay {
    /// `None` for the timezone means the system local zone. A format string
    /// chrono cannot parse falls back to the default short date and time.
    pub fn new(timezone: Option<Tz>, format: Option<String>) -> Self {
        let format = match format {
            Some(fmt) if is_valid_format(&fmt) => fmt,
            Some(fmt) => {
                tracing::warn!(format = %fmt, "ignoring invalid date_format");
                DEFAULT_DATE_FORMAT.to_string()
            }
            None => DEFAULT_DATE_FORMAT.to_string(),
        };
        Self { timezone, format }
    }

    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        match self.timezone {
            Some(tz) => timestamp.with_timezone(&tz).format(&self.format).to_string(),
            None => timestamp
                .with_timezone(&Local)
                .format(&self.format)
                .to_string(),
        }
    }
}

impl Default for TimeDisplay {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn is_valid_format(fmt: &str) -> bool {
    !fmt.is_empty() && StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}

/// Format an integer with comma thousands separators.
///
/// Takes anything that widens to `i128` so totals of `i64` amounts fit.
pub fn group_thousands(value: impl Into<i128>) -> String {
    let value: i128 = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
