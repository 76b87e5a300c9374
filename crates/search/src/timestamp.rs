//! Resolution of user-supplied dates into epoch seconds (UTC).

use crate::error::{Result, SearchError};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Shorter digit runs are compact dates (`20220101`), not timestamps.
const MIN_EPOCH_DIGITS: usize = 10;

/// A date that is either already an epoch timestamp or free text to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Epoch(i64),
    Text(String),
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::Epoch(value)
    }
}

impl From<i32> for DateInput {
    fn from(value: i32) -> Self {
        DateInput::Epoch(i64::from(value))
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Epoch(value.timestamp())
    }
}

/// Free-text date parser backing [`TimestampResolver`].
pub trait DateParser: Send + Sync {
    fn parse(&self, input: &str) -> Option<DateTime<Utc>>;
}

/// Absolute and simple relative dates; naive values are read as UTC.
///
/// Relative forms (`now`, `today`, `yesterday`, `3 days ago`) are measured from the
/// reference instant, which defaults to the current time at parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateParser {
    reference: Option<DateTime<Utc>>,
}

impl ChronoDateParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference(reference: DateTime<Utc>) -> Self {
        Self {
            reference: Some(reference),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.reference.unwrap_or_else(Utc::now)
    }

    fn parse_relative(&self, input: &str) -> Option<DateTime<Utc>> {
        let lowered = input.to_ascii_lowercase();
        match lowered.as_str() {
            "now" | "today" => return Some(self.now()),
            "yesterday" => return self.now().checked_sub_signed(Duration::try_days(1)?),
            _ => {}
        }

        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let [amount, unit, "ago"] = tokens.as_slice() else {
            return None;
        };
        let amount: i64 = amount.parse().ok()?;
        let span = match unit.strip_suffix('s').unwrap_or(*unit) {
            "second" => Duration::try_seconds(amount)?,
            "minute" => Duration::try_minutes(amount)?,
            "hour" => Duration::try_hours(amount)?,
            "day" => Duration::try_days(amount)?,
            "week" => Duration::try_weeks(amount)?,
            _ => return None,
        };
        self.now().checked_sub_signed(span)
    }
}

impl DateParser for ChronoDateParser {
    fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        if input.len() >= MIN_EPOCH_DIGITS && input.bytes().all(|b| b.is_ascii_digit()) {
            return input
                .parse::<i64>()
                .ok()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return date
                    .and_hms_opt(0, 0, 0)
                    .map(|naive| Utc.from_utc_datetime(&naive));
            }
        }

        self.parse_relative(input)
    }
}

#[derive(Clone)]
pub struct TimestampResolver {
    parser: Arc<dyn DateParser>,
}

impl TimestampResolver {
    pub fn new(parser: Arc<dyn DateParser>) -> Self {
        Self { parser }
    }

    /// Epoch inputs pass through untouched; text goes through the parser and is
    /// truncated to whole seconds.
    pub fn resolve(&self, input: &DateInput) -> Result<i64> {
        match input {
            DateInput::Epoch(secs) => Ok(*secs),
            DateInput::Text(text) => self
                .parser
                .parse(text)
                .map(|dt| dt.timestamp())
                .ok_or_else(|| SearchError::InvalidDateFormat(text.clone())),
        }
    }
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new(Arc::new(ChronoDateParser::new()))
    }
}

impl fmt::Debug for TimestampResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimestampResolver").finish_non_exhaustive()
    }
}
