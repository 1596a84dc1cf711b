//! Lenient date/time decoding.
//!
//! Upstream endpoints encode timestamps at least five different ways: epoch
//! milliseconds, epoch seconds, `YYYYMMDD` dates, `HHMMSS`/`HHMM` times of
//! day, and `"HH:mm:ss ZONE MM-dd-YYYY"` strings. [`TemporalParser`] picks the
//! encoding heuristically and never fails: anything it cannot read becomes
//! `None`.
//!
//! Numeric dispatch looks at the digit count as written. A JSON number loses
//! leading zeros (`093000` arrives as `93000`, five digits, and is read as
//! epoch seconds); digit strings keep them and are dispatched as numbers.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zone abbreviations understood out of the box, as UTC offsets in hours.
const BUILTIN_ZONES: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("EST", -5),
    ("EDT", -4),
    ("ET", -5),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Smallest epoch-millis value with 13 digits (2001-09-09T01:46:40Z).
const MIN_WIRE_MILLIS: i64 = 1_000_000_000_000;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"];

static DEFAULT_PARSER: LazyLock<TemporalParser> = LazyLock::new(TemporalParser::default);

/// A decoded date/time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalValue {
    /// A point in time.
    Instant(DateTime<Utc>),
    /// A calendar date with no time component.
    Date(NaiveDate),
    /// A time of day anchored to the processing date.
    TimeOfDay(NaiveDateTime),
}

impl TemporalValue {
    /// The instant, if this value is one.
    #[must_use]
    pub const fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Instant(dt) => Some(*dt),
            Self::Date(_) | Self::TimeOfDay(_) => None,
        }
    }

    /// The calendar date this value falls on.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Instant(dt) => dt.date_naive(),
            Self::Date(date) => *date,
            Self::TimeOfDay(dt) => dt.date(),
        }
    }

    /// Wire encoding that decodes back to an equal value.
    ///
    /// Instants become epoch milliseconds when that reads back as millis
    /// (13+ digits, whole milliseconds) and RFC 3339 strings otherwise. Dates
    /// in years 1000..=9999 become `YYYYMMDD` integers, other years ISO
    /// strings. Times of day become `HHMMSS` digit strings (a string keeps the
    /// leading zero).
    #[must_use]
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Instant(dt) => {
                let millis = dt.timestamp_millis();
                if millis >= MIN_WIRE_MILLIS && dt.timestamp_subsec_nanos() % 1_000_000 == 0 {
                    Value::from(millis)
                } else {
                    Value::String(dt.to_rfc3339())
                }
            }
            Self::Date(date) if (1000..=9999).contains(&date.year()) => {
                let (year, month, day) = (date.year(), date.month(), date.day());
                Value::from(i64::from(year) * 10_000 + i64::from(month) * 100 + i64::from(day))
            }
            Self::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            Self::TimeOfDay(dt) => Value::String(format!(
                "{:02}{:02}{:02}",
                dt.hour(),
                dt.minute(),
                dt.second()
            )),
        }
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Date(date) => write!(f, "{date}"),
            Self::TimeOfDay(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Heuristic decoder for temporal wire values.
#[derive(Debug, Clone)]
pub struct TemporalParser {
    zones: HashMap<String, i32>,
    anchor_date: Option<NaiveDate>,
}

impl Default for TemporalParser {
    fn default() -> Self {
        Self {
            zones: BUILTIN_ZONES
                .iter()
                .map(|(abbrev, hours)| ((*abbrev).to_string(), hours * 3600))
                .collect(),
            anchor_date: None,
        }
    }
}

impl TemporalParser {
    /// Create a parser with the built-in zone table, anchored to the local date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor times of day to a fixed date instead of today.
    #[must_use]
    pub const fn with_anchor_date(mut self, date: NaiveDate) -> Self {
        self.anchor_date = Some(date);
        self
    }

    /// Register (or override) a zone abbreviation with a UTC offset in hours.
    #[must_use]
    pub fn with_zone(mut self, abbrev: &str, offset_hours: i32) -> Self {
        self.zones
            .insert(abbrev.to_ascii_uppercase(), offset_hours * 3600);
        self
    }

    /// Decode a raw value. Never fails; unreadable input yields `None`.
    #[must_use]
    pub fn parse(&self, raw: &Value) -> Option<TemporalValue> {
        match raw {
            Value::Number(number) => {
                let value = number
                    .as_i64()
                    .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
                self.parse_numeric(&value.unsigned_abs().to_string(), value)
            }
            Value::String(text) => self.parse_text(text.trim()),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn parse_text(&self, text: &str) -> Option<TemporalValue> {
        if text.is_empty() {
            return None;
        }
        if text.bytes().all(|b| b.is_ascii_digit()) {
            let value = text.parse::<i64>().ok()?;
            return self.parse_numeric(text, value);
        }

        let parsed = self
            .parse_zoned(text)
            .or_else(|| parse_permissive(text));
        if parsed.is_none() {
            tracing::trace!(value = %text, "Unrecognized temporal encoding");
        }
        parsed
    }

    fn parse_numeric(&self, digits: &str, value: i64) -> Option<TemporalValue> {
        if value == 0 {
            return None;
        }

        match digits.len() {
            len if len >= 13 => DateTime::from_timestamp_millis(value).map(TemporalValue::Instant),
            8 => NaiveDate::parse_from_str(digits, "%Y%m%d")
                .ok()
                .map(TemporalValue::Date),
            6 => NaiveTime::parse_from_str(digits, "%H%M%S")
                .ok()
                .map(|time| TemporalValue::TimeOfDay(self.today().and_time(time))),
            4 => NaiveTime::parse_from_str(digits, "%H%M")
                .ok()
                .map(|time| TemporalValue::TimeOfDay(self.today().and_time(time))),
            _ => DateTime::from_timestamp(value, 0).map(TemporalValue::Instant),
        }
    }

    /// `"HH:mm:ss ZONE MM-dd-YYYY"`, e.g. `"14:30:00 EST 06-21-2024"`.
    fn parse_zoned(&self, text: &str) -> Option<TemporalValue> {
        let mut parts = text.split_whitespace();
        let (time, zone, date) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let time = NaiveTime::parse_from_str(time, "%H:%M:%S").ok()?;
        let date = NaiveDate::parse_from_str(date, "%m-%d-%Y").ok()?;
        let offset_secs = self.zones.get(&zone.to_ascii_uppercase())?;
        let offset = FixedOffset::east_opt(*offset_secs)?;

        offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|dt| TemporalValue::Instant(dt.with_timezone(&Utc)))
    }

    fn today(&self) -> NaiveDate {
        self.anchor_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

fn parse_permissive(text: &str) -> Option<TemporalValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(TemporalValue::Instant(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(TemporalValue::Instant(dt.with_timezone(&Utc)));
    }

    // Naive date-times carry no zone and are read as UTC
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| TemporalValue::Instant(naive.and_utc()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(TemporalValue::Date)
        })
}

/// Decode a raw value with the default parser.
#[must_use]
pub fn parse_temporal(raw: &Value) -> Option<TemporalValue> {
    DEFAULT_PARSER.parse(raw)
}
