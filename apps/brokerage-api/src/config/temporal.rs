//! Temporal parser configuration.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::mapping::TemporalParser;

/// Temporal parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalConfig {
    /// Extra zone abbreviations, as UTC offsets in whole hours.
    #[serde(default)]
    pub zone_offsets: BTreeMap<String, i32>,
    /// Fixed date for time-of-day values instead of today.
    #[serde(default)]
    pub anchor_date: Option<NaiveDate>,
}

impl TemporalConfig {
    /// Build the configured parser.
    #[must_use]
    pub fn parser(&self) -> TemporalParser {
        let parser = self
            .zone_offsets
            .iter()
            .fold(TemporalParser::new(), |parser, (abbrev, hours)| {
                parser.with_zone(abbrev, *hours)
            });
        match self.anchor_date {
            Some(date) => parser.with_anchor_date(date),
            None => parser,
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        for (abbrev, hours) in &self.zone_offsets {
            if abbrev.is_empty() || !abbrev.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::ValidationError(format!(
                    "temporal.zone_offsets key '{abbrev}' must be alphabetic"
                )));
            }
            if !(-12..=14).contains(hours) {
                return Err(ConfigError::ValidationError(format!(
                    "temporal.zone_offsets.{abbrev} must be between -12 and 14 hours"
                )));
            }
        }
        Ok(())
    }
}
