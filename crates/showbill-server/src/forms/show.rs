use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use showbill_db::repo::shows::ShowInput;
use showbill_db::sea_orm::prelude::DateTimeWithTimeZone;

use super::ValidationErrors;

/// Layout of the start time field when the form is first rendered.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive layouts accepted on submit; these are read as UTC.
const NAIVE_FORMATS: [&str; 3] = [START_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// Empty form with the start time pre-set to `now`.
    pub fn blank(now: DateTimeWithTimeZone) -> Self {
        Self {
            start_time: now.format(START_TIME_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<ShowInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let artist_id = parse_id(
            &mut errors,
            "artist_id",
            &self.artist_id,
            "Artist ID is required",
            "Artist ID must be a number",
        );
        let venue_id = parse_id(
            &mut errors,
            "venue_id",
            &self.venue_id,
            "Venue ID is required",
            "Venue ID must be a number",
        );

        let raw = self.start_time.trim();
        let start_time = if raw.is_empty() {
            errors.push("start_time", "Start time is required");
            None
        } else {
            let parsed = parse_start_time(raw);
            if parsed.is_none() {
                errors.push("start_time", "Not a valid datetime value.");
            }
            parsed
        };

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(ShowInput {
                    artist_id,
                    venue_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_id(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    required_message: &str,
    invalid_message: &str,
) -> Option<i32> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, required_message);
        return None;
    }
    match value.parse::<i32>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(field, invalid_message);
            None
        }
    }
}

fn parse_start_time(value: &str) -> Option<DateTimeWithTimeZone> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}
