//! Past / upcoming classification of shows relative to a caller-supplied `now`.

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;

/// A show is upcoming only if it starts strictly after `now`; a show starting
/// exactly at `now` is already past.
pub fn is_upcoming(start_time: DateTimeWithTimeZone, now: DateTimeWithTimeZone) -> bool {
    start_time > now
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

/// Split `items` into past and upcoming, keeping the input order within each side.
pub fn partition<T, F>(
    items: impl IntoIterator<Item = T>,
    now: DateTimeWithTimeZone,
    start_time: F,
) -> Partitioned<T>
where
    F: Fn(&T) -> DateTimeWithTimeZone,
{
    let mut out = Partitioned::default();
    for item in items {
        if is_upcoming(start_time(&item), now) {
            out.upcoming.push(item);
        } else {
            out.past.push(item);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `Tue 05, 21, 2019 9:30PM`
    #[default]
    Medium,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

pub fn format_start_time(value: DateTimeWithTimeZone, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    value.format(pattern).to_string()
}
