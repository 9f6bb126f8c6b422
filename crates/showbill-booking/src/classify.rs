//! Past / upcoming partitioning of shows.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedShows<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> Default for ClassifiedShows<T> {
    fn default() -> Self {
        Self {
            past_shows: Vec::new(),
            upcoming_shows: Vec::new(),
            past_shows_count: 0,
            upcoming_shows_count: 0,
        }
    }
}

/// A stored start time is zone-less and read as UTC. Strictly earlier than
/// `now` is past; a show starting exactly at `now` is upcoming.
pub fn is_past(start_time: NaiveDateTime, now: DateTime<Utc>) -> bool {
    start_time.and_utc() < now
}

/// Split `(start_time, listing)` pairs into past and upcoming buckets,
/// preserving input order within each bucket.
pub fn classify<T>(
    shows: impl IntoIterator<Item = (NaiveDateTime, T)>,
    now: DateTime<Utc>,
) -> ClassifiedShows<T> {
    let mut out = ClassifiedShows::default();
    for (start_time, listing) in shows {
        if is_past(start_time, now) {
            out.past_shows.push(listing);
        } else {
            out.upcoming_shows.push(listing);
        }
    }
    out.past_shows_count = out.past_shows.len();
    out.upcoming_shows_count = out.upcoming_shows.len();
    out
}

pub fn format_start_time(start_time: NaiveDateTime) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}
