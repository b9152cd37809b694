//! Filtered views and aggregate statistics over a fetched collection.
//!
//! Everything here is pure and recomputed on each call. Lists are UI-scale,
//! so there is no caching and every function is a single pass.

mod predicates;
mod summary;

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::model::Resource;

pub use predicates::{
    AttendanceFilter, EmployeeFilter, LeaveFilter, NotificationFilter, PayrollFilter, ReadState,
    TaskFilter,
};
pub use summary::{
    AttendanceStats, EmployeeStats, LeaveStats, NotificationStats, PayrollStats, TaskStats,
    created_on, leave_days,
};

/// Keyword that selects every value of a predicate.
pub const ALL: &str = "all";

/// One predicate value: either everything, or exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        self.allows(|selected| selected == value)
    }
}

impl<T> Selection<T> {
    /// Evaluate the selection with a custom comparison.
    pub fn allows(&self, test: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => test(selected),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Only(v),
            None => Selection::All,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        s.trim().parse().map(Selection::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Case-insensitive substring match of `needle` against any of `fields`.
/// An empty or blank needle matches everything.
pub fn matches_text(needle: &str, fields: &[&str]) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }

    let needle = needle.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// A set of user-chosen predicates over one record kind, combined with AND.
pub trait Predicate<R> {
    fn matches(&self, item: &R) -> bool;
}

/// Records of `items` the predicate accepts, in their original order.
pub fn filtered_view<R: Clone, P: Predicate<R>>(items: &[R], predicate: &P) -> Vec<R> {
    items
        .iter()
        .filter(|item| predicate.matches(item))
        .cloned()
        .collect()
}

/// Links a record kind to its predicate set and its aggregate statistics.
pub trait Summarize: Resource {
    type Filter: Predicate<Self> + Default + fmt::Debug + Send + Sync;
    type Stats: Serialize + fmt::Debug + PartialEq;

    fn stats(items: &[Self]) -> Self::Stats;
}

/// Aggregate statistics of `items`.
pub fn stats<R: Summarize>(items: &[R]) -> R::Stats {
    R::stats(items)
}

/// Calendar day of a date or timestamp string.
///
/// Accepts plain dates (`2024-01-25`), civil datetimes
/// (`2024-01-25T09:00:00`), and RFC 3339 timestamps, which are read in UTC.
pub fn parse_day(raw: &str) -> Option<Date> {
    parse_day_in(raw, &TimeZone::UTC)
}

/// Like [`parse_day`], but RFC 3339 timestamps are read in `tz`. Plain dates
/// and civil datetimes carry no zone and are taken as written.
pub fn parse_day_in(raw: &str, tz: &TimeZone) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<jiff::Timestamp>() {
        return Some(ts.to_zoned(tz.clone()).date());
    }
    if let Ok(datetime) = raw.parse::<jiff::civil::DateTime>() {
        return Some(datetime.date());
    }
    raw.parse::<Date>().ok()
}
