//! Parsed cron schedules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use cron::Schedule;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Errors raised while parsing cron text.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid day of week '{0}'")]
    DayOfWeek(String),

    #[error(transparent)]
    Cron(#[from] cron::error::Error),
}

/// A parsed cron expression.
///
/// Input uses standard cron day-of-week numbering (0-7, Sunday is 0 or 7).
/// The stored expression is normalized to the 6-field grammar of the `cron`
/// crate (`sec min hour day_of_month month day_of_week`, Sunday is 1), so a
/// 5-field expression and its seconds-prefixed form compare equal.
#[derive(Debug, Clone)]
pub struct ScheduleValue {
    expression: String,
    schedule: Schedule,
}

impl ScheduleValue {
    /// Parse cron text.
    ///
    /// With `has_seconds = false` the text must have exactly 5 fields and
    /// fires at second zero. With `has_seconds = true` it must have exactly 6
    /// fields, the first being seconds.
    pub fn parse(text: &str, has_seconds: bool) -> Result<Self, ScheduleError> {
        let mut fields: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let expected = if has_seconds { 6 } else { 5 };
        if fields.len() != expected {
            return Err(ScheduleError::FieldCount {
                expected,
                found: fields.len(),
            });
        }

        let last = fields.len() - 1;
        fields[last] = day_of_week_field(&fields[last])?;
        if !has_seconds {
            fields.insert(0, "0".to_string());
        }
        Self::from_normalized(fields.join(" "))
    }

    /// Build from an expression already in the normalized grammar.
    fn from_normalized(expression: String) -> Result<Self, ScheduleError> {
        let schedule = Schedule::from_str(&expression)?;
        Ok(Self {
            expression,
            schedule,
        })
    }

    /// Normalized 6-field expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First occurrence strictly after `after`.
    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.schedule.after(after).next()
    }
}

/// Rewrite a standard day-of-week field (Sunday = 0 or 7) as an explicit
/// list in `cron` crate numbering (Sunday = 1).
fn day_of_week_field(field: &str) -> Result<String, ScheduleError> {
    if field == "*" || field == "?" {
        return Ok(field.to_string());
    }

    let invalid = || ScheduleError::DayOfWeek(field.to_string());
    let mut days = [false; 7];

    for item in field.split(',') {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, step.parse::<usize>().map_err(|_| invalid())?),
            None => (item, 1),
        };
        if step == 0 {
            return Err(invalid());
        }

        let (start, end) = if range == "*" {
            (0, 6)
        } else if let Some((start, end)) = range.split_once('-') {
            (day_number(start).ok_or_else(invalid)?, day_number(end).ok_or_else(invalid)?)
        } else {
            let day = day_number(range).ok_or_else(invalid)?;
            (day, if step > 1 { 6 } else { day })
        };
        if start > end {
            return Err(invalid());
        }

        for day in (start..=end).step_by(step) {
            days[day % 7] = true;
        }
    }

    Ok(days
        .iter()
        .enumerate()
        .filter(|(_, set)| **set)
        .map(|(day, _)| (day + 1).to_string())
        .collect::<Vec<_>>()
        .join(","))
}

/// Day number 0-7 from a numeral or a three-letter name.
fn day_number(token: &str) -> Option<usize> {
    if let Ok(day) = token.parse::<usize>() {
        return (day <= 7).then_some(day);
    }
    DAY_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(token))
}

impl PartialEq for ScheduleValue {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for ScheduleValue {}

impl fmt::Display for ScheduleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl Serialize for ScheduleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.expression)
    }
}

impl<'de> Deserialize<'de> for ScheduleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expression = String::deserialize(deserializer)?;
        Self::from_normalized(expression).map_err(serde::de::Error::custom)
    }
}
