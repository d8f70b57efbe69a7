use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rota_core::ShiftTypeId;
use serde::{Deserialize, Serialize};

use super::format;
use crate::error::{ScheduleError, ScheduleResult};

/// Start and end time of day of a shift.
///
/// An end at or before the start means the shift runs past midnight into the
/// next day; equal times describe a full 24-hour shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftTime {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ShiftTime {
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// ## Summary
    /// Parses a pair of `HH:MM` strings.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if either value is not a strict 24-hour `HH:MM`.
    pub fn parse(start: &str, end: &str) -> ScheduleResult<Self> {
        let parse = |value: &str| {
            format::parse_hhmm(value).ok_or_else(|| {
                ScheduleError::InvalidRule(format!("time `{value}` must be in HH:MM format"))
            })
        };
        Ok(Self::new(parse(start)?, parse(end)?))
    }

    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        let same_day = self.end - self.start;
        if self.crosses_midnight() {
            same_day + TimeDelta::days(1)
        } else {
            same_day
        }
    }

    /// ## Summary
    /// The half-open absolute interval this shift covers when worked on `date`.
    #[must_use]
    pub fn interval_on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = date.and_time(self.start);
        (start, start + self.duration())
    }
}

/// A named shift template referenced by assignment rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftType {
    pub id: ShiftTypeId,
    pub name: String,
    #[serde(with = "format::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "format::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl ShiftType {
    /// ## Summary
    /// Creates an active shift type with no department, notes or colour.
    #[must_use]
    pub fn new(id: impl Into<ShiftTypeId>, name: impl Into<String>, time: ShiftTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_time: time.start,
            end_time: time.end,
            department: None,
            notes: None,
            color_code: None,
            is_active: true,
        }
    }

    #[must_use]
    pub const fn shift_time(&self) -> ShiftTime {
        ShiftTime::new(self.start_time, self.end_time)
    }
}
