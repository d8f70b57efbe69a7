use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ScheduleError, ScheduleResult};

/// An inclusive range of calendar days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// ## Errors
    /// Returns `InvalidWindow` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ScheduleResult<Self> {
        if start > end {
            return Err(ScheduleError::InvalidWindow(format!(
                "window start {start} is after window end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    #[must_use]
    pub fn len_days(self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// ## Summary
    /// Intersects this window with a validity range whose end may be open.
    ///
    /// Returns `None` when the two do not share a day.
    #[must_use]
    pub fn clamp(self, start: NaiveDate, end: Option<NaiveDate>) -> Option<Self> {
        let start = start.max(self.start);
        let end = end.map_or(self.end, |end| end.min(self.end));
        (start <= end).then_some(Self { start, end })
    }

    /// Every day of the window in ascending order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
