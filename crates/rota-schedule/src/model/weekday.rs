use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// A set of weekdays numbered from Sunday (0) to Saturday (6).
///
/// Serialized as a sorted list of weekday numbers, e.g. `[1, 3, 5]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    /// ## Summary
    /// Builds a set from weekday numbers (0 = Sunday .. 6 = Saturday).
    ///
    /// ## Errors
    /// Returns `InvalidRule` if any number is outside 0..=6.
    pub fn from_numbers(numbers: impl IntoIterator<Item = u8>) -> ScheduleResult<Self> {
        numbers.into_iter().try_fold(Self::EMPTY, |set, number| {
            if number > 6 {
                return Err(ScheduleError::InvalidRule(format!(
                    "day of week {number} is outside 0..=6"
                )));
            }
            Ok(Self(set.0 | (1 << number)))
        })
    }

    #[must_use]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & Self::bit(weekday) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Weekday numbers in ascending order.
    #[must_use]
    pub fn numbers(self) -> Vec<u8> {
        (0..7).filter(|&number| self.0 & (1 << number) != 0).collect()
    }

    fn bit(weekday: Weekday) -> u8 {
        // num_days_from_sunday is always within 0..=6
        1 << weekday.num_days_from_sunday()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = ScheduleError;

    fn try_from(numbers: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_numbers(numbers)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.numbers()
    }
}
