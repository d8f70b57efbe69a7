//! Wire formats for calendar dates and times of day.
//!
//! Dates are written as `YYYY-MM-DD`. On input, RFC 3339 timestamps and naive
//! `YYYY-MM-DDTHH:MM:SS` values are also accepted and reduced to their date,
//! since rule dates ignore the time of day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// ## Summary
/// Parses a calendar date, discarding any time-of-day component.
///
/// Returns `None` when the value is not a recognizable date.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.date())
}

/// ## Summary
/// Parses a strict 24-hour `HH:MM` time of day.
#[must_use]
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let (hours, minutes) = value.trim().split_once(':')?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return None;
    }
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// Serde adapter for a required lenient date.
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de};

    /// ## Errors
    /// Fails when the value is not a string holding a recognizable date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
    }
}

/// Serde adapter for an optional lenient date.
pub mod lenient_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de};

    /// ## Errors
    /// Fails when a present value is not a recognizable date.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                super::parse_calendar_date(&raw)
                    .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
            })
            .transpose()
    }
}

/// Serde adapter for a set of lenient dates.
pub mod lenient_date_set {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de};

    /// ## Errors
    /// Fails when any entry is not a recognizable date.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeSet<NaiveDate>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|raw| {
                super::parse_calendar_date(raw)
                    .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
            })
            .collect()
    }
}

/// Serde adapter for a set of lenient dates that may be absent.
pub mod lenient_date_set_opt {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de};

    /// ## Errors
    /// Fails when any present entry is not a recognizable date.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BTreeSet<NaiveDate>>, D::Error> {
        Option::<Vec<String>>::deserialize(deserializer)?
            .map(|raw_dates| {
                raw_dates
                    .iter()
                    .map(|raw| {
                        super::parse_calendar_date(raw)
                            .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
                    })
                    .collect()
            })
            .transpose()
    }
}

/// Serde adapter that tells an explicit `null` apart from an absent field.
///
/// Pair with `#[serde(default)]`: absent is `None`, `null` is `Some(None)`.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    /// ## Errors
    /// Fails when a present value does not deserialize as `T`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Serde adapter for `HH:MM` times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// ## Errors
    /// Propagates serializer failures.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    /// ## Errors
    /// Fails when the value is not a strict `HH:MM` string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| de::Error::custom(format!("time `{raw}` must be in HH:MM format")))
    }
}
