//! Exchange-local time used across the fill models

use std::ops::{Add, Deref};

use serde::{Deserialize, Serialize};
use time::{format_description, Date, Duration, OffsetDateTime};

pub const SECONDS_IN_DAY: i64 = 86_400;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<time::Weekday> for Weekday {
    fn from(v: time::Weekday) -> Self {
        match v {
            time::Weekday::Monday => Weekday::Monday,
            time::Weekday::Tuesday => Weekday::Tuesday,
            time::Weekday::Wednesday => Weekday::Wednesday,
            time::Weekday::Thursday => Weekday::Thursday,
            time::Weekday::Friday => Weekday::Friday,
            time::Weekday::Saturday => Weekday::Saturday,
            time::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

///[DateTime] is a wrapper around the epoch time in seconds. All times handled by the fill models
///are exchange-local so no timezone information is carried.
//The internal representation with the time package should remain hidden from clients. Whilst this
//results in some duplication of the API, this retains the option to get rid of the dependency on
//time or change individual functions later.
#[derive(
    Clone, Copy, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize,
)]
pub struct DateTime(i64);

impl DateTime {
    pub const MIN: DateTime = DateTime(i64::MIN);

    pub fn weekday(&self) -> Weekday {
        // Epoch day zero was a Thursday, avoids going through OffsetDateTime for out-of-range
        // values
        match self.days_since_epoch().rem_euclid(7) {
            0 => Weekday::Thursday,
            1 => Weekday::Friday,
            2 => Weekday::Saturday,
            3 => Weekday::Sunday,
            4 => Weekday::Monday,
            5 => Weekday::Tuesday,
            _ => Weekday::Wednesday,
        }
    }

    /// Whole days since epoch, used to compare calendar dates.
    pub fn days_since_epoch(&self) -> i64 {
        self.0.div_euclid(SECONDS_IN_DAY)
    }

    pub fn seconds_of_day(&self) -> i64 {
        self.0.rem_euclid(SECONDS_IN_DAY)
    }

    pub fn start_of_day(&self) -> DateTime {
        DateTime(self.days_since_epoch() * SECONDS_IN_DAY)
    }

    pub fn is_same_date(&self, other: &DateTime) -> bool {
        self.days_since_epoch() == other.days_since_epoch()
    }

    pub fn from_date_string(val: &str, date_fmt: &str) -> Option<Self> {
        let format = format_description::parse(date_fmt).ok()?;
        let parsed_date = Date::parse(val, &format).ok()?;
        let parsed_time = parsed_date.with_time(time::macros::time!(09:00));
        Some(Self::from(parsed_time.assume_utc().unix_timestamp()))
    }
}

impl Add<Duration> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: Duration) -> Self::Output {
        DateTime(self.0.saturating_add(rhs.whole_seconds()))
    }
}

impl Deref for DateTime {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(value: OffsetDateTime) -> Self {
        value.unix_timestamp().into()
    }
}

impl TryFrom<DateTime> for OffsetDateTime {
    type Error = time::error::ComponentRange;

    fn try_from(v: DateTime) -> Result<Self, Self::Error> {
        OffsetDateTime::from_unix_timestamp(v.0)
    }
}

impl From<DateTime> for i64 {
    fn from(v: DateTime) -> Self {
        v.0
    }
}

impl From<i64> for DateTime {
    fn from(v: i64) -> Self {
        DateTime(v)
    }
}
