use serde::{Deserialize, Serialize};

use crate::clock::{DateTime, Weekday, SECONDS_IN_DAY};

/// Exchange calendar queried by the fill models. `extended` includes pre and post market sessions.
pub trait ExchangeHours {
    fn is_open(&self, at: DateTime, extended: bool) -> bool;
    /// First session close strictly after `after`.
    fn next_market_close(&self, after: DateTime, extended: bool) -> Option<DateTime>;
    /// First session open strictly after `after`.
    fn next_market_open(&self, after: DateTime, extended: bool) -> Option<DateTime>;
}

/// Venues that trade continuously, like most crypto exchanges. There is never a session open or
/// close.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysOpen;

impl ExchangeHours for AlwaysOpen {
    fn is_open(&self, _at: DateTime, _extended: bool) -> bool {
        true
    }

    fn next_market_close(&self, _after: DateTime, _extended: bool) -> Option<DateTime> {
        None
    }

    fn next_market_open(&self, _after: DateTime, _extended: bool) -> Option<DateTime> {
        None
    }
}

/// Window within a day, in seconds from midnight. Start is inclusive, end is exclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Session {
    pub start: i64,
    pub end: i64,
}

impl Session {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    fn contains(&self, seconds_of_day: i64) -> bool {
        seconds_of_day >= self.start && seconds_of_day < self.end
    }
}

//How far ahead to look for the next session, covers long holiday weekends
const SEARCH_DAYS: i64 = 14;

/// Fixed daily sessions on a set of trading days. Holidays are not modelled.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionHours {
    pub regular: Session,
    pub pre_market: Option<Session>,
    pub post_market: Option<Session>,
    #[serde(skip, default = "weekdays")]
    pub trading_days: Vec<Weekday>,
}

fn weekdays() -> Vec<Weekday> {
    vec![
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ]
}

impl SessionHours {
    pub fn new(regular: Session) -> Self {
        Self {
            regular,
            pre_market: None,
            post_market: None,
            trading_days: weekdays(),
        }
    }

    /// 9:30 to 16:00 with pre market from 4:00 and post market until 20:00, Monday to Friday.
    pub fn us_equity() -> Self {
        Self {
            regular: Session::new(9 * 3600 + 30 * 60, 16 * 3600),
            pre_market: Some(Session::new(4 * 3600, 9 * 3600 + 30 * 60)),
            post_market: Some(Session::new(16 * 3600, 20 * 3600)),
            trading_days: weekdays(),
        }
    }

    pub fn with_pre_market(mut self, session: Session) -> Self {
        self.pre_market = Some(session);
        self
    }

    pub fn with_post_market(mut self, session: Session) -> Self {
        self.post_market = Some(session);
        self
    }

    pub fn with_trading_days(mut self, days: Vec<Weekday>) -> Self {
        self.trading_days = days;
        self
    }

    fn is_trading_day(&self, date: &DateTime) -> bool {
        self.trading_days.contains(&date.weekday())
    }

    fn session_open(&self, extended: bool) -> i64 {
        match (&self.pre_market, extended) {
            (Some(pre), true) => pre.start,
            _ => self.regular.start,
        }
    }

    fn session_close(&self, extended: bool) -> i64 {
        match (&self.post_market, extended) {
            (Some(post), true) => post.end,
            _ => self.regular.end,
        }
    }

    fn next_boundary(&self, after: DateTime, seconds_of_day: i64) -> Option<DateTime> {
        let start = after.start_of_day();
        (0..SEARCH_DAYS)
            .map(|offset| DateTime::from(*start + offset * SECONDS_IN_DAY + seconds_of_day))
            .find(|candidate| *candidate > after && self.is_trading_day(candidate))
    }
}

impl ExchangeHours for SessionHours {
    fn is_open(&self, at: DateTime, extended: bool) -> bool {
        if !self.is_trading_day(&at) {
            return false;
        }

        let seconds = at.seconds_of_day();
        if self.regular.contains(seconds) {
            return true;
        }

        if extended {
            let in_pre = self.pre_market.map(|s| s.contains(seconds)).unwrap_or(false);
            let in_post = self.post_market.map(|s| s.contains(seconds)).unwrap_or(false);
            return in_pre || in_post;
        }
        false
    }

    fn next_market_close(&self, after: DateTime, extended: bool) -> Option<DateTime> {
        self.next_boundary(after, self.session_close(extended))
    }

    fn next_market_open(&self, after: DateTime, extended: bool) -> Option<DateTime> {
        self.next_boundary(after, self.session_open(extended))
    }
}
