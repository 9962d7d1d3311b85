use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
};

use chrono::{DateTime, Datelike, Local};

/// A resolved billing period. Unresolvable invoices carry no `Period` at all
/// rather than a guessed one.
#[derive(Copy, Clone, Eq, Hash, PartialEq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Comparable ordering key, valid because the month is clamped to 1..=12.
    pub const fn sort_key(self) -> i32 {
        self.year * 100 + self.month as i32
    }
}

impl From<DateTime<Local>> for Period {
    fn from(timestamp: DateTime<Local>) -> Self {
        Self { year: timestamp.year(), month: timestamp.month() }
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Debug for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Parse an explicit `YYYY-MM` period. Both parts must be numeric and the
/// month must fall in 1..=12. A bare month number carries no year and is not
/// a period.
pub fn parse_year_month(raw: &str) -> Option<Period> {
    let mut parts = raw.trim().splitn(3, '-');
    let year = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    (1..=12).contains(&month).then_some(Period { year, month })
}
