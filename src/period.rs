//! Granularity ladder and the calendar arithmetic behind bucket keys and windows.
//!
//! Weeks are Monday-anchored: a Sunday belongs to the week that started six
//! days earlier.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JournalError;

/// Ordered coarse to fine: `All < Monthly < Weekly < Daily`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    All,
    Monthly,
    Weekly,
    Daily,
}

impl Period {
    pub fn finer(self) -> Option<Period> {
        match self {
            Period::All => Some(Period::Monthly),
            Period::Monthly => Some(Period::Weekly),
            Period::Weekly => Some(Period::Daily),
            Period::Daily => None,
        }
    }

    /// Key of the bucket a trade exiting on `exit` lands in.
    pub fn bucket_key(self, exit: NaiveDate) -> String {
        match self {
            Period::All => month_key(exit),
            Period::Monthly => monday_of(exit).to_string(),
            Period::Weekly | Period::Daily => exit.to_string(),
        }
    }

    /// Inclusive date range on display around `cursor`; `None` means unbounded.
    pub fn window(self, cursor: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Period::All => None,
            Period::Monthly => {
                let first = monday_of(month_start(cursor));
                let last = monday_of(month_end(cursor)) + Duration::days(6);
                Some((first, last))
            }
            // Daily shares the weekly window and renders one bucket per day.
            Period::Weekly | Period::Daily => {
                let monday = monday_of(cursor);
                Some((monday, monday + Duration::days(6)))
            }
        }
    }

    pub fn contains(self, cursor: NaiveDate, date: NaiveDate) -> bool {
        match self.window(cursor) {
            None => true,
            Some((from, to)) => from <= date && date <= to,
        }
    }

    /// Move `cursor` by `direction` units of this granularity.
    pub fn shift(self, cursor: NaiveDate, direction: i32) -> NaiveDate {
        match self {
            Period::All => cursor,
            Period::Daily => cursor + Duration::days(i64::from(direction)),
            Period::Weekly => cursor + Duration::days(7 * i64::from(direction)),
            Period::Monthly => {
                let months = Months::new(direction.unsigned_abs());
                let moved = if direction >= 0 {
                    cursor.checked_add_months(months)
                } else {
                    cursor.checked_sub_months(months)
                };
                moved.unwrap_or(cursor)
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::All => "all",
            Period::Monthly => "monthly",
            Period::Weekly => "weekly",
            Period::Daily => "daily",
        };
        f.write_str(s)
    }
}

impl FromStr for Period {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "a" => Ok(Period::All),
            "monthly" | "month" | "m" => Ok(Period::Monthly),
            "weekly" | "week" | "w" => Ok(Period::Weekly),
            "daily" | "day" | "d" => Ok(Period::Daily),
            other => Err(JournalError::Parse(format!("unknown period {other:?}"))),
        }
    }
}

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// `YYYY-MM`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn parse_month_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", key.trim()), "%Y-%m-%d").ok()
}

pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn sunday_belongs_to_previous_monday() {
        // 2025-06-01 is a Sunday.
        assert_eq!(monday_of(d("2025-06-01")), d("2025-05-26"));
        assert_eq!(monday_of(d("2025-05-26")), d("2025-05-26"));
        assert_eq!(monday_of(d("2025-05-28")), d("2025-05-26"));
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(d("2024-02-17")), d("2024-02-01"));
        assert_eq!(month_end(d("2024-02-17")), d("2024-02-29"));
        assert_eq!(month_end(d("2025-12-03")), d("2025-12-31"));
    }

    #[test]
    fn keys_per_granularity() {
        let exit = d("2025-03-12");
        assert_eq!(Period::All.bucket_key(exit), "2025-03");
        assert_eq!(Period::Monthly.bucket_key(exit), "2025-03-10");
        assert_eq!(Period::Weekly.bucket_key(exit), "2025-03-12");
        assert_eq!(Period::Daily.bucket_key(exit), "2025-03-12");
    }

    #[test]
    fn monthly_window_covers_overlapping_weeks() {
        // March 2025 starts on a Saturday and ends on a Monday.
        let (from, to) = Period::Monthly.window(d("2025-03-15")).unwrap();
        assert_eq!(from, d("2025-02-24"));
        assert_eq!(to, d("2025-04-06"));
    }

    #[test]
    fn daily_window_is_the_cursor_week() {
        assert_eq!(
            Period::Daily.window(d("2025-06-04")),
            Some((d("2025-06-02"), d("2025-06-08")))
        );
        assert_eq!(Period::Daily.window(d("2025-06-04")), Period::Weekly.window(d("2025-06-04")));
        assert!(Period::All.contains(d("2025-06-04"), d("1999-01-01")));
    }

    #[test]
    fn shift_by_granularity() {
        let c = d("2025-01-31");
        assert_eq!(Period::Daily.shift(c, 1), d("2025-02-01"));
        assert_eq!(Period::Weekly.shift(c, -1), d("2025-01-24"));
        assert_eq!(Period::Monthly.shift(c, 1), d("2025-02-28"));
        assert_eq!(Period::Monthly.shift(c, -2), d("2024-11-30"));
        assert_eq!(Period::All.shift(c, 5), c);
    }

    #[test]
    fn ladder_order_and_parsing() {
        assert!(Period::All < Period::Monthly && Period::Weekly < Period::Daily);
        assert_eq!(Period::Daily.finer(), None);
        assert_eq!("W".parse::<Period>().unwrap(), Period::Weekly);
        assert!("hourly".parse::<Period>().is_err());
        assert_eq!(parse_month_key("2025-03"), Some(d("2025-03-01")));
        assert_eq!(parse_month_key("2025-13"), None);
    }
}
