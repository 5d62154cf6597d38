//! Drill-down navigation over the granularity ladder, with an undo stack.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::period::{monday_of, parse_day_key, parse_month_key, Period};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillState {
    pub period: Period,
    pub cursor: NaiveDate,
    history: Vec<(Period, NaiveDate)>,
}

impl DrillState {
    pub fn new(period: Period, cursor: NaiveDate) -> Self {
        Self {
            period,
            cursor,
            history: Vec::new(),
        }
    }

    pub fn view(&self) -> (Period, NaiveDate) {
        (self.period, self.cursor)
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Narrow into the clicked bucket. Returns false (and changes nothing) from
    /// `Daily` or when the key does not parse for the current granularity.
    pub fn drill_down(&mut self, bucket_key: &str) -> bool {
        let target = self.period.finer().and_then(|period| {
            let cursor = match self.period {
                Period::All => parse_month_key(bucket_key),
                Period::Monthly => parse_day_key(bucket_key),
                // Daily windows start on Monday, same as the week they came from.
                _ => parse_day_key(bucket_key).map(monday_of),
            }?;
            Some((period, cursor))
        });
        let Some((period, cursor)) = target else {
            debug!("drill_down ignored: period={} key={:?}", self.period, bucket_key);
            return false;
        };
        self.history.push(self.view());
        self.period = period;
        self.cursor = cursor;
        true
    }

    /// Undo the last drill. No-op on an empty stack.
    pub fn drill_up(&mut self) -> bool {
        match self.history.pop() {
            Some((period, cursor)) => {
                self.period = period;
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    /// Explicit granularity choice; not a drill, so history is left alone.
    pub fn select_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn navigate(&mut self, direction: i32) {
        self.cursor = self.period.shift(self.cursor, direction);
    }
}
