//! Calendar-year activity grid: every day of the year with its closed trades.
//! Clicking a day in the grid feeds the single-date series filter.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::period::month_end;
use crate::types::{PnlPolicy, Trade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Profit,
    Loss,
    Flat,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeDetail {
    pub symbol: String,
    pub strategy: String,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub trades: usize,
    pub pnl: f64,
    /// Sum of absolute per-trade P&L.
    pub volume: f64,
    pub details: Vec<TradeDetail>,
}

impl DayActivity {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            trades: 0,
            pnl: 0.0,
            volume: 0.0,
            details: Vec::new(),
        }
    }

    pub fn tone(&self) -> Tone {
        if self.trades == 0 {
            Tone::Idle
        } else if self.pnl > 0.0 {
            Tone::Profit
        } else if self.pnl < 0.0 {
            Tone::Loss
        } else {
            Tone::Flat
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthActivity {
    pub month: u32,
    pub days: Vec<DayActivity>,
    pub total_trades: usize,
    pub total_pnl: f64,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearActivity {
    pub year: i32,
    pub months: Vec<MonthActivity>,
}

impl YearActivity {
    pub fn day(&self, date: NaiveDate) -> Option<&DayActivity> {
        if date.year() != self.year {
            return None;
        }
        self.months.get(date.month0() as usize)?.days.get(date.day0() as usize)
    }
}

pub fn yearly_activity(trades: &[Trade], year: i32, policy: &PnlPolicy) -> YearActivity {
    let mut by_day: HashMap<NaiveDate, Vec<(&Trade, f64)>> = HashMap::new();
    for t in trades {
        if let (Some((exit, _)), Some(pnl)) = (t.exit(), t.pnl(policy)) {
            if exit.year() == year {
                by_day.entry(exit).or_default().push((t, pnl));
            }
        }
    }

    let months = (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|first| {
            let last = month_end(first);
            let days: Vec<DayActivity> = (0..=(last - first).num_days())
                .map(|offset| {
                    let date = first + Duration::days(offset);
                    let mut day = DayActivity::empty(date);
                    for (t, pnl) in by_day.get(&date).into_iter().flatten() {
                        day.trades += 1;
                        day.pnl += pnl;
                        day.volume += pnl.abs();
                        day.details.push(TradeDetail {
                            symbol: t.symbol.clone(),
                            strategy: t.strategy_label().to_string(),
                            pnl: *pnl,
                        });
                    }
                    day
                })
                .collect();
            MonthActivity {
                month: first.month(),
                total_trades: days.iter().map(|d| d.trades).sum(),
                total_pnl: days.iter().map(|d| d.pnl).sum(),
                total_volume: days.iter().map(|d| d.volume).sum(),
                days,
            }
        })
        .collect();

    YearActivity { year, months }
}
