//! One-call recomputation of everything the dashboard shows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::drill::DrillState;
use crate::period::Period;
use crate::series::{bucket_by_date, bucket_by_period, bucket_by_strategy, PeriodBucket, StrategySlice};
use crate::summary::{compute_summary, Summary};
use crate::types::{PnlPolicy, Trade};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub period: Period,
    pub cursor: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
    pub summary: Summary,
    pub series: Vec<PeriodBucket>,
    pub strategies: Vec<StrategySlice>,
}

/// Pure over its inputs. Summary and strategies cover every trade; the series
/// follows the drill view, or `selected_date` when one is set.
pub fn compute(
    trades: &[Trade],
    view: &DrillState,
    selected_date: Option<NaiveDate>,
    policy: &PnlPolicy,
) -> DashboardData {
    let series = match selected_date {
        Some(date) => bucket_by_date(trades, date, policy),
        None => bucket_by_period(trades, view.period, view.cursor, policy),
    };
    DashboardData {
        period: view.period,
        cursor: view.cursor,
        selected_date,
        summary: compute_summary(trades, policy),
        series,
        strategies: bucket_by_strategy(trades, policy),
    }
}
