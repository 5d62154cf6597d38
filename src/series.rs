//! Bucketed P&L series: per time window with running totals, per single date,
//! and per strategy.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::period::Period;
use crate::types::{PnlPolicy, Trade};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBucket {
    pub key: String,
    /// Symbol of the trade, single-date series only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub pnl: f64,
    pub trade_count: usize,
    pub cumulative_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySlice {
    pub name: String,
    pub abs_value: f64,
}

/// Closed trades whose exit falls inside the window shown for `(period, cursor)`.
pub fn closed_in_view<'a>(
    trades: &'a [Trade],
    period: Period,
    cursor: NaiveDate,
) -> impl Iterator<Item = &'a Trade> + 'a {
    trades.iter().filter(move |t| match t.exit() {
        Some((exit, _)) => period.contains(cursor, exit),
        None => false,
    })
}

fn accumulate(buckets: &mut [PeriodBucket]) {
    let mut running = 0.0;
    for b in buckets.iter_mut() {
        running += b.pnl;
        b.cumulative_pnl = running;
    }
}

/// One bucket per populated slot of the window, ascending by key.
/// Open trades in the input are skipped.
pub fn bucket_by_period(
    trades: &[Trade],
    period: Period,
    cursor: NaiveDate,
    policy: &PnlPolicy,
) -> Vec<PeriodBucket> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for t in closed_in_view(trades, period, cursor) {
        let (Some((exit, _)), Some(pnl)) = (t.exit(), t.pnl(policy)) else {
            continue;
        };
        let slot = groups.entry(period.bucket_key(exit)).or_insert((0.0, 0));
        slot.0 += pnl;
        slot.1 += 1;
    }

    let mut buckets: Vec<PeriodBucket> = groups
        .into_iter()
        .map(|(key, (pnl, trade_count))| PeriodBucket {
            key,
            label: None,
            pnl,
            trade_count,
            cumulative_pnl: 0.0,
        })
        .collect();
    accumulate(&mut buckets);
    buckets
}

/// One bucket per trade closed on `date`, kept in input order.
pub fn bucket_by_date(trades: &[Trade], date: NaiveDate, policy: &PnlPolicy) -> Vec<PeriodBucket> {
    let mut buckets: Vec<PeriodBucket> = trades
        .iter()
        .filter_map(|t| match (t.exit(), t.pnl(policy)) {
            (Some((exit, _)), Some(pnl)) if exit == date => Some(PeriodBucket {
                key: exit.to_string(),
                label: Some(t.symbol.clone()),
                pnl,
                trade_count: 1,
                cumulative_pnl: 0.0,
            }),
            _ => None,
        })
        .collect();
    accumulate(&mut buckets);
    buckets
}

/// Absolute value of each strategy's net P&L, in first-seen order.
/// Offsetting strategies do not cancel across groups.
pub fn bucket_by_strategy(trades: &[Trade], policy: &PnlPolicy) -> Vec<StrategySlice> {
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for t in trades {
        let Some(pnl) = t.pnl(policy) else { continue };
        let name = t.strategy_label();
        match index.get(name).copied() {
            Some(i) => order[i].1 += pnl,
            None => {
                index.insert(name.to_string(), order.len());
                order.push((name.to_string(), pnl));
            }
        }
    }
    order
        .into_iter()
        .map(|(name, net)| StrategySlice {
            name,
            abs_value: net.abs(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::compute_summary;
    use approx::assert_abs_diff_eq;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn closed(id: &str, symbol: &str, entry: f64, exit: f64, exit_date: &str) -> Trade {
        Trade::stock(id, symbol, d("2025-01-02"), entry).closed_at(d(exit_date), exit)
    }

    fn book() -> Vec<Trade> {
        vec![
            closed("1", "AAPL", 10.0, 15.0, "2025-03-05").with_strategy("Iron Condor"),
            closed("2", "MSFT", 20.0, 18.0, "2025-03-12").with_strategy("Iron Condor"),
            closed("3", "NVDA", 4.0, 9.0, "2025-01-20").with_strategy("Long Call"),
            closed("4", "TSLA", 8.0, 6.5, "2025-03-31"),
            Trade::stock("5", "AMD", d("2025-03-20"), 3.0),
        ]
    }

    #[test]
    fn all_period_groups_by_month_ascending() {
        let p = PnlPolicy::per_unit();
        let buckets = bucket_by_period(&book(), Period::All, d("2030-01-01"), &p);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["2025-01", "2025-03"]);
        assert_abs_diff_eq!(buckets[0].pnl, 5.0);
        assert_abs_diff_eq!(buckets[1].pnl, 1.5);
        assert_eq!(buckets[1].trade_count, 3);
        assert_abs_diff_eq!(buckets[1].cumulative_pnl, 6.5);
    }

    #[test]
    fn iron_condor_month_bucket() {
        let trades = &book()[..2];
        let buckets = bucket_by_period(trades, Period::All, d("2025-03-01"), &PnlPolicy::per_unit());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "2025-03");
        assert_abs_diff_eq!(buckets[0].pnl, 3.0);
    }

    #[test]
    fn monthly_emits_only_populated_weeks() {
        let p = PnlPolicy::per_unit();
        let buckets = bucket_by_period(&book(), Period::Monthly, d("2025-03-18"), &p);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        // 03-05 -> week of 03-03, 03-12 -> week of 03-10, 03-31 -> week of 03-31.
        assert_eq!(keys, ["2025-03-03", "2025-03-10", "2025-03-31"]);
        assert!(buckets.iter().all(|b| b.trade_count == 1));
    }

    #[test]
    fn weekly_window_excludes_other_weeks() {
        let p = PnlPolicy::per_unit();
        let buckets = bucket_by_period(&book(), Period::Weekly, d("2025-03-13"), &p);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "2025-03-12");
        assert_abs_diff_eq!(buckets[0].pnl, -2.0);
    }

    #[test]
    fn daily_same_day_trades_share_a_bucket() {
        let trades = vec![
            closed("1", "AAPL", 10.0, 20.0, "2025-06-01"),
            closed("2", "AAPL", 10.0, 6.0, "2025-06-01"),
        ];
        let buckets = bucket_by_period(&trades, Period::Daily, d("2025-05-28"), &PnlPolicy::per_unit());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "2025-06-01");
        assert_abs_diff_eq!(buckets[0].pnl, 6.0);
        assert_eq!(buckets[0].trade_count, 2);
    }

    #[test]
    fn open_trades_produce_no_buckets() {
        let trades = vec![Trade::stock("1", "AAPL", d("2025-02-01"), 10.0)];
        assert!(bucket_by_period(&trades, Period::All, d("2025-02-01"), &PnlPolicy::per_unit()).is_empty());
        assert!(bucket_by_period(&[], Period::Weekly, d("2025-02-01"), &PnlPolicy::per_unit()).is_empty());
    }

    #[test]
    fn buckets_reproduce_total_for_view() {
        let p = PnlPolicy::per_unit();
        let trades = book();
        for (period, cursor) in [
            (Period::All, d("2025-03-01")),
            (Period::Monthly, d("2025-03-01")),
            (Period::Weekly, d("2025-03-05")),
            (Period::Daily, d("2025-03-31")),
        ] {
            let in_view: Vec<Trade> = closed_in_view(&trades, period, cursor).cloned().collect();
            let total = compute_summary(&in_view, &p).total_pnl;
            let buckets = bucket_by_period(&trades, period, cursor, &p);
            let sum: f64 = buckets.iter().map(|b| b.pnl).sum();
            assert_abs_diff_eq!(sum, total, epsilon = 1e-9);
            if let Some(last) = buckets.last() {
                assert_abs_diff_eq!(last.cumulative_pnl, sum, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn single_date_keeps_list_order_and_labels() {
        let trades = vec![
            closed("1", "TSLA", 5.0, 4.0, "2025-03-12"),
            closed("2", "AAPL", 10.0, 15.0, "2025-03-05"),
            closed("3", "MSFT", 20.0, 23.0, "2025-03-12"),
        ];
        let buckets = bucket_by_date(&trades, d("2025-03-12"), &PnlPolicy::per_unit());
        let labels: Vec<&str> = buckets.iter().filter_map(|b| b.label.as_deref()).collect();
        assert_eq!(labels, ["TSLA", "MSFT"]);
        assert_eq!(buckets[0].key, "2025-03-12");
        assert_abs_diff_eq!(buckets[0].cumulative_pnl, -1.0);
        assert_abs_diff_eq!(buckets[1].cumulative_pnl, 2.0);
        assert!(buckets.iter().all(|b| b.trade_count == 1));
    }

    #[test]
    fn strategy_slices_are_absolute_per_group() {
        let trades = vec![
            closed("1", "A", 0.0, 100.0, "2025-03-01").with_strategy("Straddle"),
            closed("2", "B", 100.0, 0.0, "2025-03-02").with_strategy("Butterfly"),
        ];
        let slices = bucket_by_strategy(&trades, &PnlPolicy::per_unit());
        assert_eq!(slices.len(), 2);
        assert_abs_diff_eq!(slices[0].abs_value, 100.0);
        assert_abs_diff_eq!(slices[1].abs_value, 100.0);
        // Net is flat but the distribution still reports both sides.
        assert_abs_diff_eq!(compute_summary(&trades, &PnlPolicy::per_unit()).total_pnl, 0.0);
    }

    #[test]
    fn strategy_groups_net_before_abs_and_default_unknown() {
        let slices = bucket_by_strategy(&book(), &PnlPolicy::per_unit());
        let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Iron Condor", "Long Call", "Unknown"]);
        assert_abs_diff_eq!(slices[0].abs_value, 3.0);
        assert_abs_diff_eq!(slices[2].abs_value, 1.5);
    }
}
