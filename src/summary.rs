//! Headline dashboard statistics.

use serde::Serialize;

use crate::types::{PnlPolicy, Trade};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_pnl: f64,
    pub invested: f64,
    pub roi: f64,
    pub win_rate: f64,
    /// Mean P&L of winning trades (pnl > 0).
    pub avg_win: f64,
    /// Mean P&L of the rest (pnl <= 0); zero or negative.
    pub avg_loss: f64,
    pub closed_count: usize,
    pub open_count: usize,
    pub win_count: usize,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Never fails: empty or all-open inputs produce zeroed fields.
pub fn compute_summary(trades: &[Trade], policy: &PnlPolicy) -> Summary {
    let closed: Vec<f64> = trades.iter().filter_map(|t| t.pnl(policy)).collect();
    let (wins, losses): (Vec<f64>, Vec<f64>) = closed.iter().copied().partition(|p| *p > 0.0);

    let total_pnl: f64 = closed.iter().sum();
    let invested: f64 = trades.iter().map(|t| t.cost(policy)).sum();

    Summary {
        total_pnl,
        invested,
        roi: if invested > 0.0 { total_pnl / invested } else { 0.0 },
        win_rate: if closed.is_empty() {
            0.0
        } else {
            wins.len() as f64 / closed.len() as f64
        },
        avg_win: mean(&wins),
        avg_loss: mean(&losses),
        closed_count: closed.len(),
        open_count: trades.len() - closed.len(),
        win_count: wins.len(),
    }
}
