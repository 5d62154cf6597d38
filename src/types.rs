//! Core domain types: trades, instruments, P&L policy and quick-entry signals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::JournalError;

pub const UNKNOWN_STRATEGY: &str = "Unknown";
pub const DEFAULT_OPTION_MULTIPLIER: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    BTO,
    STC,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    #[serde(alias = "CALL", alias = "Call", alias = "C")]
    Call,
    #[serde(alias = "PUT", alias = "Put", alias = "P")]
    Put,
}

impl OptionSide {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Self::Call),
            'P' => Some(Self::Put),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionContract {
    pub side: OptionSide,
    pub strike: f64,
    pub expiration: NaiveDate,
}

impl OptionContract {
    pub fn same_contract(&self, other: &OptionContract) -> bool {
        self.side == other.side
            && (self.strike - other.strike).abs() < 1e-6
            && self.expiration == other.expiration
    }
}

/// Serialized as `"type": "stock"` or `"type": "option"` with an `option` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instrument {
    Stock,
    Option { option: OptionContract },
}

impl Instrument {
    pub fn contract(&self) -> Option<&OptionContract> {
        match self {
            Instrument::Stock => None,
            Instrument::Option { option } => Some(option),
        }
    }
}

fn default_quantity() -> f64 {
    1.0
}

/// One journal entry. Open while either exit field is missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    #[serde(flatten)]
    pub instrument: Instrument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    pub entry_date: NaiveDate,
    #[serde(alias = "buyPrice", alias = "purchasePrice")]
    pub entry_price: f64,
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default = "default_quantity", alias = "qty", alias = "contracts")]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Commissions paid on the round trip. Recorded only; P&L stays gross.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
}

impl Trade {
    pub fn stock(
        id: impl Into<String>,
        symbol: impl Into<String>,
        entry_date: NaiveDate,
        entry_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            instrument: Instrument::Stock,
            strategy: None,
            entry_date,
            entry_price,
            exit_date: None,
            exit_price: None,
            quantity: 1.0,
            notes: None,
            fees: None,
        }
    }

    pub fn option(
        id: impl Into<String>,
        symbol: impl Into<String>,
        contract: OptionContract,
        entry_date: NaiveDate,
        entry_price: f64,
    ) -> Self {
        Self {
            instrument: Instrument::Option { option: contract },
            ..Self::stock(id, symbol, entry_date, entry_price)
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn closed_at(mut self, exit_date: NaiveDate, exit_price: f64) -> Self {
        self.exit_date = Some(exit_date);
        self.exit_price = Some(exit_price);
        self
    }

    pub fn is_option(&self) -> bool {
        matches!(self.instrument, Instrument::Option { .. })
    }

    /// Both exit fields present. A half-filled exit counts as open.
    pub fn is_closed(&self) -> bool {
        self.exit().is_some()
    }

    pub fn exit(&self) -> Option<(NaiveDate, f64)> {
        match (self.exit_date, self.exit_price) {
            (Some(d), Some(p)) => Some((d, p)),
            _ => None,
        }
    }

    /// Realized P&L, only defined once the trade is closed.
    pub fn pnl(&self, policy: &PnlPolicy) -> Option<f64> {
        self.exit()
            .map(|(_, exit_price)| (exit_price - self.entry_price) * policy.scale(self))
    }

    /// Capital committed at entry; open and closed trades both count.
    pub fn cost(&self, policy: &PnlPolicy) -> f64 {
        self.entry_price * policy.scale(self)
    }

    pub fn strategy_label(&self) -> &str {
        match self.strategy.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => UNKNOWN_STRATEGY,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PnlBasis {
    /// Raw exit minus entry, ignoring quantity and contract size.
    #[default]
    PerUnit,
    /// Scaled by quantity, and by the contract multiplier for options.
    Position,
}

impl FromStr for PnlBasis {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "per_unit" | "unit" => Ok(PnlBasis::PerUnit),
            "position" => Ok(PnlBasis::Position),
            other => Err(JournalError::Parse(format!("unknown pnl basis {other:?}"))),
        }
    }
}

/// How a closed trade turns into a money amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnlPolicy {
    pub basis: PnlBasis,
    pub option_multiplier: f64,
}

impl Default for PnlPolicy {
    fn default() -> Self {
        Self::per_unit()
    }
}

impl PnlPolicy {
    pub fn per_unit() -> Self {
        Self {
            basis: PnlBasis::PerUnit,
            option_multiplier: DEFAULT_OPTION_MULTIPLIER,
        }
    }

    pub fn position(option_multiplier: f64) -> Self {
        Self {
            basis: PnlBasis::Position,
            option_multiplier,
        }
    }

    fn scale(&self, trade: &Trade) -> f64 {
        match self.basis {
            PnlBasis::PerUnit => 1.0,
            PnlBasis::Position if trade.is_option() => trade.quantity * self.option_multiplier,
            PnlBasis::Position => trade.quantity,
        }
    }
}

/// Parsed quick-entry line, e.g. `BTO 10 AAPL 150C 08/16 @ 2.50`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntrySignal {
    pub action: Action,
    pub symbol: String,
    pub quantity: u32,
    pub price: f64,
    pub contract: Option<ContractSpec>,
    pub strategy: Option<String>,
}

/// Option leg as typed by the user; expiry is resolved to a date on entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractSpec {
    pub strike: f64,
    pub side: OptionSide,
    pub expiry_mmdd: String,
}
