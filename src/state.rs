//! Persisted journal state per user, behind an injected store.
//!
//! Each user owns one JSON document: `{schemaVersion, trades, settings}`.
//! The aggregation code never sees a store; callers load a snapshot and pass
//! `&state.trades` down.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::{fs, path::Path, path::PathBuf};
use tracing::{info, warn};

use crate::error::{JournalError, Result};
use crate::period::month_key;
use crate::types::{
    Action, EntrySignal, Instrument, OptionContract, PnlBasis, PnlPolicy, Trade,
    DEFAULT_OPTION_MULTIPLIER,
};
use crate::utils::{expiry_from_mmdd, sanitize_symbol};

pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_multiplier() -> f64 {
    DEFAULT_OPTION_MULTIPLIER
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_multiplier")]
    pub option_multiplier: f64,
    #[serde(default)]
    pub pnl_basis: PnlBasis,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            option_multiplier: DEFAULT_OPTION_MULTIPLIER,
            pnl_basis: PnlBasis::default(),
        }
    }
}

impl Settings {
    pub fn policy(&self) -> PnlPolicy {
        PnlPolicy {
            basis: self.pnl_basis,
            option_multiplier: self.option_multiplier,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.option_multiplier.is_finite() && self.option_multiplier > 0.0) {
            return Err(JournalError::InvalidSettings(format!(
                "option multiplier must be positive, got {}",
                self.option_multiplier
            )));
        }
        Ok(())
    }
}

/// List filter. `month` is a `YYYY-MM` key matched against entry or exit;
/// every whitespace-separated `search` term must appear somewhere in the trade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFilter {
    pub month: Option<String>,
    pub search: Option<String>,
}

impl TradeFilter {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(month) = self.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            let entry = month_key(trade.entry_date) == month;
            let exit = trade.exit_date.is_some_and(|d| month_key(d) == month);
            if !(entry || exit) {
                return false;
            }
        }
        match self.search.as_deref() {
            Some(q) if !q.trim().is_empty() => {
                let hay = search_text(trade);
                q.to_lowercase().split_whitespace().all(|term| hay.contains(term))
            }
            _ => true,
        }
    }
}

fn search_text(trade: &Trade) -> String {
    let mut hay = vec![
        trade.symbol.clone(),
        trade.strategy_label().to_string(),
        trade.notes.clone().unwrap_or_default(),
    ];
    match trade.instrument.contract() {
        Some(c) => {
            hay.push("option".into());
            hay.push(format!("{:?}", c.side));
            hay.push(c.strike.to_string());
            hay.push(c.expiration.to_string());
        }
        None => hay.push("stock".into()),
    }
    hay.join(" ").to_lowercase()
}

/// Field-level changes for [`JournalState::edit`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeEdit {
    pub symbol: Option<String>,
    pub strategy: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub entry_price: Option<f64>,
    pub exit_date: Option<NaiveDate>,
    pub exit_price: Option<f64>,
    pub quantity: Option<f64>,
    pub notes: Option<String>,
    pub fees: Option<f64>,
    /// Clear both exit fields before applying the rest.
    pub reopen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for JournalState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

pub fn new_trade_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl JournalState {
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            trades: Vec::new(),
            settings,
        }
    }

    pub fn list(&self) -> &[Trade] {
        &self.trades
    }

    pub fn get(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// Replace by id, or put a new trade at the front. Returns true on replace.
    pub fn upsert(&mut self, trade: Trade) -> bool {
        if let Some(slot) = self.trades.iter_mut().find(|t| t.id == trade.id) {
            *slot = trade;
            true
        } else {
            self.trades.insert(0, trade);
            false
        }
    }

    pub fn delete(&mut self, id: &str) -> Result<Trade> {
        let idx = self
            .trades
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| JournalError::UnknownTrade(id.to_string()))?;
        Ok(self.trades.remove(idx))
    }

    /// Trades passing `filter`, in journal order.
    pub fn filter(&self, filter: &TradeFilter) -> Vec<&Trade> {
        self.trades.iter().filter(|t| filter.matches(t)).collect()
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Trade> {
        self.trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| JournalError::UnknownTrade(id.to_string()))
    }

    pub fn close_trade(
        &mut self,
        id: &str,
        date: NaiveDate,
        price: f64,
        fees: Option<f64>,
    ) -> Result<&Trade> {
        let trade = self.find_mut(id)?;
        trade.exit_date = Some(date);
        trade.exit_price = Some(price);
        if fees.is_some() {
            trade.fees = fees;
        }
        Ok(trade)
    }

    pub fn edit(&mut self, id: &str, edit: TradeEdit) -> Result<&Trade> {
        if edit.quantity.is_some_and(|q| q.is_nan() || q <= 0.0) {
            return Err(JournalError::Parse("quantity must be positive".into()));
        }
        let trade = self.find_mut(id)?;
        if edit.reopen {
            trade.exit_date = None;
            trade.exit_price = None;
        }
        if let Some(symbol) = edit.symbol {
            trade.symbol = sanitize_symbol(&symbol);
        }
        if let Some(strategy) = edit.strategy {
            trade.strategy = Some(strategy);
        }
        if let Some(date) = edit.entry_date {
            trade.entry_date = date;
        }
        if let Some(price) = edit.entry_price {
            trade.entry_price = price;
        }
        if let Some(date) = edit.exit_date {
            trade.exit_date = Some(date);
        }
        if let Some(price) = edit.exit_price {
            trade.exit_price = Some(price);
        }
        if let Some(qty) = edit.quantity {
            trade.quantity = qty;
        }
        if let Some(notes) = edit.notes {
            trade.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        if let Some(fees) = edit.fees {
            trade.fees = Some(fees);
        }
        if trade.exit_date.is_some() != trade.exit_price.is_some() {
            warn!("trade {} has a half-filled exit and counts as open", trade.id);
        }
        Ok(trade)
    }

    /// Apply `f` to a copy and keep it only if the result validates.
    pub fn update_settings(&mut self, f: impl FnOnce(&mut Settings)) -> Result<&Settings> {
        let mut next = self.settings.clone();
        f(&mut next);
        next.validate()?;
        self.settings = next;
        Ok(&self.settings)
    }

    /// Drop every trade; settings survive.
    pub fn reset(&mut self) {
        self.trades.clear();
    }

    /// Apply a quick-entry line dated `date`. BTO opens a new trade; STC closes
    /// the oldest matching open trade, splitting it when only part is sold.
    /// Returns the id of the trade created or closed.
    pub fn apply_entry(&mut self, signal: &EntrySignal, date: NaiveDate) -> Result<String> {
        let symbol = sanitize_symbol(&signal.symbol);
        let instrument = match &signal.contract {
            None => Instrument::Stock,
            Some(spec) => {
                let expiration = expiry_from_mmdd(&spec.expiry_mmdd, date).ok_or_else(|| {
                    JournalError::Parse(format!("bad expiry {:?}", spec.expiry_mmdd))
                })?;
                Instrument::Option {
                    option: OptionContract {
                        side: spec.side,
                        strike: spec.strike,
                        expiration,
                    },
                }
            }
        };
        let qty = f64::from(signal.quantity);

        match signal.action {
            Action::BTO => {
                let trade = Trade {
                    id: new_trade_id(),
                    symbol,
                    instrument,
                    strategy: signal.strategy.clone(),
                    entry_date: date,
                    entry_price: signal.price,
                    exit_date: None,
                    exit_price: None,
                    quantity: qty,
                    notes: None,
                    fees: None,
                };
                let id = trade.id.clone();
                info!("Opened {} x{} @ {:.2} id={}", trade.symbol, qty, signal.price, id);
                self.upsert(trade);
                Ok(id)
            }
            Action::STC => {
                let idx = self
                    .trades
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| {
                        !t.is_closed()
                            && t.symbol.eq_ignore_ascii_case(&symbol)
                            && same_instrument(&t.instrument, &instrument)
                    })
                    .min_by_key(|(_, t)| t.entry_date)
                    .map(|(i, _)| i)
                    .ok_or_else(|| JournalError::NoOpenPosition(symbol.clone()))?;

                let held = self.trades[idx].quantity;
                if qty + 1e-9 < held {
                    // Partial close: the sold lot becomes its own closed trade.
                    self.trades[idx].quantity = held - qty;
                    let mut lot = self.trades[idx].clone();
                    lot.id = new_trade_id();
                    lot.quantity = qty;
                    lot.exit_date = Some(date);
                    lot.exit_price = Some(signal.price);
                    let id = lot.id.clone();
                    info!("Closed {} of {} {} @ {:.2} id={}", qty, held, symbol, signal.price, id);
                    self.trades.insert(idx, lot);
                    Ok(id)
                } else {
                    if qty > held + 1e-9 {
                        warn!("STC {} {} exceeds held {}; closing whole position", qty, symbol, held);
                    }
                    let t = &mut self.trades[idx];
                    t.exit_date = Some(date);
                    t.exit_price = Some(signal.price);
                    info!("Closed {} x{} @ {:.2} id={}", symbol, held, signal.price, t.id);
                    Ok(t.id.clone())
                }
            }
        }
    }
}

fn same_instrument(a: &Instrument, b: &Instrument) -> bool {
    match (a.contract(), b.contract()) {
        (None, None) => true,
        (Some(x), Some(y)) => x.same_contract(y),
        _ => false,
    }
}

/// Load/save boundary. Implementations namespace state by user id.
pub trait StateStore {
    fn load(&self, user: &str) -> Result<JournalState>;
    fn save(&self, user: &str, state: &JournalState) -> Result<()>;
    /// Forget everything stored for `user`. Removing an absent user is not an error.
    fn remove(&self, user: &str) -> Result<()>;
}

fn check_schema(state: JournalState) -> Result<JournalState> {
    if state.schema_version > SCHEMA_VERSION {
        return Err(JournalError::UnsupportedSchema {
            found: state.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(state)
}

/// Keep user ids safe to embed in a file name.
pub fn user_file_stem(user: &str) -> String {
    user.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// One pretty-printed JSON file per user: `<dir>/trades-<user>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, user: &str) -> PathBuf {
        self.dir.join(format!("trades-{}.json", user_file_stem(user)))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, user: &str) -> Result<JournalState> {
        let path = self.path_for(user);
        if !path.exists() {
            return Ok(JournalState::default());
        }
        let s = fs::read_to_string(&path)?;
        let state: JournalState = serde_json::from_str(&s).map_err(|e| JournalError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        check_schema(state)
    }

    fn save(&self, user: &str, state: &JournalState) -> Result<()> {
        let path = self.path_for(user);
        if let Some(parent) = Path::new(&path).parent() {
            fs::create_dir_all(parent)?;
        }
        let s = serde_json::to_string_pretty(state)?;
        fs::write(&path, s)?;
        Ok(())
    }

    fn remove(&self, user: &str) -> Result<()> {
        let path = self.path_for(user);
        if path.exists() {
            fs::remove_file(&path)?;
            info!("Removed {}", path.display());
        }
        Ok(())
    }
}

/// In-process store; keeps serialized documents so round trips go through serde.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RefCell<HashMap<String, String>>,
}

impl StateStore for MemoryStore {
    fn load(&self, user: &str) -> Result<JournalState> {
        match self.docs.borrow().get(user) {
            Some(s) => check_schema(serde_json::from_str(s)?),
            None => Ok(JournalState::default()),
        }
    }

    fn save(&self, user: &str, state: &JournalState) -> Result<()> {
        let s = serde_json::to_string(state)?;
        self.docs.borrow_mut().insert(user.to_string(), s);
        Ok(())
    }

    fn remove(&self, user: &str) -> Result<()> {
        self.docs.borrow_mut().remove(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContractSpec, OptionSide};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn stock_signal(action: Action, qty: u32, price: f64) -> EntrySignal {
        EntrySignal {
            action,
            symbol: "aapl".into(),
            quantity: qty,
            price,
            contract: None,
            strategy: None,
        }
    }

    #[test]
    fn upsert_replaces_or_prepends() {
        let mut st = JournalState::default();
        assert!(!st.upsert(Trade::stock("a", "AAPL", d("2025-01-02"), 1.0)));
        assert!(!st.upsert(Trade::stock("b", "MSFT", d("2025-01-03"), 2.0)));
        assert_eq!(st.list()[0].id, "b");

        assert!(st.upsert(Trade::stock("a", "AAPL", d("2025-01-02"), 5.0)));
        assert_eq!(st.list().len(), 2);
        assert_eq!(st.get("a").unwrap().entry_price, 5.0);
    }

    #[test]
    fn delete_and_close_unknown_ids_fail() {
        let mut st = JournalState::default();
        st.upsert(Trade::stock("a", "AAPL", d("2025-01-02"), 1.0));
        assert!(matches!(st.delete("zzz"), Err(JournalError::UnknownTrade(_))));
        assert!(st.close_trade("zzz", d("2025-01-05"), 2.0, None).is_err());

        let t = st.close_trade("a", d("2025-01-05"), 2.0, Some(0.65)).unwrap();
        assert!(t.is_closed());
        assert_eq!(t.fees, Some(0.65));
        assert_eq!(st.delete("a").unwrap().id, "a");
        assert!(st.list().is_empty());
    }

    fn sample_journal() -> JournalState {
        let mut st = JournalState::default();
        st.upsert(
            Trade::stock("a", "AAPL", d("2025-01-28"), 150.0)
                .with_strategy("Swing")
                .closed_at(d("2025-02-03"), 155.0),
        );
        st.upsert(
            Trade::option(
                "b",
                "TSLA",
                OptionContract {
                    side: OptionSide::Put,
                    strike: 200.0,
                    expiration: d("2025-03-21"),
                },
                d("2025-03-03"),
                4.0,
            )
            .with_strategy("Long Put"),
        );
        let mut noted = Trade::stock("c", "MSFT", d("2025-02-10"), 400.0);
        noted.notes = Some("Earnings gap".into());
        st.upsert(noted);
        st
    }

    fn ids(trades: Vec<&Trade>) -> Vec<&str> {
        trades.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn filter_by_month_matches_entry_or_exit() {
        let st = sample_journal();
        let feb = TradeFilter {
            month: Some("2025-02".into()),
            ..Default::default()
        };
        assert_eq!(ids(st.filter(&feb)), vec!["c", "a"]);

        let jan = TradeFilter {
            month: Some("2025-01".into()),
            ..Default::default()
        };
        assert_eq!(ids(st.filter(&jan)), vec!["a"]);
        assert_eq!(st.filter(&TradeFilter::default()).len(), 3);
    }

    #[test]
    fn search_needs_every_term() {
        let st = sample_journal();
        let search = |q: &str| {
            ids(st.filter(&TradeFilter {
                search: Some(q.into()),
                ..Default::default()
            }))
        };
        assert_eq!(search("tsla put"), vec!["b"]);
        assert_eq!(search("EARNINGS"), vec!["c"]);
        assert_eq!(search("stock swing"), vec!["a"]);
        assert!(search("tsla call").is_empty());

        let both = TradeFilter {
            month: Some("2025-03".into()),
            search: Some("200".into()),
        };
        assert_eq!(ids(st.filter(&both)), vec!["b"]);
    }

    #[test]
    fn edit_updates_fields_and_can_reopen() {
        let mut st = sample_journal();
        let t = st
            .edit(
                "a",
                TradeEdit {
                    symbol: Some(" aapl ".into()),
                    entry_price: Some(149.5),
                    notes: Some("scaled in".into()),
                    fees: Some(1.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(t.symbol, "AAPL");
        assert_eq!(t.entry_price, 149.5);
        assert_eq!(t.notes.as_deref(), Some("scaled in"));
        assert_eq!(t.fees, Some(1.0));
        assert!(t.is_closed());

        let reopened = st
            .edit(
                "a",
                TradeEdit {
                    reopen: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!reopened.is_closed());

        let closed = st
            .edit(
                "b",
                TradeEdit {
                    exit_date: Some(d("2025-03-10")),
                    exit_price: Some(5.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(closed.exit(), Some((d("2025-03-10"), 5.0)));

        assert!(st.edit("zzz", TradeEdit::default()).is_err());
        let bad_qty = TradeEdit {
            quantity: Some(0.0),
            ..Default::default()
        };
        assert!(st.edit("a", bad_qty).is_err());
    }

    #[test]
    fn reset_keeps_settings() {
        let mut st = sample_journal();
        st.update_settings(|s| s.option_multiplier = 10.0).unwrap();
        st.reset();
        assert!(st.list().is_empty());
        assert_eq!(st.settings.option_multiplier, 10.0);
    }

    #[test]
    fn invalid_settings_are_rejected_and_not_kept() {
        let mut st = JournalState::default();
        let err = st.update_settings(|s| {
            s.pnl_basis = PnlBasis::Position;
            s.option_multiplier = 0.0;
        });
        assert!(matches!(err, Err(JournalError::InvalidSettings(_))));
        assert_eq!(st.settings, Settings::default());
    }

    #[test]
    fn bto_then_stc_round_trip() {
        let mut st = JournalState::default();
        let opened = st.apply_entry(&stock_signal(Action::BTO, 10, 150.0), d("2025-03-03")).unwrap();
        assert_eq!(st.get(&opened).unwrap().symbol, "AAPL");

        let closed = st.apply_entry(&stock_signal(Action::STC, 10, 155.0), d("2025-03-07")).unwrap();
        assert_eq!(closed, opened);
        let t = st.get(&closed).unwrap();
        assert_eq!(t.exit(), Some((d("2025-03-07"), 155.0)));
    }

    #[test]
    fn partial_stc_splits_the_lot() {
        let mut st = JournalState::default();
        let opened = st.apply_entry(&stock_signal(Action::BTO, 10, 150.0), d("2025-03-03")).unwrap();
        let sold = st.apply_entry(&stock_signal(Action::STC, 4, 160.0), d("2025-03-04")).unwrap();
        assert_ne!(sold, opened);
        assert_eq!(st.get(&opened).unwrap().quantity, 6.0);
        assert!(!st.get(&opened).unwrap().is_closed());
        assert_eq!(st.get(&sold).unwrap().quantity, 4.0);
        assert!(st.get(&sold).unwrap().is_closed());
    }

    #[test]
    fn stc_without_position_fails() {
        let mut st = JournalState::default();
        let err = st.apply_entry(&stock_signal(Action::STC, 1, 1.0), d("2025-03-03"));
        assert!(matches!(err, Err(JournalError::NoOpenPosition(_))));
    }

    #[test]
    fn option_stc_matches_contract() {
        let mut st = JournalState::default();
        let mut sig = stock_signal(Action::BTO, 2, 2.5);
        sig.contract = Some(ContractSpec {
            strike: 150.0,
            side: OptionSide::Call,
            expiry_mmdd: "08/15".into(),
        });
        let opened = st.apply_entry(&sig, d("2025-07-01")).unwrap();
        let t = st.get(&opened).unwrap();
        assert_eq!(t.instrument.contract().unwrap().expiration, d("2025-08-15"));

        let mut other = sig.clone();
        other.action = Action::STC;
        other.contract.as_mut().unwrap().side = OptionSide::Put;
        assert!(st.apply_entry(&other, d("2025-07-10")).is_err());

        sig.action = Action::STC;
        sig.price = 3.0;
        assert_eq!(st.apply_entry(&sig, d("2025-07-10")).unwrap(), opened);
    }

    #[test]
    fn file_store_round_trip_and_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut alice = store.load("alice").unwrap();
        assert_eq!(alice, JournalState::default());
        alice.upsert(Trade::stock("1", "AAPL", d("2025-01-02"), 3.0).closed_at(d("2025-01-09"), 4.0));
        alice.update_settings(|s| s.pnl_basis = PnlBasis::Position).unwrap();
        store.save("alice", &alice).unwrap();

        assert_eq!(store.load("alice").unwrap(), alice);
        assert!(store.load("bob").unwrap().trades.is_empty());
        assert!(store.path_for("alice").exists());

        store.remove("alice").unwrap();
        assert!(!store.path_for("alice").exists());
        assert!(store.load("alice").unwrap().trades.is_empty());
        store.remove("alice").unwrap();
    }

    #[test]
    fn memory_store_remove_forgets_user() {
        let store = MemoryStore::default();
        let mut st = JournalState::default();
        st.upsert(Trade::stock("1", "AAPL", d("2025-01-02"), 3.0));
        store.save("u", &st).unwrap();
        store.remove("u").unwrap();
        assert_eq!(store.load("u").unwrap(), JournalState::default());
    }

    #[test]
    fn file_store_reports_corrupt_and_future_schema() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path_for("x"), "{not json").unwrap();
        assert!(matches!(store.load("x"), Err(JournalError::Corrupt { .. })));

        fs::write(store.path_for("y"), r#"{"schemaVersion": 9, "trades": []}"#).unwrap();
        assert!(matches!(
            store.load("y"),
            Err(JournalError::UnsupportedSchema { found: 9, .. })
        ));
    }

    #[test]
    fn legacy_document_without_version_loads() {
        let store = MemoryStore::default();
        store
            .docs
            .borrow_mut()
            .insert("u".into(), r#"{"trades": [], "settings": {"optionMultiplier": 50}}"#.into());
        let st = store.load("u").unwrap();
        assert_eq!(st.schema_version, SCHEMA_VERSION);
        assert_eq!(st.settings.option_multiplier, 50.0);
        assert_eq!(st.settings.pnl_basis, PnlBasis::PerUnit);
    }

    #[test]
    fn user_ids_are_file_safe() {
        assert_eq!(user_file_stem("../etc/passwd"), "___etc_passwd");
        assert_eq!(user_file_stem("user-1"), "user-1");
    }
}
