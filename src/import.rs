//! Import from JSON / comma-separated files and export to JSON.
//!
//! Canonical records (already carrying `symbol`, `type`, `option` or
//! `entryDate`) are taken as-is. Anything else is treated as a broker-style
//! export and normalized field by field.

use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{JournalError, Result};
use crate::state::new_trade_id;
use crate::types::{Instrument, OptionContract, OptionSide, Trade};
use crate::utils::{money_to_num, sanitize_symbol, to_iso};

const CANONICAL_KEYS: &[&str] = &["symbol", "type", "option", "entryDate"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    pub fn from_file_name(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".csv") {
            Format::Csv
        } else {
            Format::Json
        }
    }
}

/// `today` fills missing dates and supplies the year for `MM/DD` values.
pub fn import_trades(text: &str, format: Format, today: NaiveDate) -> Result<Vec<Trade>> {
    let records = match format {
        Format::Json => json_records(text)?,
        Format::Csv => csv_records(text)?,
    };
    let trades = records
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            normalize(r, today).map_err(|e| JournalError::Import(format!("record {}: {}", i + 1, e)))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("Imported {} trades", trades.len());
    Ok(trades)
}

fn json_records(text: &str) -> Result<Vec<Map<String, Value>>> {
    let data: Value = serde_json::from_str(text)?;
    let items = match data {
        Value::Array(items) => items,
        other => vec![other],
    };
    items
        .into_iter()
        .map(|v| match v {
            Value::Object(m) => Ok(m),
            other => Err(JournalError::Import(format!("expected an object, got {other}"))),
        })
        .collect()
}

fn csv_records(text: &str) -> Result<Vec<Map<String, Value>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(JournalError::Import("empty CSV".into()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let cell = record.get(i).unwrap_or_default();
                    (h.to_string(), Value::String(cell.to_string()))
                })
                .collect(),
        );
    }
    Ok(rows)
}

/// First non-empty value among `keys`, rendered as a string.
fn field(r: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match r.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn is_canonical(r: &Map<String, Value>) -> bool {
    CANONICAL_KEYS.iter().any(|k| r.get(*k).is_some_and(|v| !v.is_null()))
}

fn normalize(mut r: Map<String, Value>, today: NaiveDate) -> Result<Trade> {
    if is_canonical(&r) && !r.values().all(Value::is_string) {
        // Journal JSON: ids may be missing or numeric in older exports.
        let id = match r.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => new_trade_id(),
        };
        r.insert("id".into(), Value::String(id));
        if !r.contains_key("type") {
            let kind = if r.contains_key("option") { "option" } else { "stock" };
            r.insert("type".into(), Value::String(kind.into()));
        }
        return Ok(serde_json::from_value(Value::Object(r))?);
    }
    normalize_foreign(&r, today)
}

fn normalize_foreign(r: &Map<String, Value>, today: NaiveDate) -> Result<Trade> {
    let year = today.year();
    let date_or_today = |keys: &[&str]| -> Result<NaiveDate> {
        match field(r, keys) {
            Some(s) => to_iso(&s, year),
            None => Ok(today),
        }
    };

    let symbol = sanitize_symbol(&field(r, &["TradeSymbol", "Symbol", "symbol"]).unwrap_or_default());
    if symbol.is_empty() {
        warn!("import record without a symbol");
    }

    let expiry = field(r, &["Expiry", "Expiration", "expiration"]);
    let side = field(r, &["OptionSide", "side"]);
    let strike = field(r, &["Strike", "strike"]);
    let instrument = if expiry.is_some() || side.is_some() || strike.is_some() {
        let side = match side.as_deref().map(str::to_ascii_uppercase).as_deref() {
            None | Some("CALL") | Some("C") => OptionSide::Call,
            Some("PUT") | Some("P") => OptionSide::Put,
            Some(other) => return Err(JournalError::Import(format!("unknown option side {other:?}"))),
        };
        Instrument::Option {
            option: OptionContract {
                side,
                strike: strike.as_deref().map(money_to_num).unwrap_or(0.0),
                expiration: match expiry {
                    Some(s) => to_iso(&s, year)?,
                    None => today,
                },
            },
        }
    } else {
        Instrument::Stock
    };

    let out_date = field(r, &["TradeOutDate", "ExitDate", "exitDate"]);
    let out_price = field(r, &["OutPrice", "ExitPrice", "exitPrice"]);
    let (exit_date, exit_price) = if out_date.is_some() || out_price.is_some() {
        let date = date_or_today(&["TradeOutDate", "ExitDate", "exitDate"])?;
        (Some(date), Some(out_price.as_deref().map(money_to_num).unwrap_or(0.0)))
    } else {
        (None, None)
    };

    Ok(Trade {
        id: field(r, &["id", "Id", "TradeId"]).unwrap_or_else(new_trade_id),
        symbol,
        instrument,
        strategy: Some(field(r, &["Strategy", "strategy"]).unwrap_or_else(|| "Single".into())),
        entry_date: date_or_today(&["TradeInDate", "EntryDate", "entryDate"])?,
        entry_price: field(r, &["InPrice", "EntryPrice", "entryPrice"])
            .as_deref()
            .map(money_to_num)
            .unwrap_or(0.0),
        exit_date,
        exit_price,
        quantity: field(r, &["Qty", "Quantity", "quantity"])
            .and_then(|q| q.parse().ok())
            .unwrap_or(1.0),
        notes: field(r, &["Notes", "notes"]),
        fees: field(r, &["Fees", "Commission", "fees"]).as_deref().map(money_to_num),
    })
}

pub fn export_json(trades: &[Trade]) -> Result<String> {
    Ok(serde_json::to_string_pretty(trades)?)
}

pub fn default_export_name(today: NaiveDate) -> String {
    format!("trades-export-{today}.json")
}
