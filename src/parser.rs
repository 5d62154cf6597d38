//! Parse quick-entry journal lines.
//! Supported: stocks and options, with or without quantity, limit price only,
//! optional trailing `# strategy`.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::{Action, ContractSpec, EntrySignal, OptionSide};

struct Patterns {
    opt: Regex,
    opt_noqty: Regex,
    stk: Regex,
    stk_noqty: Regex,
}

fn patterns() -> &'static Patterns {
    static P: OnceLock<Patterns> = OnceLock::new();
    P.get_or_init(|| Patterns {
        // "BTO 10 AAPL 150C 08/16 @ 2.50"
        opt: Regex::new(r"(?i)^(BTO|STC)\s+(\d+)\s+([A-Z]{1,6})\s+(\d+(?:\.\d+)?)\s*([CP])\s+(\d{2}/\d{2})\s*@\s*(\d+(?:\.\d+)?)(?:\s+#\s*(.+))?$").unwrap(),
        // "BTO AAPL 150C 08/16 @ 2.50"
        opt_noqty: Regex::new(r"(?i)^(BTO|STC)\s+([A-Z]{1,6})\s+(\d+(?:\.\d+)?)\s*([CP])\s+(\d{2}/\d{2})\s*@\s*(\d+(?:\.\d+)?)(?:\s+#\s*(.+))?$").unwrap(),
        // "BTO 100 AAPL @ 150.25"
        stk: Regex::new(r"(?i)^(BTO|STC)\s+(\d+)\s+([A-Z]{1,6})\s*@\s*(\d+(?:\.\d+)?)(?:\s+#\s*(.+))?$").unwrap(),
        stk_noqty: Regex::new(r"(?i)^(BTO|STC)\s+([A-Z]{1,6})\s*@\s*(\d+(?:\.\d+)?)(?:\s+#\s*(.+))?$").unwrap(),
    })
}

fn action(s: &str) -> Option<Action> {
    match &s.to_uppercase()[..] {
        "BTO" => Some(Action::BTO),
        "STC" => Some(Action::STC),
        _ => None,
    }
}

fn strategy(m: Option<regex::Match<'_>>) -> Option<String> {
    m.map(|m| m.as_str().trim().to_string()).filter(|s| !s.is_empty())
}

pub fn parse_entry(text: &str) -> Option<EntrySignal> {
    // Normalize whitespace
    let t = text.trim();
    let p = patterns();

    if let Some(c) = p.opt.captures(t) {
        return Some(EntrySignal {
            action: action(&c[1])?,
            quantity: c[2].parse().ok()?,
            symbol: c[3].to_uppercase(),
            contract: Some(ContractSpec {
                strike: c[4].parse().ok()?,
                side: OptionSide::from_char(c[5].chars().next()?)?,
                expiry_mmdd: c[6].to_string(),
            }),
            price: c[7].parse().ok()?,
            strategy: strategy(c.get(8)),
        });
    }

    if let Some(c) = p.opt_noqty.captures(t) {
        return Some(EntrySignal {
            action: action(&c[1])?,
            quantity: 1, // default when qty missing
            symbol: c[2].to_uppercase(),
            contract: Some(ContractSpec {
                strike: c[3].parse().ok()?,
                side: OptionSide::from_char(c[4].chars().next()?)?,
                expiry_mmdd: c[5].to_string(),
            }),
            price: c[6].parse().ok()?,
            strategy: strategy(c.get(7)),
        });
    }

    if let Some(c) = p.stk.captures(t) {
        return Some(EntrySignal {
            action: action(&c[1])?,
            quantity: c[2].parse().ok()?,
            symbol: c[3].to_uppercase(),
            contract: None,
            price: c[4].parse().ok()?,
            strategy: strategy(c.get(5)),
        });
    }

    if let Some(c) = p.stk_noqty.captures(t) {
        return Some(EntrySignal {
            action: action(&c[1])?,
            quantity: 1,
            symbol: c[2].to_uppercase(),
            contract: None,
            price: c[3].parse().ok()?,
            strategy: strategy(c.get(4)),
        });
    }

    None
}
