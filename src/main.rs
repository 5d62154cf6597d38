//! Entry point. Wires config -> store -> aggregation -> JSON on stdout.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use std::io::{self, BufRead};
use std::{fs, path::PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use trade_journal::activity::yearly_activity;
use trade_journal::config::AppConfig;
use trade_journal::dashboard;
use trade_journal::drill::DrillState;
use trade_journal::import::{default_export_name, export_json, import_trades, Format};
use trade_journal::parser::parse_entry;
use trade_journal::period::Period;
use trade_journal::profiles::ProfileRegistry;
use trade_journal::series::bucket_by_strategy;
use trade_journal::state::{JournalState, JsonFileStore, StateStore, TradeEdit, TradeFilter};
use trade_journal::summary::compute_summary;
use trade_journal::types::PnlBasis;

/// Personal trade journal with P&L dashboards.
#[derive(Parser)]
#[command(name = "trade-journal", about = "Personal trade journal with P&L dashboards")]
struct Cli {
    /// Configuration file (YAML). Falls back to $TRADE_JOURNAL_CONFIG, then ./config.yaml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Profile to act on instead of the current one.
    #[arg(long)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Headline statistics.
    Summary,
    /// Bucketed P&L series for one view.
    Series {
        #[arg(long, default_value = "all")]
        period: Period,
        /// Anchor date of the window (defaults to today).
        #[arg(long)]
        cursor: Option<NaiveDate>,
        /// Show individual trades closed on this date instead.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Absolute P&L per strategy.
    Strategies,
    /// Day-by-day activity grid for a year.
    Activity {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Interactive drill-down session driven by stdin.
    Browse {
        #[arg(long, default_value = "all")]
        period: Period,
        #[arg(long)]
        cursor: Option<NaiveDate>,
    },
    /// Record a quick entry, e.g. "BTO 10 AAPL 150C 08/16 @ 2.50 # Long Call".
    Log {
        entry: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Close an open trade.
    Close {
        id: String,
        date: NaiveDate,
        price: f64,
        #[arg(long)]
        fees: Option<f64>,
    },
    /// Delete a trade.
    Delete { id: String },
    /// Import trades from a .json or .csv file (replaces the journal unless --append).
    Import {
        file: PathBuf,
        #[arg(long)]
        append: bool,
    },
    /// Export trades as JSON.
    Export { file: Option<PathBuf> },
    /// List, edit or clear trades.
    Trades {
        #[command(subcommand)]
        action: TradesCmd,
    },
    /// Manage local profiles.
    Users {
        #[command(subcommand)]
        action: UsersCmd,
    },
    /// Show or change the journal's P&L settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCmd,
    },
}

#[derive(Subcommand)]
enum TradesCmd {
    /// Trades in journal order, optionally filtered.
    List {
        /// YYYY-MM; matches trades entered or exited that month.
        #[arg(long)]
        month: Option<String>,
        /// Space-separated terms, all of which must match.
        #[arg(long)]
        search: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        entry_date: Option<NaiveDate>,
        #[arg(long)]
        entry_price: Option<f64>,
        #[arg(long)]
        exit_date: Option<NaiveDate>,
        #[arg(long)]
        exit_price: Option<f64>,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        fees: Option<f64>,
        /// Clear the exit before applying other changes.
        #[arg(long)]
        reopen: bool,
    },
    /// Delete every trade of the profile.
    Reset {
        /// Also restore settings to the configured defaults.
        #[arg(long)]
        settings: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCmd {
    Show,
    Set {
        /// per_unit or position
        #[arg(long)]
        basis: Option<PnlBasis>,
        #[arg(long)]
        multiplier: Option<f64>,
    },
}

#[derive(Subcommand)]
enum UsersCmd {
    List,
    Add { name: String },
    Switch { id: String },
    Rename { id: String, name: String },
    Remove { id: String },
}

struct Journal {
    cfg: AppConfig,
    store: JsonFileStore,
    registry: ProfileRegistry,
    registry_path: PathBuf,
    user: String,
}

impl Journal {
    fn open(cfg: AppConfig, user: Option<String>) -> Result<Self> {
        let dir = cfg.data_dir();
        let registry_path = dir.join("users.json");
        let registry = ProfileRegistry::load(&registry_path)
            .with_context(|| format!("loading profiles from {}", registry_path.display()))?;
        let user = user.unwrap_or_else(|| registry.current_id(&cfg.journal.default_user).to_string());
        info!("Data dir {} user {}", dir.display(), user);
        Ok(Self {
            store: JsonFileStore::new(dir),
            cfg,
            registry,
            registry_path,
            user,
        })
    }

    fn load(&self) -> Result<JournalState> {
        let path = self.store.path_for(&self.user);
        if !path.exists() {
            return Ok(JournalState::with_settings(self.cfg.default_settings()));
        }
        self.store
            .load(&self.user)
            .with_context(|| format!("loading journal for {}", self.user))
    }

    fn commit(&mut self, state: &JournalState) -> Result<()> {
        self.store.save(&self.user, state)?;
        if self.registry.get(&self.user).is_some() {
            self.registry.refresh_stats(&self.user, state)?;
            self.registry.save(&self.registry_path)?;
        }
        Ok(())
    }

    fn save_registry(&self) -> Result<()> {
        self.registry.save(&self.registry_path)?;
        Ok(())
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("TRADE_JOURNAL_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    let cfg = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("reading config {}", config_path.display()))?;

    let today = Local::now().date_naive();
    let mut journal = Journal::open(cfg, cli.user)?;

    match cli.command {
        Command::Summary => {
            let st = journal.load()?;
            print_json(&compute_summary(&st.trades, &st.settings.policy()))?;
        }
        Command::Series { period, cursor, date } => {
            let st = journal.load()?;
            let view = DrillState::new(period, cursor.unwrap_or(today));
            print_json(&dashboard::compute(&st.trades, &view, date, &st.settings.policy()).series)?;
        }
        Command::Strategies => {
            let st = journal.load()?;
            print_json(&bucket_by_strategy(&st.trades, &st.settings.policy()))?;
        }
        Command::Activity { year } => {
            let st = journal.load()?;
            print_json(&yearly_activity(&st.trades, year.unwrap_or(today.year()), &st.settings.policy()))?;
        }
        Command::Browse { period, cursor } => {
            let st = journal.load()?;
            browse(&st, DrillState::new(period, cursor.unwrap_or(today)))?;
        }
        Command::Log { entry, date } => {
            let Some(signal) = parse_entry(&entry) else {
                bail!("unrecognized entry: {entry}");
            };
            let mut st = journal.load()?;
            let id = st.apply_entry(&signal, date.unwrap_or(today))?;
            journal.commit(&st)?;
            println!("{id}");
        }
        Command::Close { id, date, price, fees } => {
            let mut st = journal.load()?;
            st.close_trade(&id, date, price, fees)?;
            journal.commit(&st)?;
            info!("Closed {}", id);
        }
        Command::Delete { id } => {
            let mut st = journal.load()?;
            let removed = st.delete(&id)?;
            journal.commit(&st)?;
            info!("Deleted {} {}", removed.id, removed.symbol);
        }
        Command::Import { file, append } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let trades = import_trades(&text, Format::from_file_name(name), today)?;
            let mut st = journal.load()?;
            if append {
                for t in trades {
                    st.upsert(t);
                }
            } else {
                st.trades = trades;
            }
            journal.commit(&st)?;
            info!("Journal for {} now holds {} trades", journal.user, st.trades.len());
        }
        Command::Export { file } => {
            let st = journal.load()?;
            let path = file.unwrap_or_else(|| PathBuf::from(default_export_name(today)));
            fs::write(&path, export_json(&st.trades)?)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
        }
        Command::Trades { action } => trades(&mut journal, action)?,
        Command::Users { action } => users(&mut journal, action, today)?,
        Command::Settings { action } => settings(&mut journal, action)?,
    }
    Ok(())
}

fn trades(journal: &mut Journal, action: TradesCmd) -> Result<()> {
    match action {
        TradesCmd::List { month, search } => {
            let st = journal.load()?;
            print_json(&st.filter(&TradeFilter { month, search }))?;
        }
        TradesCmd::Edit {
            id,
            symbol,
            strategy,
            entry_date,
            entry_price,
            exit_date,
            exit_price,
            quantity,
            notes,
            fees,
            reopen,
        } => {
            let mut st = journal.load()?;
            let edit = TradeEdit {
                symbol,
                strategy,
                entry_date,
                entry_price,
                exit_date,
                exit_price,
                quantity,
                notes,
                fees,
                reopen,
            };
            print_json(st.edit(&id, edit)?)?;
            journal.commit(&st)?;
        }
        TradesCmd::Reset { settings } => {
            let mut st = journal.load()?;
            let dropped = st.trades.len();
            st.reset();
            if settings {
                st.settings = journal.cfg.default_settings();
            }
            journal.commit(&st)?;
            info!("Cleared {} trades for {}", dropped, journal.user);
        }
    }
    Ok(())
}

fn settings(journal: &mut Journal, action: SettingsCmd) -> Result<()> {
    let mut st = journal.load()?;
    match action {
        SettingsCmd::Show => print_json(&st.settings)?,
        SettingsCmd::Set { basis, multiplier } => {
            st.update_settings(|s| {
                if let Some(basis) = basis {
                    s.pnl_basis = basis;
                }
                if let Some(m) = multiplier {
                    s.option_multiplier = m;
                }
            })?;
            print_json(&st.settings)?;
            journal.commit(&st)?;
        }
    }
    Ok(())
}

fn users(journal: &mut Journal, action: UsersCmd, today: NaiveDate) -> Result<()> {
    match action {
        UsersCmd::List => print_json(&journal.registry)?,
        UsersCmd::Add { name } => {
            let settings = journal.cfg.default_settings();
            let id = journal.registry.add(&name, today, settings, &journal.store)?.id.clone();
            journal.save_registry()?;
            println!("{id}");
        }
        UsersCmd::Switch { id } => {
            journal.registry.switch(&id)?;
            journal.save_registry()?;
        }
        UsersCmd::Rename { id, name } => {
            journal.registry.rename(&id, &name)?;
            journal.save_registry()?;
        }
        UsersCmd::Remove { id } => {
            journal.registry.remove(&id, &journal.store)?;
            journal.save_registry()?;
        }
    }
    Ok(())
}

/// Line commands: down <key> | up | next | prev | period <p> | date <d> | clear | quit
fn browse(st: &JournalState, mut view: DrillState) -> Result<()> {
    let policy = st.settings.policy();
    let mut selected: Option<NaiveDate> = None;
    print_json(&dashboard::compute(&st.trades, &view, selected, &policy))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next();
        match (cmd, arg) {
            ("", _) => continue,
            ("quit" | "q", _) => break,
            ("down", Some(key)) => {
                if !view.drill_down(key) {
                    warn!("cannot drill into {:?} from {}", key, view.period);
                }
            }
            ("up", _) => {
                view.drill_up();
            }
            ("next", _) => view.navigate(1),
            ("prev", _) => view.navigate(-1),
            ("period", Some(p)) => match p.parse::<Period>() {
                Ok(p) => view.select_period(p),
                Err(e) => warn!("{}", e),
            },
            ("date", Some(d)) => match d.parse::<NaiveDate>() {
                Ok(d) => selected = Some(d),
                Err(e) => warn!("bad date {:?}: {}", d, e),
            },
            ("clear", _) => selected = None,
            _ => {
                warn!("unknown command: {}", line.trim());
                continue;
            }
        }
        print_json(&dashboard::compute(&st.trades, &view, selected, &policy))?;
    }
    Ok(())
}
