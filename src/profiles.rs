//! Local user profiles. Each profile names an isolated journal in the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::info;

use crate::error::{JournalError, Result};
use crate::state::{JournalState, Settings, StateStore};
use crate::summary::compute_summary;
use crate::types::Trade;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub joined: NaiveDate,
    #[serde(default)]
    pub total_trades: usize,
    #[serde(default)]
    pub total_pnl: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileRegistry {
    pub users: Vec<Profile>,
    pub current: Option<String>,
}

/// "Sarah Johnson" -> "sarah-johnson"
pub fn profile_id(name: &str) -> String {
    let mut id = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c.to_ascii_lowercase());
        } else if !id.ends_with('-') {
            id.push('-');
        }
    }
    id.trim_matches('-').to_string()
}

impl ProfileRegistry {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path)?;
        serde_json::from_str(&s).map_err(|e| JournalError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Current profile id, falling back to `default_user` when none is chosen.
    pub fn current_id<'a>(&'a self, default_user: &'a str) -> &'a str {
        self.current.as_deref().unwrap_or(default_user)
    }

    /// Register a profile and give it an empty journal seeded with `settings`.
    pub fn add(
        &mut self,
        name: &str,
        joined: NaiveDate,
        settings: Settings,
        store: &dyn StateStore,
    ) -> Result<&Profile> {
        let id = profile_id(name);
        if id.is_empty() {
            return Err(JournalError::Parse(format!("unusable profile name {name:?}")));
        }
        if self.get(&id).is_some() {
            return Err(JournalError::DuplicateUser(id));
        }
        store.save(&id, &JournalState::with_settings(settings))?;
        info!("Added profile {} ({})", id, name.trim());
        self.users.push(Profile {
            id,
            name: name.trim().to_string(),
            joined,
            total_trades: 0,
            total_pnl: 0.0,
        });
        if self.current.is_none() {
            self.current = self.users.last().map(|u| u.id.clone());
        }
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn switch(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(JournalError::UnknownUser(id.to_string()));
        }
        self.current = Some(id.to_string());
        info!("Switched to profile {}", id);
        Ok(())
    }

    /// Rename a profile. The id, and with it the journal, stays the same.
    pub fn rename(&mut self, id: &str, name: &str) -> Result<&Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(JournalError::Parse("profile name must not be empty".into()));
        }
        let profile = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| JournalError::UnknownUser(id.to_string()))?;
        info!("Renamed profile {}: {} -> {}", id, profile.name, name);
        profile.name = name.to_string();
        Ok(profile)
    }

    /// Unregister a profile and delete its journal. The last profile stays.
    pub fn remove(&mut self, id: &str, store: &dyn StateStore) -> Result<Profile> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| JournalError::UnknownUser(id.to_string()))?;
        if self.users.len() <= 1 {
            return Err(JournalError::LastUser(id.to_string()));
        }
        store.remove(id)?;
        let removed = self.users.remove(idx);
        info!("Removed profile {} ({})", removed.id, removed.name);
        if self.current.as_deref() == Some(id) {
            self.current = self.users.first().map(|u| u.id.clone());
        }
        Ok(removed)
    }

    /// Refresh cached totals shown in the profile list.
    pub fn refresh_stats(&mut self, id: &str, state: &JournalState) -> Result<()> {
        let profile = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| JournalError::UnknownUser(id.to_string()))?;
        let trades: &[Trade] = &state.trades;
        profile.total_trades = trades.len();
        profile.total_pnl = compute_summary(trades, &state.settings.policy()).total_pnl;
        Ok(())
    }
}
