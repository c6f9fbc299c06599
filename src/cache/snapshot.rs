use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::normalize::{normalize_events, normalize_players, normalize_teams};
use crate::domain::raw::{RawEvent, RawPlayer, RawTeam};
use crate::domain::{EventRecord, PlayerRecord, TeamRecord};
use crate::errors::{load_context, parse_context};

pub const PLAYERS_KEY: &str = "players";
pub const TEAMS_KEY: &str = "teams";
pub const EVENTS_KEY: &str = "events";

/// Normalized records from one read of the data directory
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub players: Vec<PlayerRecord>,
    pub teams: Vec<TeamRecord>,
    pub events: Vec<EventRecord>,
    pub loaded_at: DateTime<Utc>,
}

/// File-based store of raw record arrays, one JSON file per entity
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read and normalize every entity file. A missing file is an empty collection.
    pub fn load(&self, loaded_at: DateTime<Utc>) -> Result<Snapshot> {
        let players: Vec<RawPlayer> = self.load_records(PLAYERS_KEY)?.unwrap_or_default();
        let teams: Vec<RawTeam> = self.load_records(TEAMS_KEY)?.unwrap_or_default();
        let events: Vec<RawEvent> = self.load_records(EVENTS_KEY)?.unwrap_or_default();

        let snapshot = Snapshot {
            players: normalize_players(players),
            teams: normalize_teams(teams),
            events: normalize_events(events),
            loaded_at,
        };

        info!(
            "Loaded snapshot from {}: {} players, {} teams, {} events",
            self.data_dir.display(),
            snapshot.players.len(),
            snapshot.teams.len(),
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    /// Load one entity file as raw records.
    ///
    /// The file must hold a JSON array; array elements that do not fit the
    /// record shape are skipped with a warning instead of failing the file.
    pub fn load_records<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        let Some(items) = self.load_raw(key)? else {
            return Ok(None);
        };

        let Value::Array(items) = items else {
            anyhow::bail!("{}: expected a JSON array of records", self.build_path(key).display());
        };

        let total = items.len();
        let records: Vec<T> = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping {} record #{}: {}", key, i, e);
                    None
                }
            })
            .collect();

        if records.len() < total {
            warn!("Kept {} of {} {} records", records.len(), total, key);
        }
        Ok(Some(records))
    }

    /// Load a raw JSON document, `None` when the file does not exist
    pub fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        let path = self.build_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).with_context(|| load_context(&path))?;
        let data = serde_json::from_str(&json).with_context(|| parse_context(&path.display().to_string()))?;
        Ok(Some(data))
    }

    /// Write a raw JSON document, creating the data directory when needed
    pub fn save_raw<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;

        let path = self.build_path(key);
        let json = serde_json::to_string_pretty(data).context("Failed to serialize snapshot data")?;
        fs::write(&path, json).with_context(|| format!("Failed to write snapshot file: {}", path.display()))?;

        info!("Saved snapshot file: {}", path.display());
        Ok(())
    }

    pub fn exists(&self, key: &str) -> bool {
        self.build_path(key).exists()
    }

    fn build_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}
