use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::injury_report_url;
use crate::error::{Result, ScraperError};
use crate::types::TeamInfo;

const BUILTIN_TEAMS: &str = include_str!("../teams.toml");

#[derive(Debug, Deserialize)]
struct TeamTable {
    teams: BTreeMap<String, TeamInfo>,
}

/// Team key to display metadata lookup.
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: BTreeMap<String, TeamInfo>,
}

impl TeamRegistry {
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_TEAMS)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScraperError::read(path, e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let table: TeamTable = toml::from_str(content)?;
        if table.teams.is_empty() {
            return Err(ScraperError::Config("team table is empty".to_string()));
        }
        let teams = table
            .teams
            .into_iter()
            .map(|(key, info)| (key.to_lowercase(), info))
            .collect();
        Ok(Self { teams })
    }

    /// Case-insensitive lookup
    pub fn get(&self, key: &str) -> Option<&TeamInfo> {
        self.teams.get(&key.trim().to_lowercase())
    }

    /// Like [`get`](Self::get) but unknown keys become `UnknownTeam`
    pub fn require(&self, key: &str) -> Result<(&str, &TeamInfo)> {
        let normalized = key.trim().to_lowercase();
        self.teams
            .get_key_value(&normalized)
            .map(|(k, info)| (k.as_str(), info))
            .ok_or_else(|| ScraperError::UnknownTeam {
                team: key.to_string(),
                available: self.keys().map(str::to_string).collect(),
            })
    }

    /// Sorted team keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TeamInfo)> {
        self.teams.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn injury_url(&self, base_url: &str, key: &str) -> Result<String> {
        let (_, info) = self.require(key)?;
        Ok(injury_report_url(base_url, &info.slug))
    }
}
