use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One player's entry from a team injury report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuredPlayer {
    pub name: String,
    pub position: String,
    pub injury: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub il_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Display metadata for a club from the team table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub abbreviation: String,
    /// Page slug used in the MLB.com injury report URL
    pub slug: String,
}

/// Result of scraping one team's report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInjuries {
    pub team: String,
    pub team_name: String,
    pub abbreviation: String,
    pub total_injured: usize,
    pub players: Vec<InjuredPlayer>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjurySummary {
    pub team: String,
    pub total_injured_players: usize,
    pub injury_type_breakdown: BTreeMap<String, usize>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSearch {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<InjuredPlayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TeamInjuries {
    pub fn summary(&self) -> InjurySummary {
        let mut injury_type_breakdown = BTreeMap::new();
        for player in &self.players {
            *injury_type_breakdown.entry(player.injury.clone()).or_insert(0) += 1;
        }

        InjurySummary {
            team: self.team.clone(),
            total_injured_players: self.players.len(),
            injury_type_breakdown,
            last_updated: self.fetched_at,
        }
    }

    /// Case-insensitive substring search on player name; first match wins.
    pub fn find_player(&self, query: &str) -> PlayerSearch {
        let needle = query.trim().to_lowercase();
        let hit = (!needle.is_empty())
            .then(|| {
                self.players
                    .iter()
                    .find(|p| p.name.to_lowercase().contains(&needle))
            })
            .flatten();

        match hit {
            Some(player) => PlayerSearch {
                found: true,
                player: Some(player.clone()),
                message: None,
            },
            None => PlayerSearch {
                found: false,
                player: None,
                message: Some(format!(
                    "No injury information found for player: {} on team: {}",
                    query, self.team
                )),
            },
        }
    }
}
