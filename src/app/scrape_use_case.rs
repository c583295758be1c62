use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::app::ports::PageFetchPort;
use crate::constants::injury_report_url;
use crate::error::Result;
use crate::parser::{InjuryReportParser, Reporter};
use crate::teams::TeamRegistry;
use crate::types::{InjurySummary, PlayerSearch, TeamInjuries};

/// Use case for turning a team key into its current injury list
pub struct InjuryScrapeUseCase {
    fetcher: Arc<dyn PageFetchPort>,
    teams: Arc<TeamRegistry>,
    base_url: String,
    parser: InjuryReportParser,
}

impl InjuryScrapeUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetchPort>,
        teams: Arc<TeamRegistry>,
        base_url: impl Into<String>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            fetcher,
            teams,
            base_url: base_url.into(),
            parser: InjuryReportParser::new(reporter),
        }
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    /// Unknown teams are an error. A failed fetch is not: it is logged and
    /// treated as a page with no entries.
    #[instrument(skip(self))]
    pub async fn scrape_team(&self, team: &str) -> Result<TeamInjuries> {
        let (key, info) = self.teams.require(team)?;
        let url = injury_report_url(&self.base_url, &info.slug);
        debug!("Fetching injury report from {}", url);

        let players = match self.fetcher.fetch(&url).await {
            Ok(page) => self.parser.parse(&page.body),
            Err(e) => {
                error!("Error fetching injury data for {}: {}", key, e);
                Vec::new()
            }
        };

        Ok(TeamInjuries {
            team: key.to_string(),
            team_name: info.name.clone(),
            abbreviation: info.abbreviation.clone(),
            total_injured: players.len(),
            players,
            fetched_at: Utc::now(),
        })
    }

    pub async fn summary(&self, team: &str) -> Result<InjurySummary> {
        Ok(self.scrape_team(team).await?.summary())
    }

    pub async fn search(&self, team: &str, player_name: &str) -> Result<PlayerSearch> {
        Ok(self.scrape_team(team).await?.find_player(player_name))
    }
}
