use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use mlb_injury_scraper::app::scrape_use_case::InjuryScrapeUseCase;
use mlb_injury_scraper::config::Config;
use mlb_injury_scraper::infra::http_client::ReqwestHttp;
use mlb_injury_scraper::logging;
use mlb_injury_scraper::parser::{InjuryReportParser, TracingReporter};
use mlb_injury_scraper::server::{self, AppState};
use mlb_injury_scraper::teams::TeamRegistry;
use mlb_injury_scraper::types::InjuredPlayer;

#[derive(Parser)]
#[command(name = "mlb_injury_scraper")]
#[command(about = "MLB.com team injury report scraper")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and parse one team's injury report
    Scrape {
        /// Team key, e.g. mets or red_sox
        team: String,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Injury counts grouped by injury description
    Summary { team: String },
    /// Look up a player on a team's report
    Search { team: String, player: String },
    /// List supported teams
    Teams,
    /// Parse a saved report page from disk
    Parse {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

fn load_teams(config: &Config) -> Result<TeamRegistry> {
    let teams = match &config.teams_file {
        Some(path) => TeamRegistry::from_file(path)?,
        None => TeamRegistry::builtin()?,
    };
    Ok(teams)
}

fn build_use_case(config: &Config) -> Result<InjuryScrapeUseCase> {
    let fetcher = ReqwestHttp::new(&config.http).context("building HTTP client")?;
    Ok(InjuryScrapeUseCase::new(
        Arc::new(fetcher),
        Arc::new(load_teams(config)?),
        config.http.base_url.clone(),
        Arc::new(TracingReporter),
    ))
}

fn print_players(players: &[InjuredPlayer]) {
    for player in players {
        println!("   {} {} - {}", player.position, player.name, player.injury);
        if let Some(il_date) = &player.il_date {
            println!("      IL date: {il_date}");
        }
        if let Some(ret) = &player.expected_return {
            println!("      Expected return: {ret}");
        }
        if let Some(status) = &player.status {
            println!("      Status: {status}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Scrape { team, json } => {
            let report = build_use_case(&config)?.scrape_team(&team).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "\n🏥 {} ({}): {} injured",
                    report.team_name, report.abbreviation, report.total_injured
                );
                print_players(&report.players);
            }
        }
        Commands::Summary { team } => {
            let summary = build_use_case(&config)?.summary(&team).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Search { team, player } => {
            let result = build_use_case(&config)?.search(&team, &player).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Teams => {
            let teams = load_teams(&config)?;
            println!("📋 {} supported teams:", teams.len());
            for (key, info) in teams.iter() {
                println!("   {key:<14} {} ({})", info.name, info.abbreviation);
            }
        }
        Commands::Parse { file, json } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let players = InjuryReportParser::default().parse(&bytes);
            if players.is_empty() {
                warn!("No injury entries found in {}", file.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&players)?);
            } else {
                println!("\n🏥 {} entries in {}", players.len(), file.display());
                print_players(&players);
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState {
                scraper: Arc::new(build_use_case(&config)?),
            };
            info!("Serving {} teams", state.scraper.teams().len());
            server::start_server(state, &host, port)
                .await
                .map_err(|e| anyhow!("HTTP server failed: {e}"))?;
        }
    }
    Ok(())
}
