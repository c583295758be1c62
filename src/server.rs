use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hyper::Server;
use serde_json::{json, Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::app::scrape_use_case::InjuryScrapeUseCase;
use crate::constants::LEGACY_TEAM;
use crate::error::ScraperError;
use crate::types::{InjurySummary, PlayerSearch, TeamInjuries};

#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<InjuryScrapeUseCase>,
}

/// Maps domain errors onto HTTP status codes with a JSON `detail` body
pub struct ApiError(ScraperError);

impl From<ScraperError> for ApiError {
    fn from(err: ScraperError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScraperError::UnknownTeam { .. } => StatusCode::NOT_FOUND,
            _ => {
                error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "mlb-injury-scraper",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let examples: Vec<&str> = state.scraper.teams().keys().take(5).collect();
    Json(json!({
        "service": "MLB Injury Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "teams": "/api/teams",
            "team_injuries": "/api/teams/{team}/injuries",
            "injury_summary": "/api/teams/{team}/summary",
            "player_search": "/api/teams/{team}/players/{player_name}"
        },
        "example_teams": examples
    }))
}

async fn list_teams(State(state): State<AppState>) -> impl IntoResponse {
    let teams = state.scraper.teams();
    let listing: Map<String, Value> = teams
        .iter()
        .map(|(key, info)| {
            (
                key.to_string(),
                json!({ "name": info.name, "abbreviation": info.abbreviation }),
            )
        })
        .collect();
    Json(json!({ "total_teams": teams.len(), "teams": listing }))
}

async fn team_injuries(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<TeamInjuries>, ApiError> {
    Ok(Json(state.scraper.scrape_team(&team).await?))
}

async fn team_summary(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<InjurySummary>, ApiError> {
    Ok(Json(state.scraper.summary(&team).await?))
}

async fn player_search(
    State(state): State<AppState>,
    Path((team, player_name)): Path<(String, String)>,
) -> Result<Json<PlayerSearch>, ApiError> {
    Ok(Json(state.scraper.search(&team, &player_name).await?))
}

async fn legacy_injuries(State(state): State<AppState>) -> Result<Json<TeamInjuries>, ApiError> {
    Ok(Json(state.scraper.scrape_team(LEGACY_TEAM).await?))
}

/// Create the HTTP server with all routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/teams", get(list_teams))
        .route("/api/teams/:team/injuries", get(team_injuries))
        .route("/api/teams/:team/summary", get(team_summary))
        .route("/api/teams/:team/players/:player_name", get(player_search))
        .route("/api/mets/injuries", get(legacy_injuries))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the given address
pub async fn start_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_server(state);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    info!("Starting MLB injury scraper HTTP server on {}", addr);
    println!("🚀 HTTP server running on http://{addr}");
    println!("💚 Health check: http://{addr}/health");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
