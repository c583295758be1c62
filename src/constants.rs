//! Defaults shared by config, the fetcher and the CLI

pub const DEFAULT_BASE_URL: &str = "https://www.mlb.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8000;

pub const CONFIG_PATH: &str = "config.toml";

/// Team served by the legacy `/api/mets/injuries` route
pub const LEGACY_TEAM: &str = "mets";

/// Build the injury report URL for a team page slug
pub fn injury_report_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}/news/{}-injuries-and-roster-moves",
        base_url.trim_end_matches('/'),
        slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injury_report_url() {
        assert_eq!(
            injury_report_url("https://www.mlb.com/", "red-sox"),
            "https://www.mlb.com/news/red-sox-injuries-and-roster-moves"
        );
    }
}
