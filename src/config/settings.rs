use std::env;

use anyhow::Context;

use super::leaderboard::excluded_daily_titles;
use crate::leaderboard::ScoringMode;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub database_path: String,
    pub environment: String,
    /// Bearer token accepted by the scheduled leaderboard trigger
    pub cron_secret: Option<String>,
}

impl ServerSettings {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database_path: "ootp_tournament_stats.db".to_string(),
            environment: "development".to_string(),
            cron_secret: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_upload_bytes: usize,
    /// Shared password gating every mutating operation
    pub password: Option<String>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: 1024 * 1024, // 1 MiB
            password: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardSettings {
    /// Rows starting before this epoch second are ignored
    pub recency_cutoff: i64,
    pub daily_keep: usize,
    pub weekly_keep: usize,
    /// Daily titles that never earn stars
    pub excluded_titles: Vec<String>,
    pub all_time_top_n: usize,
    /// Which mode's ranking feeds the all-time table
    pub all_time_mode: ScoringMode,
    pub batch_size: usize,
}

impl LeaderboardSettings {
    /// How many of the most recent occurrences of a title are scored
    pub fn keep_for(&self, mode: ScoringMode) -> usize {
        match mode {
            ScoringMode::Daily => self.daily_keep,
            ScoringMode::Weekly => self.weekly_keep,
        }
    }

    pub fn is_excluded(&self, title: &str) -> bool {
        self.excluded_titles.iter().any(|t| t == title)
    }
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            recency_cutoff: 1_735_689_600, // 2025-01-01T00:00:00Z
            daily_keep: 7,
            weekly_keep: 1,
            excluded_titles: excluded_daily_titles(),
            all_time_top_n: 20,
            all_time_mode: ScoringMode::Daily,
            batch_size: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Listing page that links to the tournament dump
    pub source_url: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            source_url: None,
            user_agent: "OotpTournamentStats/1.0".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub upload: UploadSettings,
    pub leaderboard: LeaderboardSettings,
    pub feed: FeedSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by whatever the environment provides
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();

        if let Some(path) = non_empty_var("DATABASE_PATH") {
            config.server.database_path = path;
        }
        if let Some(environment) = non_empty_var("APP_ENV") {
            config.server.environment = environment;
        }
        config.server.cron_secret = non_empty_var("CRON_SECRET");
        config.upload.password = non_empty_var("UPLOAD_PASSWORD");
        config.feed.source_url = non_empty_var("LEADERBOARD_SOURCE_URL");

        if let Some(cutoff) = non_empty_var("LEADERBOARD_CUTOFF") {
            config.leaderboard.recency_cutoff = cutoff
                .parse()
                .with_context(|| format!("LEADERBOARD_CUTOFF is not an epoch second: {}", cutoff))?;
        }
        if let Some(mode) = non_empty_var("ALL_TIME_MODE") {
            config.leaderboard.all_time_mode = mode.parse().map_err(anyhow::Error::msg)?;
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_job_constants() {
        let config = AppConfig::default();
        assert_eq!(config.upload.max_upload_bytes, 1_048_576);
        assert_eq!(config.leaderboard.keep_for(ScoringMode::Daily), 7);
        assert_eq!(config.leaderboard.keep_for(ScoringMode::Weekly), 1);
        assert_eq!(config.leaderboard.all_time_top_n, 20);
        assert_eq!(config.leaderboard.batch_size, 100);
        assert!(!config.server.is_production());
    }

    #[test]
    fn exclusion_is_exact_title_match() {
        let settings = LeaderboardSettings {
            excluded_titles: vec!["Daily Practice".to_string()],
            ..LeaderboardSettings::default()
        };
        assert!(settings.is_excluded("Daily Practice"));
        assert!(!settings.is_excluded("daily practice"));
        assert!(!settings.is_excluded("Daily Practice 2"));
    }

    #[test]
    fn production_check_ignores_case() {
        let server = ServerSettings {
            environment: "Production".to_string(),
            ..ServerSettings::default()
        };
        assert!(server.is_production());
    }
}
