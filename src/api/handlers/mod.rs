use axum::http::HeaderMap;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;

use crate::config::settings::AppConfig;
use crate::errors::AuthError;
use crate::session::Session;

pub mod cron;
pub mod leaderboard;
pub mod tournaments;

pub const PASSWORD_HEADER: &str = "x-upload-password";

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct TableParams {
    pub kind: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub filter: Option<String>,
    pub pos: Option<String>,
}

#[derive(Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
}

#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub period: Option<String>,
    pub mode: Option<String>,
}

#[derive(Deserialize)]
pub struct CronParams {
    pub dry_run: Option<bool>,
}

/// Anonymous unless the password header is present, in which case it must match
pub fn session_from_headers(headers: &HeaderMap, config: &AppConfig) -> Result<Session, AuthError> {
    match headers.get(PASSWORD_HEADER).and_then(|h| h.to_str().ok()) {
        Some(password) => Session::authenticate(Some(password), &config.upload),
        None => Ok(Session::anonymous()),
    }
}
