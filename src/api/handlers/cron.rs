use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use log::{error, info, warn};
use std::sync::Arc;

use super::{AppState, CronParams};
use crate::api::models::ErrorResponse;
use crate::config::ServerSettings;
use crate::services::LeaderboardService;

pub const SCHEDULER_HEADER: &str = "x-vercel-cron";

/// How a trigger request is allowed to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAccess {
    Full,
    /// Unauthenticated outside production: compute but never write
    DryRunOnly,
    Denied,
}

pub fn trigger_access(headers: &HeaderMap, server: &ServerSettings) -> TriggerAccess {
    let from_scheduler = headers.contains_key(SCHEDULER_HEADER);
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));
    let has_secret = matches!(
        (bearer, server.cron_secret.as_deref()),
        (Some(given), Some(secret)) if given.trim() == secret
    );

    if from_scheduler || has_secret {
        TriggerAccess::Full
    } else if server.is_production() {
        TriggerAccess::Denied
    } else {
        TriggerAccess::DryRunOnly
    }
}

/// Runs the leaderboard job to completion and reports its summary
pub async fn run_leaderboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<CronParams>,
) -> impl IntoResponse {
    let dry_run = match trigger_access(&headers, &state.config.server) {
        TriggerAccess::Full => params.dry_run.unwrap_or(false),
        TriggerAccess::DryRunOnly => {
            info!("Unauthenticated leaderboard trigger outside production; running dry");
            true
        }
        TriggerAccess::Denied => {
            warn!("Rejected unauthenticated leaderboard trigger");
            return (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new("Unauthorized"))).into_response();
        }
    };

    let service = LeaderboardService::new(state.pool.clone(), state.config.clone());
    match service.run(dry_run).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => {
            error!("Leaderboard update failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("{:#}", e))),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn server(environment: &str, secret: Option<&str>) -> ServerSettings {
        ServerSettings {
            environment: environment.to_string(),
            cron_secret: secret.map(str::to_string),
            ..ServerSettings::default()
        }
    }

    #[test]
    fn scheduler_header_grants_full_access() {
        let mut headers = HeaderMap::new();
        headers.insert(SCHEDULER_HEADER, HeaderValue::from_static("1"));
        assert_eq!(trigger_access(&headers, &server("production", None)), TriggerAccess::Full);
    }

    #[test]
    fn bearer_secret_must_match() {
        let settings = server("production", Some("s3cret"));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert_eq!(trigger_access(&headers, &settings), TriggerAccess::Full);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert_eq!(trigger_access(&headers, &settings), TriggerAccess::Denied);
    }

    #[test]
    fn no_secret_configured_never_matches() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(trigger_access(&headers, &server("production", None)), TriggerAccess::Denied);
    }

    #[test]
    fn unauthenticated_outside_production_is_dry_run() {
        assert_eq!(
            trigger_access(&HeaderMap::new(), &server("development", Some("s3cret"))),
            TriggerAccess::DryRunOnly
        );
    }
}
