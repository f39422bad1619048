use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, LeaderboardParams};
use crate::api::models::{AllTimeRow, LeaderboardResponse};
use crate::database;
use crate::leaderboard::ScoringMode;

/// Stored rows for one period and mode; defaults to the latest period and daily
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    let mode = match params.mode.as_deref().map(str::parse::<ScoringMode>).transpose() {
        Ok(mode) => mode.unwrap_or(ScoringMode::Daily),
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let period_key = match params.period {
        Some(period) => Some(period),
        None => match database::leaderboard::latest_period(&mut conn) {
            Ok(period) => period,
            Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
        },
    };

    let entries = match period_key.as_deref() {
        Some(period) => match database::leaderboard::list_period(&mut conn, period, mode) {
            Ok(entries) => entries,
            Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
        },
        None => Vec::new(),
    };

    Json(LeaderboardResponse {
        period_key,
        mode,
        entries,
    })
    .into_response()
}

pub async fn get_all_time(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::all_time::list_all(&mut conn) {
        Ok(records) => {
            let rows: Vec<AllTimeRow> = records
                .into_iter()
                .enumerate()
                .map(|(i, record)| AllTimeRow { rank: i + 1, record })
                .collect();
            Json(rows).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
