use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    cron::run_leaderboard,
    leaderboard::{get_all_time, get_leaderboard},
    tournaments::{create_tournament, delete_tournament, get_tournament, list_tournaments, upload_stats},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tournaments", get(list_tournaments).post(create_tournament))
        .route("/api/tournaments/:id", get(get_tournament).delete(delete_tournament))
        .route("/api/tournaments/:id/uploads", post(upload_stats))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/leaderboard/all-time", get(get_all_time))
        .route("/api/cron/leaderboard", get(run_leaderboard))
        .with_state(state)
}
