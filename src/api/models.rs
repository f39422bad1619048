use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::database::LeaderboardEntry;
use crate::leaderboard::{AllTimeRecord, ScoringMode};
use crate::stats::{BattingStats, PitchingStats};

#[derive(Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetail {
    pub id: i64,
    pub name: String,
    pub upload_count: usize,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batting: Option<Vec<BattingStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitching: Option<Vec<PitchingStats>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub period_key: Option<String>,
    pub mode: ScoringMode,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeRow {
    pub rank: usize,
    #[serde(flatten)]
    pub record: AllTimeRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            category: None,
        }
    }

    pub fn with_category(error: impl ToString, category: &'static str) -> Self {
        Self {
            category: Some(category),
            ..Self::new(error)
        }
    }
}
