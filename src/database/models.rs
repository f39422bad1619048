use chrono::NaiveDateTime;
use serde::Serialize;

use crate::leaderboard::ScoringMode;
use crate::stats::{BattingStats, PitchingStats};

/// A tournament with its rosters and the fingerprints of every file merged into it
#[derive(Debug, Clone)]
pub struct TournamentRecord {
    pub id: i64,
    pub name: String,
    pub batting: Vec<BattingStats>,
    pub pitching: Vec<PitchingStats>,
    pub file_hashes: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TournamentRecord {
    pub fn has_fingerprint(&self, fingerprint: &str) -> bool {
        self.file_hashes.iter().any(|hash| hash == fingerprint)
    }
}

// Listing DTO; rosters stay in the database
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub id: i64,
    pub name: String,
    pub batting_count: i64,
    pub pitching_count: i64,
    pub upload_count: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: i64,
    pub period_key: String,
    pub mode: ScoringMode,
    pub rank: u32,
    pub username: String,
    pub stars: u32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaderboardEntry {
    pub period_key: String,
    pub mode: ScoringMode,
    pub rank: u32,
    pub username: String,
    pub stars: u32,
}
