use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parsing::RawRow;

/// Which family of tournaments, and which star table, a run scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    Daily,
    Weekly,
}

impl ScoringMode {
    pub const ALL: [ScoringMode; 2] = [ScoringMode::Daily, ScoringMode::Weekly];

    /// Titles containing "daily" (any case) are daily; everything else is weekly
    pub fn classify(title: &str) -> Self {
        if title.to_lowercase().contains("daily") {
            ScoringMode::Daily
        } else {
            ScoringMode::Weekly
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Daily => "daily",
            ScoringMode::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(ScoringMode::Daily),
            "weekly" => Ok(ScoringMode::Weekly),
            other => Err(format!("Unknown scoring mode: {}", other)),
        }
    }
}

/// One tournament occurrence from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub title: String,
    pub num: i64,
    pub starttime: i64,
    /// Usernames, winner first
    pub placements: Vec<String>,
}

impl LeaderboardRow {
    /// Rows without a title cannot be grouped and are dropped
    pub fn from_raw(row: &RawRow) -> Option<Self> {
        let title = row.text("title")?;

        Some(Self {
            title,
            num: whole_number(row, "num"),
            starttime: whole_number(row, "starttime"),
            placements: row.placements().to_vec(),
        })
    }
}

fn whole_number(row: &RawRow, header: &str) -> i64 {
    row.number(header)
        .or_else(|| row.text(header).and_then(|t| t.parse::<f64>().ok()))
        .filter(|v| v.is_finite())
        .map_or(0, |v| v.trunc() as i64)
}

/// A user's star total for one scoring run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStars {
    pub username: String,
    pub stars: u32,
}

/// Both independent rankings of a run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Standings {
    pub daily: Vec<UserStars>,
    pub weekly: Vec<UserStars>,
}

impl Standings {
    pub fn for_mode(&self, mode: ScoringMode) -> &[UserStars] {
        match mode {
            ScoringMode::Daily => &self.daily,
            ScoringMode::Weekly => &self.weekly,
        }
    }
}
