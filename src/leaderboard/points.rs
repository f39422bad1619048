use chrono::NaiveDateTime;
use serde::Serialize;

use super::types::UserStars;

/// A user's accumulated standing across every scoring period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeRecord {
    pub username: String,
    pub total_points: u32,
    pub weeks_participated: u32,
    pub best_finish: u32,
    pub last_updated: NaiveDateTime,
}

/// Points earned by one user for one period's finish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsAward {
    pub username: String,
    /// 1-based
    pub rank: u32,
    pub points: u32,
}

/// Turn the top `top_n` of a ranking into points: 1st gets `top_n`, the last
/// paid place gets 1.
pub fn award_points(ranking: &[UserStars], top_n: usize) -> Vec<PointsAward> {
    ranking
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, user)| PointsAward {
            username: user.username.clone(),
            rank: idx as u32 + 1,
            points: (top_n - idx) as u32,
        })
        .collect()
}

/// Fold an award into the user's record, creating it on first appearance
pub fn accumulate(
    existing: Option<AllTimeRecord>,
    award: &PointsAward,
    now: NaiveDateTime,
) -> AllTimeRecord {
    match existing {
        Some(record) => AllTimeRecord {
            username: record.username,
            total_points: record.total_points + award.points,
            weeks_participated: record.weeks_participated + 1,
            best_finish: record.best_finish.min(award.rank),
            last_updated: now,
        },
        None => AllTimeRecord {
            username: award.username.clone(),
            total_points: award.points,
            weeks_participated: 1,
            best_finish: award.rank,
            last_updated: now,
        },
    }
}
