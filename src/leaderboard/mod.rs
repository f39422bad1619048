pub mod period;
pub mod points;
pub mod scorer;
pub mod stars;
pub mod types;

pub use period::{current_period_key, period_key};
pub use points::{accumulate, award_points, AllTimeRecord, PointsAward};
pub use scorer::{build_standings, filter_recent, score};
pub use types::{LeaderboardRow, ScoringMode, Standings, UserStars};
