pub mod leaderboard;
pub mod settings;

pub use settings::{AppConfig, FeedSettings, LeaderboardSettings, ServerSettings, UploadSettings};
