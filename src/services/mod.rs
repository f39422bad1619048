pub mod leaderboard;
pub mod server;
pub mod uploads;

pub use leaderboard::{LeaderboardService, LeaderboardSummary};
pub use server::ServerService;
pub use uploads::{UploadReport, UploadService};
