pub mod all_time;
pub mod connection;
pub mod leaderboard;
pub mod models;
pub mod setup;
pub mod tournaments;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
