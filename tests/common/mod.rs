use std::fs;
use std::path::PathBuf;

use ootp_tournament_stats::database::{self, DbPool};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Fresh in-memory database with the schema applied
pub fn memory_pool() -> DbPool {
    let pool = database::create_memory_pool().expect("in-memory pool");
    let mut conn = database::get_connection(&pool).expect("connection");
    database::setup::ensure_schema(&mut conn).expect("schema");
    pool
}
