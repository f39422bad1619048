use anyhow::{Context, Result};
use log::info;

use super::connection::DbConn;

const SCHEMA_SQL: &str = include_str!("schema.sql");
const TABLES: [&str; 3] = ["tournaments", "leaderboard_entries", "all_time_points"];

/// Create any missing tables; existing data is left alone
pub fn ensure_schema(conn: &mut DbConn) -> Result<()> {
    for (idx, statement) in split_sql_statements(SCHEMA_SQL).iter().enumerate() {
        conn.execute(statement, [])
            .with_context(|| format!("Failed to execute schema statement {}", idx + 1))?;
    }
    Ok(())
}

/// Drop every table and recreate the schema from scratch
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    for table in TABLES {
        conn.execute(&format!("DROP TABLE IF EXISTS {}", table), [])
            .with_context(|| format!("Failed to drop table {}", table))?;
    }
    ensure_schema(conn)?;

    info!("Database schema reset successfully");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
