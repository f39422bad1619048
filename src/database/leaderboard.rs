use anyhow::{Context, Result};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{LeaderboardEntry, NewLeaderboardEntry};
use crate::leaderboard::ScoringMode;

/// Remove every row already stored for `period_key`, both modes
pub fn delete_period(conn: &mut DbConn, period_key: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM leaderboard_entries WHERE period_key = ?1",
        params![period_key],
    )
    .with_context(|| format!("Failed to clear leaderboard rows for period {}", period_key))
}

/// Insert in chunks of `batch_size`, one transaction per chunk. A failing
/// chunk stops the run; chunks already committed stay written.
pub fn insert_entries(
    conn: &mut DbConn,
    entries: &[NewLeaderboardEntry],
    batch_size: usize,
) -> Result<usize> {
    let sql = "INSERT INTO leaderboard_entries (period_key, mode, rank, username, stars) VALUES (?1, ?2, ?3, ?4, ?5)";
    let mut inserted = 0;

    for (idx, chunk) in entries.chunks(batch_size.max(1)).enumerate() {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(sql)?;
            for entry in chunk {
                stmt.execute(params![
                    entry.period_key,
                    entry.mode.as_str(),
                    entry.rank,
                    entry.username,
                    entry.stars
                ])
                .with_context(|| format!("Failed to insert leaderboard batch {}", idx + 1))?;
            }
        }
        tx.commit()
            .with_context(|| format!("Failed to commit leaderboard batch {}", idx + 1))?;

        inserted += chunk.len();
        debug!("Inserted leaderboard batch {} ({} rows)", idx + 1, chunk.len());
    }

    Ok(inserted)
}

pub fn list_period(
    conn: &mut DbConn,
    period_key: &str,
    mode: ScoringMode,
) -> Result<Vec<LeaderboardEntry>> {
    let sql = "SELECT id, period_key, mode, rank, username, stars, created_at FROM leaderboard_entries WHERE period_key = ?1 AND mode = ?2 ORDER BY rank ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![period_key, mode.as_str()], parse_entry_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list leaderboard rows")?;

    Ok(rows)
}

pub fn latest_period(conn: &mut DbConn) -> Result<Option<String>> {
    conn.query_row(
        "SELECT period_key FROM leaderboard_entries ORDER BY period_key DESC LIMIT 1",
        [],
        |row| row.get(0),
    )
    .optional()
    .context("Failed to query latest leaderboard period")
}

fn parse_entry_row(row: &rusqlite::Row) -> rusqlite::Result<LeaderboardEntry> {
    let mode: String = row.get(2)?;
    let mode = mode.parse::<ScoringMode>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
    })?;

    Ok(LeaderboardEntry {
        id: row.get(0)?,
        period_key: row.get(1)?,
        mode,
        rank: row.get(3)?,
        username: row.get(4)?,
        stars: row.get(5)?,
        created_at: row.get(6)?,
    })
}
