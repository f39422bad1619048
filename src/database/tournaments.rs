use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;

use super::connection::DbConn;
use super::models::{TournamentRecord, TournamentSummary};
use crate::stats::{BattingStats, PitchingStats};

const SELECT_TOURNAMENT: &str =
    "SELECT id, name, batting, pitching, file_hashes, created_at, updated_at FROM tournaments";

pub fn insert_tournament(conn: &mut DbConn, name: &str) -> Result<TournamentRecord> {
    let sql = "INSERT INTO tournaments (name) VALUES (?1) RETURNING id, name, batting, pitching, file_hashes, created_at, updated_at";

    conn.query_row(sql, params![name.trim()], parse_tournament_row)
        .context("Failed to insert tournament")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<TournamentRecord>> {
    let sql = format!("{} WHERE id = ?1", SELECT_TOURNAMENT);

    conn.query_row(&sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

/// Newest first, with roster sizes counted in SQL
pub fn list_summaries(conn: &mut DbConn) -> Result<Vec<TournamentSummary>> {
    let sql = "SELECT id, name, json_array_length(batting), json_array_length(pitching), json_array_length(file_hashes), created_at FROM tournaments ORDER BY created_at DESC, id DESC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_summary_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list tournaments")?;

    Ok(rows)
}

/// Replace both rosters and the fingerprint set in one statement
pub fn save_rosters(
    conn: &mut DbConn,
    id: i64,
    batting: &[BattingStats],
    pitching: &[PitchingStats],
    file_hashes: &[String],
) -> Result<()> {
    let sql = "UPDATE tournaments SET batting = ?1, pitching = ?2, file_hashes = ?3, updated_at = ?4 WHERE id = ?5";

    let updated = conn
        .execute(
            sql,
            params![
                serde_json::to_string(batting)?,
                serde_json::to_string(pitching)?,
                serde_json::to_string(file_hashes)?,
                Utc::now().naive_utc(),
                id
            ],
        )
        .with_context(|| format!("Failed to save rosters for tournament {}", id))?;

    if updated == 0 {
        anyhow::bail!("Tournament {} no longer exists", id);
    }
    Ok(())
}

/// Returns whether a row was removed
pub fn delete_tournament(conn: &mut DbConn, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM tournaments WHERE id = ?1", params![id])
        .with_context(|| format!("Failed to delete tournament {}", id))?;
    Ok(deleted > 0)
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentRecord> {
    Ok(TournamentRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        batting: json_column(row, 2)?,
        pitching: json_column(row, 3)?,
        file_hashes: json_column(row, 4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn parse_summary_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentSummary> {
    Ok(TournamentSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        batting_count: row.get(2)?,
        pitching_count: row.get(3)?,
        upload_count: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn json_column<T: DeserializeOwned>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
