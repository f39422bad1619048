use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DbConn;
use crate::leaderboard::{accumulate, AllTimeRecord, PointsAward};

const SELECT_RECORD: &str =
    "SELECT username, total_points, weeks_participated, best_finish, last_updated FROM all_time_points";

pub fn find_by_username(conn: &mut DbConn, username: &str) -> Result<Option<AllTimeRecord>> {
    find_record(conn, username)
}

/// Highest total first
pub fn list_all(conn: &mut DbConn) -> Result<Vec<AllTimeRecord>> {
    let sql = format!(
        "{} ORDER BY total_points DESC, best_finish ASC, username ASC",
        SELECT_RECORD
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_record_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list all-time points")?;

    Ok(rows)
}

/// Read, accumulate and write every award inside a single transaction.
///
/// Running this twice for the same period awards the points twice; nothing
/// records which period a record was last credited for.
pub fn apply_awards(
    conn: &mut DbConn,
    awards: &[PointsAward],
    now: NaiveDateTime,
) -> Result<Vec<AllTimeRecord>> {
    let tx = conn
        .transaction()
        .context("Failed to start all-time points transaction")?;
    let mut updated = Vec::with_capacity(awards.len());

    for award in awards {
        let existing = find_record(&tx, &award.username)?;
        let record = accumulate(existing, award, now);
        upsert_record(&tx, &record)?;
        updated.push(record);
    }

    tx.commit()
        .context("Failed to commit all-time points transaction")?;
    Ok(updated)
}

fn find_record(conn: &Connection, username: &str) -> Result<Option<AllTimeRecord>> {
    let sql = format!("{} WHERE username = ?1", SELECT_RECORD);

    conn.query_row(&sql, params![username], parse_record_row)
        .optional()
        .with_context(|| format!("Failed to query all-time points for {}", username))
}

fn upsert_record(conn: &Connection, record: &AllTimeRecord) -> Result<()> {
    let sql = "INSERT INTO all_time_points (username, total_points, weeks_participated, best_finish, last_updated) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(username) DO UPDATE SET total_points = excluded.total_points, weeks_participated = excluded.weeks_participated, best_finish = excluded.best_finish, last_updated = excluded.last_updated";

    conn.execute(
        sql,
        params![
            record.username,
            record.total_points,
            record.weeks_participated,
            record.best_finish,
            record.last_updated
        ],
    )
    .with_context(|| format!("Failed to save all-time points for {}", record.username))?;
    Ok(())
}

fn parse_record_row(row: &rusqlite::Row) -> rusqlite::Result<AllTimeRecord> {
    Ok(AllTimeRecord {
        username: row.get(0)?,
        total_points: row.get(1)?,
        weeks_participated: row.get(2)?,
        best_finish: row.get(3)?,
        last_updated: row.get(4)?,
    })
}
