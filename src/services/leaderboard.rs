use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use log::info;
use serde::Serialize;

use crate::config::settings::{AppConfig, LeaderboardSettings};
use crate::database::{self, DbPool, NewLeaderboardEntry};
use crate::fetchers::DraftDumpFetcher;
use crate::leaderboard::{
    award_points, build_standings, current_period_key, filter_recent, LeaderboardRow, ScoringMode,
    Standings, UserStars,
};
use crate::parsing::parse_csv;

const SUMMARY_TOP: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeSummary {
    pub mode: ScoringMode,
    pub users: usize,
    pub top: Vec<UserStars>,
}

impl ModeSummary {
    fn new(mode: ScoringMode, ranking: &[UserStars]) -> Self {
        Self {
            mode,
            users: ranking.len(),
            top: ranking.iter().take(SUMMARY_TOP).cloned().collect(),
        }
    }
}

/// Outcome of one scoring run, returned to the trigger caller as JSON
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSummary {
    pub success: bool,
    pub dry_run: bool,
    pub period_key: String,
    pub rows_fetched: usize,
    pub rows_scored: usize,
    pub daily: ModeSummary,
    pub weekly: ModeSummary,
    pub rows_written: usize,
    pub all_time_updated: usize,
}

/// Rows read from the feed and the standings computed from them
#[derive(Debug, Clone)]
pub struct ComputedStandings {
    pub rows_fetched: usize,
    pub rows_scored: usize,
    pub standings: Standings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistOutcome {
    pub rows_written: usize,
    pub all_time_updated: usize,
}

pub struct LeaderboardService {
    pool: DbPool,
    config: AppConfig,
}

impl LeaderboardService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub async fn run(&self, dry_run: bool) -> Result<LeaderboardSummary> {
        info!("=== Starting Leaderboard Update{} ===", if dry_run { " (dry run)" } else { "" });

        // Step 1: Download the feed
        let fetcher = DraftDumpFetcher::new(&self.config.feed)?;
        let csv = fetcher.fetch_csv().await?;

        // Step 2: Score both modes
        let computed = compute_standings(&csv, &self.config.leaderboard);
        info!(
            "  → {} feed rows, {} recent; {} daily and {} weekly users ranked",
            computed.rows_fetched,
            computed.rows_scored,
            computed.standings.daily.len(),
            computed.standings.weekly.len()
        );

        // Step 3: Replace this period's rows and credit all-time points
        let period_key = current_period_key();
        let outcome = if dry_run {
            info!("  → Dry run, nothing written for period {}", period_key);
            PersistOutcome {
                rows_written: 0,
                all_time_updated: 0,
            }
        } else {
            persist_standings(
                &self.pool,
                &period_key,
                &computed.standings,
                &self.config.leaderboard,
                Utc::now().naive_utc(),
            )?
        };

        info!("=== Leaderboard Update Complete ===");
        Ok(LeaderboardSummary {
            success: true,
            dry_run,
            period_key,
            rows_fetched: computed.rows_fetched,
            rows_scored: computed.rows_scored,
            daily: ModeSummary::new(ScoringMode::Daily, &computed.standings.daily),
            weekly: ModeSummary::new(ScoringMode::Weekly, &computed.standings.weekly),
            rows_written: outcome.rows_written,
            all_time_updated: outcome.all_time_updated,
        })
    }
}

/// Parse feed text, drop stale rows and rank both modes
pub fn compute_standings(csv: &str, settings: &LeaderboardSettings) -> ComputedStandings {
    let parsed = parse_csv(csv);
    let rows: Vec<LeaderboardRow> = parsed.rows.iter().filter_map(LeaderboardRow::from_raw).collect();
    let rows_fetched = rows.len();

    let recent = filter_recent(rows, settings.recency_cutoff);
    let standings = build_standings(&recent, settings);

    ComputedStandings {
        rows_fetched,
        rows_scored: recent.len(),
        standings,
    }
}

/// Replace the stored rows for `period_key` with these standings, then
/// credit all-time points from the configured mode.
///
/// The row replacement is safe to repeat; the all-time credit is not.
pub fn persist_standings(
    pool: &DbPool,
    period_key: &str,
    standings: &Standings,
    settings: &LeaderboardSettings,
    now: NaiveDateTime,
) -> Result<PersistOutcome> {
    let mut conn = database::get_connection(pool)?;

    let removed = database::leaderboard::delete_period(&mut conn, period_key)?;
    if removed > 0 {
        info!("  → Cleared {} existing rows for period {}", removed, period_key);
    }

    let entries = period_entries(period_key, standings);
    let rows_written = database::leaderboard::insert_entries(&mut conn, &entries, settings.batch_size)?;
    info!("  → Wrote {} leaderboard rows for period {}", rows_written, period_key);

    let ranking = standings.for_mode(settings.all_time_mode);
    let awards = award_points(ranking, settings.all_time_top_n);
    let updated = database::all_time::apply_awards(&mut conn, &awards, now)?;
    info!("  → Credited all-time points to {} users", updated.len());

    Ok(PersistOutcome {
        rows_written,
        all_time_updated: updated.len(),
    })
}

fn period_entries(period_key: &str, standings: &Standings) -> Vec<NewLeaderboardEntry> {
    ScoringMode::ALL
        .into_iter()
        .flat_map(|mode| {
            standings
                .for_mode(mode)
                .iter()
                .enumerate()
                .map(move |(idx, user)| NewLeaderboardEntry {
                    period_key: period_key.to_string(),
                    mode,
                    rank: idx as u32 + 1,
                    username: user.username.clone(),
                    stars: user.stars,
                })
        })
        .collect()
}
