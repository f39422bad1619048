use std::collections::HashMap;

use log::debug;

use super::stars::{bracket_size, stars_for};
use super::types::{LeaderboardRow, ScoringMode, Standings, UserStars};
use crate::config::settings::LeaderboardSettings;

/// Most recent occurrences of one tournament title
#[derive(Debug, Clone)]
pub struct TournamentGroup<'a> {
    pub title: &'a str,
    pub rows: Vec<&'a LeaderboardRow>,
}

impl TournamentGroup<'_> {
    /// Widest placement list among the kept rows
    pub fn entrants(&self) -> usize {
        self.rows.iter().map(|row| row.placements.len()).max().unwrap_or(0)
    }
}

/// Star totals that remember the order users were first seen in
#[derive(Debug, Default)]
struct StarTally {
    totals: Vec<UserStars>,
    positions: HashMap<String, usize>,
}

impl StarTally {
    fn add(&mut self, username: &str, stars: u32) {
        match self.positions.get(username) {
            Some(&idx) => self.totals[idx].stars += stars,
            None => {
                self.positions.insert(username.to_string(), self.totals.len());
                self.totals.push(UserStars {
                    username: username.to_string(),
                    stars,
                });
            }
        }
    }

    /// Highest total first; equal totals stay in first-seen order
    fn into_ranking(self) -> Vec<UserStars> {
        let mut ranking = self.totals;
        ranking.sort_by(|a, b| b.stars.cmp(&a.stars));
        ranking
    }
}

/// Keep only rows that started at or after `cutoff` (epoch seconds)
pub fn filter_recent(rows: Vec<LeaderboardRow>, cutoff: i64) -> Vec<LeaderboardRow> {
    rows.into_iter().filter(|row| row.starttime >= cutoff).collect()
}

/// Score both modes over the same rows; each gets its own tally
pub fn build_standings(rows: &[LeaderboardRow], settings: &LeaderboardSettings) -> Standings {
    Standings {
        daily: score(rows, ScoringMode::Daily, settings),
        weekly: score(rows, ScoringMode::Weekly, settings),
    }
}

/// Rank users by stars earned in the recent tournaments of `mode`
pub fn score(
    rows: &[LeaderboardRow],
    mode: ScoringMode,
    settings: &LeaderboardSettings,
) -> Vec<UserStars> {
    let eligible = select_rows(rows, mode, settings);
    let groups = group_recent(eligible, settings.keep_for(mode));
    let mut tally = StarTally::default();

    for group in &groups {
        let Some(size) = bracket_size(mode, group.entrants()) else {
            continue;
        };
        debug!(
            "Scoring '{}' as {} bracket of {} ({} rows)",
            group.title,
            mode,
            size,
            group.rows.len()
        );

        for row in &group.rows {
            award_row(&mut tally, row, mode, size);
        }
    }

    tally.into_ranking()
}

fn select_rows<'a>(
    rows: &'a [LeaderboardRow],
    mode: ScoringMode,
    settings: &LeaderboardSettings,
) -> Vec<&'a LeaderboardRow> {
    rows.iter()
        .filter(|row| ScoringMode::classify(&row.title) == mode)
        .filter(|row| mode != ScoringMode::Daily || !settings.is_excluded(&row.title))
        .collect()
}

/// Group by exact title in first-seen order, newest occurrence first
pub fn group_recent<'a>(rows: Vec<&'a LeaderboardRow>, keep: usize) -> Vec<TournamentGroup<'a>> {
    let mut groups: Vec<TournamentGroup<'a>> = Vec::new();
    let mut by_title: HashMap<&'a str, usize> = HashMap::new();

    for row in rows {
        match by_title.get(row.title.as_str()) {
            Some(&idx) => groups[idx].rows.push(row),
            None => {
                by_title.insert(row.title.as_str(), groups.len());
                groups.push(TournamentGroup {
                    title: row.title.as_str(),
                    rows: vec![row],
                });
            }
        }
    }

    for group in &mut groups {
        group.rows.sort_by(|a, b| b.num.cmp(&a.num));
        group.rows.truncate(keep);
    }

    groups
}

fn award_row(tally: &mut StarTally, row: &LeaderboardRow, mode: ScoringMode, size: usize) {
    for (rank, username) in row.placements.iter().enumerate() {
        let username = username.trim();
        if username.is_empty() {
            continue;
        }
        let stars = stars_for(mode, size, rank);
        if stars > 0 {
            tally.add(username, stars);
        }
    }
}
