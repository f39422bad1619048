use super::types::ScoringMode;

/// `(last rank of the band, stars)` pairs, ranks 0-based and ascending
type Bands = &'static [(usize, u32)];

const SIZE_32: Bands = &[(0, 70), (1, 40), (3, 10), (7, 5)];

const DAILY_64: Bands = &[(0, 100), (1, 60), (3, 30), (7, 15), (15, 10)];
const DAILY_128: Bands = &[(0, 130), (1, 90), (3, 60), (7, 30), (15, 15), (31, 10)];

const WEEKLY_64: Bands = &[(0, 250), (1, 150), (3, 75), (7, 25), (15, 10)];
const WEEKLY_128: Bands = &[(0, 400), (1, 300), (3, 150), (7, 75), (15, 25), (31, 10)];
const WEEKLY_256: Bands = &[
    (0, 550),
    (1, 350),
    (3, 200),
    (7, 100),
    (15, 50),
    (31, 25),
    (63, 10),
];

/// Bracket sizes with their award bands, smallest first
const DAILY_TABLE: &[(usize, Bands)] = &[(32, SIZE_32), (64, DAILY_64), (128, DAILY_128)];
const WEEKLY_TABLE: &[(usize, Bands)] = &[
    (32, SIZE_32),
    (64, WEEKLY_64),
    (128, WEEKLY_128),
    (256, WEEKLY_256),
];

fn table(mode: ScoringMode) -> &'static [(usize, Bands)] {
    match mode {
        ScoringMode::Daily => DAILY_TABLE,
        ScoringMode::Weekly => WEEKLY_TABLE,
    }
}

/// Bracket a field of `entrants` players is scored as: the smallest table
/// size that holds everyone, capped at the largest size in the table.
pub fn bracket_size(mode: ScoringMode, entrants: usize) -> Option<usize> {
    if entrants == 0 {
        return None;
    }
    let sizes = table(mode);
    sizes
        .iter()
        .map(|(size, _)| *size)
        .find(|size| *size >= entrants)
        .or_else(|| sizes.last().map(|(size, _)| *size))
}

/// Stars for finishing at 0-based `rank` in a bracket of `size`
pub fn stars_for(mode: ScoringMode, size: usize, rank: usize) -> u32 {
    table(mode)
        .iter()
        .find(|(table_size, _)| *table_size == size)
        .and_then(|(_, bands)| bands.iter().find(|(last, _)| rank <= *last))
        .map_or(0, |(_, stars)| *stars)
}
