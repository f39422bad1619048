use uuid::Uuid;

use super::format::{
    format_avg, format_fixed, format_index, AVG_DEFAULT, INDEX_DEFAULT, ONE_PLACE_DEFAULT,
    TWO_PLACE_DEFAULT,
};
use super::innings::Innings;
use super::models::{BattingStats, PitchingStats, StatKind};
use crate::parsing::{CsvValue, RawRow};

const UNKNOWN_NAME: &str = "Unknown";

/// Normalized rows of one upload, typed by the header shape they came in
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedBatch {
    Batting(Vec<BattingStats>),
    Pitching(Vec<PitchingStats>),
}

impl NormalizedBatch {
    pub fn kind(&self) -> StatKind {
        match self {
            NormalizedBatch::Batting(_) => StatKind::Batting,
            NormalizedBatch::Pitching(_) => StatKind::Pitching,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NormalizedBatch::Batting(rows) => rows.len(),
            NormalizedBatch::Pitching(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map raw export rows onto the canonical records for `kind`.
///
/// Never fails: absent names become "Unknown", absent counts become 0 and
/// absent rate fields take their display default. Every row mints a new id.
pub fn normalize(rows: &[&RawRow], kind: StatKind) -> NormalizedBatch {
    match kind {
        StatKind::Batting => {
            NormalizedBatch::Batting(rows.iter().map(|row| normalize_batting(row)).collect())
        }
        StatKind::Pitching => {
            NormalizedBatch::Pitching(rows.iter().map(|row| normalize_pitching(row)).collect())
        }
    }
}

pub fn normalize_batting(row: &RawRow) -> BattingStats {
    BattingStats {
        id: Uuid::new_v4(),
        pos: label(row, "POS"),
        name: player_name(row),
        bats: label(row, "B"),
        ovr: count(row, "OVR"),
        var: label(row, "VAR"),
        g: count(row, "G"),
        gs: count(row, "GS"),
        pa: count(row, "PA"),
        ab: count(row, "AB"),
        h: count(row, "H"),
        doubles: count(row, "2B"),
        triples: count(row, "3B"),
        hr: count(row, "HR"),
        bb_pct: decimal(row, "BB%", 1, ONE_PLACE_DEFAULT),
        so: count(row, "SO"),
        gidp: count(row, "GIDP"),
        avg: average(row, "AVG"),
        obp: average(row, "OBP"),
        slg: average(row, "SLG"),
        woba: average(row, "wOBA"),
        ops: average(row, "OPS"),
        ops_plus: index(row, "OPS+"),
        babip: average(row, "BABIP"),
        wrc_plus: index(row, "wRC+"),
        wraa: decimal(row, "wRAA", 1, ONE_PLACE_DEFAULT),
        war: decimal(row, "WAR", 1, ONE_PLACE_DEFAULT),
        sb_pct: decimal(row, "SB%", 1, ONE_PLACE_DEFAULT),
        bsr: decimal(row, "BsR", 1, ONE_PLACE_DEFAULT),
    }
}

pub fn normalize_pitching(row: &RawRow) -> PitchingStats {
    PitchingStats {
        id: Uuid::new_v4(),
        pos: label(row, "POS"),
        name: player_name(row),
        throws: label(row, "T"),
        ovr: count(row, "OVR"),
        var: label(row, "VAR"),
        g: count(row, "G"),
        gs: count(row, "GS"),
        ip: innings(row, "IP"),
        bf: count(row, "BF"),
        era: decimal(row, "ERA", 2, TWO_PLACE_DEFAULT),
        avg: average(row, "AVG"),
        obp: average(row, "OBP"),
        babip: average(row, "BABIP"),
        whip: decimal(row, "WHIP", 2, TWO_PLACE_DEFAULT),
        bra9: decimal(row, "BRA/9", 2, TWO_PLACE_DEFAULT),
        hr9: decimal(row, "HR/9", 2, TWO_PLACE_DEFAULT),
        h9: decimal(row, "H/9", 2, TWO_PLACE_DEFAULT),
        bb9: decimal(row, "BB/9", 2, TWO_PLACE_DEFAULT),
        k9: decimal(row, "K/9", 2, TWO_PLACE_DEFAULT),
        lob_pct: decimal(row, "LOB%", 1, ONE_PLACE_DEFAULT),
        era_plus: index(row, "ERA+"),
        fip: decimal(row, "FIP", 2, TWO_PLACE_DEFAULT),
        fip_minus: index(row, "FIP-"),
        war: decimal(row, "WAR", 1, ONE_PLACE_DEFAULT),
        siera: decimal(row, "SIERA", 2, TWO_PLACE_DEFAULT),
    }
}

fn player_name(row: &RawRow) -> String {
    row.text("Name").unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn label(row: &RawRow, header: &str) -> String {
    row.text(header).unwrap_or_default()
}

fn count(row: &RawRow, header: &str) -> u32 {
    match row.get(header) {
        Some(CsvValue::Number(value)) if *value > 0.0 => value.round() as u32,
        Some(CsvValue::Text(text)) => text
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .map_or(0, |v| v.round() as u32),
        _ => 0,
    }
}

fn innings(row: &RawRow, header: &str) -> Innings {
    match row.get(header) {
        Some(CsvValue::Number(value)) => Innings::from_number(*value),
        Some(CsvValue::Text(text)) => Innings::parse(text),
        None => Innings::default(),
    }
}

/// Formatted field: numbers are rendered in the field's style, text is kept
fn formatted(row: &RawRow, header: &str, render: impl Fn(f64) -> String, default: &str) -> String {
    match row.get(header) {
        Some(CsvValue::Number(value)) => render(*value),
        Some(value) if !value.is_blank() => value.as_text().trim().to_string(),
        _ => default.to_string(),
    }
}

fn average(row: &RawRow, header: &str) -> String {
    formatted(row, header, format_avg, AVG_DEFAULT)
}

fn decimal(row: &RawRow, header: &str, places: usize, default: &str) -> String {
    formatted(row, header, |v| format_fixed(v, places), default)
}

fn index(row: &RawRow, header: &str) -> String {
    formatted(row, header, format_index, INDEX_DEFAULT)
}
