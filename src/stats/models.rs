use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::format::parse_stat;
use super::innings::Innings;

pub const PITCHING_HEADERS: [&str; 25] = [
    "POS", "Name", "T", "OVR", "VAR", "G", "GS", "IP", "BF", "ERA", "AVG", "OBP", "BABIP", "WHIP",
    "BRA/9", "HR/9", "H/9", "BB/9", "K/9", "LOB%", "ERA+", "FIP", "FIP-", "WAR", "SIERA",
];

pub const BATTING_HEADERS: [&str; 28] = [
    "POS", "Name", "B", "OVR", "VAR", "G", "GS", "PA", "AB", "H", "2B", "3B", "HR", "BB%", "SO",
    "GIDP", "AVG", "OBP", "SLG", "wOBA", "OPS", "OPS+", "BABIP", "wRC+", "wRAA", "WAR", "SB%", "BsR",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Batting,
    Pitching,
}

impl StatKind {
    pub const ALL: [StatKind; 2] = [StatKind::Pitching, StatKind::Batting];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Batting => "batting",
            StatKind::Pitching => "pitching",
        }
    }

    /// Column layout of the export, in the game's order
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            StatKind::Batting => &BATTING_HEADERS,
            StatKind::Pitching => &PITCHING_HEADERS,
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batting" => Ok(StatKind::Batting),
            "pitching" => Ok(StatKind::Pitching),
            other => Err(format!("Unknown stat kind: {}", other)),
        }
    }
}

/// A batter's line in one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingStats {
    pub id: Uuid,
    pub pos: String,
    pub name: String,
    pub bats: String,
    pub ovr: u32,
    pub var: String,
    pub g: u32,
    pub gs: u32,
    pub pa: u32,
    pub ab: u32,
    pub h: u32,
    pub doubles: u32,
    pub triples: u32,
    pub hr: u32,
    pub bb_pct: String,
    pub so: u32,
    pub gidp: u32,
    pub avg: String,
    pub obp: String,
    pub slg: String,
    pub woba: String,
    pub ops: String,
    pub ops_plus: String,
    pub babip: String,
    pub wrc_plus: String,
    pub wraa: String,
    pub war: String,
    pub sb_pct: String,
    pub bsr: String,
}

/// A pitcher's line in one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingStats {
    pub id: Uuid,
    pub pos: String,
    pub name: String,
    pub throws: String,
    pub ovr: u32,
    pub var: String,
    pub g: u32,
    pub gs: u32,
    pub ip: Innings,
    pub bf: u32,
    pub era: String,
    pub avg: String,
    pub obp: String,
    pub babip: String,
    pub whip: String,
    pub bra9: String,
    pub hr9: String,
    pub h9: String,
    pub bb9: String,
    pub k9: String,
    pub lob_pct: String,
    pub era_plus: String,
    pub fip: String,
    pub fip_minus: String,
    pub war: String,
    pub siera: String,
}

/// Value used to order a table column
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Numeric when the displayed value reads as a number, text otherwise
    pub fn from_display(value: &str) -> Self {
        let cleaned = value.trim().trim_end_matches('%');
        match cleaned.parse::<f64>() {
            Ok(number) if number.is_finite() => SortKey::Number(number),
            _ => SortKey::Text(value.trim().to_string()),
        }
    }
}

/// Shared view over both record variants
pub trait StatLine: Clone {
    fn name(&self) -> &str;

    fn position(&self) -> &str;

    /// Look up a column by its CSV header; `None` for unknown headers
    fn sort_key(&self, column: &str) -> Option<SortKey>;
}

fn count(value: u32) -> Option<SortKey> {
    Some(SortKey::Number(f64::from(value)))
}

fn text(value: &str) -> Option<SortKey> {
    Some(SortKey::Text(value.to_string()))
}

fn rate(value: &str) -> Option<SortKey> {
    Some(SortKey::Number(parse_stat(value)))
}

impl StatLine for BattingStats {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> &str {
        &self.pos
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "POS" => text(&self.pos),
            "Name" => text(&self.name),
            "B" => text(&self.bats),
            "OVR" => count(self.ovr),
            "VAR" => Some(SortKey::from_display(&self.var)),
            "G" => count(self.g),
            "GS" => count(self.gs),
            "PA" => count(self.pa),
            "AB" => count(self.ab),
            "H" => count(self.h),
            "2B" => count(self.doubles),
            "3B" => count(self.triples),
            "HR" => count(self.hr),
            "BB%" => rate(&self.bb_pct),
            "SO" => count(self.so),
            "GIDP" => count(self.gidp),
            "AVG" => rate(&self.avg),
            "OBP" => rate(&self.obp),
            "SLG" => rate(&self.slg),
            "wOBA" => rate(&self.woba),
            "OPS" => rate(&self.ops),
            "OPS+" => rate(&self.ops_plus),
            "BABIP" => rate(&self.babip),
            "wRC+" => rate(&self.wrc_plus),
            "wRAA" => rate(&self.wraa),
            "WAR" => rate(&self.war),
            "SB%" => rate(&self.sb_pct),
            "BsR" => rate(&self.bsr),
            _ => None,
        }
    }
}

impl StatLine for PitchingStats {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> &str {
        &self.pos
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "POS" => text(&self.pos),
            "Name" => text(&self.name),
            "T" => text(&self.throws),
            "OVR" => count(self.ovr),
            "VAR" => Some(SortKey::from_display(&self.var)),
            "G" => count(self.g),
            "GS" => count(self.gs),
            "IP" => Some(SortKey::Number(self.ip.as_decimal())),
            "BF" => count(self.bf),
            "ERA" => rate(&self.era),
            "AVG" => rate(&self.avg),
            "OBP" => rate(&self.obp),
            "BABIP" => rate(&self.babip),
            "WHIP" => rate(&self.whip),
            "BRA/9" => rate(&self.bra9),
            "HR/9" => rate(&self.hr9),
            "H/9" => rate(&self.h9),
            "BB/9" => rate(&self.bb9),
            "K/9" => rate(&self.k9),
            "LOB%" => rate(&self.lob_pct),
            "ERA+" => rate(&self.era_plus),
            "FIP" => rate(&self.fip),
            "FIP-" => rate(&self.fip_minus),
            "WAR" => rate(&self.war),
            "SIERA" => rate(&self.siera),
            _ => None,
        }
    }
}
