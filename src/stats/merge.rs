use std::collections::HashMap;

use super::format::{
    format_avg, format_fixed, format_index, format_percent, parse_stat, ratio, weighted, AVG_DEFAULT,
};
use super::models::{BattingStats, PitchingStats, StatLine};

/// Combine two uploads of the same player.
///
/// Counting stats add up, value contributions (WAR, wRAA, BsR) add up, and
/// rate stats are averaged by workload. The incoming upload supplies the
/// descriptive fields; the existing record keeps its id.
pub trait Mergeable: StatLine {
    fn merge_with(&self, incoming: &Self) -> Self;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome<T> {
    pub roster: Vec<T>,
    pub added: usize,
    pub updated: usize,
}

/// Fold `incoming` into `existing`, matching players by exact trimmed name.
/// Roster order is kept and new players are appended in batch order.
pub fn merge_roster<T: Mergeable>(existing: Vec<T>, incoming: Vec<T>) -> MergeOutcome<T> {
    let mut roster = existing;
    let mut by_name: HashMap<String, usize> = roster
        .iter()
        .enumerate()
        .map(|(idx, player)| (player.name().trim().to_string(), idx))
        .collect();
    let mut added = 0;
    let mut updated = 0;

    for player in incoming {
        let key = player.name().trim().to_string();
        match by_name.get(&key) {
            Some(&idx) => {
                roster[idx] = roster[idx].merge_with(&player);
                updated += 1;
            }
            None => {
                by_name.insert(key, roster.len());
                roster.push(player);
                added += 1;
            }
        }
    }

    MergeOutcome { roster, added, updated }
}

/// Workload-weighted blend of two displayed values
struct Blend {
    weight_a: f64,
    weight_b: f64,
}

impl Blend {
    fn value(&self, a: &str, b: &str) -> f64 {
        weighted(parse_stat(a), self.weight_a, parse_stat(b), self.weight_b)
    }

    fn avg(&self, a: &str, b: &str) -> String {
        format_avg(self.value(a, b))
    }

    fn fixed(&self, a: &str, b: &str, places: usize) -> String {
        format_fixed(self.value(a, b), places)
    }

    fn index(&self, a: &str, b: &str) -> String {
        format_index(self.value(a, b))
    }

    fn percent(&self, a: &str, b: &str) -> String {
        format_percent(self.value(a, b), a.ends_with('%') || b.ends_with('%'))
    }
}

fn sum_one_place(a: &str, b: &str) -> String {
    format_fixed(parse_stat(a) + parse_stat(b), 1)
}

fn avg_or_default(value: Option<f64>) -> String {
    value.map(format_avg).unwrap_or_else(|| AVG_DEFAULT.to_string())
}

impl Mergeable for BattingStats {
    fn merge_with(&self, incoming: &Self) -> Self {
        let blend = Blend {
            weight_a: f64::from(self.pa),
            weight_b: f64::from(incoming.pa),
        };

        let ab = self.ab.saturating_add(incoming.ab);
        let h = self.h.saturating_add(incoming.h);
        let doubles = self.doubles.saturating_add(incoming.doubles);
        let triples = self.triples.saturating_add(incoming.triples);
        let hr = self.hr.saturating_add(incoming.hr);
        let so = self.so.saturating_add(incoming.so);

        let total_bases = h
            .saturating_add(doubles)
            .saturating_add(triples.saturating_mul(2))
            .saturating_add(hr.saturating_mul(3));
        let balls_in_play = i64::from(ab) - i64::from(so) - i64::from(hr);
        let hits_in_play = i64::from(h) - i64::from(hr);

        BattingStats {
            id: self.id,
            pos: incoming.pos.clone(),
            name: self.name.clone(),
            bats: incoming.bats.clone(),
            ovr: incoming.ovr,
            var: incoming.var.clone(),
            g: self.g.saturating_add(incoming.g),
            gs: self.gs.saturating_add(incoming.gs),
            pa: self.pa.saturating_add(incoming.pa),
            ab,
            h,
            doubles,
            triples,
            hr,
            bb_pct: blend.percent(&self.bb_pct, &incoming.bb_pct),
            so,
            gidp: self.gidp.saturating_add(incoming.gidp),
            avg: avg_or_default(ratio(f64::from(h), f64::from(ab))),
            obp: blend.avg(&self.obp, &incoming.obp),
            slg: avg_or_default(ratio(f64::from(total_bases), f64::from(ab))),
            woba: blend.avg(&self.woba, &incoming.woba),
            ops: blend.avg(&self.ops, &incoming.ops),
            ops_plus: blend.index(&self.ops_plus, &incoming.ops_plus),
            babip: avg_or_default(ratio(hits_in_play as f64, balls_in_play as f64)),
            wrc_plus: blend.index(&self.wrc_plus, &incoming.wrc_plus),
            wraa: sum_one_place(&self.wraa, &incoming.wraa),
            war: sum_one_place(&self.war, &incoming.war),
            sb_pct: blend.percent(&self.sb_pct, &incoming.sb_pct),
            bsr: sum_one_place(&self.bsr, &incoming.bsr),
        }
    }
}

impl Mergeable for PitchingStats {
    fn merge_with(&self, incoming: &Self) -> Self {
        let blend = Blend {
            weight_a: self.ip.as_decimal(),
            weight_b: incoming.ip.as_decimal(),
        };

        PitchingStats {
            id: self.id,
            pos: incoming.pos.clone(),
            name: self.name.clone(),
            throws: incoming.throws.clone(),
            ovr: incoming.ovr,
            var: incoming.var.clone(),
            g: self.g.saturating_add(incoming.g),
            gs: self.gs.saturating_add(incoming.gs),
            ip: self.ip + incoming.ip,
            bf: self.bf.saturating_add(incoming.bf),
            era: blend.fixed(&self.era, &incoming.era, 2),
            avg: blend.avg(&self.avg, &incoming.avg),
            obp: blend.avg(&self.obp, &incoming.obp),
            babip: blend.avg(&self.babip, &incoming.babip),
            whip: blend.fixed(&self.whip, &incoming.whip, 2),
            bra9: blend.fixed(&self.bra9, &incoming.bra9, 2),
            hr9: blend.fixed(&self.hr9, &incoming.hr9, 2),
            h9: blend.fixed(&self.h9, &incoming.h9, 2),
            bb9: blend.fixed(&self.bb9, &incoming.bb9, 2),
            k9: blend.fixed(&self.k9, &incoming.k9, 2),
            lob_pct: blend.percent(&self.lob_pct, &incoming.lob_pct),
            era_plus: blend.index(&self.era_plus, &incoming.era_plus),
            fip: blend.fixed(&self.fip, &incoming.fip, 2),
            fip_minus: blend.index(&self.fip_minus, &incoming.fip_minus),
            war: sum_one_place(&self.war, &incoming.war),
            siera: blend.fixed(&self.siera, &incoming.siera, 2),
        }
    }
}
