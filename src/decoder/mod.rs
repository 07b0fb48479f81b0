//! Post-solve decoding: turns a satisfying assignment into the public
//! `schedule`/`by_time`/`visits` facts plus scenario-specific `priv`
//! structures. Everything here is a pure read of the final assignment
//! (and, for contagion/curse/jewels/glue, a small derived simulation)
//! — nothing here emits further clauses.

mod contagion;
mod curse;
mod glue;
mod jewels;

pub use contagion::ContagionFacts;
pub use curse::CurseFacts;
pub use glue::GlueRoomFacts;
pub use jewels::SingersJewelsFacts;

use std::collections::HashMap;

use serde::Serialize;

use crate::config::Configuration;
use crate::encoder::ScenarioKeys;
use crate::graph::Graph;

/// `room_at[c][t]` = the room index character `c` occupies at time `t`,
/// read off the `X(c,t,r)` assignment.
pub fn room_at_table(cfg: &Configuration, graph: &Graph, x: &[Vec<Vec<i32>>], assignment: &[bool]) -> Vec<Vec<usize>> {
    let nc = cfg.chars.len();
    let nt = cfg.t;
    let nr = graph.room_count();
    let mut room_at = vec![vec![0usize; nt]; nc];
    for c in 0..nc {
        for t in 0..nt {
            let mut found = None;
            for r in 0..nr {
                let lit = x[c][t][r];
                if assignment[(lit - 1) as usize] {
                    found = Some(r);
                    break;
                }
            }
            room_at[c][t] = found.expect("exactly-one-location clause guarantees a room");
        }
    }
    room_at
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub schedule: HashMap<String, Vec<String>>,
    pub by_time: Vec<HashMap<String, usize>>,
    pub visits: HashMap<String, HashMap<String, usize>>,
}

pub fn build_schedule(cfg: &Configuration, graph: &Graph, room_at: &[Vec<usize>]) -> Schedule {
    let nc = cfg.chars.len();
    let nt = cfg.t;
    let mut schedule = HashMap::new();
    let mut visits: HashMap<String, HashMap<String, usize>> = HashMap::new();
    let mut by_time = vec![HashMap::new(); nt];

    for c in 0..nc {
        let rooms: Vec<String> = (0..nt).map(|t| graph.rooms[room_at[c][t]].clone()).collect();
        let mut char_visits: HashMap<String, usize> = HashMap::new();
        for (t, room) in rooms.iter().enumerate() {
            *char_visits.entry(room.clone()).or_insert(0) += 1;
            *by_time[t].entry(room.clone()).or_insert(0) += 1;
        }
        visits.insert(cfg.chars[c].clone(), char_visits);
        schedule.insert(cfg.chars[c].clone(), rooms);
    }

    Schedule {
        schedule,
        by_time,
        visits,
    }
}

fn selected_char(cfg: &Configuration, role_vars: &[i32], assignment: &[bool]) -> Option<String> {
    role_vars
        .iter()
        .position(|&v| assignment[(v - 1) as usize])
        .map(|c| cfg.chars[c].clone())
}

fn selected_chars(cfg: &Configuration, role_vars: &[i32], assignment: &[bool]) -> Vec<String> {
    role_vars
        .iter()
        .enumerate()
        .filter(|&(_, &v)| assignment[(v - 1) as usize])
        .map(|(c, _)| cfg.chars[c].clone())
        .collect()
}

/// Every distinct character who was ever alone with `c` in a room,
/// read directly off the schedule (used for S7's kill victims and S8's
/// freeze victims, both "whoever shared a 1-on-1 with this role").
fn one_on_one_partners(cfg: &Configuration, room_at: &[Vec<usize>], c: usize) -> Vec<String> {
    let nc = cfg.chars.len();
    let nt = cfg.t;
    let mut out = Vec::new();
    for t in 0..nt {
        let mut occupants: Vec<usize> = (0..nc).filter(|&other| room_at[other][t] == room_at[c][t]).collect();
        occupants.retain(|&o| o != c);
        if occupants.len() == 1 {
            let name = cfg.chars[occupants[0]].clone();
            if !out.contains(&name) {
                out.push(name);
            }
        }
    }
    out
}

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivFacts {
    pub phantom: Option<String>,
    pub lovers: Option<(String, String)>,
    pub assassin: Option<String>,
    pub victim: Option<String>,
    pub poison_time: Option<usize>,
    pub poison_room: Option<String>,
    pub bomb_duo: Option<(String, String)>,
    pub aggrosassin: Option<String>,
    pub victims: Option<Vec<String>>,
    pub freeze: Option<String>,
    pub freeze_victims: Option<Vec<String>>,
    pub freeze_kills: Option<Vec<usize>>,
    pub doctor: Option<String>,
    pub frozen: Option<Vec<String>>,
    pub heals: Option<Vec<(String, usize)>>,
    pub contagion: Option<ContagionFacts>,
    pub vault: Option<VaultFacts>,
    pub glue_room: Option<GlueRoomFacts>,
    pub glue_shoes: Option<String>,
    pub curse_of_amarinta: Option<CurseFacts>,
    pub world_travelers: Option<WorldTravelersFacts>,
    pub homebodies: Option<HomebodiesFacts>,
    pub singers_jewels: Option<SingersJewelsFacts>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultFacts {
    pub key_holder: String,
    pub vault_room: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldTravelersFacts {
    pub podium: Vec<String>,
    pub visit_counts: HashMap<String, usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomebodiesFacts {
    pub homebody: String,
    pub visit_counts: HashMap<String, usize>,
}

/// Decodes every selected scenario's `priv` facts from the satisfying
/// assignment, using the key bundle the encoder returned.
pub fn decode(
    cfg: &Configuration,
    graph: &Graph,
    keys: &ScenarioKeys,
    room_at: &[Vec<usize>],
    assignment: &[bool],
    resolved_seed: u32,
) -> PrivFacts {
    let mut priv_facts = PrivFacts::default();

    if let Some(s1) = &keys.s1 {
        priv_facts.assassin = Some(cfg.chars[s1.assassin].clone());
        priv_facts.victim = s1
            .victim
            .iter()
            .position(|&v| v != 0 && assignment[(v - 1) as usize])
            .map(|c| cfg.chars[c].clone());
        priv_facts.poison_time = s1
            .poison_time
            .iter()
            .position(|&v| assignment[(v - 1) as usize]);
        priv_facts.poison_room = s1
            .poison_room
            .iter()
            .position(|&v| assignment[(v - 1) as usize])
            .map(|r| graph.rooms[r].clone());
    }

    if let Some(s2) = &keys.s2 {
        priv_facts.phantom = selected_char(cfg, &s2.phantom, assignment);
    }
    if let Some(s3) = &keys.s3 {
        priv_facts.singers_jewels = Some(jewels::decode(cfg, graph, s3.jewel_room, room_at));
    }
    if let Some(s4) = &keys.s4 {
        let a1 = selected_char(cfg, &s4.a1, assignment);
        let a2 = selected_char(cfg, &s4.a2, assignment);
        if let (Some(a1), Some(a2)) = (a1, a2) {
            priv_facts.bomb_duo = Some((a1, a2));
        }
    }
    if let Some(s5) = &keys.s5 {
        let l1 = selected_char(cfg, &s5.l1, assignment);
        let l2 = selected_char(cfg, &s5.l2, assignment);
        if let (Some(l1), Some(l2)) = (l1, l2) {
            priv_facts.lovers = Some((l1, l2));
        }
    }
    if let Some(s6) = &keys.s6 {
        priv_facts.phantom = selected_char(cfg, &s6.phantom, assignment);
        let l1 = selected_char(cfg, &s6.l1, assignment);
        let l2 = selected_char(cfg, &s6.l2, assignment);
        if let (Some(l1), Some(l2)) = (l1, l2) {
            priv_facts.lovers = Some((l1, l2));
        }
    }
    if let Some(s7) = &keys.s7 {
        priv_facts.aggrosassin = selected_char(cfg, &s7.agg, assignment);
        if let Some(pos) = s7.agg.iter().position(|&v| assignment[(v - 1) as usize]) {
            priv_facts.victims = Some(one_on_one_partners(cfg, room_at, pos));
        }
    }
    if let Some(s8) = &keys.s8 {
        priv_facts.freeze = Some(cfg.chars[s8.freeze_carrier].clone());
        priv_facts.freeze_kills = Some(s8.required_kill_times.clone());
        priv_facts.freeze_victims = Some(one_on_one_partners(cfg, room_at, s8.freeze_carrier));
    }
    if let Some(s9) = &keys.s9 {
        priv_facts.doctor = selected_char(cfg, &s9.doctor, assignment);
        let frozen_names = selected_chars(cfg, &s9.frozen, assignment);
        if let Some(doctor_pos) = s9.doctor.iter().position(|&v| assignment[(v - 1) as usize]) {
            let mut heals = Vec::new();
            for name in &frozen_names {
                let c = cfg.chars.iter().position(|n| n == name).unwrap();
                for t in 1..cfg.t.saturating_sub(1) {
                    if room_at[c][t] == room_at[doctor_pos][t] {
                        heals.push((name.clone(), t));
                        break;
                    }
                }
            }
            priv_facts.heals = Some(heals);
        }
        priv_facts.frozen = Some(frozen_names);
    }
    if let Some(s10) = &keys.s10 {
        priv_facts.contagion = Some(contagion::simulate(cfg, graph, s10.contagious_room, room_at));
    }
    if let Some(s11) = &keys.s11 {
        priv_facts.vault = Some(VaultFacts {
            key_holder: cfg.chars[s11
                .key_holder
                .iter()
                .position(|&v| assignment[(v - 1) as usize])
                .unwrap_or(0)]
            .clone(),
            vault_room: graph.rooms[s11.vault_room].clone(),
        });
    }
    if let Some(s12) = &keys.s12 {
        priv_facts.glue_room = Some(glue::decode(cfg, graph, s12.glue_room, room_at));
    }
    if let Some(s13) = &keys.s13 {
        priv_facts.glue_shoes = selected_char(cfg, &s13.carrier, assignment);
    }
    if keys.s14.is_some() {
        priv_facts.curse_of_amarinta = Some(curse::simulate(cfg, room_at, resolved_seed));
    }
    if let Some(s15) = &keys.s15 {
        let mut visit_counts = HashMap::new();
        for c in 0..cfg.chars.len() {
            let count = (0..graph.room_count())
                .filter(|&r| (0..cfg.t).any(|t| room_at[c][t] == r))
                .count();
            visit_counts.insert(cfg.chars[c].clone(), count);
        }
        priv_facts.world_travelers = Some(WorldTravelersFacts {
            podium: s15.podium.iter().map(|&c| cfg.chars[c].clone()).collect(),
            visit_counts,
        });
    }
    if let Some(s16) = &keys.s16 {
        let mut visit_counts = HashMap::new();
        for c in 0..cfg.chars.len() {
            let count = (0..graph.room_count())
                .filter(|&r| (0..cfg.t).any(|t| room_at[c][t] == r))
                .count();
            visit_counts.insert(cfg.chars[c].clone(), count);
        }
        priv_facts.homebodies = Some(HomebodiesFacts {
            homebody: cfg.chars[s16.homebody].clone(),
            visit_counts,
        });
    }

    priv_facts
}
