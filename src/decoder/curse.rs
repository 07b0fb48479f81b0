//! Curse of Amarinta handoff: simulated once per candidate origin, with
//! seeded disambiguation among origins that realize the same
//! time-6 cursed set.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::Configuration;
use crate::rng::ScenarioRng;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurseFacts {
    pub origin: String,
    pub possible_origins: Vec<String>,
    pub cursed_at_time6_by_origin: HashMap<String, Vec<String>>,
}

/// `state[t][c]` = whether `c` is cursed at (0-based) time `t`, given
/// `origin` seeded cursed at `t=0`. Each step's swap is computed against
/// the previous step's snapshot, so it applies simultaneously across rooms.
fn simulate_from_origin(nc: usize, nt: usize, room_at: &[Vec<usize>], origin: usize) -> Vec<Vec<bool>> {
    let mut state = vec![vec![false; nc]; nt];
    if nt > 0 {
        state[0][origin] = true;
    }
    for t in 1..nt {
        let mut next = state[t - 1].clone();
        let mut by_room: HashMap<usize, Vec<usize>> = HashMap::new();
        for c in 0..nc {
            by_room.entry(room_at[c][t]).or_default().push(c);
        }
        for occupants in by_room.values() {
            let any_cursed = occupants.iter().any(|&c| state[t - 1][c]);
            let any_uncursed = occupants.iter().any(|&c| !state[t - 1][c]);
            if any_cursed && any_uncursed {
                for &c in occupants {
                    next[c] = !state[t - 1][c];
                }
            }
        }
        state[t] = next;
    }
    state
}

pub fn simulate(cfg: &Configuration, room_at: &[Vec<usize>], resolved_seed: u32) -> CurseFacts {
    let nc = cfg.chars.len();
    let nt = cfg.t;
    let t6 = 5.min(nt.saturating_sub(1));

    let time6_sets: Vec<Vec<bool>> = (0..nc)
        .map(|origin| simulate_from_origin(nc, nt, room_at, origin)[t6].clone())
        .collect();

    let mut groups: HashMap<Vec<bool>, Vec<usize>> = HashMap::new();
    for (origin, set) in time6_sets.iter().enumerate() {
        groups.entry(set.clone()).or_default().push(origin);
    }
    let unique_origins: Vec<usize> = groups.values().filter(|v| v.len() == 1).flatten().copied().collect();
    let candidates = if unique_origins.is_empty() {
        (0..nc).collect::<Vec<_>>()
    } else {
        unique_origins
    };

    let mut rng = ScenarioRng::new(resolved_seed);
    let chosen = *rng.choose(&candidates).expect("at least one character exists");
    let chosen_set = &time6_sets[chosen];
    let possible_origins: Vec<String> = (0..nc)
        .filter(|&o| &time6_sets[o] == chosen_set)
        .map(|o| cfg.chars[o].clone())
        .collect();

    let mut cursed_at_time6_by_origin = HashMap::new();
    for origin in 0..nc {
        let cursed: Vec<String> = (0..nc)
            .filter(|&c| time6_sets[origin][c])
            .map(|c| cfg.chars[c].clone())
            .collect();
        cursed_at_time6_by_origin.insert(cfg.chars[origin].clone(), cursed);
    }

    CurseFacts {
        origin: cfg.chars[chosen].clone(),
        possible_origins,
        cursed_at_time6_by_origin,
    }
}
