//! Contagion timeline: transitive-closure infection spread through
//! shared rooms, starting from the contagious room.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::Configuration;
use crate::graph::Graph;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContagionFacts {
    pub contagious_room: String,
    pub infection_order: Vec<String>,
    pub infection_times: HashMap<String, usize>,
    pub newly_infected_by_time: Vec<Vec<String>>,
    pub never_infected: Vec<String>,
}

pub fn simulate(cfg: &Configuration, graph: &Graph, contagious_room: usize, room_at: &[Vec<usize>]) -> ContagionFacts {
    let nc = cfg.chars.len();
    let nt = cfg.t;
    let mut infected = vec![false; nc];
    let mut infection_time = vec![None; nc];
    let mut newly_infected_by_time = Vec::with_capacity(nt);

    for t in 0..nt {
        // Anyone in the contagious room is infected.
        for c in 0..nc {
            if room_at[c][t] == contagious_room {
                infected[c] = true;
            }
        }
        // Every room with at least one infected occupant infects everyone there.
        let mut by_room: HashMap<usize, Vec<usize>> = HashMap::new();
        for c in 0..nc {
            by_room.entry(room_at[c][t]).or_default().push(c);
        }
        for occupants in by_room.values() {
            if occupants.iter().any(|&c| infected[c]) {
                for &c in occupants {
                    infected[c] = true;
                }
            }
        }
        let mut newly = Vec::new();
        for c in 0..nc {
            if infected[c] && infection_time[c].is_none() {
                infection_time[c] = Some(t);
                newly.push(cfg.chars[c].clone());
            }
        }
        newly.sort();
        newly_infected_by_time.push(newly);
    }

    let mut infection_times = HashMap::new();
    let mut order: Vec<(usize, usize, String)> = Vec::new();
    let mut never_infected = Vec::new();
    for c in 0..nc {
        match infection_time[c] {
            Some(t) => {
                infection_times.insert(cfg.chars[c].clone(), t);
                order.push((t, c, cfg.chars[c].clone()));
            }
            None => never_infected.push(cfg.chars[c].clone()),
        }
    }
    order.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.cmp(&b.2)));
    let infection_order = order.into_iter().map(|(_, _, name)| name).collect();

    ContagionFacts {
        contagious_room: graph.rooms[contagious_room].clone(),
        infection_order,
        infection_times,
        newly_infected_by_time,
        never_infected,
    }
}
