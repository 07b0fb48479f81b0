//! Singer's Jewels: the jewel passes hands every time its current
//! holder is alone with exactly one other character.

use serde::Serialize;

use crate::config::Configuration;
use crate::graph::Graph;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JewelPass {
    pub from: String,
    pub to: String,
    pub time: usize,
    pub room: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingersJewelsFacts {
    pub jewel_room: String,
    pub first_thief: Option<String>,
    pub passes: Vec<JewelPass>,
    pub final_holder: Option<String>,
}

pub fn decode(cfg: &Configuration, graph: &Graph, jewel_room: usize, room_at: &[Vec<usize>]) -> SingersJewelsFacts {
    let nc = cfg.chars.len();
    let nt = cfg.t;

    let mut holder: Option<usize> = None;
    let mut first_thief = None;
    let mut passes = Vec::new();

    for t in 0..nt {
        let occupants: Vec<usize> = (0..nc).filter(|&c| room_at[c][t] == jewel_room).collect();
        if holder.is_none() && occupants.len() == 1 {
            holder = Some(occupants[0]);
            first_thief = Some(cfg.chars[occupants[0]].clone());
            continue;
        }
        if let Some(h) = holder {
            let companions: Vec<usize> = (0..nc)
                .filter(|&other| other != h && room_at[other][t] == room_at[h][t])
                .collect();
            if companions.len() == 1 {
                let new_holder = companions[0];
                passes.push(JewelPass {
                    from: cfg.chars[h].clone(),
                    to: cfg.chars[new_holder].clone(),
                    time: t,
                    room: graph.rooms[room_at[h][t]].clone(),
                });
                holder = Some(new_holder);
            }
        }
    }

    SingersJewelsFacts {
        jewel_room: graph.rooms[jewel_room].clone(),
        first_thief,
        passes,
        final_holder: holder.map(|h| cfg.chars[h].clone()),
    }
}
