//! Glue Room: records each character's first entry into the trap room.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::Configuration;
use crate::graph::Graph;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlueRoomFacts {
    pub glue_room: String,
    pub first_entry: HashMap<String, usize>,
}

pub fn decode(cfg: &Configuration, graph: &Graph, glue_room: usize, room_at: &[Vec<usize>]) -> GlueRoomFacts {
    let nc = cfg.chars.len();
    let nt = cfg.t;
    let mut first_entry = HashMap::new();
    for c in 0..nc {
        for t in 0..nt {
            if room_at[c][t] == glue_room {
                first_entry.insert(cfg.chars[c].clone(), t);
                break;
            }
        }
    }
    GlueRoomFacts {
        glue_room: graph.rooms[glue_room].clone(),
        first_entry,
    }
}
