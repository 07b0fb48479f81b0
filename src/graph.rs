//! The room graph: an ordered room list plus undirected adjacency.
//!
//! Grounded on the adjacency-list construction in the teacher's
//! `src/mapgen/random.rs::generate_as_vec`, generalized from a fixed
//! 6-regular door layout to a plain variable-degree undirected graph.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct Graph {
    pub rooms: Vec<String>,
    room_index: FxHashMap<String, usize>,
    adj: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(rooms: Vec<String>, edges: &[(String, String)]) -> Self {
        let room_index: FxHashMap<String, usize> = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.clone(), i))
            .collect();
        let mut adj = vec![Vec::new(); rooms.len()];
        for (a, b) in edges {
            if let (Some(&ia), Some(&ib)) = (room_index.get(a), room_index.get(b)) {
                if !adj[ia].contains(&ib) {
                    adj[ia].push(ib);
                }
                if ia != ib && !adj[ib].contains(&ia) {
                    adj[ib].push(ia);
                }
            }
        }
        Self {
            rooms,
            room_index,
            adj,
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn index_of(&self, room: &str) -> Option<usize> {
        self.room_index.get(room).copied()
    }

    /// Neighbors of `room`, not including `room` itself unless a
    /// self-loop edge was explicitly given.
    pub fn neighbors(&self, room_idx: usize) -> &[usize] {
        &self.adj[room_idx]
    }

    /// The alphabetically first room name, used by several scenarios
    /// (S3, S10, S11, S12) to pick a distinguished room deterministically.
    pub fn alphabetically_first_room(&self) -> &str {
        self.rooms
            .iter()
            .min()
            .expect("graph must have at least one room")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        let rooms = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let edges = vec![
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string()),
        ];
        Graph::new(rooms, &edges)
    }

    #[test]
    fn adjacency_is_undirected() {
        let g = graph();
        let a = g.index_of("A").unwrap();
        let b = g.index_of("B").unwrap();
        assert!(g.neighbors(a).contains(&b));
        assert!(g.neighbors(b).contains(&a));
    }

    #[test]
    fn alphabetically_first_room() {
        let g = graph();
        assert_eq!(g.alphabetically_first_room(), "A");
    }
}
