//! Random room-graph generation.
//!
//! Generalized from the teacher's 6-regular door-matching generator
//! (`generate_as_api_map`'s door-shuffle) to a plain connected undirected
//! graph: a random spanning tree (one random-prior-node attach per room,
//! guaranteeing connectivity) plus a handful of extra random edges for
//! texture, rendered in the Mermaid-like text `parser::parse_map` reads.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Extra edges added on top of the spanning tree, as a fraction of
/// `n_rooms` (rounded). `0.5` means roughly one extra edge per two rooms.
const DEFAULT_EXTRA_EDGE_FACTOR: f64 = 0.5;

/// Generates `n_rooms` connected by a random spanning tree plus a few
/// extra random edges. Room names are `Room0..RoomN-1`.
pub fn generate_rooms_and_edges(n_rooms: usize, seed: Option<u64>) -> (Vec<String>, Vec<(String, String)>) {
    generate_rooms_and_edges_with_density(n_rooms, seed, DEFAULT_EXTRA_EDGE_FACTOR)
}

pub fn generate_rooms_and_edges_with_density(
    n_rooms: usize,
    seed: Option<u64>,
    extra_edge_factor: f64,
) -> (Vec<String>, Vec<(String, String)>) {
    let mut rng = match seed {
        Some(s) => rand::rngs::StdRng::seed_from_u64(s),
        None => rand::rngs::StdRng::from_os_rng(),
    };

    let rooms: Vec<String> = (0..n_rooms).map(|i| format!("Room{i}")).collect();
    if n_rooms < 2 {
        return (rooms, Vec::new());
    }

    let mut order: Vec<usize> = (0..n_rooms).collect();
    order.shuffle(&mut rng);

    let mut seen_edges: HashSet<(usize, usize)> = HashSet::new();
    let mut edges = Vec::new();
    let mut push_edge = |a: usize, b: usize, edges: &mut Vec<(String, String)>, seen: &mut HashSet<(usize, usize)>| {
        let key = (a.min(b), a.max(b));
        if a != b && seen.insert(key) {
            edges.push((rooms[a].clone(), rooms[b].clone()));
        }
    };

    // Random spanning tree: each room (in shuffled order) attaches to a
    // uniformly chosen earlier room, guaranteeing the whole graph is
    // connected with exactly `n_rooms - 1` tree edges.
    for i in 1..order.len() {
        let a = order[i];
        let b = order[rng.random_range(0..i)];
        push_edge(a, b, &mut edges, &mut seen_edges);
    }

    // A handful of extra edges for texture beyond the bare tree.
    let extra = ((n_rooms as f64) * extra_edge_factor).round() as usize;
    let mut attempts = 0;
    while edges.len() < (n_rooms - 1) + extra && attempts < extra * 10 + 50 {
        attempts += 1;
        let a = rng.random_range(0..n_rooms);
        let b = rng.random_range(0..n_rooms);
        push_edge(a, b, &mut edges, &mut seen_edges);
    }

    (rooms, edges)
}

/// Renders `(rooms, edges)` as the Mermaid-like text `parser::parse_map`
/// consumes: a `graph TD` header followed by one `A --- B` line per edge.
pub fn render_mermaid(rooms: &[String], edges: &[(String, String)]) -> String {
    let mut out = String::from("graph TD\n");
    for room in rooms {
        if !edges.iter().any(|(a, b)| a == room || b == room) {
            out.push_str(&format!("{room}\n"));
        }
    }
    for (a, b) in edges {
        out.push_str(&format!("{a} --- {b}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};

    fn is_connected(rooms: &[String], edges: &[(String, String)]) -> bool {
        let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
        for room in rooms {
            adj.entry(room).or_default();
        }
        for (a, b) in edges {
            adj.entry(a.as_str()).or_default().push(b.as_str());
            adj.entry(b.as_str()).or_default().push(a.as_str());
        }
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        if let Some(start) = rooms.first() {
            queue.push_back(start.as_str());
            visited.insert(start.as_str());
        }
        while let Some(r) = queue.pop_front() {
            for &n in &adj[r] {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        visited.len() == rooms.len()
    }

    #[test]
    fn generated_graph_is_connected() {
        let (rooms, edges) = generate_rooms_and_edges(12, Some(7));
        assert_eq!(rooms.len(), 12);
        assert!(edges.len() >= 11);
        assert!(is_connected(&rooms, &edges));
    }

    #[test]
    fn deterministic_under_seed() {
        let (r1, e1) = generate_rooms_and_edges(8, Some(42));
        let (r2, e2) = generate_rooms_and_edges(8, Some(42));
        assert_eq!(r1, r2);
        assert_eq!(e1, e2);
    }

    #[test]
    fn render_round_trips_through_parser() {
        let (rooms, edges) = generate_rooms_and_edges(6, Some(3));
        let text = render_mermaid(&rooms, &edges);
        let (parsed_rooms, parsed_edges) = crate::parser::parse_map(&text);
        let mut expected: Vec<String> = rooms.clone();
        expected.sort();
        let mut got = parsed_rooms.clone();
        got.sort();
        assert_eq!(expected, got);
        assert_eq!(parsed_edges.len(), edges.len());
    }
}
