//! Bijection between opaque string variable names and dense positive
//! variable IDs, allocated on first reference.
//!
//! IDs are issued `1, 2, 3, ...` strictly in the order `get` first sees
//! each distinct name, which makes the whole pool deterministic given a
//! deterministic sequence of encoder calls.

use rustc_hash::FxHashMap;

#[derive(Debug, Default, Clone)]
pub struct VarPool {
    ids: FxHashMap<String, u32>,
    names: Vec<String>,
}

impl VarPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ID for `name`, allocating a fresh one on first use.
    pub fn get(&mut self, name: impl Into<String>) -> u32 {
        let name = name.into();
        if let Some(&id) = self.ids.get(&name) {
            return id;
        }
        let id = (self.names.len() + 1) as u32;
        self.names.push(name.clone());
        self.ids.insert(name, id);
        id
    }

    /// Total number of distinct variables allocated so far.
    pub fn count(&self) -> u32 {
        self.names.len() as u32
    }

    /// Looks up the name behind a variable ID (1-based). Panics on an
    /// out-of-range ID, since IDs never move and every live ID was handed
    /// out by this pool.
    pub fn reverse(&self, id: u32) -> &str {
        &self.names[(id - 1) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_idempotent() {
        let mut pool = VarPool::new();
        let a = pool.get("X(alice,0,kitchen)");
        let b = pool.get("X(alice,0,kitchen)");
        assert_eq!(a, b);
        assert_eq!(pool.count(), 1);
    }

    #[test]
    fn ids_issued_in_order_from_one() {
        let mut pool = VarPool::new();
        assert_eq!(pool.get("a"), 1);
        assert_eq!(pool.get("b"), 2);
        assert_eq!(pool.get("a"), 1);
        assert_eq!(pool.get("c"), 3);
        assert_eq!(pool.count(), 3);
    }

    #[test]
    fn reverse_roundtrips() {
        let mut pool = VarPool::new();
        let id = pool.get("PH_alice");
        assert_eq!(pool.reverse(id), "PH_alice");
    }
}
