//! Seeded, reproducible pseudo-random source.
//!
//! [`ScenarioRng`] is a small integer-hash PRNG (splitmix-style avalanche)
//! rather than a crate-provided algorithm, because its bit-exact output
//! for a given seed *is* the contract spec.md §5 pins down ("the same
//! `cfg` and `seed` must produce the same output on any platform"). It
//! implements [`RngCore`] so it plugs into `rand::seq::SliceRandom` the
//! same way `mapgen::random` drives its door shuffle with `StdRng`.

use rand_core::RngCore;

/// Deterministic 32-bit-seeded PRNG producing floats in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct ScenarioRng {
    state: u32,
}

impl ScenarioRng {
    pub fn new(seed: u32) -> Self {
        // Avoid the all-zero state, which would otherwise produce a
        // degenerate (but not incorrect) first output.
        Self {
            state: seed ^ 0x9e3779b9,
        }
    }

    fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e3779b9);
        let mut z = self.state;
        z = (z ^ (z >> 16)).wrapping_mul(0x85ebca6b);
        z = (z ^ (z >> 13)).wrapping_mul(0xc2b2ae35);
        z ^ (z >> 16)
    }

    /// Returns the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_raw() as f64) / (u32::MAX as f64 + 1.0)
    }

    /// Returns a uniformly random index in `0..n`, or `0` if `n == 0`.
    pub fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        (self.next_f64() * n as f64) as usize
    }

    /// Picks one element of `xs` uniformly at random.
    pub fn choose<'a, T>(&mut self, xs: &'a [T]) -> Option<&'a T> {
        if xs.is_empty() {
            None
        } else {
            xs.get(self.index(xs.len()))
        }
    }

    pub fn bool(&mut self, p_true: f64) -> bool {
        self.next_f64() < p_true
    }
}

impl RngCore for ScenarioRng {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_raw() as u64;
        let lo = self.next_raw() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }
}

/// Resolves an optional seed to a concrete 32-bit seed value, drawing
/// from OS randomness when absent. The resolved seed is always surfaced
/// back to the caller (see [`crate::solve::SolveOutput::meta`]).
pub fn resolve_seed(seed: Option<u64>) -> u32 {
    match seed {
        Some(s) => s as u32,
        None => rand::random::<u32>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_stream() {
        let mut a = ScenarioRng::new(42);
        let mut b = ScenarioRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ScenarioRng::new(1);
        let mut b = ScenarioRng::new(2);
        let seq_a: Vec<f64> = (0..10).map(|_| a.next_f64()).collect();
        let seq_b: Vec<f64> = (0..10).map(|_| b.next_f64()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn values_in_unit_interval() {
        let mut rng = ScenarioRng::new(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn resolve_seed_is_stable_when_present() {
        assert_eq!(resolve_seed(Some(123)), 123);
    }
}
