//! Chronological DPLL with two-watched-literal unit propagation, VSIDS-style
//! activity branching, seeded tie-breaks, and a wall-clock timeout.
//!
//! Field layout is grounded on the MiniSat-style `Solver` struct in
//! `examples/other_examples/af322a98_Bronsa-batsat__ratsat-src-core.rs.rs`
//! (`trail`, `watches`, `activity`, `var_inc`/`qhead`); the two-watched-
//! literal propagation edge cases (watcher movement, skip-if-satisfied,
//! conflict-at-last-literal, trail-leak-on-backtrack) are grounded on
//! `examples/other_examples/9405f9b5_taiocean1213-cnf-dpll-2wl__tests-integration_tests.rs.rs`.
//! The exact branching/activity/timeout contract (seeded tie-breaks within
//! `1e-12`, the `1/0.95` activity growth, the `1e50` rescale threshold,
//! chronological rather than CDCL backtracking) follows this project's own
//! specification rather than either reference, since it is more specific
//! than both.

mod clause;
mod trail;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use clause::ClauseState;
use trail::TrailEntry;
use tracing::{debug, trace};

use crate::rng::ScenarioRng;

const ACTIVITY_TIE_EPS: f64 = 1e-12;
const ACTIVITY_GROWTH: f64 = 1.0 / 0.95;
const ACTIVITY_RESCALE_THRESHOLD: f64 = 1e50;
const ACTIVITY_RESCALE_FACTOR: f64 = 1e-50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Sat,
    Unsat,
    Timeout,
}

/// A DPLL solver instance over a fixed CNF. One instance is built and
/// consumed per `solve_and_decode` call; nothing is shared across solves.
pub struct Solver {
    clauses: Vec<ClauseState>,
    /// `occurs[lit_index]` lists every clause containing that literal —
    /// used only to maintain `satisfied`/`unassigned_count` bookkeeping
    /// for the cheap `unresolved == 0` termination check.
    occurs: Vec<Vec<usize>>,
    /// `watches[lit_index]` lists clauses currently watching that literal
    /// for two-watched-literal propagation.
    watches: Vec<Vec<usize>>,
    assigns: Vec<Option<bool>>,
    activity: Vec<f64>,
    activity_inc: f64,
    trail: Vec<TrailEntry>,
    unresolved: usize,
    num_vars: usize,
    rng: ScenarioRng,
    conflicts: u64,
    decisions: u64,
    /// Set when `raw_clauses` contained an empty clause — an explicit
    /// UNSAT signal (spec §3), e.g. from `cardinality::at_least_k` when
    /// `k` exceeds the literal count. Checked up front so `solve` never
    /// has to index `lits[w0]` on an empty clause.
    trivially_unsat: bool,
}

pub struct Stats {
    pub conflicts: u64,
    pub decisions: u64,
}

impl Solver {
    pub fn new(raw_clauses: Vec<Vec<i32>>, num_vars: u32, solver_seed: u32) -> Self {
        let num_vars = num_vars as usize;
        let mut clauses: Vec<ClauseState> = raw_clauses.into_iter().map(ClauseState::new).collect();
        let trivially_unsat = clauses.iter().any(|c| c.lits.is_empty());
        let mut occurs = vec![Vec::new(); 2 * num_vars];
        let mut watches = vec![Vec::new(); 2 * num_vars];
        if !trivially_unsat {
            for (ci, c) in clauses.iter_mut().enumerate() {
                for &lit in &c.lits {
                    occurs[Self::lit_index(lit, num_vars)].push(ci);
                }
                watches[Self::lit_index(c.lits[c.w0], num_vars)].push(ci);
                if c.w1 != c.w0 {
                    watches[Self::lit_index(c.lits[c.w1], num_vars)].push(ci);
                }
            }
        }
        let unresolved = clauses.iter().filter(|c| !c.satisfied).count();
        Self {
            clauses,
            occurs,
            watches,
            assigns: vec![None; num_vars + 1],
            activity: vec![0.0; num_vars + 1],
            activity_inc: 1.0,
            trail: Vec::new(),
            unresolved,
            num_vars,
            rng: ScenarioRng::new(solver_seed),
            conflicts: 0,
            decisions: 0,
            trivially_unsat,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            conflicts: self.conflicts,
            decisions: self.decisions,
        }
    }

    fn lit_index(lit: i32, num_vars: usize) -> usize {
        debug_assert!(lit != 0);
        let var = lit.unsigned_abs() as usize;
        debug_assert!(var <= num_vars);
        if lit > 0 {
            (var - 1) * 2
        } else {
            (var - 1) * 2 + 1
        }
    }

    fn value_of(&self, lit: i32) -> Option<bool> {
        let var = lit.unsigned_abs() as usize;
        self.assigns[var].map(|v| if lit > 0 { v } else { !v })
    }

    /// Runs the search to completion, UNSAT, or timeout. Returns the
    /// satisfying assignment (1-indexed by variable, `result[v-1]`) with
    /// any variable left unassigned treated as `false`, or `None` for
    /// UNSAT/timeout/internal-invariant-violation (spec taxon 2 and 3 are
    /// indistinguishable to the caller, by design — both are "no result").
    pub fn solve(&mut self, timeout_ms: u64) -> Option<Vec<bool>> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        debug!(num_vars = self.num_vars, clauses = self.clauses.len(), "solve start");

        if self.trivially_unsat {
            debug!("empty clause present — UNSAT by construction");
            return None;
        }

        // Seed the propagation queue with every original unit clause.
        let units: Vec<i32> = self
            .clauses
            .iter()
            .filter(|c| c.lits.len() == 1)
            .map(|c| c.lits[0])
            .collect();
        for lit in units {
            match self.value_of(lit) {
                Some(false) => {
                    debug!("conflicting unit clauses at init");
                    return None;
                }
                Some(true) => {}
                None => {
                    if !self.enqueue_and_propagate(lit) {
                        debug!("initial unit propagation failed");
                        return None;
                    }
                }
            }
        }

        match self.dfs(&deadline) {
            Outcome::Sat => {}
            Outcome::Unsat => {
                debug!("UNSAT");
                return None;
            }
            Outcome::Timeout => {
                debug!(timeout_ms, "solver timed out");
                return None;
            }
        }

        if !self.verify_all_clauses_satisfied() {
            debug!("final verification failed — encoder bug guarded against");
            return None;
        }
        Some(self.final_assignment())
    }

    fn dfs(&mut self, deadline: &Instant) -> Outcome {
        if Instant::now() >= *deadline {
            return Outcome::Timeout;
        }
        if self.unresolved == 0 {
            return Outcome::Sat;
        }
        let Some((var, polarity)) = self.pick_branch_var() else {
            // No unassigned variable left but some clause unresolved:
            // the bookkeeping and the watch-driven propagation disagree,
            // which can only mean an encoder bug. Treat as UNSAT at this
            // branch; the final verification pass catches it for sure.
            return Outcome::Unsat;
        };
        self.decisions += 1;

        for &try_true in &[polarity, !polarity] {
            let mark = self.trail.len();
            let lit = if try_true { var as i32 } else { -(var as i32) };
            trace!(var, try_true, "branch");
            let propagated_ok = self.enqueue_and_propagate(lit);
            if propagated_ok {
                match self.dfs(deadline) {
                    Outcome::Sat => return Outcome::Sat,
                    Outcome::Timeout => return Outcome::Timeout,
                    Outcome::Unsat => self.backtrack_to(mark),
                }
            } else {
                self.conflicts += 1;
                self.backtrack_to(mark);
            }
        }
        Outcome::Unsat
    }

    /// Highest-activity unassigned variable; ties within [`ACTIVITY_TIE_EPS`]
    /// broken by a coin flip, polarity chosen uniformly at random.
    fn pick_branch_var(&mut self) -> Option<(usize, bool)> {
        let mut best: Option<(usize, f64)> = None;
        for v in 1..=self.num_vars {
            if self.assigns[v].is_some() {
                continue;
            }
            let act = self.activity[v];
            best = match best {
                None => Some((v, act)),
                Some((best_var, best_act)) => {
                    if act > best_act + ACTIVITY_TIE_EPS {
                        Some((v, act))
                    } else if (act - best_act).abs() <= ACTIVITY_TIE_EPS {
                        if self.rng.bool(0.5) {
                            Some((v, act))
                        } else {
                            Some((best_var, best_act))
                        }
                    } else {
                        Some((best_var, best_act))
                    }
                }
            };
        }
        let (var, _) = best?;
        Some((var, self.rng.bool(0.5)))
    }

    /// Assigns `lit` true and drives unit propagation to a fixed point.
    /// Returns `false` on conflict (caller must backtrack to its mark).
    fn enqueue_and_propagate(&mut self, lit: i32) -> bool {
        let mut queue = VecDeque::new();
        queue.push_back(lit);
        while let Some(l) = queue.pop_front() {
            let var = l.unsigned_abs() as usize;
            match self.assigns[var] {
                Some(v) => {
                    if v != (l > 0) {
                        return false;
                    }
                }
                None => {
                    self.assign(var, l > 0);
                    if !self.propagate_false_literal(-l, &mut queue) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn assign(&mut self, var: usize, value: bool) {
        self.assigns[var] = Some(value);
        let lit_true = if value { var as i32 } else { -(var as i32) };
        let lit_false = -lit_true;
        let mut edits = Vec::new();

        for &ci in &self.occurs[Self::lit_index(lit_true, self.num_vars)] {
            let c = &mut self.clauses[ci];
            let prev_sat = c.satisfied;
            let prev_cnt = c.unassigned_count;
            if !c.satisfied {
                c.satisfied = true;
                self.unresolved -= 1;
            }
            edits.push((ci, prev_sat, prev_cnt));
        }
        for &ci in &self.occurs[Self::lit_index(lit_false, self.num_vars)] {
            let c = &mut self.clauses[ci];
            let prev_sat = c.satisfied;
            let prev_cnt = c.unassigned_count;
            c.unassigned_count = c.unassigned_count.saturating_sub(1);
            edits.push((ci, prev_sat, prev_cnt));
        }

        self.trail.push(TrailEntry { var, edits });
    }

    /// Walks the watch list of `neg_lit` (which just became false),
    /// retargeting watches or discovering forced units/conflicts.
    fn propagate_false_literal(&mut self, neg_lit: i32, queue: &mut VecDeque<i32>) -> bool {
        let idx = Self::lit_index(neg_lit, self.num_vars);
        let watch_list = std::mem::take(&mut self.watches[idx]);
        let mut remaining = Vec::with_capacity(watch_list.len());
        let mut conflict = false;

        for ci in watch_list {
            if conflict {
                remaining.push(ci);
                continue;
            }
            if self.retarget_or_resolve(ci, neg_lit, queue, &mut conflict) {
                // watch moved elsewhere; drop from this list
            } else {
                remaining.push(ci);
            }
        }
        self.watches[idx] = remaining;
        !conflict
    }

    /// Returns `true` iff clause `ci`'s watch moved away from `neg_lit`.
    fn retarget_or_resolve(
        &mut self,
        ci: usize,
        neg_lit: i32,
        queue: &mut VecDeque<i32>,
        conflict: &mut bool,
    ) -> bool {
        let (this_pos, other_pos) = {
            let c = &self.clauses[ci];
            if c.lits[c.w0] == neg_lit {
                (c.w0, c.w1)
            } else {
                (c.w1, c.w0)
            }
        };
        let other_lit = self.clauses[ci].lits[other_pos];

        if self.value_of(other_lit) == Some(true) {
            return false; // clause already satisfied by the other watch
        }

        let len = self.clauses[ci].lits.len();
        let mut replacement = None;
        for i in 0..len {
            if i == this_pos || i == other_pos {
                continue;
            }
            let lit = self.clauses[ci].lits[i];
            if self.value_of(lit) != Some(false) {
                replacement = Some(i);
                break;
            }
        }

        if let Some(new_pos) = replacement {
            let c = &mut self.clauses[ci];
            if this_pos == c.w0 {
                c.w0 = new_pos;
            } else {
                c.w1 = new_pos;
            }
            let new_lit = c.lits[new_pos];
            self.watches[Self::lit_index(new_lit, self.num_vars)].push(ci);
            return true;
        }

        match self.value_of(other_lit) {
            None => {
                self.bump_clause_activity(ci);
                queue.push_back(other_lit);
                false
            }
            Some(false) => {
                self.bump_clause_activity(ci);
                *conflict = true;
                false
            }
            Some(true) => unreachable!("handled above"),
        }
    }

    fn bump_clause_activity(&mut self, ci: usize) {
        let lits = self.clauses[ci].lits.clone();
        for lit in lits {
            let var = lit.unsigned_abs() as usize;
            self.activity[var] += self.activity_inc;
        }
        self.activity_inc *= ACTIVITY_GROWTH;
        if self.activity_inc > ACTIVITY_RESCALE_THRESHOLD {
            for a in self.activity.iter_mut() {
                *a *= ACTIVITY_RESCALE_FACTOR;
            }
            self.activity_inc *= ACTIVITY_RESCALE_FACTOR;
        }
    }

    fn backtrack_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let entry = self.trail.pop().unwrap();
            for &(ci, prev_sat, prev_cnt) in entry.edits.iter().rev() {
                let c = &mut self.clauses[ci];
                if c.satisfied && !prev_sat {
                    self.unresolved += 1;
                }
                c.satisfied = prev_sat;
                c.unassigned_count = prev_cnt;
            }
            self.assigns[entry.var] = None;
        }
    }

    fn verify_all_clauses_satisfied(&self) -> bool {
        self.clauses.iter().all(|c| {
            c.lits
                .iter()
                .any(|&lit| self.value_of(lit) == Some(true))
        })
    }

    fn final_assignment(&self) -> Vec<bool> {
        (1..=self.num_vars).map(|v| self.assigns[v].unwrap_or(false)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(clauses: Vec<Vec<i32>>, num_vars: u32) -> Option<Vec<bool>> {
        Solver::new(clauses, num_vars, 1).solve(5_000)
    }

    fn check(clauses: &[Vec<i32>], assignment: &[bool]) -> bool {
        clauses.iter().all(|c| {
            c.iter()
                .any(|&lit| {
                    let var = lit.unsigned_abs() as usize;
                    let val = assignment[var - 1];
                    if lit > 0 { val } else { !val }
                })
        })
    }

    #[test]
    fn empty_formula_is_sat() {
        assert!(solve(vec![], 0).is_some());
    }

    #[test]
    fn unit_clauses() {
        let a = solve(vec![vec![1], vec![-2]], 2).unwrap();
        assert!(a[0]);
        assert!(!a[1]);
    }

    #[test]
    fn contradictory_units_are_unsat() {
        assert!(solve(vec![vec![1], vec![-1]], 1).is_none());
    }

    #[test]
    fn empty_clause_is_unsat_without_panicking() {
        // e.g. `cardinality::at_least_k` emits `vec![]` when k exceeds the
        // literal count; the solver must report UNSAT, never index into it.
        assert!(solve(vec![vec![1], vec![]], 1).is_none());
        assert!(solve(vec![vec![]], 0).is_none());
    }

    #[test]
    fn simple_propagation() {
        let a = solve(vec![vec![1, 2], vec![-1, 3], vec![-2, -3]], 3).unwrap();
        assert!(check(&[vec![1, 2], vec![-1, 3], vec![-2, -3]], &a));
    }

    #[test]
    fn pigeonhole_two_into_one_is_unsat() {
        // two pigeons (1,2) forced into the same hole, which must hold
        // at most one: UNSAT.
        assert!(solve(vec![vec![1], vec![2], vec![-1, -2]], 2).is_none());
    }

    #[test]
    fn long_clause_two_watched_literal_chain() {
        let clauses = vec![vec![1, 2, 3, 4, 5], vec![-5], vec![-4], vec![-3], vec![-1]];
        let a = solve(clauses.clone(), 5).unwrap();
        assert!(check(&clauses, &a));
        assert!(a[1]); // variable 2 forced true
    }

    #[test]
    fn watcher_survives_backtrack_without_leaking_state() {
        // (1 or 2) and (-1 or 3) and (-3): 3 is forced false, then 1=true
        // forces 3=true via (-1 or 3), conflicting with (-3); must
        // backtrack to 1=false, which forces 2=true via (1 or 2).
        let clauses = vec![vec![1, 2], vec![-1, 3], vec![-3]];
        let a = solve(clauses.clone(), 3).unwrap();
        assert!(check(&clauses, &a));
        assert!(!a[0]);
        assert!(a[1]);
        assert!(!a[2]);
    }

    #[test]
    fn deterministic_given_same_seed() {
        let clauses = vec![
            vec![1, 2, 3],
            vec![-1, 4],
            vec![-2, -4, 5],
            vec![-5],
            vec![-3, 6],
        ];
        let a = Solver::new(clauses.clone(), 6, 42).solve(5_000).unwrap();
        let b = Solver::new(clauses, 6, 42).solve(5_000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn timeout_returns_none_without_panicking() {
        // A moderately large formula with a zero-millisecond budget
        // should bail out via the timeout path rather than ever running
        // the search.
        let mut clauses = vec![];
        for i in 1..=20 {
            clauses.push(vec![i, i + 1]);
        }
        assert!(Solver::new(clauses, 21, 1).solve(0).is_none());
    }
}
