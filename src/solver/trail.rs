//! Trail-based backtracking avoids copying the whole assignment: each
//! entry records the variable that was assigned plus the list of
//! `(clause, prev_satisfied, prev_unassigned_count)` edits `assign` made,
//! to be undone in LIFO order on backtrack. Edits reference clauses by
//! index and must never be replayed out of order — see
//! `Solver::backtrack_to`.

pub(super) struct TrailEntry {
    pub var: usize,
    pub edits: Vec<(usize, bool, u32)>,
}
