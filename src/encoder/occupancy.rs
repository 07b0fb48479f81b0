//! Shared Tseitin indicators over room occupancy: "exactly k people in
//! room r at time t", "characters c1 and c2 share a room at time t", and
//! the direct (indicator-free) "never co-locate" clause shape used by
//! S2/S5/S6.

use super::EncCtx;
use crate::cardinality::totalizer;

/// The occupant literals of room `r` at time `t`.
pub fn occupants(ctx: &EncCtx, t: usize, r: usize) -> Vec<i32> {
    (0..ctx.n_chars()).map(|c| ctx.x[c][t][r]).collect()
}

/// Tseitin indicator: exactly `k` occupants in room `r` at time `t`.
/// Built from a totalizer over that room's occupant literals.
pub fn exactly_k(ctx: &mut EncCtx, path: &str, t: usize, r: usize, k: usize) -> i32 {
    let inputs = occupants(ctx, t, r);
    let n = inputs.len();
    if k == 0 {
        return if n == 0 {
            ctx.true_lit()
        } else {
            let outs = totalizer(&mut ctx.pool, &mut ctx.cnf, &format!("{path}:cnt:t{t}:r{r}"), &inputs);
            -outs[0]
        };
    }
    if k > n {
        return ctx.false_lit();
    }
    let outs = totalizer(&mut ctx.pool, &mut ctx.cnf, &format!("{path}:cnt:t{t}:r{r}"), &inputs);
    let at_least_k = outs[k - 1];
    if k == n {
        return at_least_k;
    }
    let at_least_k1 = outs[k];
    let eq = ctx.pool.get(format!("{path}:eq{k}:t{t}:r{r}")) as i32;
    ctx.cnf.add(vec![-eq, at_least_k]);
    ctx.cnf.add(vec![-eq, -at_least_k1]);
    ctx.cnf.add(vec![eq, -at_least_k, at_least_k1]);
    eq
}

/// Tseitin indicator: characters `c1` and `c2` (room-unaware) share a
/// room at time `t`. `OR_r (x[c1][t][r] ∧ x[c2][t][r])`.
pub fn pair_meets_at(ctx: &mut EncCtx, path: &str, c1: usize, c2: usize, t: usize) -> i32 {
    let meet = ctx.pool.get(format!("{path}:meet:c{c1}_{c2}:t{t}")) as i32;
    let mut per_room = Vec::with_capacity(ctx.n_rooms());
    for r in 0..ctx.n_rooms() {
        let x1 = ctx.x[c1][t][r];
        let x2 = ctx.x[c2][t][r];
        let pair = ctx.pool.get(format!("{path}:meetroom:c{c1}_{c2}:t{t}:r{r}")) as i32;
        ctx.cnf.add(vec![-pair, x1]);
        ctx.cnf.add(vec![-pair, x2]);
        ctx.cnf.add(vec![pair, -x1, -x2]);
        ctx.cnf.add(vec![-pair, meet]);
        per_room.push(pair);
    }
    let mut reverse = vec![-meet];
    reverse.extend(per_room);
    ctx.cnf.add(reverse);
    meet
}

/// Emits the direct (no indicator needed) clauses forbidding `c1` and
/// `c2` from ever sharing a room, each gated on `guards` (role selector
/// literals that must all hold for the prohibition to apply — empty for
/// an unconditional prohibition).
pub fn forbid_colocation(ctx: &mut EncCtx, c1: usize, c2: usize, guards: &[i32]) {
    for t in 0..ctx.t() {
        for r in 0..ctx.n_rooms() {
            let mut clause: Vec<i32> = guards.iter().map(|&g| -g).collect();
            clause.push(-ctx.x[c1][t][r]);
            clause.push(-ctx.x[c2][t][r]);
            ctx.cnf.add(clause);
        }
    }
}

/// Tseitin OR: a fresh literal equivalent to `lits[0] ∨ lits[1] ∨ ...`.
pub fn tseitin_or(ctx: &mut EncCtx, name: String, lits: &[i32]) -> i32 {
    let ind = ctx.pool.get(name) as i32;
    for &l in lits {
        ctx.cnf.add(vec![-l, ind]);
    }
    let mut clause = vec![-ind];
    clause.extend(lits.iter().copied());
    ctx.cnf.add(clause);
    ind
}

/// Tseitin AND: a fresh literal equivalent to `lits[0] ∧ lits[1] ∧ ...`.
pub fn tseitin_and(ctx: &mut EncCtx, name: String, lits: &[i32]) -> i32 {
    let ind = ctx.pool.get(name) as i32;
    for &l in lits {
        ctx.cnf.add(vec![-ind, l]);
    }
    let mut clause = vec![ind];
    for &l in lits {
        clause.push(-l);
    }
    ctx.cnf.add(clause);
    ind
}

/// Indicator that whichever character holds the role encoded by
/// `role_vars` (a one-per-character selector array) is present in room
/// `r` at time `t`.
pub fn role_present_at(ctx: &mut EncCtx, path: &str, role_vars: &[i32], t: usize, r: usize) -> i32 {
    let mut per_c = Vec::with_capacity(role_vars.len());
    for (c, &role_var) in role_vars.iter().enumerate() {
        let pair = tseitin_and(
            ctx,
            format!("{path}:rolepair:c{c}:t{t}:r{r}"),
            &[ctx.x[c][t][r], role_var],
        );
        per_c.push(pair);
    }
    tseitin_or(ctx, format!("{path}:rolepresent:t{t}:r{r}"), &per_c)
}

/// `eq2[t][r]` = the Tseitin indicator for "exactly two occupants in
/// room `r` at time `t`". Shared by S4 and S7, whose "the two occupants
/// are the distinguished pair" clauses both hinge on this shape.
pub fn eq2_matrix(ctx: &mut EncCtx, path: &str) -> Vec<Vec<i32>> {
    let nt = ctx.t();
    let nr = ctx.n_rooms();
    let mut out = vec![vec![0i32; nr]; nt];
    for t in 0..nt {
        for r in 0..nr {
            out[t][r] = exactly_k(ctx, path, t, r, 2);
        }
    }
    out
}
