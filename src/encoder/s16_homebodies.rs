//! S16 Homebodies: a descending, unique visit-count assignment per
//! character; the lowest-count character is the homebody (may stay
//! put), everyone else must move every step.

use super::occupancy::tseitin_or;
use super::EncCtx;
use crate::cardinality::totalizer;
use crate::error::EncoderResult;
use rand::seq::SliceRandom;

pub struct S16Keys {
    /// `(character index, assigned visit-count target)`, in descending order.
    pub ranks: Vec<(usize, usize)>,
    pub homebody: usize,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S16Keys> {
    let nc = ctx.n_chars();
    let nr = ctx.n_rooms();
    let nt = ctx.t();

    let mut order: Vec<usize> = (0..nc).collect();
    order.shuffle(&mut ctx.rng);

    // Capped by `nc` too, so the lowest-ranked character's target bottoms
    // out at exactly 1 (able to occupy one room for every timestep)
    // instead of stalling at `nr.min(nt)`.
    let base = nr.min(nt).min(nc);
    let ranks: Vec<(usize, usize)> = order
        .iter()
        .enumerate()
        .map(|(i, &c)| (c, 1.max(base.saturating_sub(i))))
        .collect();
    let homebody = ranks.last().map(|&(c, _)| c).unwrap_or(0);

    for &(c, target) in &ranks {
        let visited: Vec<i32> = (0..nr)
            .map(|r| {
                let lits: Vec<i32> = (0..nt).map(|t| ctx.x[c][t][r]).collect();
                tseitin_or(ctx, format!("s16:visited:c{c}:r{r}"), &lits)
            })
            .collect();
        let outs = totalizer(&mut ctx.pool, &mut ctx.cnf, &format!("s16:count:c{c}"), &visited);
        if target >= 1 && target <= outs.len() {
            ctx.cnf.add(vec![outs[target - 1]]);
        }
        if target < outs.len() {
            ctx.cnf.add(vec![-outs[target]]);
        }
    }

    for c in 0..nc {
        if c == homebody {
            continue;
        }
        for t in 0..nt.saturating_sub(1) {
            for r in 0..nr {
                ctx.cnf.add(vec![-ctx.x[c][t][r], -ctx.x[c][t + 1][r]]);
            }
        }
    }

    Ok(S16Keys { ranks, homebody })
}
