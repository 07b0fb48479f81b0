//! S15 World Travelers: a seeded podium of three distinct visit-count
//! targets, pinned via totalizers over a per-room "ever visited"
//! helper; everyone else is capped below the bronze count.

use super::occupancy::tseitin_or;
use super::EncCtx;
use crate::cardinality::totalizer;
use crate::error::EncoderResult;
use rand::seq::SliceRandom;

pub struct S15Keys {
    /// Character indices in podium order: gold, silver, bronze.
    pub podium: Vec<usize>,
}

fn pin_visit_count(ctx: &mut EncCtx, c: usize, target: usize) {
    let nr = ctx.n_rooms();
    let nt = ctx.t();
    let visited: Vec<i32> = (0..nr)
        .map(|r| {
            let lits: Vec<i32> = (0..nt).map(|t| ctx.x[c][t][r]).collect();
            tseitin_or(ctx, format!("s15:visited:c{c}:r{r}"), &lits)
        })
        .collect();
    let outs = totalizer(&mut ctx.pool, &mut ctx.cnf, &format!("s15:count:c{c}"), &visited);
    if target >= 1 && target <= outs.len() {
        ctx.cnf.add(vec![outs[target - 1]]);
    }
    if target < outs.len() {
        ctx.cnf.add(vec![-outs[target]]);
    }
}

fn cap_visit_count(ctx: &mut EncCtx, c: usize, max: usize) {
    let nr = ctx.n_rooms();
    let nt = ctx.t();
    let visited: Vec<i32> = (0..nr)
        .map(|r| {
            let lits: Vec<i32> = (0..nt).map(|t| ctx.x[c][t][r]).collect();
            tseitin_or(ctx, format!("s15:visited:c{c}:r{r}"), &lits)
        })
        .collect();
    let outs = totalizer(&mut ctx.pool, &mut ctx.cnf, &format!("s15:count:c{c}"), &visited);
    if max < outs.len() {
        ctx.cnf.add(vec![-outs[max]]);
    }
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S15Keys> {
    let nc = ctx.n_chars();
    let nr = ctx.n_rooms();
    let nt = ctx.t();

    let mut order: Vec<usize> = (0..nc).collect();
    order.shuffle(&mut ctx.rng);
    let podium: Vec<usize> = order.into_iter().take(nc.min(3)).collect();

    let first = nr.min(nt);
    let second = 1.max(first.saturating_sub(1));
    let third = 1.max(first.saturating_sub(2));
    let targets = [first, second, third];

    for (rank, &c) in podium.iter().enumerate() {
        pin_visit_count(ctx, c, targets[rank]);
    }

    let bound = 1.max(third.saturating_sub(1));
    for c in 0..nc {
        if !podium.contains(&c) {
            cap_visit_count(ctx, c, bound);
        }
    }

    Ok(S15Keys { podium })
}
