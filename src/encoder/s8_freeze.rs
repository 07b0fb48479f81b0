//! S8 Freeze: one seed-fixed freeze carrier. Whoever is caught alone
//! with the freeze at `(t, r)` is stuck in `r` from then on; staying
//! put is otherwise only legal for a character already stuck.

use super::occupancy::{eq2_matrix, role_present_at, tseitin_and, tseitin_or};
use super::EncCtx;
use crate::error::EncoderResult;

pub struct S8Keys {
    pub freeze: Vec<i32>,
    pub freeze_carrier: usize,
    pub required_kill_times: Vec<usize>,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S8Keys> {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let nr = ctx.n_rooms();

    let freeze: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s8:FRZ:{}", ctx.char_name(c))) as i32)
        .collect();
    let carrier = ctx.rng.index(nc);
    for (c, &v) in freeze.iter().enumerate() {
        ctx.cnf.add(vec![if c == carrier { v } else { -v }]);
    }

    let eq2 = eq2_matrix(ctx, "s8");
    let mut alone_with_freeze = vec![vec![0i32; nr]; nt];
    for t in 0..nt {
        for r in 0..nr {
            let freeze_present = role_present_at(ctx, "s8", &freeze, t, r);
            alone_with_freeze[t][r] = tseitin_and(
                ctx,
                format!("s8:alone:t{t}:r{r}"),
                &[eq2[t][r], freeze_present],
            );
        }
    }

    // Stuck-tracking per (character, room): a running OR of "caught
    // alone with the freeze here, at or before t".
    for c in 0..nc {
        for r in 0..nr {
            let mut stuck_so_far: Option<i32> = None;
            for t in 0..nt {
                let encounter = tseitin_and(
                    ctx,
                    format!("s8:encounter:c{c}:t{t}:r{r}"),
                    &[alone_with_freeze[t][r], ctx.x[c][t][r], -freeze[c]],
                );
                let stuck = match stuck_so_far {
                    None => encounter,
                    Some(prev) => tseitin_or(ctx, format!("s8:stuck:c{c}:t{t}:r{r}"), &[prev, encounter]),
                };
                if t + 1 < nt {
                    ctx.cnf.add(vec![-stuck, ctx.x[c][t + 1][r]]);
                }
                stuck_so_far = Some(stuck);
            }
        }
    }

    // Non-carrier characters may only repeat a room via the "stuck"
    // escape; the carrier itself is exempt.
    for c in 0..nc {
        for t in 0..nt.saturating_sub(1) {
            for r in 0..nr {
                let stuck = stuck_literal(ctx, c, t, r);
                ctx.cnf
                    .add(vec![-ctx.x[c][t][r], -ctx.x[c][t + 1][r], freeze[c], stuck]);
            }
        }
    }

    // A seeded subset of non-final timesteps must witness an
    // alone-with-the-freeze moment somewhere.
    let mut required_kill_times = Vec::new();
    for t in 0..nt.saturating_sub(1) {
        if ctx.rng.bool(0.5) {
            required_kill_times.push(t);
            ctx.cnf.add(alone_with_freeze[t].clone());
        }
    }

    Ok(S8Keys {
        freeze,
        freeze_carrier: carrier,
        required_kill_times,
    })
}

/// Re-derives the name of the `stuck` indicator already built above for
/// `(c, t, r)` — it always exists once the main loop has run because
/// every `(c, t, r)` triple gets a `stuck` var, even if it's wired
/// straight through from `encounter`.
fn stuck_literal(ctx: &mut EncCtx, c: usize, t: usize, r: usize) -> i32 {
    if t == 0 {
        ctx.pool.get(format!("s8:encounter:c{c}:t{t}:r{r}")) as i32
    } else {
        ctx.pool.get(format!("s8:stuck:c{c}:t{t}:r{r}")) as i32
    }
}
