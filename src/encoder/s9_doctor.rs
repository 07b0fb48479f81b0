//! S9 Doctor's Cure: exactly one doctor, a disjoint frozen-at-start
//! set sized around `round(N·ratio)`. Frozen characters are stuck
//! until the doctor heals them by sharing their room; once healed,
//! they must leave their starting room by the final timestep.

use super::occupancy::{role_present_at, tseitin_and, tseitin_or};
use super::EncCtx;
use crate::cardinality::{exactly_one, totalizer};
use crate::error::EncoderResult;

pub struct S9Keys {
    pub doctor: Vec<i32>,
    pub frozen: Vec<i32>,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S9Keys> {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let nr = ctx.n_rooms();

    let doctor: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s9:DOC:{}", ctx.char_name(c))) as i32)
        .collect();
    exactly_one(&mut ctx.cnf, &doctor);

    let frozen: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s9:FROZ:{}", ctx.char_name(c))) as i32)
        .collect();
    for c in 0..nc {
        ctx.cnf.add(vec![-doctor[c], -frozen[c]]);
    }

    let ratio = ctx.cfg.scenarios.s9_frozen_ratio.unwrap_or(0.3);
    let target = (nc as f64 * ratio).round() as i64;
    let slack = (1.0f64).max((0.15 * nc as f64).round()) as i64;
    let lower = (target - slack).max(1).min(nc as i64) as usize;
    let upper = (target + slack).min((nc as i64 - 1).max(1)) as usize;

    let outs = totalizer(&mut ctx.pool, &mut ctx.cnf, "s9:frozencount", &frozen);
    if lower >= 1 && lower <= outs.len() {
        ctx.cnf.add(vec![outs[lower - 1]]);
    }
    if upper < outs.len() {
        ctx.cnf.add(vec![-outs[upper]]);
    }

    // Doctor presence at (t, r), and per-character heal encounters.
    let mut doc_present = vec![vec![0i32; nr]; nt];
    for t in 0..nt {
        for r in 0..nr {
            doc_present[t][r] = role_present_at(ctx, "s9", &doctor, t, r);
        }
    }

    let mut all_interior_heals = Vec::new();
    for c in 0..nc {
        let mut healed_so_far: Option<i32> = None;
        for t in 0..nt {
            let mut per_room = Vec::with_capacity(nr);
            for r in 0..nr {
                per_room.push(tseitin_and(
                    ctx,
                    format!("s9:healroom:c{c}:t{t}:r{r}"),
                    &[ctx.x[c][t][r], doc_present[t][r]],
                ));
            }
            let meets_doctor = tseitin_or(ctx, format!("s9:meetsdoc:c{c}:t{t}"), &per_room);
            let interior = t > 0 && t + 1 < nt;
            let encounter = tseitin_and(
                ctx,
                format!("s9:heal:c{c}:t{t}"),
                &[frozen[c], meets_doctor],
            );
            if interior {
                all_interior_heals.push(encounter);
            }

            let healed = match healed_so_far {
                None => encounter,
                Some(prev) => tseitin_or(ctx, format!("s9:healed:c{c}:t{t}"), &[prev, encounter]),
            };

            if t + 1 < nt {
                for r in 0..nr {
                    // While frozen and not yet healed, a present character
                    // must still be present next step (stuck).
                    ctx.cnf.add(vec![
                        -frozen[c],
                        -ctx.x[c][t][r],
                        healed,
                        ctx.x[c][t + 1][r],
                    ]);
                }
            }
            if t + 1 == nt {
                // Once healed, must have left the starting room by T-1.
                for r in 0..nr {
                    ctx.cnf.add(vec![
                        -frozen[c],
                        -ctx.x[c][0][r],
                        -healed,
                        -ctx.x[c][t][r],
                    ]);
                }
            }
            healed_so_far = Some(healed);
        }
    }

    if !all_interior_heals.is_empty() {
        ctx.cnf.add(all_interior_heals);
    }

    Ok(S9Keys { doctor, frozen })
}
