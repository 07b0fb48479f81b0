//! S12 Glue Room: a seed-fixed room that traps anyone who enters it
//! for exactly two turns.

use super::occupancy::tseitin_and;
use super::EncCtx;
use crate::error::EncoderResult;

pub struct S12Keys {
    pub glue_room: usize,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S12Keys> {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let nr = ctx.n_rooms();
    let r = ctx.rng.index(nr);

    let mut non_final_entries = Vec::new();
    for c in 0..nc {
        for t in 0..nt {
            let entry = if t == 0 {
                ctx.x[c][0][r]
            } else {
                tseitin_and(ctx, format!("s12:entry:c{c}:t{t}"), &[ctx.x[c][t][r], -ctx.x[c][t - 1][r]])
            };
            let is_non_final = t + 2 < nt;
            if is_non_final {
                ctx.cnf.add(vec![-entry, ctx.x[c][t + 1][r]]);
                ctx.cnf.add(vec![-entry, -ctx.x[c][t + 2][r]]);
                non_final_entries.push(entry);
            }
        }
    }
    if !non_final_entries.is_empty() {
        ctx.cnf.add(non_final_entries);
    }

    Ok(S12Keys { glue_room: r })
}
