//! S13 Glue Shoes: a seed-fixed carrier who never stops moving;
//! whoever they meet is glued to that room for the following turn.

use super::occupancy::{role_present_at, tseitin_and};
use super::EncCtx;
use crate::error::EncoderResult;

pub struct S13Keys {
    pub carrier: Vec<i32>,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S13Keys> {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let nr = ctx.n_rooms();

    let carrier: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s13:GS:{}", ctx.char_name(c))) as i32)
        .collect();
    let chosen = ctx.rng.index(nc);
    for (c, &v) in carrier.iter().enumerate() {
        ctx.cnf.add(vec![if c == chosen { v } else { -v }]);
    }

    // The carrier never stands still.
    for t in 0..nt.saturating_sub(1) {
        for r in 0..nr {
            ctx.cnf
                .add(vec![-carrier[chosen], -ctx.x[chosen][t][r], -ctx.x[chosen][t + 1][r]]);
        }
    }

    let mut meet = vec![vec![vec![0i32; nr]; nt]; nc];
    for t in 0..nt {
        for r in 0..nr {
            let carrier_present = role_present_at(ctx, "s13", &carrier, t, r);
            for c in 0..nc {
                let ind = tseitin_and(
                    ctx,
                    format!("s13:meet:c{c}:t{t}:r{r}"),
                    &[carrier_present, ctx.x[c][t][r], -carrier[c]],
                );
                meet[c][t][r] = ind;
                if t + 1 < nt {
                    ctx.cnf.add(vec![-ind, ctx.x[c][t + 1][r]]);
                }
                if t + 2 < nt {
                    ctx.cnf.add(vec![-ind, -ctx.x[c][t + 2][r]]);
                }
            }
        }
    }

    // Under strict no-stay movement, a victim may only repeat a room on
    // the forced turn immediately following a glue-shoes encounter.
    if ctx.cfg.must_move && !ctx.cfg.allow_stay {
        for c in 0..nc {
            for t in 0..nt.saturating_sub(1) {
                for r in 0..nr {
                    let support = if t == 0 { ctx.false_lit() } else { meet[c][t - 1][r] };
                    ctx.cnf.add(vec![
                        -ctx.x[c][t][r],
                        -ctx.x[c][t + 1][r],
                        carrier[c],
                        support,
                    ]);
                }
            }
        }
    }

    Ok(S13Keys { carrier })
}
