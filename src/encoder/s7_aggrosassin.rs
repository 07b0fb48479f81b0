//! S7 Aggrosassin: exactly one agg. Every exactly-two room contains the
//! agg; the agg racks up at least `⌈T/2⌉` distinct 1-on-1 meetings,
//! each with a distinct victim.

use super::occupancy::{eq2_matrix, role_present_at, tseitin_or};
use super::EncCtx;
use crate::cardinality::{at_least_k, at_most_one_pairwise, exactly_one};
use crate::error::EncoderResult;

pub struct S7Keys {
    pub agg: Vec<i32>,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S7Keys> {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let nr = ctx.n_rooms();

    let agg: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s7:AGG:{}", ctx.char_name(c))) as i32)
        .collect();
    exactly_one(&mut ctx.cnf, &agg);

    let eq2 = eq2_matrix(ctx, "s7");
    for t in 0..nt {
        for r in 0..nr {
            let agg_present = role_present_at(ctx, "s7", &agg, t, r);
            ctx.cnf.add(vec![-eq2[t][r], agg_present]);
        }
    }

    // Kill flag per t: some room had exactly two people (which, given
    // the clause above, necessarily includes the agg).
    let kill_flags: Vec<i32> = (0..nt)
        .map(|t| tseitin_or(ctx, format!("s7:kill:t{t}"), &eq2[t]))
        .collect();
    let k = (nt + 1) / 2; // ceil(T/2)
    at_least_k(&mut ctx.cnf, &kill_flags, k);

    // Each distinct-victim bookkeeping: victim_c_t ⇔ (c shares an
    // exactly-two room with the agg at t) ∧ ¬AGG_c.
    for c in 0..nc {
        let mut victim_lits = Vec::with_capacity(nt);
        for t in 0..nt {
            let mut per_room = Vec::with_capacity(nr);
            for r in 0..nr {
                let pair = ctx.pool.get(format!("s7:vicroom:c{c}:t{t}:r{r}")) as i32;
                ctx.cnf.add(vec![-pair, ctx.x[c][t][r]]);
                ctx.cnf.add(vec![-pair, eq2[t][r]]);
                ctx.cnf.add(vec![pair, -ctx.x[c][t][r], -eq2[t][r]]);
                per_room.push(pair);
            }
            let meets_agg = tseitin_or(ctx, format!("s7:meetsagg:c{c}:t{t}"), &per_room);
            let victim = ctx.pool.get(format!("s7:victim:c{c}:t{t}")) as i32;
            ctx.cnf.add(vec![-victim, meets_agg]);
            ctx.cnf.add(vec![-victim, -agg[c]]);
            ctx.cnf.add(vec![victim, -meets_agg, agg[c]]);
            victim_lits.push(victim);
        }
        at_most_one_pairwise(&mut ctx.cnf, &victim_lits);
    }

    Ok(S7Keys { agg })
}
