//! S4 Bomb Duo: two distinct bombers. Any room with exactly two people
//! present must be occupied by that pair (in either order), and the
//! pair must be alone together at least once.
//!
//! Note: once every exactly-two occupant is constrained to hold a
//! bomber role, and exactly one character holds each of `A1`/`A2`, any
//! exactly-two room is *automatically* the bomb pair's room — no
//! separate identity check is needed for the "alone together" clause.

use super::occupancy::eq2_matrix;
use super::EncCtx;
use crate::cardinality::exactly_one;
use crate::error::EncoderResult;

pub struct S4Keys {
    pub a1: Vec<i32>,
    pub a2: Vec<i32>,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S4Keys> {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let nr = ctx.n_rooms();

    let a1: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s4:A1:{}", ctx.char_name(c))) as i32)
        .collect();
    let a2: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s4:A2:{}", ctx.char_name(c))) as i32)
        .collect();
    exactly_one(&mut ctx.cnf, &a1);
    exactly_one(&mut ctx.cnf, &a2);
    for c in 0..nc {
        ctx.cnf.add(vec![-a1[c], -a2[c]]);
    }

    let eq2 = eq2_matrix(ctx, "s4");
    let mut any_alone_together = Vec::with_capacity(nt * nr);
    for t in 0..nt {
        for r in 0..nr {
            for c in 0..nc {
                ctx.cnf
                    .add(vec![-eq2[t][r], -ctx.x[c][t][r], a1[c], a2[c]]);
            }
            any_alone_together.push(eq2[t][r]);
        }
    }
    ctx.cnf.add(any_alone_together);

    Ok(S4Keys { a1, a2 })
}
