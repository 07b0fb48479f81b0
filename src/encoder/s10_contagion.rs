//! S10 Contagion: the alphabetically first room is contagious and at
//! least one visit there is forced. The transitive spread itself is a
//! post-solve simulation (spec.md §4.6).

use super::EncCtx;
use crate::error::EncoderResult;

pub struct S10Keys {
    pub contagious_room: usize,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S10Keys> {
    let contagious_room = ctx
        .graph
        .index_of(ctx.graph.alphabetically_first_room())
        .expect("alphabetically_first_room always names an existing room");

    let nc = ctx.n_chars();
    let nt = ctx.t();
    let mut any_visit = Vec::with_capacity(nc * nt);
    for t in 0..nt {
        for c in 0..nc {
            any_visit.push(ctx.x[c][t][contagious_room]);
        }
    }
    ctx.cnf.add(any_visit);

    Ok(S10Keys { contagious_room })
}
