//! S3 Singer's Jewels: at least one visit to the alphabetically first
//! room, and at least one such visit where the visitor is alone. The
//! passing chain itself is a post-solve simulation (spec.md §4.6).

use super::occupancy::exactly_k;
use super::EncCtx;
use crate::error::EncoderResult;

pub struct S3Keys {
    pub jewel_room: usize,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S3Keys> {
    let jewel_room = ctx
        .graph
        .index_of(ctx.graph.alphabetically_first_room())
        .expect("alphabetically_first_room always names an existing room");

    let nc = ctx.n_chars();
    let nt = ctx.t();

    let mut any_visit = Vec::with_capacity(nc * nt);
    let mut alone_visit = Vec::with_capacity(nt);
    for t in 0..nt {
        for c in 0..nc {
            any_visit.push(ctx.x[c][t][jewel_room]);
        }
        alone_visit.push(exactly_k(ctx, "s3", t, jewel_room, 1));
    }
    ctx.cnf.add(any_visit);
    ctx.cnf.add(alone_visit);

    Ok(S3Keys { jewel_room })
}
