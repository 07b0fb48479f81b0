//! S5 Lovers: two distinct lovers who never co-locate; every pair of
//! non-lovers co-locates at least once.

use super::occupancy::{forbid_colocation, pair_meets_at};
use super::EncCtx;
use crate::cardinality::exactly_one;
use crate::error::EncoderResult;

pub struct S5Keys {
    pub l1: Vec<i32>,
    pub l2: Vec<i32>,
}

/// Builds the `L1`/`L2` selectors, distinctness, the never-co-locate
/// clauses between them, and the pairwise non-lover meet requirement.
/// `phantom` is `Some(phantom_vars)` only when layered under S6, in
/// which case the phantom is excluded from both lover roles and from
/// the pairwise-meet requirement.
pub(super) fn build_lovers(ctx: &mut EncCtx, phantom: Option<&[i32]>) -> (Vec<i32>, Vec<i32>) {
    let nc = ctx.n_chars();
    let l1: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s5:L1:{}", ctx.char_name(c))) as i32)
        .collect();
    let l2: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s5:L2:{}", ctx.char_name(c))) as i32)
        .collect();
    for c in 0..nc {
        ctx.cnf.add(vec![-l1[c], -l2[c]]);
        if let Some(ph) = phantom {
            ctx.cnf.add(vec![-ph[c], -l1[c]]);
            ctx.cnf.add(vec![-ph[c], -l2[c]]);
        }
    }

    for c1 in 0..nc {
        for c2 in 0..nc {
            if c1 != c2 {
                forbid_colocation(ctx, c1, c2, &[l1[c1], l2[c2]]);
            }
        }
    }

    let nt = ctx.t();
    for c1 in 0..nc {
        for c2 in (c1 + 1)..nc {
            let mut clause = vec![l1[c1], l2[c1], l1[c2], l2[c2]];
            if let Some(ph) = phantom {
                clause.push(ph[c1]);
                clause.push(ph[c2]);
            }
            for t in 0..nt {
                clause.push(pair_meets_at(ctx, "s5:pairmeet", c1, c2, t));
            }
            ctx.cnf.add(clause);
        }
    }

    (l1, l2)
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S5Keys> {
    let (l1, l2) = build_lovers(ctx, None);
    Ok(S5Keys { l1, l2 })
}
