//! S2 Phantom: exactly one phantom, who is never co-located with
//! anyone; every non-phantom must co-locate with someone at least once.

use super::occupancy::{forbid_colocation, pair_meets_at};
use super::EncCtx;
use crate::cardinality::exactly_one;
use crate::error::EncoderResult;

pub struct S2Keys {
    /// `phantom[c]` selects `c` as the phantom.
    pub phantom: Vec<i32>,
}

/// Builds the phantom selector and its "never co-located" clauses.
/// Shared with S6, which layers lover constraints on top.
pub(super) fn build_phantom(ctx: &mut EncCtx) -> Vec<i32> {
    let nc = ctx.n_chars();
    let phantom: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s2:PH:{}", ctx.char_name(c))) as i32)
        .collect();
    exactly_one(&mut ctx.cnf, &phantom);

    for p in 0..nc {
        for c in 0..nc {
            if c != p {
                forbid_colocation(ctx, p, c, &[phantom[p]]);
            }
        }
    }
    phantom
}

/// Every character that isn't the phantom must co-locate with someone
/// at least once. `extra_escape(c)` lets a caller (S6) add further
/// literals that exempt `c` from this requirement (there: lover roles).
pub(super) fn require_non_phantom_accompanied(
    ctx: &mut EncCtx,
    phantom: &[i32],
    extra_escape: impl Fn(&mut EncCtx, usize) -> Vec<i32>,
) {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    for c in 0..nc {
        let mut meets = Vec::with_capacity(nt * (nc - 1).max(1));
        for t in 0..nt {
            for other in 0..nc {
                if other != c {
                    meets.push(pair_meets_at(ctx, "s2:accompany", c, other, t));
                }
            }
        }
        let mut clause = vec![phantom[c]];
        clause.extend(extra_escape(ctx, c));
        clause.extend(meets);
        ctx.cnf.add(clause);
    }
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S2Keys> {
    let phantom = build_phantom(ctx);
    require_non_phantom_accompanied(ctx, &phantom, |_, _| Vec::new());
    Ok(S2Keys { phantom })
}
