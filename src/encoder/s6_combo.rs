//! S6 = S2 ∧ S5, with the phantom excluded from the lover roles and
//! from the pairwise non-lover meet requirement. Kept as its own
//! encoder (rather than independently invoking S2 and S5) so the
//! phantom-exclusion clauses can see both role variable sets — see
//! spec.md §4.5/§4.9.

use super::s2_phantom::{build_phantom, require_non_phantom_accompanied};
use super::s5_lovers::build_lovers;
use super::EncCtx;
use crate::error::EncoderResult;

pub struct S6Keys {
    pub phantom: Vec<i32>,
    pub l1: Vec<i32>,
    pub l2: Vec<i32>,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S6Keys> {
    let phantom = build_phantom(ctx);
    let (l1, l2) = build_lovers(ctx, Some(&phantom));
    require_non_phantom_accompanied(ctx, &phantom, |_ctx, _c| Vec::new());
    Ok(S6Keys { phantom, l1, l2 })
}
