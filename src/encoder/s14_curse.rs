//! S14 Curse of Amarinta: no additional CNF-level constraint beyond
//! ordinary placement (the `T >= 6`, `N >= 2` preconditions are checked
//! by [`crate::config::Configuration::validate`]). The handoff itself
//! is a post-solve simulation — see spec.md §4.6.

use super::EncCtx;
use crate::error::EncoderResult;

pub struct S14Keys;

pub fn encode(_ctx: &mut EncCtx) -> EncoderResult<S14Keys> {
    Ok(S14Keys)
}
