//! S11 The Vault: a seed-fixed key holder gates entry to the
//! alphabetically first room, and must escort company there on at
//! least two distinct timesteps with at least two distinct companions.

use super::occupancy::{role_present_at, tseitin_and};
use super::EncCtx;
use crate::cardinality::at_least_k;
use crate::error::EncoderResult;

pub struct S11Keys {
    pub key_holder: Vec<i32>,
    pub vault_room: usize,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S11Keys> {
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let vault_room = ctx
        .graph
        .index_of(ctx.graph.alphabetically_first_room())
        .expect("alphabetically_first_room always names an existing room");

    let key_holder: Vec<i32> = (0..nc)
        .map(|c| ctx.pool.get(format!("s11:KH:{}", ctx.char_name(c))) as i32)
        .collect();
    let chosen = ctx.rng.index(nc);
    for (c, &v) in key_holder.iter().enumerate() {
        ctx.cnf.add(vec![if c == chosen { v } else { -v }]);
    }

    let mut kh_present = vec![0i32; nt];
    for t in 0..nt {
        kh_present[t] = role_present_at(ctx, "s11", &key_holder, t, vault_room);
        for c in 0..nc {
            ctx.cnf
                .add(vec![-ctx.x[c][t][vault_room], kh_present[t], key_holder[c]]);
        }
    }

    // companion(c, t): c is present with the key holder at the vault
    // and isn't the key holder.
    let mut companion = vec![vec![0i32; nc]; nt];
    let mut company_flags = Vec::with_capacity(nt);
    for t in 0..nt {
        let mut any_companion = Vec::with_capacity(nc);
        for c in 0..nc {
            let ind = tseitin_and(
                ctx,
                format!("s11:companion:c{c}:t{t}"),
                &[kh_present[t], ctx.x[c][t][vault_room], -key_holder[c]],
            );
            companion[t][c] = ind;
            any_companion.push(ind);
        }
        let company_at_t = ctx.pool.get(format!("s11:company:t{t}")) as i32;
        for &ac in &any_companion {
            ctx.cnf.add(vec![-ac, company_at_t]);
        }
        let mut clause = vec![-company_at_t];
        clause.extend(any_companion);
        ctx.cnf.add(clause);
        company_flags.push(company_at_t);
    }
    at_least_k(&mut ctx.cnf, &company_flags, 2);

    // At least two distinct companions across two distinct timesteps.
    let mut pair_clause = Vec::new();
    for t1 in 0..nt {
        for t2 in 0..nt {
            if t1 == t2 {
                continue;
            }
            for c1 in 0..nc {
                for c2 in 0..nc {
                    if c1 == c2 {
                        continue;
                    }
                    let both = ctx.pool.get(format!("s11:distinctpair:t{t1}_{t2}:c{c1}_{c2}")) as i32;
                    ctx.cnf.add(vec![-both, companion[t1][c1]]);
                    ctx.cnf.add(vec![-both, companion[t2][c2]]);
                    ctx.cnf
                        .add(vec![both, -companion[t1][c1], -companion[t2][c2]]);
                    pair_clause.push(both);
                }
            }
        }
    }
    if !pair_clause.is_empty() {
        ctx.cnf.add(pair_clause);
    }

    Ok(S11Keys {
        key_holder,
        vault_room,
    })
}
