//! S1 Poison: `chars[0]` is the assassin. Exactly one victim, poison
//! time, and poison room; at that moment assassin and victim alone
//! together; at every other moment the assassin is present, the room
//! is never exactly two people.

use super::occupancy::exactly_k;
use super::EncCtx;
use crate::cardinality::exactly_one;
use crate::error::EncoderResult;

pub struct S1Keys {
    pub assassin: usize,
    /// `victim[c]` selects `c` as the victim (unused/absent for the assassin).
    pub victim: Vec<i32>,
    pub poison_time: Vec<i32>,
    pub poison_room: Vec<i32>,
}

pub fn encode(ctx: &mut EncCtx) -> EncoderResult<S1Keys> {
    let assassin = 0usize;
    let nc = ctx.n_chars();
    let nt = ctx.t();
    let nr = ctx.n_rooms();

    let mut victim = vec![0i32; nc];
    let candidates: Vec<i32> = (0..nc)
        .filter(|&c| c != assassin)
        .map(|c| {
            let v = ctx.pool.get(format!("s1:V:{}", ctx.char_name(c))) as i32;
            victim[c] = v;
            v
        })
        .collect();
    exactly_one(&mut ctx.cnf, &candidates);

    let poison_time: Vec<i32> = (0..nt)
        .map(|t| ctx.pool.get(format!("s1:PT:{t}")) as i32)
        .collect();
    exactly_one(&mut ctx.cnf, &poison_time);

    let poison_room: Vec<i32> = (0..nr)
        .map(|r| ctx.pool.get(format!("s1:PR:{}", ctx.room_name(r))) as i32)
        .collect();
    exactly_one(&mut ctx.cnf, &poison_room);

    if let Some(room) = ctx.cfg.scenarios.s1_room.clone() {
        if let Some(r) = ctx.graph.index_of(&room) {
            ctx.cnf.add(vec![poison_room[r]]);
        }
    }
    if let Some(s1_time) = ctx.cfg.scenarios.s1_time {
        if s1_time >= 1 && s1_time <= nt {
            ctx.cnf.add(vec![poison_time[s1_time - 1]]);
        }
    }

    // isPoisonMoment(t, r) = PT_t ∧ PR_r.
    let mut is_poison_moment = vec![vec![0i32; nr]; nt];
    for t in 0..nt {
        for r in 0..nr {
            let ipm = ctx.pool.get(format!("s1:ipm:t{t}:r{r}")) as i32;
            ctx.cnf.add(vec![-ipm, poison_time[t]]);
            ctx.cnf.add(vec![-ipm, poison_room[r]]);
            ctx.cnf.add(vec![ipm, -poison_time[t], -poison_room[r]]);
            is_poison_moment[t][r] = ipm;
        }
    }

    for t in 0..nt {
        for r in 0..nr {
            let ipm = is_poison_moment[t][r];
            for &v in &candidates {
                let c = victim.iter().position(|&x| x == v).unwrap();
                // ipm ∧ V_v ⇒ assassin present, victim present, no one else.
                ctx.cnf.add(vec![-ipm, -v, ctx.x[assassin][t][r]]);
                ctx.cnf.add(vec![-ipm, -v, ctx.x[c][t][r]]);
                for other in 0..nc {
                    if other != assassin && other != c {
                        ctx.cnf.add(vec![-ipm, -v, -ctx.x[other][t][r]]);
                    }
                }
            }
        }
    }

    // At every (t, r) where the assassin is present and it's not the
    // poison moment, the room is never exactly two people.
    for t in 0..nt {
        for r in 0..nr {
            let exactly_two = exactly_k(ctx, "s1", t, r, 2);
            let ipm = is_poison_moment[t][r];
            ctx.cnf
                .add(vec![-ctx.x[assassin][t][r], ipm, -exactly_two]);
        }
    }

    Ok(S1Keys {
        assassin,
        victim,
        poison_time,
        poison_room,
    })
}
