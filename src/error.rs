//! Typed errors for the encoder's precondition checks.
//!
//! Everything past the encoder (the SAT solver and the decoder) reports
//! failure by returning `None` from [`crate::solve::solve_and_decode`] —
//! UNSAT, timeout, and internal invariant violations are all "no result",
//! never an `Err`. Only malformed configuration is a hard error.

use thiserror::Error;

/// A configuration that cannot be compiled into a CNF instance at all.
///
/// These are raised synchronously, before the solver ever runs, and
/// correspond to spec taxon 1 ("encoder precondition failure").
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncoderError {
    #[error("need at least {min} rooms, got {got}")]
    TooFewRooms { min: usize, got: usize },

    #[error("need at least {min} characters, got {got}")]
    TooFewChars { min: usize, got: usize },

    #[error("need at least {min} timesteps, got {got}")]
    TooFewTimesteps { min: usize, got: usize },

    #[error("room name {0:?} is duplicated")]
    DuplicateRoom(String),

    #[error("character name {0:?} is duplicated")]
    DuplicateChar(String),

    #[error("edge references unknown room {0:?}")]
    UnknownRoomInEdge(String),

    #[error("s1_room {0:?} is not a room in this map")]
    UnknownS1Room(String),

    #[error("s1_time {0} is out of range for T={t}")]
    OutOfRangeS1Time { s1_time: usize, t: usize },

    #[error("s9FrozenRatio {0} is out of range [0.2, 0.8]")]
    OutOfRangeFrozenRatio(f64),

    #[error("S11 vault room is missing from the map")]
    VaultRoomMissing,

    #[error("no scenario was selected")]
    NoScenarioSelected,
}

pub type EncoderResult<T> = Result<T, EncoderError>;
