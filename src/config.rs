//! Encoder configuration: the serde-deserializable input to a solve.
//!
//! Shape follows the teacher's `judge.rs::JsonIn` convention — a flat,
//! mostly-optional struct with `#[serde(default)]` fields and
//! `#[serde(rename_all = "camelCase")]` to accept the same field names a
//! JS-side caller would send (`mustMove`, `s9FrozenRatio`, ...).

use serde::Deserialize;
use std::collections::HashSet;

use crate::error::{EncoderError, EncoderResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub rooms: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub chars: Vec<String>,
    #[serde(rename = "T")]
    pub t: usize,
    #[serde(default)]
    pub must_move: bool,
    #[serde(default = "default_allow_stay")]
    pub allow_stay: bool,
    #[serde(default)]
    pub scenarios: ScenarioFlags,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_allow_stay() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFlags {
    #[serde(default)]
    pub s1: bool,
    #[serde(default)]
    pub s2: bool,
    #[serde(default)]
    pub s3: bool,
    #[serde(default)]
    pub s4: bool,
    #[serde(default)]
    pub s5: bool,
    #[serde(default)]
    pub s6: bool,
    #[serde(default)]
    pub s7: bool,
    #[serde(default)]
    pub s8: bool,
    #[serde(default)]
    pub s9: bool,
    #[serde(default)]
    pub s10: bool,
    #[serde(default)]
    pub s11: bool,
    #[serde(default)]
    pub s12: bool,
    #[serde(default)]
    pub s13: bool,
    #[serde(default)]
    pub s14: bool,
    #[serde(default)]
    pub s15: bool,
    #[serde(default)]
    pub s16: bool,
    #[serde(default)]
    pub s1_room: Option<String>,
    #[serde(default)]
    pub s1_time: Option<usize>,
    #[serde(default)]
    pub s9_frozen_ratio: Option<f64>,
}

impl ScenarioFlags {
    pub fn any_selected(&self) -> bool {
        self.s1
            || self.s2
            || self.s3
            || self.s4
            || self.s5
            || self.s6
            || self.s7
            || self.s8
            || self.s9
            || self.s10
            || self.s11
            || self.s12
            || self.s13
            || self.s14
            || self.s15
            || self.s16
    }
}

impl Configuration {
    /// Checks the preconditions spec.md §7 names explicitly, plus the
    /// basic structural ones (unique rooms/chars, edges referencing known
    /// rooms). Conflicting sub-options that aren't outright invalid (e.g.
    /// `s1_room` not among `rooms`) are silently dropped rather than
    /// rejected, per spec.md §6 — `validate` only rejects what spec.md §7
    /// calls out as a hard failure.
    pub fn validate(&self) -> EncoderResult<()> {
        let mut seen_rooms = HashSet::new();
        for room in &self.rooms {
            if !seen_rooms.insert(room) {
                return Err(EncoderError::DuplicateRoom(room.clone()));
            }
        }
        let mut seen_chars = HashSet::new();
        for c in &self.chars {
            if !seen_chars.insert(c) {
                return Err(EncoderError::DuplicateChar(c.clone()));
            }
        }
        for (a, b) in &self.edges {
            if !seen_rooms.contains(a) {
                return Err(EncoderError::UnknownRoomInEdge(a.clone()));
            }
            if !seen_rooms.contains(b) {
                return Err(EncoderError::UnknownRoomInEdge(b.clone()));
            }
        }
        if self.rooms.is_empty() {
            return Err(EncoderError::TooFewRooms {
                min: 1,
                got: 0,
            });
        }
        if self.chars.is_empty() {
            return Err(EncoderError::TooFewChars { min: 1, got: 0 });
        }
        if self.t == 0 {
            return Err(EncoderError::TooFewTimesteps { min: 1, got: 0 });
        }
        if !self.scenarios.any_selected() {
            return Err(EncoderError::NoScenarioSelected);
        }

        if self.scenarios.s9 {
            if let Some(ratio) = self.scenarios.s9_frozen_ratio {
                if !(0.2..=0.8).contains(&ratio) {
                    return Err(EncoderError::OutOfRangeFrozenRatio(ratio));
                }
            }
        }
        if self.scenarios.s11 {
            let vault = self.rooms.iter().min().cloned().unwrap_or_default();
            if !self.rooms.contains(&vault) {
                return Err(EncoderError::VaultRoomMissing);
            }
        }
        if self.scenarios.s14 {
            if self.t < 6 {
                return Err(EncoderError::TooFewTimesteps { min: 6, got: self.t });
            }
            if self.chars.len() < 2 {
                return Err(EncoderError::TooFewChars { min: 2, got: self.chars.len() });
            }
        }
        if self.scenarios.s15 && self.rooms.len() < 4 {
            return Err(EncoderError::TooFewRooms {
                min: 4,
                got: self.rooms.len(),
            });
        }
        if self.scenarios.s16 && self.chars.len() < 2 {
            return Err(EncoderError::TooFewChars {
                min: 2,
                got: self.chars.len(),
            });
        }
        if (self.scenarios.s1 || self.scenarios.s4 || self.scenarios.s7) && self.chars.len() < 2 {
            return Err(EncoderError::TooFewChars { min: 2, got: self.chars.len() });
        }
        if (self.scenarios.s2 || self.scenarios.s5 || self.scenarios.s6) && self.chars.len() < 2 {
            return Err(EncoderError::TooFewChars { min: 2, got: self.chars.len() });
        }
        if self.scenarios.s9 && self.chars.len() < 2 {
            return Err(EncoderError::TooFewChars { min: 2, got: self.chars.len() });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Configuration {
        Configuration {
            rooms: vec!["A".into(), "B".into()],
            edges: vec![("A".into(), "B".into())],
            chars: vec!["X".into(), "Y".into()],
            t: 4,
            must_move: false,
            allow_stay: true,
            scenarios: ScenarioFlags {
                s2: true,
                ..Default::default()
            },
            seed: Some(1),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn duplicate_room_rejected() {
        let mut cfg = base();
        cfg.rooms.push("A".into());
        assert!(matches!(cfg.validate(), Err(EncoderError::DuplicateRoom(_))));
    }

    #[test]
    fn s14_requires_six_timesteps() {
        let mut cfg = base();
        cfg.scenarios = ScenarioFlags {
            s14: true,
            ..Default::default()
        };
        cfg.t = 5;
        assert!(matches!(
            cfg.validate(),
            Err(EncoderError::TooFewTimesteps { min: 6, .. })
        ));
    }

    #[test]
    fn s15_requires_four_rooms() {
        let mut cfg = base();
        cfg.scenarios = ScenarioFlags {
            s15: true,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(EncoderError::TooFewRooms { min: 4, .. })));
    }

    #[test]
    fn no_scenario_selected_rejected() {
        let mut cfg = base();
        cfg.scenarios = ScenarioFlags::default();
        assert!(matches!(cfg.validate(), Err(EncoderError::NoScenarioSelected)));
    }
}
