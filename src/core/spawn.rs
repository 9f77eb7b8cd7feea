//! Spawn modes: which value a newly spawned tile gets.
//!
//! Persisted as a small integer (0..=3) so saves stay compact and readable
//! by older clients. Unknown codes fail to deserialize.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Probability that a `Normal` spawn is a 2 (otherwise 4).
pub const NORMAL_TWO_PROBABILITY: f64 = 0.9;

/// Spawn value policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SpawnMode {
    /// 2 with probability 0.9, otherwise 4.
    #[default]
    Normal,
    /// Always 2.
    AlwaysTwo,
    /// Always 4.
    AlwaysFour,
    /// Always 512.
    Cheat512,
}

impl SpawnMode {
    /// The following mode in the cycle Normal → AlwaysTwo → AlwaysFour → Cheat512 → Normal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            SpawnMode::Normal => SpawnMode::AlwaysTwo,
            SpawnMode::AlwaysTwo => SpawnMode::AlwaysFour,
            SpawnMode::AlwaysFour => SpawnMode::Cheat512,
            SpawnMode::Cheat512 => SpawnMode::Normal,
        }
    }

    /// Draw a tile value for this mode.
    ///
    /// Only `Normal` consumes randomness.
    pub fn tile_value(self, rng: &mut GameRng) -> u32 {
        match self {
            SpawnMode::Normal => {
                if rng.gen_bool(NORMAL_TWO_PROBABILITY) {
                    2
                } else {
                    4
                }
            }
            SpawnMode::AlwaysTwo => 2,
            SpawnMode::AlwaysFour => 4,
            SpawnMode::Cheat512 => 512,
        }
    }

    /// Persisted integer code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            SpawnMode::Normal => 0,
            SpawnMode::AlwaysTwo => 1,
            SpawnMode::AlwaysFour => 2,
            SpawnMode::Cheat512 => 3,
        }
    }
}

impl TryFrom<u8> for SpawnMode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SpawnMode::Normal),
            1 => Ok(SpawnMode::AlwaysTwo),
            2 => Ok(SpawnMode::AlwaysFour),
            3 => Ok(SpawnMode::Cheat512),
            other => Err(format!("unknown spawn mode code {other}")),
        }
    }
}

impl From<SpawnMode> for u8 {
    fn from(mode: SpawnMode) -> Self {
        mode.code()
    }
}

impl std::fmt::Display for SpawnMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SpawnMode::Normal => "Normal",
            SpawnMode::AlwaysTwo => "Always 2",
            SpawnMode::AlwaysFour => "Always 4",
            SpawnMode::Cheat512 => "Cheat (512)",
        };
        f.write_str(label)
    }
}
