//! Caller-owned generator settings and their validation rules.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MAX_ROOMS: usize = 15;
pub const DEFAULT_BRANCHING_FACTOR: f64 = 0.5;
pub const DEFAULT_BRANCHING_LIMIT: f64 = 1.0;

/// Minimum treasure target when no explicit loot count is configured.
pub const MIN_DEFAULT_LOOT_ROOMS: usize = 2;
/// One treasure room per this many Normal rooms when no explicit count is configured.
pub const NORMAL_ROOMS_PER_DEFAULT_LOOT: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub max_rooms: usize,
    pub branching_factor: f64,
    pub use_metroidvania_logic: bool,
    /// `None` derives the count from the number of Normal rooms left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loot_room_count: Option<usize>,
    /// Upper clamp for `branching_factor`.
    pub branching_limit: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_rooms: DEFAULT_MAX_ROOMS,
            branching_factor: DEFAULT_BRANCHING_FACTOR,
            use_metroidvania_logic: true,
            loot_room_count: None,
            branching_limit: DEFAULT_BRANCHING_LIMIT,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        if self.max_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if !(0.0..=1.0).contains(&self.branching_limit) {
            return Err(ConfigError::InvalidBranchingLimit(self.branching_limit));
        }
        if self.branching_factor.is_nan() {
            return Err(ConfigError::BranchingNotANumber);
        }

        let branching_factor = self.branching_factor.clamp(0.0, self.branching_limit);
        if branching_factor != self.branching_factor {
            warn!(
                "branching_factor {} clamped to {branching_factor} (limit {})",
                self.branching_factor, self.branching_limit
            );
        }

        Ok(ValidatedConfig {
            max_rooms: self.max_rooms,
            branching_factor,
            use_metroidvania_logic: self.use_metroidvania_logic,
            loot: match self.loot_room_count {
                Some(count) => LootTarget::Exact(count),
                None => LootTarget::Proportional,
            },
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LootTarget {
    Exact(usize),
    /// `max(2, normal_rooms / 5)`.
    Proportional,
}

impl LootTarget {
    pub fn resolve(self, normal_rooms: usize) -> usize {
        match self {
            Self::Exact(count) => count,
            Self::Proportional => {
                MIN_DEFAULT_LOOT_ROOMS.max(normal_rooms / NORMAL_ROOMS_PER_DEFAULT_LOOT)
            }
        }
    }
}

/// Config that passed validation; the generator only ever reads this form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatedConfig {
    pub max_rooms: usize,
    pub branching_factor: f64,
    pub use_metroidvania_logic: bool,
    pub loot: LootTarget,
}
