//! Procedural room-graph generation split into pipeline stages.

pub mod audit;
pub mod model;

mod boss;
mod gating;
mod generator;
mod graph;
mod growth;
mod loot;
#[cfg(test)]
mod test_support;

pub use audit::{LayoutViolation, audit_layout};
pub use generator::DungeonGenerator;
pub use model::{Bounds, DungeonLayout, Room, Traversal};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::random::SeededRandom;

pub fn generate_dungeon(
    config: &GeneratorConfig,
    seed: u64,
) -> Result<DungeonLayout, GenerateError> {
    DungeonGenerator::new(config)?.generate(&mut SeededRandom::new(seed))
}
