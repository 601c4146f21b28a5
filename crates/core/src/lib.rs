pub mod config;
pub mod error;
pub mod mapgen;
pub mod random;
pub mod types;

pub use config::{GeneratorConfig, LootTarget, ValidatedConfig};
pub use error::{ConfigError, GenerateError, GraphError};
pub use mapgen::{
    Bounds, DungeonGenerator, DungeonLayout, LayoutViolation, Room, Traversal, audit_layout,
    generate_dungeon,
};
pub use random::{RandomSource, SeededRandom};
pub use types::*;
