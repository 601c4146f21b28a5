use thiserror::Error;

use crate::types::{Coord, RoomKind};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_rooms must be at least 1 so the start room fits")]
    NoRooms,
    #[error("branching_factor is NaN")]
    BranchingNotANumber,
    #[error("branching_limit {0} is outside [0, 1]")]
    InvalidBranchingLimit(f64),
}

/// Structural faults raised while the room graph is being mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("a room already occupies {0:?}")]
    Occupied(Coord),
    #[error("{from:?} and {to:?} are not grid neighbours")]
    NotAdjacent { from: Coord, to: Coord },
    #[error("no room exists at {0:?}")]
    MissingRoom(Coord),
    #[error("room at {pos:?} is {kind:?}; only Normal rooms may be promoted")]
    ProtectedRoom { pos: Coord, kind: RoomKind },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("invalid generator config: {0}")]
    Config(#[from] ConfigError),
    #[error("graph invariant violated: {0}")]
    Graph(#[from] GraphError),
}
