use crate::config::LootTarget;
use crate::error::GraphError;
use crate::random::RandomSource;
use crate::types::{Coord, RoomKind};

use super::graph::GridGraph;

pub(super) fn place_loot<R: RandomSource>(
    mut graph: GridGraph,
    target: LootTarget,
    rng: &mut R,
) -> Result<(GridGraph, Vec<Coord>), GraphError> {
    let mut candidates = graph.rooms_of_kind(RoomKind::Normal);
    let wanted = target.resolve(candidates.len());

    let mut placed = Vec::with_capacity(wanted.min(candidates.len()));
    while placed.len() < wanted && !candidates.is_empty() {
        let pos = candidates.remove(rng.below(candidates.len()));
        graph.promote(pos, RoomKind::Treasure)?;
        placed.push(pos);
    }

    Ok((graph, placed))
}
