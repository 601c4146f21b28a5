//! Frontier random walk that grows the room graph out of the start room.

use log::trace;

use crate::error::GraphError;
use crate::random::RandomSource;
use crate::types::{Coord, Direction};

use super::graph::GridGraph;

/// After every carved room a draw strictly above `branching_factor` ends the
/// round, so a draw equal to the factor keeps carving.
pub(super) fn grow<R: RandomSource>(
    max_rooms: usize,
    branching_factor: f64,
    rng: &mut R,
) -> Result<GridGraph, GraphError> {
    let mut graph = GridGraph::with_start(Coord::ORIGIN);
    let mut frontier = vec![Coord::ORIGIN];

    while graph.room_count() < max_rooms && !frontier.is_empty() {
        let frontier_index = rng.below(frontier.len());
        let current = frontier[frontier_index];

        let mut directions = Direction::ALL;
        rng.shuffle(&mut directions);

        let mut grown = false;
        for direction in directions {
            if graph.room_count() >= max_rooms {
                break;
            }
            let neighbor = current.step(direction);
            if graph.contains(neighbor) {
                continue;
            }

            graph.add_room(current, neighbor)?;
            frontier.push(neighbor);
            grown = true;
            trace!("grew {neighbor:?} from {current:?}");

            if rng.unit() > branching_factor {
                break;
            }
        }

        if !grown && graph.room_count() < max_rooms {
            frontier.remove(frontier_index);
        }
    }

    Ok(graph)
}
