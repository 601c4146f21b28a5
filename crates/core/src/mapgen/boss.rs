use crate::error::GraphError;
use crate::types::{Coord, RoomKind};

use super::graph::GridGraph;

/// Marks the room farthest from the origin (`|x| + |y|`) as Boss. Ties keep
/// the earliest grown room. A lone Start room gets no boss.
pub(super) fn place_boss(mut graph: GridGraph) -> Result<(GridGraph, Option<Coord>), GraphError> {
    let Some(boss) = farthest_room(&graph) else {
        return Ok((graph, None));
    };
    if graph.kind(boss) != RoomKind::Normal {
        return Ok((graph, None));
    }
    graph.promote(boss, RoomKind::Boss)?;
    Ok((graph, Some(boss)))
}

fn farthest_room(graph: &GridGraph) -> Option<Coord> {
    let mut best: Option<(Coord, u32)> = None;
    for room in graph.rooms() {
        let distance = room.pos.distance_from_origin();
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((room.pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::test_support::{branchy_fixture, graph_from_edges};

    #[test]
    fn farthest_room_becomes_boss() {
        let (graph, boss) = place_boss(branchy_fixture()).expect("place");
        assert_eq!(boss, Some(Coord::new(3, 0)));
        assert_eq!(graph.kind(Coord::new(3, 0)), RoomKind::Boss);
        assert_eq!(graph.rooms_of_kind(RoomKind::Boss).len(), 1);
    }

    #[test]
    fn ties_resolve_to_the_first_grown_room() {
        // (1,1) and (-1,-1) share distance 2; (1,1) was grown first.
        let graph = graph_from_edges(&[
            ((0, 0), (1, 0)),
            ((0, 0), (0, -1)),
            ((1, 0), (1, 1)),
            ((0, -1), (-1, -1)),
        ]);
        let (graph, boss) = place_boss(graph).expect("place");
        assert_eq!(boss, Some(Coord::new(1, 1)));
        assert_eq!(graph.kind(Coord::new(-1, -1)), RoomKind::Normal);
    }

    #[test]
    fn reversed_growth_order_flips_the_tie_break() {
        let graph = graph_from_edges(&[
            ((0, 0), (0, -1)),
            ((0, 0), (1, 0)),
            ((0, -1), (-1, -1)),
            ((1, 0), (1, 1)),
        ]);
        let (_, boss) = place_boss(graph).expect("place");
        assert_eq!(boss, Some(Coord::new(-1, -1)));
    }

    #[test]
    fn lone_start_room_gets_no_boss() {
        let (graph, boss) = place_boss(GridGraph::with_start(Coord::ORIGIN)).expect("place");
        assert_eq!(boss, None);
        assert_eq!(graph.kind(Coord::ORIGIN), RoomKind::Start);
    }
}
