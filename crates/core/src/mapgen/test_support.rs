//! Shared fixtures for the `mapgen` stage test suites.
//! Provides a scripted random source so tests can pin picks and branch draws.
//! It does not own production generation logic.

use crate::random::RandomSource;
use crate::types::Coord;

use super::graph::GridGraph;

/// Replays fixed answers: `below` returns the scripted indices (modulo the
/// range) and `unit` returns the scripted floats. Both scripts cycle.
pub(crate) struct ScriptedRandom {
    indices: Vec<usize>,
    units: Vec<f64>,
    next_index: usize,
    next_unit: usize,
}

impl ScriptedRandom {
    pub(crate) fn new(indices: impl Into<Vec<usize>>) -> Self {
        let indices = indices.into();
        Self { indices, units: vec![0.0], next_index: 0, next_unit: 0 }
    }

    pub(crate) fn with_units(mut self, units: impl Into<Vec<f64>>) -> Self {
        self.units = units.into();
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u64(&mut self) -> u64 {
        self.below(usize::MAX) as u64
    }

    fn below(&mut self, upper: usize) -> usize {
        let value = self.indices.get(self.next_index % self.indices.len().max(1)).copied();
        self.next_index += 1;
        value.unwrap_or(0) % upper
    }

    fn unit(&mut self) -> f64 {
        let value = self.units[self.next_unit % self.units.len()];
        self.next_unit += 1;
        value
    }
}

/// Builds a graph by carving `edges` in order, each from an existing room.
pub(crate) fn graph_from_edges(edges: &[((i32, i32), (i32, i32))]) -> GridGraph {
    let mut graph = GridGraph::with_start(Coord::ORIGIN);
    for &((fx, fy), (tx, ty)) in edges {
        graph.add_room(Coord::new(fx, fy), Coord::new(tx, ty)).expect("fixture edge is valid");
    }
    graph
}

/// ```text
///  (0,1)
///    |
///  (0,0)S -- (1,0) -- (2,0) -- (3,0)
///               |
///             (1,-1)
/// ```
pub(crate) fn branchy_fixture() -> GridGraph {
    graph_from_edges(&[
        ((0, 0), (1, 0)),
        ((0, 0), (0, 1)),
        ((1, 0), (2, 0)),
        ((1, 0), (1, -1)),
        ((2, 0), (3, 0)),
    ])
}
