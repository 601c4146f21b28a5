//! Metroidvania post-pass: lock the boss entrance and hide a key at a dead end.

use log::debug;

use crate::error::GraphError;
use crate::random::RandomSource;
use crate::types::{Coord, Corridor, RoomKind};

use super::graph::GridGraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Gating {
    pub(super) locked_door: Option<Corridor>,
    pub(super) key: Option<KeyPlacement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum KeyPlacement {
    DeadEnd(Coord),
    Fallback(Coord),
}

impl KeyPlacement {
    pub(super) fn pos(self) -> Coord {
        match self {
            Self::DeadEnd(pos) | Self::Fallback(pos) => pos,
        }
    }
}

pub(super) fn apply_gating<R: RandomSource>(
    mut graph: GridGraph,
    boss: Option<Coord>,
    rng: &mut R,
) -> Result<(GridGraph, Gating), GraphError> {
    let locked_door = boss.and_then(|boss| graph.lock_first_corridor_touching(boss));
    if let Some(door) = locked_door {
        debug!("locked boss entrance {:?} <-> {:?}", door.from, door.to);
    }

    let key = choose_key_room(&graph, rng);
    if let Some(placement) = key {
        graph.promote(placement.pos(), RoomKind::Key)?;
        debug!("key placed: {placement:?}");
    }

    Ok((graph, Gating { locked_door, key }))
}

fn choose_key_room<R: RandomSource>(graph: &GridGraph, rng: &mut R) -> Option<KeyPlacement> {
    let degrees = graph.degrees();
    let normal_rooms = graph.rooms_of_kind(RoomKind::Normal);
    let dead_ends: Vec<Coord> =
        normal_rooms.iter().copied().filter(|pos| degrees.get(pos) == Some(&1)).collect();

    if let Some(&pos) = rng.pick(&dead_ends) {
        return Some(KeyPlacement::DeadEnd(pos));
    }
    rng.pick(&normal_rooms).map(|&pos| KeyPlacement::Fallback(pos))
}
