//! Frozen generation output handed to presentation collaborators.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::types::{Coord, Corridor, RoomKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub pos: Coord,
    pub kind: RoomKind,
}

/// Which edges a walk may cross.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    OpenOnly,
    IgnoreLocks,
}

/// Inclusive coordinate box covering every room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.min.x.abs_diff(self.max.x) + 1
    }

    pub fn height(&self) -> u32 {
        self.min.y.abs_diff(self.max.y) + 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonLayout {
    /// Rooms in growth order.
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub locked_doors: Vec<Corridor>,
}

impl DungeonLayout {
    pub fn kind_at(&self, pos: Coord) -> RoomKind {
        self.rooms.iter().find(|room| room.pos == pos).map_or(RoomKind::None, |room| room.kind)
    }

    pub fn rooms_of_kind(&self, kind: RoomKind) -> impl Iterator<Item = Coord> + '_ {
        self.rooms.iter().filter(move |room| room.kind == kind).map(|room| room.pos)
    }

    pub fn count_of(&self, kind: RoomKind) -> usize {
        self.rooms_of_kind(kind).count()
    }

    pub fn start(&self) -> Option<Coord> {
        self.rooms_of_kind(RoomKind::Start).next()
    }

    pub fn boss(&self) -> Option<Coord> {
        self.rooms_of_kind(RoomKind::Boss).next()
    }

    pub fn key(&self) -> Option<Coord> {
        self.rooms_of_kind(RoomKind::Key).next()
    }

    /// Open plus locked edges touching `pos`.
    pub fn degree(&self, pos: Coord) -> usize {
        self.corridors.iter().chain(&self.locked_doors).filter(|edge| edge.touches(pos)).count()
    }

    pub fn reachable_from(&self, from: Coord, traversal: Traversal) -> BTreeSet<Coord> {
        if self.kind_at(from) == RoomKind::None {
            return BTreeSet::new();
        }
        let locked: &[Corridor] = match traversal {
            Traversal::OpenOnly => &[],
            Traversal::IgnoreLocks => &self.locked_doors,
        };

        let mut seen = BTreeSet::from([from]);
        let mut open = VecDeque::from([from]);
        while let Some(pos) = open.pop_front() {
            for edge in self.corridors.iter().chain(locked) {
                if let Some(next) = edge.other_end(pos)
                    && seen.insert(next)
                {
                    open.push_back(next);
                }
            }
        }
        seen
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.rooms.first()?.pos;
        let mut bounds = Bounds { min: first, max: first };
        for room in &self.rooms {
            bounds.min.x = bounds.min.x.min(room.pos.x);
            bounds.min.y = bounds.min.y.min(room.pos.y);
            bounds.max.x = bounds.max.x.max(room.pos.x);
            bounds.max.y = bounds.max.y.max(room.pos.y);
        }
        Some(bounds)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.pos.x.to_le_bytes());
            bytes.extend(room.pos.y.to_le_bytes());
            bytes.push(room.kind.code());
        }
        for edges in [&self.corridors, &self.locked_doors] {
            bytes.extend((edges.len() as u32).to_le_bytes());
            for edge in edges {
                bytes.extend(edge.from.x.to_le_bytes());
                bytes.extend(edge.from.y.to_le_bytes());
                bytes.extend(edge.to.x.to_le_bytes());
                bytes.extend(edge.to.y.to_le_bytes());
            }
        }
        bytes
    }
}
