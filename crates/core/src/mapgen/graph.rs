//! Working room graph owned by one generation run.

use std::collections::HashMap;

use crate::error::GraphError;
use crate::types::{Coord, Corridor, RoomKind};

use super::model::{DungeonLayout, Room};

/// Rooms in insertion order plus the open and locked edge sets.
///
/// Rooms are only ever created through [`GridGraph::add_room`], which carves
/// the corridor back to an existing room, so the graph stays connected.
/// Kinds change only through [`GridGraph::promote`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridGraph {
    rooms: Vec<Room>,
    index: HashMap<Coord, usize>,
    corridors: Vec<Corridor>,
    locked_doors: Vec<Corridor>,
}

impl GridGraph {
    pub fn with_start(start: Coord) -> Self {
        Self {
            rooms: vec![Room { pos: start, kind: RoomKind::Start }],
            index: HashMap::from([(start, 0)]),
            corridors: Vec::new(),
            locked_doors: Vec::new(),
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn contains(&self, pos: Coord) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn kind(&self, pos: Coord) -> RoomKind {
        self.index.get(&pos).map_or(RoomKind::None, |&slot| self.rooms[slot].kind)
    }

    /// Rooms in the order they were grown.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rooms_of_kind(&self, kind: RoomKind) -> Vec<Coord> {
        self.rooms.iter().filter(|room| room.kind == kind).map(|room| room.pos).collect()
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn locked_doors(&self) -> &[Corridor] {
        &self.locked_doors
    }

    /// Creates a Normal room at `to` joined to the existing room at `from`.
    pub fn add_room(&mut self, from: Coord, to: Coord) -> Result<(), GraphError> {
        if !self.contains(from) {
            return Err(GraphError::MissingRoom(from));
        }
        if self.contains(to) {
            return Err(GraphError::Occupied(to));
        }
        if !from.is_adjacent(to) {
            return Err(GraphError::NotAdjacent { from, to });
        }

        self.index.insert(to, self.rooms.len());
        self.rooms.push(Room { pos: to, kind: RoomKind::Normal });
        self.corridors.push(Corridor::new(from, to));
        Ok(())
    }

    /// Overwrites a Normal room's kind. This is the only path that changes a
    /// placed room, and it refuses every non-Normal target.
    pub fn promote(&mut self, pos: Coord, kind: RoomKind) -> Result<(), GraphError> {
        let slot = *self.index.get(&pos).ok_or(GraphError::MissingRoom(pos))?;
        let current = self.rooms[slot].kind;
        if current != RoomKind::Normal {
            return Err(GraphError::ProtectedRoom { pos, kind: current });
        }
        self.rooms[slot].kind = kind;
        Ok(())
    }

    /// Moves the first open corridor touching `pos` into the locked set.
    pub fn lock_first_corridor_touching(&mut self, pos: Coord) -> Option<Corridor> {
        let edge_index = self.corridors.iter().position(|corridor| corridor.touches(pos))?;
        let corridor = self.corridors.remove(edge_index);
        self.locked_doors.push(corridor);
        Some(corridor)
    }

    /// Incident edge count per room, open and locked alike.
    pub fn degrees(&self) -> HashMap<Coord, usize> {
        let mut degrees: HashMap<Coord, usize> =
            self.rooms.iter().map(|room| (room.pos, 0)).collect();
        for corridor in self.corridors.iter().chain(&self.locked_doors) {
            for end in [corridor.from, corridor.to] {
                if let Some(count) = degrees.get_mut(&end) {
                    *count += 1;
                }
            }
        }
        degrees
    }

    pub fn into_layout(self) -> DungeonLayout {
        DungeonLayout {
            rooms: self.rooms,
            corridors: self.corridors,
            locked_doors: self.locked_doors,
        }
    }
}
