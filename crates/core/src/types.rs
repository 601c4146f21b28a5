use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Distance used by boss placement: `|x| + |y|`.
    pub fn distance_from_origin(self) -> u32 {
        self.manhattan(Self::ORIGIN)
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RoomKind {
    /// No room occupies the coordinate.
    #[default]
    None,
    Start,
    Normal,
    Boss,
    Key,
    Treasure,
}

impl RoomKind {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Start => 1,
            Self::Normal => 2,
            Self::Boss => 3,
            Self::Key => 4,
            Self::Treasure => 5,
        }
    }
}

/// An edge between two adjacent rooms. Stored in the orientation it was
/// carved (`from` is the room growth expanded out of) but compared as an
/// unordered pair by [`Corridor::connects`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    pub from: Coord,
    pub to: Coord,
}

impl Corridor {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    pub fn touches(&self, pos: Coord) -> bool {
        self.from == pos || self.to == pos
    }

    pub fn connects(&self, a: Coord, b: Coord) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    pub fn other_end(&self, pos: Coord) -> Option<Coord> {
        if self.from == pos {
            Some(self.to)
        } else if self.to == pos {
            Some(self.from)
        } else {
            None
        }
    }
}
