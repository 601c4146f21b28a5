//! Text rendering and viewport framing for generated layouts.

use dungeon_core::{Bounds, Coord, DungeonLayout, RoomKind};
use serde::Serialize;

/// Cells between two neighbouring rooms in the rendered grid.
pub const SPACING: i32 = 2;
/// World units kept clear around the dungeon when framing.
pub const FRAME_PADDING: f64 = 2.0;
pub const MIN_HALF_HEIGHT: f64 = 5.0;

pub fn room_glyph(kind: RoomKind) -> char {
    match kind {
        RoomKind::None => ' ',
        RoomKind::Start => 'S',
        RoomKind::Normal => 'o',
        RoomKind::Boss => 'B',
        RoomKind::Key => 'K',
        RoomKind::Treasure => 'T',
    }
}

pub const LEGEND: &str = "S start  B boss  K key  T treasure  o room  -| corridor  =# locked door";

pub fn render_ascii(layout: &DungeonLayout) -> String {
    let Some(bounds) = layout.bounds() else {
        return String::new();
    };
    let columns = ((bounds.width() as i32 - 1) * SPACING + 1) as usize;
    let rows = ((bounds.height() as i32 - 1) * SPACING + 1) as usize;
    let mut cells = vec![vec![' '; columns]; rows];

    let cell = |pos: Coord, dx: i32, dy: i32| -> (usize, usize) {
        let column = (pos.x - bounds.min.x) * SPACING + dx;
        let row = (bounds.max.y - pos.y) * SPACING - dy;
        (row as usize, column as usize)
    };

    for (edges, horizontal, vertical) in
        [(&layout.corridors, '-', '|'), (&layout.locked_doors, '=', '#')]
    {
        for edge in edges {
            let dx = edge.to.x - edge.from.x;
            let dy = edge.to.y - edge.from.y;
            let (row, column) = cell(edge.from, dx, dy);
            cells[row][column] = if dy == 0 { horizontal } else { vertical };
        }
    }
    for room in &layout.rooms {
        let (row, column) = cell(room.pos, 0, 0);
        cells[row][column] = room_glyph(room.kind);
    }

    let mut text = String::new();
    for row in cells {
        let line: String = row.into_iter().collect();
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

/// Orthographic camera placement that fits the whole dungeon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub center_x: f64,
    pub center_y: f64,
    pub half_height: f64,
}

pub fn frame(bounds: Bounds, aspect: f64) -> Viewport {
    let spacing = f64::from(SPACING);
    let min_x = f64::from(bounds.min.x) * spacing;
    let max_x = f64::from(bounds.max.x) * spacing;
    let min_y = f64::from(bounds.min.y) * spacing;
    let max_y = f64::from(bounds.max.y) * spacing;

    let height = (max_y - min_y) + 2.0 * FRAME_PADDING;
    let width = (max_x - min_x) + 2.0 * FRAME_PADDING;

    Viewport {
        center_x: (min_x + max_x) / 2.0,
        center_y: (min_y + max_y) / 2.0,
        half_height: (height / 2.0).max(width / aspect / 2.0).max(MIN_HALF_HEIGHT),
    }
}
