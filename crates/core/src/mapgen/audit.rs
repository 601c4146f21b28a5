//! Structural checks a finished layout must pass for the config that built it.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::ValidatedConfig;
use crate::types::{Coord, RoomKind};

use super::model::{DungeonLayout, Traversal};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutViolation {
    #[error("expected one Start room at the origin")]
    StartMissing,
    #[error("{0} rooms exceed the budget of {1}")]
    OverBudget(usize, usize),
    #[error("two rooms share {0:?}")]
    DuplicateRoom(Coord),
    #[error("edge {0:?} <-> {1:?} is malformed or repeated")]
    BadEdge(Coord, Coord),
    #[error("{0} rooms are unreachable from the start")]
    Disconnected(usize),
    #[error("expected exactly one Boss room, found {0}")]
    BossCount(usize),
    #[error("boss at {0:?} is not the farthest room from the origin")]
    BossNotFarthest(Coord),
    #[error("expected {expected} locked doors, found {found}")]
    LockCount { expected: usize, found: usize },
    #[error("the boss can be reached without crossing the locked door")]
    BossNotGated,
    #[error("key placement is wrong: {0}")]
    Key(&'static str),
    #[error("expected {expected} treasure rooms, found {found}")]
    TreasureCount { expected: usize, found: usize },
}

pub fn audit_layout(
    layout: &DungeonLayout,
    config: &ValidatedConfig,
) -> Result<(), LayoutViolation> {
    audit_rooms(layout, config)?;
    audit_edges(layout)?;
    audit_boss(layout)?;
    if config.use_metroidvania_logic {
        audit_gating(layout)?;
    } else if !layout.locked_doors.is_empty() || layout.key().is_some() {
        return Err(LayoutViolation::Key("open layouts carry no lock or key"));
    }
    audit_treasure(layout, config)
}

fn audit_rooms(layout: &DungeonLayout, config: &ValidatedConfig) -> Result<(), LayoutViolation> {
    if layout.rooms.len() > config.max_rooms {
        return Err(LayoutViolation::OverBudget(layout.rooms.len(), config.max_rooms));
    }
    if layout.count_of(RoomKind::Start) != 1 || layout.start() != Some(Coord::ORIGIN) {
        return Err(LayoutViolation::StartMissing);
    }
    let mut seen = HashSet::new();
    for room in &layout.rooms {
        if room.kind == RoomKind::None || !seen.insert(room.pos) {
            return Err(LayoutViolation::DuplicateRoom(room.pos));
        }
    }
    let reachable = layout.reachable_from(Coord::ORIGIN, Traversal::IgnoreLocks);
    if reachable.len() != layout.rooms.len() {
        return Err(LayoutViolation::Disconnected(layout.rooms.len() - reachable.len()));
    }
    Ok(())
}

fn audit_edges(layout: &DungeonLayout) -> Result<(), LayoutViolation> {
    let mut seen = HashSet::new();
    for edge in layout.corridors.iter().chain(&layout.locked_doors) {
        let key = if edge.from <= edge.to { (edge.from, edge.to) } else { (edge.to, edge.from) };
        let joins_rooms = layout.kind_at(edge.from) != RoomKind::None
            && layout.kind_at(edge.to) != RoomKind::None;
        if !edge.from.is_adjacent(edge.to) || !joins_rooms || !seen.insert(key) {
            return Err(LayoutViolation::BadEdge(edge.from, edge.to));
        }
    }
    Ok(())
}

fn audit_boss(layout: &DungeonLayout) -> Result<(), LayoutViolation> {
    let bosses = layout.count_of(RoomKind::Boss);
    let expected = usize::from(layout.rooms.len() > 1);
    if bosses != expected {
        return Err(LayoutViolation::BossCount(bosses));
    }
    if let Some(boss) = layout.boss() {
        let farthest =
            layout.rooms.iter().map(|room| room.pos.distance_from_origin()).max().unwrap_or(0);
        if boss.distance_from_origin() != farthest {
            return Err(LayoutViolation::BossNotFarthest(boss));
        }
    }
    Ok(())
}

fn audit_gating(layout: &DungeonLayout) -> Result<(), LayoutViolation> {
    let Some(boss) = layout.boss() else {
        if !layout.locked_doors.is_empty() {
            return Err(LayoutViolation::LockCount { expected: 0, found: layout.locked_doors.len() });
        }
        return Ok(());
    };

    if layout.locked_doors.len() != 1 {
        return Err(LayoutViolation::LockCount { expected: 1, found: layout.locked_doors.len() });
    }
    if !layout.locked_doors[0].touches(boss)
        || layout.reachable_from(Coord::ORIGIN, Traversal::OpenOnly).contains(&boss)
    {
        return Err(LayoutViolation::BossNotGated);
    }

    // Treasure is placed after the key, so those rooms were still Normal then.
    let was_normal = |kind: RoomKind| {
        matches!(kind, RoomKind::Normal | RoomKind::Key | RoomKind::Treasure)
    };
    let had_normal = layout.rooms.iter().any(|room| was_normal(room.kind));
    let had_dead_end =
        layout.rooms.iter().any(|room| was_normal(room.kind) && layout.degree(room.pos) == 1);

    match layout.key() {
        None if had_normal => Err(LayoutViolation::Key("a Normal room was available")),
        None => Ok(()),
        Some(_) if layout.count_of(RoomKind::Key) > 1 => Err(LayoutViolation::Key("duplicated")),
        Some(key) if had_dead_end && layout.degree(key) != 1 => {
            Err(LayoutViolation::Key("a dead end existed but the key is not on one"))
        }
        Some(_) => Ok(()),
    }
}

fn audit_treasure(layout: &DungeonLayout, config: &ValidatedConfig) -> Result<(), LayoutViolation> {
    let found = layout.count_of(RoomKind::Treasure);
    let available = found + layout.count_of(RoomKind::Normal);
    let expected = config.loot.resolve(available).min(available);
    if found != expected {
        return Err(LayoutViolation::TreasureCount { expected, found });
    }
    Ok(())
}
