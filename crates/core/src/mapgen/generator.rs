//! Generation pipeline: growth, boss placement, optional gating, loot.

use log::debug;

use crate::config::{GeneratorConfig, ValidatedConfig};
use crate::error::{ConfigError, GenerateError};
use crate::random::RandomSource;

use super::boss::place_boss;
use super::gating::{KeyPlacement, apply_gating};
use super::growth::grow;
use super::loot::place_loot;
use super::model::DungeonLayout;

pub struct DungeonGenerator {
    config: ValidatedConfig,
}

impl DungeonGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        Ok(Self { config: config.validate()? })
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Runs every stage to completion. The graph moves through each stage by
    /// value and is frozen into the returned layout.
    pub fn generate<R: RandomSource>(&self, rng: &mut R) -> Result<DungeonLayout, GenerateError> {
        let config = &self.config;

        let graph = grow(config.max_rooms, config.branching_factor, rng)?;
        debug!(
            "grew {} of {} rooms with {} corridors",
            graph.room_count(),
            config.max_rooms,
            graph.corridors().len()
        );

        let (graph, boss) = place_boss(graph)?;
        debug!("boss room: {boss:?}");

        let graph = if config.use_metroidvania_logic {
            let (graph, gating) = apply_gating(graph, boss, rng)?;
            debug!("locked doors: {:?}", graph.locked_doors());
            if gating.locked_door.is_none() {
                debug!("boss room has no entrance to lock");
            }
            if let Some(KeyPlacement::Fallback(pos)) = gating.key {
                debug!("no dead end available, key fell back to {pos:?}");
            }
            graph
        } else {
            graph
        };

        let (graph, treasure) = place_loot(graph, config.loot, rng)?;
        debug!("placed {} treasure rooms", treasure.len());

        Ok(graph.into_layout())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use xxhash_rust::xxh3::xxh3_64;

    use super::*;
    use crate::mapgen::audit::audit_layout;
    use crate::mapgen::model::Traversal;
    use crate::random::SeededRandom;
    use crate::types::{Coord, RoomKind};

    fn generate(config: &GeneratorConfig, seed: u64) -> DungeonLayout {
        DungeonGenerator::new(config)
            .expect("valid config")
            .generate(&mut SeededRandom::new(seed))
            .expect("generation succeeds")
    }

    fn metroidvania(max_rooms: usize, branching_factor: f64) -> GeneratorConfig {
        GeneratorConfig {
            max_rooms,
            branching_factor,
            use_metroidvania_logic: true,
            loot_room_count: Some(0),
            ..GeneratorConfig::default()
        }
    }

    fn assert_layout_invariants(layout: &DungeonLayout, config: &GeneratorConfig) {
        let start = layout.start().expect("start room exists");
        assert_eq!(start, Coord::ORIGIN);
        assert_eq!(layout.count_of(RoomKind::Start), 1);
        assert!(layout.rooms.len() <= config.max_rooms);

        let positions: BTreeSet<Coord> = layout.rooms.iter().map(|room| room.pos).collect();
        assert_eq!(positions.len(), layout.rooms.len(), "room coordinates must be unique");
        assert_eq!(layout.reachable_from(start, Traversal::IgnoreLocks), positions);

        for edge in layout.corridors.iter().chain(&layout.locked_doors) {
            assert!(edge.from.is_adjacent(edge.to));
        }
        for door in &layout.locked_doors {
            assert!(!layout.corridors.iter().any(|corridor| corridor.connects(door.from, door.to)));
        }

        if layout.rooms.len() > 1 {
            let boss = layout.boss().expect("boss exists");
            assert_eq!(layout.count_of(RoomKind::Boss), 1);
            let farthest = layout
                .rooms
                .iter()
                .map(|room| room.pos.distance_from_origin())
                .max()
                .unwrap_or_default();
            assert_eq!(boss.distance_from_origin(), farthest);
        }
        assert!(layout.count_of(RoomKind::Key) <= 1);
    }

    #[test]
    fn single_room_config_yields_only_start() {
        let config = GeneratorConfig { max_rooms: 1, ..GeneratorConfig::default() };
        let layout = generate(&config, 5);
        assert_eq!(layout.rooms.len(), 1);
        assert_eq!(layout.kind_at(Coord::ORIGIN), RoomKind::Start);
        assert!(layout.corridors.is_empty());
        assert!(layout.locked_doors.is_empty());
        assert_eq!(layout.boss(), None);
        assert_eq!(layout.key(), None);
        assert_eq!(layout.count_of(RoomKind::Treasure), 0);
    }

    #[test]
    fn generator_holds_the_clamped_config() {
        let config = GeneratorConfig {
            branching_factor: 1.5,
            branching_limit: 0.85,
            ..GeneratorConfig::default()
        };
        let generator = DungeonGenerator::new(&config).expect("clamped, not rejected");
        assert_eq!(generator.config().branching_factor, 0.85);
        assert_eq!(generator.config().max_rooms, config.max_rooms);
    }

    #[test]
    fn zero_room_config_is_rejected_before_generation() {
        let config = GeneratorConfig { max_rooms: 0, ..GeneratorConfig::default() };
        assert!(matches!(DungeonGenerator::new(&config), Err(ConfigError::NoRooms)));
    }

    #[test]
    fn same_inputs_produce_byte_identical_layouts() {
        let config = GeneratorConfig::default();
        let a = generate(&config, 123_456);
        let b = generate(&config, 123_456);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(xxh3_64(&a.canonical_bytes()), xxh3_64(&b.canonical_bytes()));
    }

    #[test]
    fn different_seeds_change_the_layout() {
        let config = GeneratorConfig { max_rooms: 30, ..GeneratorConfig::default() };
        let fingerprints: BTreeSet<u64> =
            (0..8).map(|seed| xxh3_64(&generate(&config, seed).canonical_bytes())).collect();
        assert!(fingerprints.len() > 1, "eight seeds should not all collapse to one layout");
    }

    #[test]
    fn open_mode_never_locks_or_places_a_key() {
        let config = GeneratorConfig {
            max_rooms: 20,
            use_metroidvania_logic: false,
            ..GeneratorConfig::default()
        };
        for seed in 0..20 {
            let layout = generate(&config, seed);
            assert!(layout.locked_doors.is_empty());
            assert_eq!(layout.key(), None);
            assert_layout_invariants(&layout, &config);
        }
    }

    #[test]
    fn locked_door_cuts_the_boss_off_from_open_corridors() {
        let config = metroidvania(18, 0.5);
        for seed in 0..40 {
            let layout = generate(&config, seed);
            assert_eq!(layout.locked_doors.len(), 1, "seed={seed}");
            let door = layout.locked_doors[0];
            let boss = layout.boss().expect("boss");
            assert!(door.touches(boss));

            let open = layout.reachable_from(Coord::ORIGIN, Traversal::OpenOnly);
            assert!(!open.contains(&boss), "seed={seed}: boss reachable without the key");
            assert!(open.len() < layout.rooms.len());
        }
    }

    #[test]
    fn key_lands_on_a_dead_end_whenever_one_exists() {
        let config = metroidvania(10, 0.5);
        for seed in 0..60 {
            let layout = generate(&config, seed);
            let Some(key) = layout.key() else {
                panic!("seed={seed}: ten rooms always leave a Normal room for the key");
            };
            assert_ne!(Some(key), layout.boss());
            assert_ne!(key, Coord::ORIGIN);

            let dead_end_existed = layout.rooms.iter().any(|room| {
                matches!(room.kind, RoomKind::Normal | RoomKind::Key)
                    && layout.degree(room.pos) == 1
            });
            if dead_end_existed {
                assert_eq!(layout.degree(key), 1, "seed={seed}: key should be a dead end");
            }
        }
    }

    #[test]
    fn treasure_count_matches_request_or_supply() {
        for (requested, seed) in [(0_usize, 1_u64), (3, 2), (7, 3), (500, 4)] {
            let config = GeneratorConfig {
                max_rooms: 20,
                loot_room_count: Some(requested),
                ..GeneratorConfig::default()
            };
            let layout = generate(&config, seed);
            let treasure = layout.count_of(RoomKind::Treasure);
            let available = treasure + layout.count_of(RoomKind::Normal);
            assert_eq!(treasure, requested.min(available));
        }
    }

    #[test]
    fn default_loot_rule_places_at_least_two_when_possible() {
        let config = GeneratorConfig { max_rooms: 12, ..GeneratorConfig::default() };
        let layout = generate(&config, 9);
        let treasure = layout.count_of(RoomKind::Treasure);
        let normal_before = treasure + layout.count_of(RoomKind::Normal);
        assert_eq!(treasure, 2.max(normal_before / 5).min(normal_before));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_layouts_hold_every_invariant(
            seed in any::<u64>(),
            max_rooms in 1_usize..60,
            branching_factor in 0.0_f64..=1.0,
            use_metroidvania_logic in any::<bool>(),
            loot in proptest::option::of(0_usize..10),
        ) {
            let config = GeneratorConfig {
                max_rooms,
                branching_factor,
                use_metroidvania_logic,
                loot_room_count: loot,
                ..GeneratorConfig::default()
            };
            let layout = generate(&config, seed);
            assert_layout_invariants(&layout, &config);
            let validated = config.validate().expect("valid config");
            prop_assert_eq!(audit_layout(&layout, &validated), Ok(()));
            prop_assert_eq!(layout.rooms.len(), max_rooms);
            prop_assert_eq!(
                layout.corridors.len() + layout.locked_doors.len(),
                max_rooms - 1
            );
            if !use_metroidvania_logic || max_rooms == 1 {
                prop_assert!(layout.locked_doors.is_empty());
            } else {
                prop_assert_eq!(layout.locked_doors.len(), 1);
            }
        }
    }
}
