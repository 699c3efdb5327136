//! Unit tests for abbey-world.
//!
//! All tests use small hand-drawn layouts.

#[cfg(test)]
mod map {
    use abbey_core::{Point, PropKind};

    use crate::{TileMap, WorldError};

    #[test]
    fn bounds_and_walkability() {
        let mut map = TileMap::new(4, 3);
        assert!(map.in_bounds(Point::new(3, 2)));
        assert!(!map.in_bounds(Point::new(4, 0)));
        assert!(!map.in_bounds(Point::new(-1, 0)));
        assert!(!map.is_walkable(Point::new(9, 9)));

        map.set_walkable(Point::new(1, 1), false).unwrap();
        assert!(!map.is_walkable(Point::new(1, 1)));
        assert!(matches!(
            map.set_walkable(Point::new(7, 0), false),
            Err(WorldError::OutOfBounds(_))
        ));
    }

    #[test]
    fn props_stack_and_remove() {
        let mut map = TileMap::new(3, 3);
        let p = Point::new(1, 1);
        map.spawn_prop(PropKind::Floor, p).unwrap();
        map.spawn_prop(PropKind::PendingJob, p).unwrap();
        assert_eq!(map.props_at(p), &[PropKind::Floor, PropKind::PendingJob]);

        map.remove_prop(PropKind::PendingJob, p).unwrap();
        assert_eq!(map.props_at(p), &[PropKind::Floor]);
        assert!(matches!(
            map.remove_prop(PropKind::Field, p),
            Err(WorldError::MissingProp { prop: PropKind::Field, .. })
        ));
    }

    #[test]
    fn wall_blocks_floor_opens() {
        let mut map = TileMap::new(3, 3);
        let p = Point::new(2, 0);
        map.build_wall(p).unwrap();
        assert!(!map.is_walkable(p));
        assert!(!map.can_enter(p));
        assert_eq!(map.blocking_prop_at(p), Some(PropKind::Wall));

        let q = Point::new(0, 2);
        map.set_walkable(q, false).unwrap();
        map.build_floor(q).unwrap();
        assert!(map.can_enter(q));
    }

    #[test]
    fn render_shows_props() {
        let mut map = TileMap::new(3, 1);
        map.build_wall(Point::new(0, 0)).unwrap();
        map.spawn_prop(PropKind::Field, Point::new(2, 0)).unwrap();
        assert_eq!(map.render(), "#.\"\n");
    }
}

#[cfg(test)]
mod ascii {
    use abbey_core::{Point, PropKind, RoomKind};

    use crate::{WorldError, parse_ascii_map};

    const LAYOUT: &str = "
#########
#QQQ.DDD#
#QQQ.DDD#
#..O+...#
#########
";

    #[test]
    fn parses_terrain_and_rooms() {
        let (map, rooms) = parse_ascii_map(LAYOUT).unwrap();
        assert_eq!((map.width(), map.height()), (9, 5));
        assert!(!map.is_walkable(Point::new(0, 0)));
        assert!(map.is_walkable(Point::new(4, 1)));
        assert_eq!(map.blocking_prop_at(Point::new(3, 3)), Some(PropKind::StonePillar));
        assert!(map.has_prop(PropKind::Door, Point::new(4, 3)));

        let quire = rooms.room_of_kind(RoomKind::Quire).unwrap();
        assert_eq!((quire.min, quire.max), (Point::new(1, 1), Point::new(3, 2)));
        assert_eq!(quire.area(), 6);
        let dorm = rooms.room_of_kind(RoomKind::Dormitory).unwrap();
        assert!(dorm.contains(Point::new(7, 2)));
        assert!(rooms.room_of_kind(RoomKind::Refectory).is_none());
        assert_eq!(rooms.room_at(Point::new(2, 2)).map(|r| r.kind), Some(RoomKind::Quire));
    }

    #[test]
    fn rejects_ragged_and_unknown() {
        assert!(matches!(parse_ascii_map("...\n..\n"), Err(WorldError::RaggedMap { row: 1, .. })));
        assert!(matches!(parse_ascii_map("..x\n"), Err(WorldError::UnknownGlyph { glyph: 'x', .. })));
        assert!(matches!(parse_ascii_map("\n\n"), Err(WorldError::EmptyMap)));
    }
}

#[cfg(test)]
mod room {
    use abbey_core::{AgentId, AgentRng, Point, RoomKind};

    use crate::{RoomRegistry, TileMap};

    #[test]
    fn random_point_is_inclusive_and_inside() {
        let mut reg = RoomRegistry::new();
        let id = reg.add(RoomKind::Refectory, Point::new(4, 3), Point::new(2, 1));
        let room = reg.get(id).unwrap();
        assert_eq!(room.min, Point::new(2, 1));

        let mut rng = AgentRng::new(5, AgentId(0));
        let mut hit_max = false;
        for _ in 0..500 {
            let p = room.random_point(&mut rng);
            assert!(room.contains(p), "{p} outside room");
            hit_max |= p == room.max;
        }
        assert!(hit_max, "inclusive upper corner never drawn");
    }

    #[test]
    fn walkable_point_avoids_blocked_tiles() {
        let mut map = TileMap::new(3, 1);
        map.build_wall(Point::new(0, 0)).unwrap();
        map.build_wall(Point::new(1, 0)).unwrap();
        let mut reg = RoomRegistry::new();
        reg.add(RoomKind::Cellarium, Point::new(0, 0), Point::new(2, 0));
        let room = reg.room_of_kind(RoomKind::Cellarium).unwrap();

        let mut rng = AgentRng::new(1, AgentId(2));
        for _ in 0..20 {
            assert_eq!(room.random_walkable_point(&mut rng, &map), Point::new(2, 0));
        }
    }

    #[test]
    fn first_room_of_kind_wins() {
        let mut reg = RoomRegistry::new();
        reg.add(RoomKind::Farm, Point::new(0, 0), Point::new(1, 1));
        reg.add(RoomKind::Farm, Point::new(5, 5), Point::new(6, 6));
        assert_eq!(reg.room_of_kind(RoomKind::Farm).unwrap().min, Point::new(0, 0));
        assert_eq!(reg.rooms_of_kind(RoomKind::Farm).count(), 2);
        assert_eq!(reg.room_of_kind(RoomKind::Farm).unwrap().tiles().count(), 4);
    }
}

#[cfg(test)]
mod cost {
    use abbey_core::{Point, PropKind};

    use crate::{AGENT_PENALTY, CostGrid, PROP_PENALTY, TileMap};

    #[test]
    fn penalties_stack_on_base() {
        let mut map = TileMap::new(4, 1);
        map.set_base_cost(Point::new(1, 0), 3).unwrap();
        map.spawn_prop(PropKind::StonePillar, Point::new(2, 0)).unwrap();
        map.build_wall(Point::new(3, 0)).unwrap();

        let agents = [Point::new(1, 0), Point::new(1, 0), Point::new(3, 0)];
        let grid = CostGrid::build(&map, &agents);
        assert_eq!(grid.cost(Point::new(0, 0)), 1);
        assert_eq!(grid.cost(Point::new(1, 0)), 3 + 2 * AGENT_PENALTY);
        assert_eq!(grid.cost(Point::new(2, 0)), 1 + PROP_PENALTY);
        assert_eq!(grid.cost(Point::new(3, 0)), 0, "unwalkable stays impassable");
        assert_eq!(grid.cost(Point::new(-1, 0)), 0);
    }

    #[test]
    fn rebuild_reflects_new_positions() {
        let map = TileMap::new(2, 2);
        let mut grid = CostGrid::build(&map, &[Point::new(0, 0)]);
        assert_eq!(grid.cost(Point::new(0, 0)), 1 + AGENT_PENALTY);
        grid.rebuild(&map, &[Point::new(1, 1)]);
        assert_eq!(grid.cost(Point::new(0, 0)), 1);
        assert_eq!(grid.cost(Point::new(1, 1)), 1 + AGENT_PENALTY);
    }
}

#[cfg(test)]
mod path {
    use abbey_core::Point;

    use crate::{CostGrid, DijkstraPathfinder, Pathfinder, TileMap, WorldError, parse_ascii_map};

    #[test]
    fn same_tile_is_trivial() {
        let map = TileMap::new(3, 3);
        let grid = CostGrid::build(&map, &[]);
        let path = DijkstraPathfinder.find_path(Point::new(1, 1), Point::new(1, 1), &grid).unwrap();
        assert!(path.is_trivial());
        assert_eq!(path.first_step(), None);
    }

    #[test]
    fn open_field_prefers_diagonals() {
        let map = TileMap::new(6, 6);
        let grid = CostGrid::build(&map, &[]);
        let path = DijkstraPathfinder.find_path(Point::new(0, 0), Point::new(3, 3), &grid).unwrap();
        assert_eq!(path.steps, vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]);
        assert_eq!(path.cost, 9);
    }

    #[test]
    fn routes_around_walls() {
        let (map, _) = parse_ascii_map(
            "
.....
.###.
.....
",
        )
        .unwrap();
        let grid = CostGrid::build(&map, &[]);
        let path = DijkstraPathfinder.find_path(Point::new(2, 0), Point::new(2, 2), &grid).unwrap();
        assert!(path.steps.iter().all(|&p| map.can_enter(p)));
        assert_eq!(path.steps.last(), Some(&Point::new(2, 2)));
        // Every step is one king move from the previous tile.
        let mut prev = Point::new(2, 0);
        for &s in &path.steps {
            assert!(prev.is_adjacent(s));
            prev = s;
        }
    }

    #[test]
    fn walled_off_target_has_no_path() {
        let (map, _) = parse_ascii_map(
            "
.....
.###.
.#.#.
.###.
",
        )
        .unwrap();
        let grid = CostGrid::build(&map, &[]);
        let err = DijkstraPathfinder
            .find_path(Point::new(0, 0), Point::new(2, 2), &grid)
            .unwrap_err();
        assert!(matches!(err, WorldError::NoPath { .. }));

        let err = DijkstraPathfinder
            .find_path(Point::new(0, 0), Point::new(2, 1), &grid)
            .unwrap_err();
        assert!(matches!(err, WorldError::NoPath { .. }), "unwalkable target");
    }

    #[test]
    fn crowded_tile_is_avoided_when_cheap_detour_exists() {
        let map = TileMap::new(3, 3);
        let grid = CostGrid::build(&map, &[Point::new(1, 0), Point::new(1, 1)]);
        let path = DijkstraPathfinder.find_path(Point::new(0, 0), Point::new(2, 0), &grid).unwrap();
        assert!(!path.steps.contains(&Point::new(1, 0)));
        assert!(!path.steps.contains(&Point::new(1, 1)));
    }
}
