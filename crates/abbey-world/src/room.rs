//! Rooms and the room registry.

use abbey_core::{AgentRng, Point, RoomId, RoomKind};

use crate::TileMap;

/// Attempts at finding a walkable point before settling for any point.
const WALKABLE_SAMPLE_TRIES: usize = 32;

/// An axis-aligned room; both corners are inside the room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub id:   RoomId,
    pub kind: RoomKind,
    pub min:  Point,
    pub max:  Point,
}

impl Room {
    pub fn contains(&self, p: Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    /// Uniform random tile of the room.
    pub fn random_point(&self, rng: &mut AgentRng) -> Point {
        Point::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
        )
    }

    /// Random tile an agent can stand on, if one turns up within a few
    /// draws; otherwise any random tile of the room.
    pub fn random_walkable_point(&self, rng: &mut AgentRng, map: &TileMap) -> Point {
        for _ in 0..WALKABLE_SAMPLE_TRIES {
            let p = self.random_point(rng);
            if map.can_enter(p) {
                return p;
            }
        }
        self.random_point(rng)
    }

    /// Every tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = Point> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Point::new(x, y)))
    }

    pub fn area(&self) -> usize {
        let w = (self.max.x - self.min.x + 1) as usize;
        let h = (self.max.y - self.min.y + 1) as usize;
        w * h
    }
}

/// All rooms of the monastery, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room spanning the two corners (in either order).
    pub fn add(&mut self, kind: RoomKind, a: Point, b: Point) -> RoomId {
        let id = RoomId(self.rooms.len() as u16);
        self.rooms.push(Room {
            id,
            kind,
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        });
        id
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// The first registered room of `kind`.
    pub fn room_of_kind(&self, kind: RoomKind) -> Option<&Room> {
        self.rooms.iter().find(|r| r.kind == kind)
    }

    pub fn rooms_of_kind(&self, kind: RoomKind) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.kind == kind)
    }

    /// The first room containing `p`.
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
