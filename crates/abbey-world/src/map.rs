//! The tile map.
//!
//! # Data layout
//!
//! Per-tile data is stored row-major in flat `Vec`s indexed by
//! `y * width + x`.  Props are sparse, so they live in a hash map keyed by
//! tile; each tile may hold several props (a floor under a pending-job
//! marker, say).

use abbey_core::{Point, PropKind};

use crate::{WorldError, WorldResult};

#[cfg(feature = "fx-hash")]
type PropIndex = rustc_hash::FxHashMap<Point, Vec<PropKind>>;
#[cfg(not(feature = "fx-hash"))]
type PropIndex = std::collections::HashMap<Point, Vec<PropKind>>;

/// Rectangular grid of tiles.
pub struct TileMap {
    width:     u32,
    height:    u32,
    walkable:  Vec<bool>,
    /// Terrain cost of entering a walkable tile (≥ 1).
    base_cost: Vec<u32>,
    props:     PropIndex,
}

impl TileMap {
    /// An open, fully walkable map with unit terrain cost.
    pub fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            walkable:  vec![true; n],
            base_cost: vec![1; n],
            props:     PropIndex::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Flat index of `p`, or `None` off the map.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    fn checked_index(&self, p: Point) -> WorldResult<usize> {
        self.index_of(p).ok_or(WorldError::OutOfBounds(p))
    }

    // ── Terrain ───────────────────────────────────────────────────────────

    /// `false` off the map.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.index_of(p).is_some_and(|i| self.walkable[i])
    }

    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> WorldResult<()> {
        let i = self.checked_index(p)?;
        self.walkable[i] = walkable;
        Ok(())
    }

    /// Terrain cost of `p`; `0` off the map.
    #[inline]
    pub fn base_cost(&self, p: Point) -> u32 {
        self.index_of(p).map_or(0, |i| self.base_cost[i])
    }

    /// Set the terrain cost of `p`, clamped to at least 1.
    pub fn set_base_cost(&mut self, p: Point, cost: u32) -> WorldResult<()> {
        let i = self.checked_index(p)?;
        self.base_cost[i] = cost.max(1);
        Ok(())
    }

    /// Row-major walkability flags, one per tile.
    pub(crate) fn walkable_slice(&self) -> &[bool] {
        &self.walkable
    }

    pub(crate) fn base_cost_slice(&self) -> &[u32] {
        &self.base_cost
    }

    // ── Props ─────────────────────────────────────────────────────────────

    pub fn props_at(&self, p: Point) -> &[PropKind] {
        self.props.get(&p).map_or(&[], Vec::as_slice)
    }

    pub fn has_prop(&self, prop: PropKind, at: Point) -> bool {
        self.props_at(at).contains(&prop)
    }

    /// The first movement-blocking prop on `p`, if any.
    pub fn blocking_prop_at(&self, p: Point) -> Option<PropKind> {
        self.props_at(p).iter().copied().find(|k| k.blocks_movement())
    }

    /// Tiles holding at least one movement-blocking prop.
    pub fn blocking_tiles(&self) -> impl Iterator<Item = Point> + '_ {
        self.props
            .iter()
            .filter(|(_, ks)| ks.iter().any(|k| k.blocks_movement()))
            .map(|(p, _)| *p)
    }

    pub fn spawn_prop(&mut self, prop: PropKind, at: Point) -> WorldResult<()> {
        self.checked_index(at)?;
        self.props.entry(at).or_default().push(prop);
        Ok(())
    }

    /// Remove one instance of `prop` from `at`.
    pub fn remove_prop(&mut self, prop: PropKind, at: Point) -> WorldResult<()> {
        self.checked_index(at)?;
        let missing = WorldError::MissingProp { prop, at };
        let Some(stack) = self.props.get_mut(&at) else {
            return Err(missing);
        };
        let Some(pos) = stack.iter().position(|&k| k == prop) else {
            return Err(missing);
        };
        stack.remove(pos);
        if stack.is_empty() {
            self.props.remove(&at);
        }
        Ok(())
    }

    /// Spawn a wall and make the tile unwalkable.
    pub fn build_wall(&mut self, at: Point) -> WorldResult<()> {
        self.spawn_prop(PropKind::Wall, at)?;
        self.set_walkable(at, false)
    }

    /// Lay a floor and make the tile walkable.
    pub fn build_floor(&mut self, at: Point) -> WorldResult<()> {
        self.spawn_prop(PropKind::Floor, at)?;
        self.set_walkable(at, true)
    }

    /// Whether an agent may step onto `p`: on the map, walkable, and free of
    /// blocking props.
    pub fn can_enter(&self, p: Point) -> bool {
        self.is_walkable(p) && self.blocking_prop_at(p).is_none()
    }

    /// Render the map as text: props by glyph, open floor as `.`, unwalkable
    /// bare tiles as space.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let p = Point::new(x, y);
                let glyph = match self.props_at(p).last() {
                    Some(k) => k.glyph(),
                    None if self.is_walkable(p) => '.',
                    None => ' ',
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
