//! Per-tick movement cost grid.
//!
//! Rebuilt once per world tick, before any brother plans a step:
//!
//! ```text
//! cost = 0                                  if the tile is unwalkable
//!      = base + AGENT_PENALTY * agents_here
//!             + PROP_PENALTY  * blocked     otherwise
//! ```
//!
//! `0` means impassable.  Penalties keep blocked and crowded tiles usable
//! as a last resort while steering routes around them.

use abbey_core::Point;

use crate::TileMap;

/// Added for each agent standing on a tile.
pub const AGENT_PENALTY: u32 = 10;

/// Added once if a tile holds a movement-blocking prop.
pub const PROP_PENALTY: u32 = 1000;

#[derive(Clone, Debug, Default)]
pub struct CostGrid {
    width:  u32,
    height: u32,
    cost:   Vec<u32>,
}

impl CostGrid {
    /// Build a grid for `map` with the given agents on it.
    pub fn build(map: &TileMap, agents: &[Point]) -> Self {
        let mut grid = Self::default();
        grid.rebuild(map, agents);
        grid
    }

    /// Recompute every tile in place, reusing the allocation.
    pub fn rebuild(&mut self, map: &TileMap, agents: &[Point]) {
        self.width = map.width();
        self.height = map.height();
        let n = self.width as usize * self.height as usize;
        self.cost.resize(n, 0);

        let walkable = map.walkable_slice();
        let base = map.base_cost_slice();

        #[cfg(not(feature = "parallel"))]
        for (i, c) in self.cost.iter_mut().enumerate() {
            *c = if walkable[i] { base[i] } else { 0 };
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            let width = (self.width as usize).max(1);
            self.cost
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, chunk)| {
                    let start = row * width;
                    for (dx, c) in chunk.iter_mut().enumerate() {
                        let i = start + dx;
                        *c = if walkable[i] { base[i] } else { 0 };
                    }
                });
        }

        for p in map.blocking_tiles() {
            if let Some(i) = map.index_of(p) {
                if self.cost[i] > 0 {
                    self.cost[i] += PROP_PENALTY;
                }
            }
        }
        for &p in agents {
            if let Some(i) = map.index_of(p) {
                if self.cost[i] > 0 {
                    self.cost[i] += AGENT_PENALTY;
                }
            }
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
    pub fn index_of(&self, p: Point) -> Option<usize> {
        (p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Cost of entering `p`; `0` (impassable) off the grid.
    #[inline]
    pub fn cost(&self, p: Point) -> u32 {
        self.index_of(p).map_or(0, |i| self.cost[i])
    }

    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cost(p) > 0
    }
}
