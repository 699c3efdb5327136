//! Pathfinding trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The decision loop calls routing via the [`Pathfinder`] trait, so an A*
//! or flow-field implementation can be swapped in without touching it.
//!
//! # Cost model
//!
//! Moves go to any of the eight neighbours.  Entering a tile costs its
//! [`CostGrid`] value times 2 for a cardinal step or times 3 for a diagonal
//! step; tiles of cost 0 cannot be entered.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use abbey_core::Point;

use crate::{CostGrid, WorldError, WorldResult};

const CARDINAL_MULTIPLIER: u32 = 2;
const DIAGONAL_MULTIPLIER: u32 = 3;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Tiles to step onto, in order, excluding the start tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub steps: Vec<Point>,
    pub cost:  u32,
}

impl Path {
    /// The first tile to move to, or `None` if already there.
    pub fn first_step(&self) -> Option<Point> {
        self.steps.first().copied()
    }

    /// `true` if the source and destination are the same tile.
    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable grid routing.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every brother's decision step.
pub trait Pathfinder: Send + Sync {
    /// Route from `from` to `to` over `grid`.
    ///
    /// `from == to` yields an empty path.  Fails with
    /// [`WorldError::NoPath`] when `to` is unreachable.
    fn find_path(&self, from: Point, to: Point, grid: &CostGrid) -> WorldResult<Path>;
}

// ── DijkstraPathfinder ────────────────────────────────────────────────────────

/// Dijkstra over the 8-connected grid.
pub struct DijkstraPathfinder;

impl Pathfinder for DijkstraPathfinder {
    fn find_path(&self, from: Point, to: Point, grid: &CostGrid) -> WorldResult<Path> {
        dijkstra(from, to, grid)
    }
}

fn dijkstra(from: Point, to: Point, grid: &CostGrid) -> WorldResult<Path> {
    if from == to {
        return Ok(Path { steps: vec![], cost: 0 });
    }
    let no_path = WorldError::NoPath { from, to };
    let Some(src) = grid.index_of(from) else {
        return Err(no_path);
    };
    if !grid.is_passable(to) {
        return Err(no_path);
    }

    let n = grid.width() as usize * grid.height() as usize;
    let mut dist = vec![u32::MAX; n];
    let mut prev: Vec<Option<Point>> = vec![None; n];
    dist[src] = 0;

    // Reverse makes BinaryHeap (max) behave as min-heap.  The point is a
    // secondary key so ties break deterministically.
    let mut heap: BinaryHeap<Reverse<(u32, Point)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, here))) = heap.pop() {
        if here == to {
            return Ok(reconstruct(&prev, grid, to, cost));
        }
        let Some(hi) = grid.index_of(here) else { continue };
        // Skip stale heap entries.
        if cost > dist[hi] {
            continue;
        }

        for next in here.neighbours() {
            let tile = grid.cost(next);
            if tile == 0 {
                continue;
            }
            let Some(ni) = grid.index_of(next) else { continue };
            let step = if here.is_diagonal_to(next) {
                tile * DIAGONAL_MULTIPLIER
            } else {
                tile * CARDINAL_MULTIPLIER
            };
            let new_cost = cost.saturating_add(step);
            if new_cost < dist[ni] {
                dist[ni] = new_cost;
                prev[ni] = Some(here);
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    Err(no_path)
}

fn reconstruct(prev: &[Option<Point>], grid: &CostGrid, to: Point, cost: u32) -> Path {
    let mut steps = vec![to];
    let mut cur = to;
    while let Some(p) = grid.index_of(cur).and_then(|i| prev[i]) {
        steps.push(p);
        cur = p;
    }
    // Drop the start tile.
    steps.pop();
    steps.reverse();
    Path { steps, cost }
}
