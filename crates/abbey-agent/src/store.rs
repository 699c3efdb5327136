//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The decision loop needs `&mut AgentRngs` (exclusive access to one
//! brother's RNG) while reading `&AgentStore` (every brother's position, for
//! occupancy).  Keeping the RNGs in a separate struct lets both borrows
//! coexist without cloning state.

use abbey_core::{AbbeyError, AbbeyResult, AgentId, AgentRng, Point};

use crate::Needs;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to enable
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all brothers.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];
/// ```
///
/// Jobs and minds refer to brothers by `AgentId` only; nothing outside this
/// store owns agent data.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Display name, e.g. `"Brother Paul"`.
    pub name: Vec<String>,

    /// Current tile.
    pub position: Vec<Point>,

    /// Work applied per tick to effort-based jobs.
    pub effort: Vec<f32>,

    /// Hunger and energy.
    pub needs: Vec<Needs>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// `Ok(())` if `agent` indexes a stored brother.
    pub fn check(&self, agent: AgentId) -> AbbeyResult<()> {
        if agent.index() < self.count {
            Ok(())
        } else {
            Err(AbbeyError::AgentNotFound(agent))
        }
    }

    #[inline]
    pub fn position_of(&self, agent: AgentId) -> Point {
        self.position[agent.index()]
    }

    #[inline]
    pub fn name_of(&self, agent: AgentId) -> &str {
        &self.name[agent.index()]
    }

    /// The lowest-id brother standing on `p`, if any.
    pub fn agent_at(&self, p: Point) -> Option<AgentId> {
        self.position
            .iter()
            .position(|&q| q == p)
            .map(|i| AgentId(i as u32))
    }

    /// Apply one tick of need decay to every brother.
    pub fn decay_needs(&mut self, hunger_per_tick: f32, fatigue_per_tick: f32) {
        for needs in &mut self.needs {
            needs.decay(hunger_per_tick, fatigue_per_tick);
        }
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(name: Vec<String>, position: Vec<Point>, effort: Vec<f32>) -> Self {
        let count = name.len();
        debug_assert_eq!(position.len(), count);
        debug_assert_eq!(effort.len(), count);
        Self {
            count,
            name,
            position,
            effort,
            needs: vec![Needs::default(); count],
        }
    }
}
