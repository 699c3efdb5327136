//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use abbey_agent::AgentStoreBuilder;
//! use abbey_core::Point;
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .brother("Brother Simon", Point::new(0, 0))
//!     .brother("Brother Paul",  Point::new(1, 1))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(),  2);
//! ```

use abbey_core::{Point, SimRng};

use crate::{AgentRngs, AgentStore, brother_name};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
pub struct AgentStoreBuilder {
    seed:           u64,
    default_effort: f32,
    names:          Vec<String>,
    positions:      Vec<Point>,
    efforts:        Vec<Option<f32>>,
}

impl AgentStoreBuilder {
    /// Create an empty roster using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            default_effort: 1.0,
            names:          Vec::new(),
            positions:      Vec::new(),
            efforts:        Vec::new(),
        }
    }

    /// Effort for brothers added without an explicit one.  Default: 1.0.
    pub fn default_effort(mut self, effort: f32) -> Self {
        self.default_effort = effort;
        self
    }

    /// Add one brother.
    pub fn brother(mut self, name: impl Into<String>, at: Point) -> Self {
        self.names.push(name.into());
        self.positions.push(at);
        self.efforts.push(None);
        self
    }

    /// Add one brother who works at a non-default rate.
    pub fn brother_with_effort(mut self, name: impl Into<String>, at: Point, effort: f32) -> Self {
        self.names.push(name.into());
        self.positions.push(at);
        self.efforts.push(Some(effort));
        self
    }

    /// Add `n` randomly named brothers standing on the diagonal
    /// `(0, 0), (1, 1), …`.
    pub fn random_brothers(mut self, n: usize, rng: &mut SimRng) -> Self {
        let start = self.names.len() as i32;
        for i in 0..n as i32 {
            let name = brother_name(rng);
            self = self.brother(name, Point::new(start + i, start + i));
        }
        self
    }

    /// Number of brothers added so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let default = self.default_effort;
        let efforts = self.efforts.into_iter().map(|e| e.unwrap_or(default)).collect();
        let store = AgentStore::new(self.names, self.positions, efforts);
        let rngs = AgentRngs::new(store.count, self.seed);
        (store, rngs)
    }
}
