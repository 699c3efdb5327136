//! Brother intents - what the simulation should apply after a decision.

use abbey_agent::Need;
use abbey_core::Point;

/// The physical outcome of one brother's decision this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Remain on the current tile.
    Stay,

    /// Move onto the adjacent tile.
    ///
    /// The simulation rejects the step if the tile cannot be entered.
    Step(Point),

    /// Worked the current job in place.  `restores` carries the need the job
    /// replenishes, if any.
    Work { restores: Option<Need> },
}
