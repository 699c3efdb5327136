//! The `DecisionModel` trait - the extension point for brother behaviour.

use abbey_core::{AgentId, AgentRng};
use abbey_schedule::ObligationQueue;

use crate::{DecisionContext, Intent, Mind};

/// Pluggable brother behaviour.
///
/// Called once per brother per tick, in ascending `AgentId` order.  The
/// model owns the arbitration between the brother's obligation queue, the
/// two slots of his [`Mind`], and the shared pool reachable through
/// `ctx.workplace`.  State that varies per brother lives in the `Mind`, not
/// in the model.
///
/// # Example
///
/// ```rust,ignore
/// struct StandStill;
///
/// impl DecisionModel for StandStill {
///     fn decide(&self, _: AgentId, mind: &mut Mind, _: &mut ObligationQueue,
///               _: &mut DecisionContext<'_>, _: &mut AgentRng) -> Intent {
///         mind.phase = DecisionPhase::Idle;
///         Intent::Stay
///     }
/// }
/// ```
pub trait DecisionModel: Send + Sync + 'static {
    fn decide(
        &self,
        agent:       AgentId,
        mind:        &mut Mind,
        obligations: &mut ObligationQueue,
        ctx:         &mut DecisionContext<'_>,
        rng:         &mut AgentRng,
    ) -> Intent;
}
