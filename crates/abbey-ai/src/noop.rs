//! A decision model under which nobody does anything.

use abbey_core::{AgentId, AgentRng};
use abbey_schedule::ObligationQueue;

use crate::{DecisionContext, DecisionModel, Intent, Mind};

/// A [`DecisionModel`] that always stays put and never takes up a job.
///
/// Obligations pile up in the queue and the pool is left untouched.  Useful
/// in tests of the surrounding machinery.
pub struct NoopAi;

impl DecisionModel for NoopAi {
    fn decide(
        &self,
        _agent:       AgentId,
        _mind:        &mut Mind,
        _obligations: &mut ObligationQueue,
        _ctx:         &mut DecisionContext<'_>,
        _rng:         &mut AgentRng,
    ) -> Intent {
        Intent::Stay
    }
}
