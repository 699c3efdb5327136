//! `BrotherAi` - the default decision loop.
//!
//! Each tick a brother:
//!
//! 1. takes the next obligation from his queue if his personal slot is free
//!    (a still-pending obligation of the same name is cancelled and replaced);
//! 2. pursues the personal job if he holds one, else his pool job, else pulls
//!    a fresh one from the pool;
//! 3. works the job if standing on its selected location, otherwise steps
//!    along the cheapest path towards it;
//! 4. with nothing to do, either wanders off to gather in the idle room or
//!    stands still for a while.
//!
//! An obligation preempts pool work without discarding it: the pool job stays
//! in its slot and is resumed once the obligation completes.

use abbey_core::{AgentId, AgentRng, Point};
use abbey_job::{JobSpec, JobState, Progress, WorkerView};
use abbey_schedule::ObligationQueue;
use tracing::{debug, warn};

use crate::{DecisionContext, DecisionModel, DecisionPhase, HeldJob, Intent, Mind, Slot};

/// Name of the self-assigned job an idle brother walks off to do.
pub const GATHER_JOB: &str = "Gather";

#[derive(Debug, Default, Clone, Copy)]
pub struct BrotherAi;

impl DecisionModel for BrotherAi {
    fn decide(
        &self,
        agent:       AgentId,
        mind:        &mut Mind,
        obligations: &mut ObligationQueue,
        ctx:         &mut DecisionContext<'_>,
        rng:         &mut AgentRng,
    ) -> Intent {
        let here = ctx.agents.position_of(agent);
        take_obligation(agent, mind, obligations, ctx, here);

        match choose_slot(agent, mind, ctx, here) {
            Some(slot) => {
                mind.current = Some(slot);
                mind.idle_until = None;
                pursue(agent, slot, mind, ctx, here)
            }
            None => idle(agent, mind, ctx, rng, here),
        }
    }
}

// ── Slot management ───────────────────────────────────────────────────────────

fn take_obligation(
    agent:       AgentId,
    mind:        &mut Mind,
    obligations: &mut ObligationQueue,
    ctx:         &mut DecisionContext<'_>,
    here:        Point,
) {
    let superseded = match (&mind.personal, obligations.front()) {
        (Some(held), Some(next)) => {
            held.job.state() == JobState::Pending && held.job.name() == next.name()
        }
        _ => false,
    };
    if superseded {
        if let Some(mut held) = mind.personal.take() {
            debug!(agent = %agent, job = %held.job.id(), name = held.job.name(), "obligation superseded");
            if let Err(error) = held.job.cancel(ctx.workplace.runner()) {
                warn!(agent = %agent, %error, "could not cancel superseded obligation");
            }
        }
        if mind.current == Some(Slot::Personal) {
            mind.current = None;
        }
    }

    if mind.personal.is_none() {
        if let Some(job) = obligations.pop_front() {
            debug!(agent = %agent, job = %job.id(), name = job.name(), "obligation taken up");
            mind.personal = Some(HeldJob::take_up(job, here));
        }
    }
}

fn choose_slot(
    agent: AgentId,
    mind:  &mut Mind,
    ctx:   &mut DecisionContext<'_>,
    here:  Point,
) -> Option<Slot> {
    if mind.personal.is_some() {
        return Some(Slot::Personal);
    }

    // Real pool work displaces idle busywork.
    let holding_busywork = mind.pool.as_ref().is_some_and(|h| h.busywork);
    if mind.pool.is_some() && !holding_busywork {
        return Some(Slot::Pool);
    }

    match ctx.workplace.pull_job() {
        Some(job) => {
            if let Some(mut gather) = mind.pool.take() {
                if let Err(error) = gather.job.cancel(ctx.workplace.runner()) {
                    warn!(agent = %agent, %error, "could not cancel busywork");
                }
            }
            debug!(agent = %agent, job = %job.id(), name = job.name(), "pool job taken up");
            mind.pool = Some(HeldJob::take_up(job, here));
            Some(Slot::Pool)
        }
        None if holding_busywork => Some(Slot::Pool),
        None => None,
    }
}

fn release(mind: &mut Mind, slot: Slot) {
    *mind.slot_mut(slot) = None;
    mind.current = None;
}

fn waiting_phase(slot: Slot) -> DecisionPhase {
    match slot {
        Slot::Personal => DecisionPhase::HasPersonalJob,
        Slot::Pool     => DecisionPhase::HasPoolJob,
    }
}

// ── Travel and work ───────────────────────────────────────────────────────────

fn pursue(
    agent: AgentId,
    slot:  Slot,
    mind:  &mut Mind,
    ctx:   &mut DecisionContext<'_>,
    here:  Point,
) -> Intent {
    let Some(held) = mind.slot_mut(slot).as_mut() else {
        mind.current = None;
        mind.phase = DecisionPhase::Idle;
        return Intent::Stay;
    };

    let target = held.target();
    if here == target {
        return work(agent, slot, mind, ctx, here);
    }

    match ctx.pathfinder.find_path(here, target, ctx.grid) {
        Ok(path) => {
            held.unreachable_streak = 0;
            mind.phase = DecisionPhase::Travelling;
            path.first_step().map_or(Intent::Stay, Intent::Step)
        }
        Err(error) => {
            let exhausted = held.skip_unreachable();
            if exhausted && held.busywork {
                if let Some(mut gather) = mind.slot_mut(slot).take() {
                    if let Err(error) = gather.job.cancel(ctx.workplace.runner()) {
                        warn!(agent = %agent, %error, "could not cancel unreachable busywork");
                    }
                }
                mind.current = None;
                mind.phase = DecisionPhase::Idle;
                return Intent::Stay;
            }
            if exhausted {
                warn!(
                    agent = %agent,
                    job = %held.job.id(),
                    name = held.job.name(),
                    %error,
                    "no location reachable, retrying next tick",
                );
            }
            mind.phase = waiting_phase(slot);
            Intent::Stay
        }
    }
}

fn work(
    agent: AgentId,
    slot:  Slot,
    mind:  &mut Mind,
    ctx:   &mut DecisionContext<'_>,
    here:  Point,
) -> Intent {
    let Some(held) = mind.slot_mut(slot).as_mut() else {
        return Intent::Stay;
    };

    let restores = held.job.restores();
    let mut view = WorkerView {
        agent,
        position: here,
        effort:   ctx.agents.effort[agent.index()],
        needs:    ctx.agents.needs[agent.index()],
    };
    // The predicate sees the needs as they will be after this tick's work.
    if let Some(need) = restores {
        view.needs.restore(need, ctx.config.restore_per_tick);
    }

    let now = ctx.now();
    match held.job.update(&view, now, ctx.workplace.runner()) {
        Ok(Progress::Working) => {}
        Ok(Progress::Completed) => release(mind, slot),
        Err(error) => {
            warn!(agent = %agent, %error, "dropping finished job");
            release(mind, slot);
        }
    }
    mind.phase = DecisionPhase::Working;
    Intent::Work { restores }
}

// ── Idling ────────────────────────────────────────────────────────────────────

fn idle(
    agent: AgentId,
    mind:  &mut Mind,
    ctx:   &mut DecisionContext<'_>,
    rng:   &mut AgentRng,
    here:  Point,
) -> Intent {
    mind.current = None;
    mind.phase = DecisionPhase::Idle;

    let now = ctx.now();
    if mind.idle_until.is_some_and(|until| now < until) {
        return Intent::Stay;
    }
    mind.idle_until = None;

    if rng.gen_bool(ctx.config.idle_gather_chance) {
        let spot = ctx
            .workplace
            .rooms()
            .room_of_kind(ctx.config.idle_room)
            .map(|room| room.random_walkable_point(rng, ctx.workplace.map()));

        if let Some(spot) = spot {
            let spec = JobSpec::builder(GATHER_JOB).at(spot).effort(1.0).build();
            match ctx.workplace.create_job(spec) {
                Ok(job) => {
                    let mut held = HeldJob::take_up(job, here);
                    held.busywork = true;
                    mind.pool = Some(held);
                    mind.current = Some(Slot::Pool);
                    return pursue(agent, Slot::Pool, mind, ctx, here);
                }
                Err(error) => warn!(agent = %agent, %error, "could not create busywork"),
            }
        }
    }

    mind.idle_until = Some(now.offset(ctx.config.idle_wait_ticks));
    Intent::Stay
}
