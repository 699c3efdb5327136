//! `AgentSchedule` - a brother's list of daily appointments.

use std::sync::Arc;

use tracing::{debug, warn};

use abbey_core::TimeOfDay;
use abbey_job::JobSpec;

use crate::{
    AttendService, GoToBed, ObligationContext, ObligationFactory, ScheduleEvent, ScheduleResult,
    TakeMeal,
};

/// Minutes a brother is expected to spend at each service of the horarium.
pub const SERVICE_MINUTES: u64 = 30;

/// The canonical hours, in the order they are sung.
pub const SERVICES: [(&str, TimeOfDay); 9] = [
    ("Vigil",    TimeOfDay::hm(2, 0)),
    ("Matins",   TimeOfDay::hm(3, 0)),
    ("Lauds",    TimeOfDay::hm(5, 0)),
    ("Prime",    TimeOfDay::hm(6, 0)),
    ("Terce",    TimeOfDay::hm(9, 0)),
    ("Sext",     TimeOfDay::hm(12, 0)),
    ("Nones",    TimeOfDay::hm(15, 0)),
    ("Vespers",  TimeOfDay::hm(18, 0)),
    ("Compline", TimeOfDay::hm(19, 0)),
];

/// An event that came due this tick, with the job it produced.
#[derive(Debug)]
pub struct DueObligation {
    pub event: String,
    pub cycle: i64,
    pub spec:  JobSpec,
}

/// Ordered list of daily events.  Duplicate names and times are allowed.
#[derive(Clone, Debug, Default)]
pub struct AgentSchedule {
    events: Vec<ScheduleEvent>,
}

impl AgentSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// The monastic day: the nine services, lunch after Sext, and bed after
    /// Compline.
    pub fn horarium() -> Self {
        let service: Arc<dyn ObligationFactory> =
            Arc::new(AttendService { duration_minutes: SERVICE_MINUTES });
        let (morning, evening) = SERVICES.split_at(6);
        let mut s = Self::new();
        for &(name, time) in morning {
            s.add_event(name, service.clone(), time);
        }
        s.add_event("Lunch", Arc::new(TakeMeal), TimeOfDay::hm(13, 0));
        for &(name, time) in evening {
            s.add_event(name, service.clone(), time);
        }
        s.add_event("Bedtime", Arc::new(GoToBed), TimeOfDay::hm(20, 0));
        s
    }

    /// Append an event.
    pub fn add_event(
        &mut self,
        name:    impl Into<String>,
        factory: Arc<dyn ObligationFactory>,
        time:    TimeOfDay,
    ) {
        self.events.push(ScheduleEvent::new(name, time, factory));
    }

    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fire every event whose window contains the current time and that has
    /// not fired this cycle.
    ///
    /// Events are visited in insertion order.  A factory failure (say, no
    /// quire on the map) is logged and returned in place of the job; the
    /// event still counts as fired for this cycle.
    pub fn update(
        &mut self,
        ctx:            &mut ObligationContext<'_>,
        window_minutes: u32,
    ) -> Vec<ScheduleResult<DueObligation>> {
        let run_minute = ctx.clock.run_minute();
        let mut due = Vec::new();
        for event in &mut self.events {
            let Some(cycle) = event.try_fire(run_minute, window_minutes) else {
                continue;
            };
            let made = event.factory.make(&event.name, ctx);
            match &made {
                Ok(_) => debug!(agent = %ctx.agent, event = %event.name, cycle, "obligation due"),
                Err(e) => warn!(agent = %ctx.agent, event = %event.name, error = %e, "obligation skipped"),
            }
            due.push(made.map(|spec| DueObligation { event: event.name.clone(), cycle, spec }));
        }
        due
    }
}
