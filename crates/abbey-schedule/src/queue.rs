//! `ObligationQueue` - one brother's FIFO of personal jobs.
//!
//! Only the brother's schedule fills it and only the brother's decision
//! loop drains it, so it needs no locking.

use std::collections::VecDeque;

use abbey_job::Job;

#[derive(Debug, Default)]
pub struct ObligationQueue {
    inner: VecDeque<Job>,
}

impl ObligationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `job`.
    ///
    /// A queued job with the same name that has not been taken up yet is
    /// superseded: it is removed and returned so the caller can cancel it.
    pub fn push(&mut self, job: Job) -> Option<Job> {
        let stale = self
            .inner
            .iter()
            .position(|j| j.name() == job.name())
            .and_then(|i| self.inner.remove(i));
        self.inner.push_back(job);
        stale
    }

    pub fn pop_front(&mut self) -> Option<Job> {
        self.inner.pop_front()
    }

    pub fn front(&self) -> Option<&Job> {
        self.inner.front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.inner.iter()
    }

    /// Remove every queued job, front first.
    pub fn drain(&mut self) -> impl Iterator<Item = Job> + '_ {
        self.inner.drain(..)
    }
}
