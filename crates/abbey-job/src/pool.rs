//! FIFO pool of pending jobs.
//!
//! [`JobPool`] is the plain single-owner queue.  [`SharedJobPool`] wraps it in
//! `Arc<Mutex<_>>` so producers on other threads (a UI, a scripted scenario)
//! can push while the tick loop pulls; every push and pull holds the lock for
//! the whole operation, so the pair is linearizable.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Job, JobError, JobResult, JobState};

// ── JobPool ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct JobPool {
    queue: VecDeque<Job>,
}

impl JobPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `job` at the back.  Only pending jobs are accepted.
    pub fn push(&mut self, job: Job) -> JobResult<()> {
        if job.state() != JobState::Pending {
            return Err(JobError::NotPending { id: job.id(), state: job.state() });
        }
        self.queue.push_back(job);
        Ok(())
    }

    /// Remove and return the earliest-inserted job; `None` when empty.
    pub fn try_pull(&mut self) -> Option<Job> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Waiting jobs, front first.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.queue.iter()
    }
}

// ── SharedJobPool ─────────────────────────────────────────────────────────────

/// Cloneable handle to one mutex-guarded [`JobPool`].
#[derive(Clone, Debug, Default)]
pub struct SharedJobPool {
    inner: Arc<Mutex<JobPool>>,
}

impl SharedJobPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, job: Job) -> JobResult<()> {
        self.lock().push(job)
    }

    pub fn try_pull(&self) -> Option<Job> {
        self.lock().try_pull()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Run `f` with exclusive access to the pool.
    pub fn with<T>(&self, f: impl FnOnce(&mut JobPool) -> T) -> T {
        f(&mut self.lock())
    }

    // A panic while holding the lock cannot leave the VecDeque half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, JobPool> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
