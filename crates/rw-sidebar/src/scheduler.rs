//! Timer scheduling for the pointer-event guard.
//!
//! The platform capability is injected once, when a sidebar is built:
//! - [`TokioScheduler`]: real timers on a tokio runtime
//! - [`ManualScheduler`]: virtual clock advanced explicitly by the caller
//! - [`NoopScheduler`]: non-interactive output, the pointer guard never engages
//!
//! Every scheduled task returns a [`TimerHandle`]. Dropping the handle
//! cancels the task, so replacing a stored handle cancels the old timer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Deferred work run by a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Error creating a scheduler.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// No tokio runtime is running on the current thread.
    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Schedules one-shot tasks after a delay.
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`, unless the returned handle is dropped first.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Whether this platform reacts to pointer input at all.
    ///
    /// Non-interactive schedulers disable the pointer guard entirely.
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Handle to a scheduled task.
///
/// Uses RAII: dropping the handle cancels the task if it has not run yet.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    /// Create a handle that runs `cancel` when dropped.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Create a handle that does nothing on drop.
    #[must_use]
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Cancel the task immediately (consumes the handle).
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by tokio timers.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto the given runtime.
    #[must_use]
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Create a scheduler for the runtime of the current thread.
    pub fn current() -> Result<Self, SchedulerError> {
        Ok(Self::new(tokio::runtime::Handle::try_current()?))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TimerHandle::new(move || join.abort())
    }
}

/// Scheduler for non-interactive output (static HTML, server rendering).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn schedule(&self, _delay: Duration, _task: Task) -> TimerHandle {
        TimerHandle::detached()
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Virtual-clock scheduler.
///
/// Time only moves when [`advance`](Self::advance) is called, which makes
/// animation timing deterministic. Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, (Duration, Task)>,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.lock().timers.len()
    }

    /// Move the clock forward, running every timer that becomes due.
    ///
    /// Timers fire in deadline order (ties in scheduling order). Tasks run
    /// without the clock locked, so they may schedule further timers.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;
        loop {
            let due = {
                let mut clock = self.lock();
                let next = clock
                    .timers
                    .iter()
                    .filter(|(_, (deadline, _))| *deadline <= target)
                    .min_by_key(|(id, (deadline, _))| (*deadline, **id))
                    .map(|(id, _)| *id);
                match next.and_then(|id| clock.timers.remove(&id)) {
                    Some((deadline, task)) => {
                        clock.now = clock.now.max(deadline);
                        Some(task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match due {
                Some(task) => task(),
                None => break,
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualClock> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = {
            let mut clock = self.lock();
            let id = clock.next_id;
            clock.next_id += 1;
            let deadline = clock.now + delay;
            clock.timers.insert(id, (deadline, task));
            id
        };

        let inner = Arc::downgrade(&self.inner);
        TimerHandle::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .timers
                    .remove(&id);
            }
        })
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.timers.len())
            .finish()
    }
}
