//! Timers, clock and future spawning for debounced and asynchronous work.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::{Duration, Instant};

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

/// Single-threaded scheduling primitives used by a [`ReactiveStore`](crate::ReactiveStore).
pub trait Scheduler {
    /// Monotonic clock.
    fn now(&self) -> Instant;

    /// Run `task` once, no earlier than `delay` from now.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Drive `future` to completion on the current thread.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

struct Timer {
    deadline: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Deterministic scheduler with a virtual clock.
///
/// Nothing runs until the owner calls [`advance`](Self::advance) or
/// [`run_until_stalled`](Self::run_until_stalled).
pub struct ManualScheduler {
    origin: Instant,
    elapsed: Cell<Duration>,
    timers: RefCell<Vec<Timer>>,
    next_seq: Cell<u64>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("elapsed", &self.elapsed.get())
            .field("pending_timers", &self.pending_timers())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            timers: RefCell::new(Vec::new()),
            next_seq: Cell::new(0),
            pool: RefCell::new(pool),
            spawner,
        }
    }

    /// Virtual time since creation.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Poll spawned futures until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Move the clock forward by `by`, firing due timers in deadline order
    /// (ties in scheduling order). Timers scheduled by a firing task run in
    /// the same call if they fall due before the new time.
    pub fn advance(&self, by: Duration) {
        let target = self.elapsed.get() + by;
        loop {
            self.run_until_stalled();
            let Some(timer) = self.pop_due(target) else {
                break;
            };
            if timer.deadline > self.elapsed.get() {
                self.elapsed.set(timer.deadline);
            }
            (timer.task)();
        }
        self.elapsed.set(target);
        self.run_until_stalled();
    }

    fn pop_due(&self, target: Duration) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= target)
            .min_by_key(|(_, timer)| (timer.deadline, timer.seq))
            .map(|(index, _)| index)?;
        Some(timers.swap_remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            deadline: self.elapsed.get() + delay,
            seq,
            task,
        });
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawner.spawn_local(future) {
            tracing::warn!(error = %err, "failed to spawn future");
        }
    }
}

/// Scheduler backed by the tokio runtime.
///
/// Tasks are spawned with [`tokio::task::spawn_local`], so every store
/// operation that may schedule work must run inside a
/// [`tokio::task::LocalSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(future);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, ms) in [("late", 30), ("early", 10), ("tie-a", 20), ("tie-b", 20)] {
            let log = log.clone();
            scheduler.schedule(Duration::from_millis(ms), Box::new(move || log.borrow_mut().push(name)));
        }
        scheduler.advance(Duration::from_millis(20));
        assert_eq!(*log.borrow(), vec!["early", "tie-a", "tie-b"]);
        assert_eq!(scheduler.pending_timers(), 1);
        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*log.borrow(), vec!["early", "tie-a", "tie-b", "late"]);
        assert_eq!(scheduler.elapsed(), Duration::from_millis(30));
    }

    #[test]
    fn test_clock_tracks_firing_timer() {
        let scheduler = Rc::new(ManualScheduler::new());
        let start = scheduler.now();
        let seen = Rc::new(Cell::new(Duration::ZERO));
        {
            let seen = seen.clone();
            let clock = scheduler.clone();
            scheduler.schedule(
                Duration::from_millis(5),
                Box::new(move || seen.set(clock.now() - start)),
            );
        }
        scheduler.advance(Duration::from_millis(50));
        assert_eq!(seen.get(), Duration::from_millis(5));
        assert_eq!(scheduler.now() - start, Duration::from_millis(50));
    }

    #[test]
    fn test_spawned_futures_run_when_driven() {
        let scheduler = ManualScheduler::new();
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();
        scheduler.spawn(Box::pin(async move { flag.set(true) }));
        assert!(!done.get());
        scheduler.run_until_stalled();
        assert!(done.get());
    }
}
