//! Rate-limiting gate with at most one pending execution.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::scheduler::Scheduler;

struct State<A> {
    pending: bool,
    generation: u64,
    last_run: Option<Instant>,
    next_args: Option<A>,
}

struct Shared<A> {
    callback: Box<dyn Fn(A)>,
    delay: Duration,
    immediate: bool,
    state: RefCell<State<A>>,
}

impl<A> Shared<A> {
    fn execute(&self, now: Instant) {
        let args = {
            let mut state = self.state.borrow_mut();
            state.pending = false;
            state.last_run = Some(now);
            state.next_args.take()
        };
        if let Some(args) = args {
            (self.callback)(args);
        }
    }
}

/// Wraps a callback so that bursts of calls collapse into few executions.
///
/// While nothing is pending, a call runs the callback right away when
/// `immediate` is set and the last execution is at least `delay` old (or
/// there has been none). Any other call schedules one execution after the
/// rest of the cool-down since the last execution, or after the full
/// `delay` when there has been none. Calls made while an execution is
/// pending only replace the arguments it will receive.
pub struct Debounce<A> {
    shared: Rc<Shared<A>>,
    scheduler: Rc<dyn Scheduler>,
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<A: 'static> Debounce<A> {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        delay: Duration,
        immediate: bool,
        callback: impl Fn(A) + 'static,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                callback: Box::new(callback),
                delay,
                immediate,
                state: RefCell::new(State {
                    pending: false,
                    generation: 0,
                    last_run: None,
                    next_args: None,
                }),
            }),
            scheduler,
        }
    }

    pub fn call(&self, args: A) {
        let now = self.scheduler.now();
        let wait = {
            let mut state = self.shared.state.borrow_mut();
            state.next_args = Some(args);
            if state.pending {
                return;
            }
            let since = state.last_run.map(|last| now.saturating_duration_since(last));
            let cooled = since.map_or(true, |since| since >= self.shared.delay);
            if self.shared.immediate && cooled {
                None
            } else {
                state.pending = true;
                let wait = since.map_or(self.shared.delay, |since| self.shared.delay.saturating_sub(since));
                Some((wait, state.generation))
            }
        };
        match wait {
            None => self.shared.execute(now),
            Some((wait, generation)) => {
                let shared = Rc::downgrade(&self.shared);
                let scheduler = Rc::downgrade(&self.scheduler);
                self.scheduler.schedule(
                    wait,
                    Box::new(move || {
                        let (Some(shared), Some(scheduler)) = (shared.upgrade(), scheduler.upgrade()) else {
                            return;
                        };
                        if shared.state.borrow().generation == generation {
                            shared.execute(scheduler.now());
                        }
                    }),
                );
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.shared.state.borrow().pending
    }

    /// Drop the pending execution, if any. Its timer still fires but does
    /// nothing.
    pub fn cancel(&self) {
        let mut state = self.shared.state.borrow_mut();
        state.next_args = None;
        state.pending = false;
        state.generation = state.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    fn setup(delay_ms: u64, immediate: bool) -> (Rc<ManualScheduler>, Debounce<u32>, Rc<RefCell<Vec<u32>>>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let debounce = Debounce::new(
            scheduler.clone(),
            Duration::from_millis(delay_ms),
            immediate,
            move |n| sink.borrow_mut().push(n),
        );
        (scheduler, debounce, calls)
    }

    #[test]
    fn test_immediate_first_call_then_trailing_latest() {
        let (scheduler, debounce, calls) = setup(100, true);
        debounce.call(1);
        assert_eq!(*calls.borrow(), vec![1]);
        debounce.call(2);
        debounce.call(3);
        assert!(debounce.is_pending());
        assert_eq!(scheduler.pending_timers(), 1);
        scheduler.advance(Duration::from_millis(99));
        assert_eq!(*calls.borrow(), vec![1]);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![1, 3]);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_immediate_after_quiet_period() {
        let (scheduler, debounce, calls) = setup(100, true);
        debounce.call(1);
        scheduler.advance(Duration::from_millis(100));
        debounce.call(2);
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_remaining_wait_in_immediate_mode() {
        let (scheduler, debounce, calls) = setup(100, true);
        debounce.call(1);
        scheduler.advance(Duration::from_millis(60));
        debounce.call(2);
        scheduler.advance(Duration::from_millis(40));
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_trailing_only() {
        let (scheduler, debounce, calls) = setup(50, false);
        debounce.call(1);
        debounce.call(2);
        assert!(calls.borrow().is_empty());
        scheduler.advance(Duration::from_millis(50));
        assert_eq!(*calls.borrow(), vec![2]);
        debounce.call(3);
        scheduler.advance(Duration::from_millis(49));
        assert_eq!(*calls.borrow(), vec![2]);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_cancel_drops_pending_args() {
        let (scheduler, debounce, calls) = setup(10, false);
        debounce.call(1);
        debounce.cancel();
        assert!(!debounce.is_pending());
        scheduler.advance(Duration::from_millis(10));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_call_after_cancel_ignores_stale_timer() {
        let (scheduler, debounce, calls) = setup(100, false);
        debounce.call(1);
        scheduler.advance(Duration::from_millis(50));
        debounce.cancel();
        debounce.call(2);
        assert!(debounce.is_pending());
        scheduler.advance(Duration::from_millis(50));
        assert!(calls.borrow().is_empty());
        scheduler.advance(Duration::from_millis(50));
        assert_eq!(*calls.borrow(), vec![2]);
    }

    #[test]
    fn test_remaining_wait_in_trailing_mode() {
        let (scheduler, debounce, calls) = setup(100, false);
        debounce.call(1);
        scheduler.advance(Duration::from_millis(160));
        assert_eq!(*calls.borrow(), vec![1]);
        debounce.call(2);
        scheduler.advance(Duration::from_millis(39));
        assert_eq!(*calls.borrow(), vec![1]);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![1, 2]);
        assert_eq!(scheduler.elapsed(), Duration::from_millis(200));
    }
}
