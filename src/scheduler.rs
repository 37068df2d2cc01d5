//! Schedulers decide *when* and *on what execution context* a unit of work
//! runs.
//!
//! A [`Scheduler`] exposes two capabilities:
//!
//! - [`Scheduler::schedule`] runs one action according to the scheduler's
//!   policy and returns a handle that cancels it while it is still pending.
//! - [`Scheduler::schedule_recursive`] runs an action that may ask for its own
//!   continuation through a [`Recurse`] handle. Continuations go back through
//!   the scheduler instead of recursing natively, so an unbounded loop never
//!   grows the call stack.
//!
//! Provided variants:
//!
//! | Scheduler | Policy |
//! |-----------|--------|
//! | [`ImmediateScheduler`] | inline, before `schedule` returns |
//! | [`CurrentThreadScheduler`] | FIFO trampoline on the calling thread |
//! | `ThreadPoolScheduler` | spawned on a `futures` thread pool (feature `futures-scheduler`) |

use std::sync::Arc;

use crate::prelude::*;

mod current_thread;
mod immediate;
#[cfg(feature = "futures-scheduler")]
mod thread_pool_scheduler;

pub use current_thread::CurrentThreadScheduler;
pub use immediate::ImmediateScheduler;
#[cfg(feature = "futures-scheduler")]
pub use thread_pool_scheduler::ThreadPoolScheduler;

/// Process-wide immediate scheduler.
pub static IMMEDIATE: ImmediateScheduler = ImmediateScheduler;

/// Process-wide current-thread (trampoline) scheduler.
pub static CURRENT_THREAD: CurrentThreadScheduler = CurrentThreadScheduler;

/// A Scheduler is an object to order actions and schedule their execution.
///
/// Scheduled actions that invoke user code are responsible for turning user
/// failures into `on_error`; the scheduler itself only lets infrastructure
/// failures (panics) propagate.
pub trait Scheduler: Clone + Send + Sync + 'static {
  /// Runs `action` according to this scheduler's policy.
  ///
  /// The returned handle prevents the action from running if disposed before
  /// it starts; afterwards disposing it is a no-op.
  fn schedule<F>(&self, action: F) -> BoxedDisposable
  where
    F: FnOnce(&Self) + Send + 'static;

  /// Runs `action` with `state`, giving it a [`Recurse`] handle to request
  /// the next iteration with a new state.
  ///
  /// Disposing the returned handle stops the chain: no continuation that has
  /// not started yet will run.
  fn schedule_recursive<S, F>(&self, state: S, action: F) -> BoxedDisposable
  where
    S: Send + 'static,
    F: Fn(S, &Recurse<S>) + Send + Sync + 'static,
  {
    let cancel = Arc::new(BooleanDisposable::new());
    reschedule(self, state, Arc::new(action), cancel.clone());
    BoxedDisposable::new(cancel)
  }
}

/// Re-invocation handle given to a recursive action.
///
/// Calling [`Recurse::schedule`] queues the next iteration through the same
/// scheduling policy. The handle is clonable and may also be kept and called
/// later, e.g. from a callback that fires after the action returned.
pub struct Recurse<S>(Arc<dyn Fn(S) + Send + Sync>);

impl<S> Clone for Recurse<S> {
  fn clone(&self) -> Self { Recurse(self.0.clone()) }
}

impl<S> Recurse<S> {
  pub fn new(reinvoke: impl Fn(S) + Send + Sync + 'static) -> Self { Recurse(Arc::new(reinvoke)) }

  /// Requests the next iteration with `state`.
  #[inline]
  pub fn schedule(&self, state: S) { (self.0)(state) }
}

/// Recursion through [`Scheduler::schedule`]: every continuation becomes a
/// freshly scheduled action, so stack safety is whatever the scheduler's
/// `schedule` guarantees (a trampoline or another thread).
fn reschedule<Sch, S, F>(scheduler: &Sch, state: S, action: Arc<F>, cancel: Arc<BooleanDisposable>)
where
  Sch: Scheduler,
  S: Send + 'static,
  F: Fn(S, &Recurse<S>) + Send + Sync + 'static,
{
  if cancel.is_disposed() {
    return;
  }
  scheduler.schedule(move |scheduler: &Sch| {
    if cancel.is_disposed() {
      return;
    }
    let recurse = {
      let scheduler = scheduler.clone();
      let action = action.clone();
      let cancel = cancel.clone();
      Recurse::new(move |next: S| reschedule(&scheduler, next, action.clone(), cancel.clone()))
    };
    action(state, &recurse);
  });
}
