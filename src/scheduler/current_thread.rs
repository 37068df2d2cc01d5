use std::{cell::RefCell, collections::VecDeque, sync::Arc};

use tracing::trace;

use crate::prelude::*;

struct QueuedAction {
  action: Box<dyn FnOnce(&CurrentThreadScheduler) + Send>,
  cancel: Arc<BooleanDisposable>,
}

thread_local! {
  /// `None` while no trampoline loop is running on this thread.
  static TRAMPOLINE: RefCell<Option<VecDeque<QueuedAction>>> = const { RefCell::new(None) };
}

/// Cooperative trampoline confined to the calling thread.
///
/// The first `schedule` on a thread starts a loop that runs the action, then
/// keeps draining the thread's queue (including actions queued by the actions
/// it runs) until it is empty. A `schedule` issued while the loop is active
/// only enqueues and returns. Actions therefore run in FIFO order and chained
/// scheduling costs O(1) stack depth.
///
/// This is a zero-sized type: all instances on one thread share one queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentThreadScheduler;

impl CurrentThreadScheduler {
  /// Whether a trampoline loop is currently draining on this thread, i.e.
  /// whether `schedule` would enqueue instead of running right away.
  pub fn is_draining() -> bool { TRAMPOLINE.with(|q| q.borrow().is_some()) }

  fn drain(&self, first: QueuedAction) {
    // Resets the thread state even when an action unwinds.
    struct DrainGuard;
    impl Drop for DrainGuard {
      fn drop(&mut self) { TRAMPOLINE.with(|q| q.borrow_mut().take()); }
    }

    let _guard = DrainGuard;
    trace!("trampoline started");
    let mut drained = 0usize;
    let mut next = Some(first);
    while let Some(item) = next {
      if item.cancel.is_disposed() {
        trace!("cancelled action skipped");
      } else {
        (item.action)(self);
      }
      drained += 1;
      next = TRAMPOLINE.with(|q| q.borrow_mut().as_mut().and_then(VecDeque::pop_front));
    }
    trace!(drained, "trampoline drained");
  }
}

impl Scheduler for CurrentThreadScheduler {
  fn schedule<F>(&self, action: F) -> BoxedDisposable
  where
    F: FnOnce(&Self) + Send + 'static,
  {
    let cancel = Arc::new(BooleanDisposable::new());
    let item = QueuedAction { action: Box::new(action), cancel: cancel.clone() };

    let run_now = TRAMPOLINE.with(|q| {
      let mut q = q.borrow_mut();
      match q.as_mut() {
        Some(queue) => {
          queue.push_back(item);
          None
        }
        None => {
          *q = Some(VecDeque::new());
          Some(item)
        }
      }
    });
    if let Some(item) = run_now {
      self.drain(item);
    }

    BoxedDisposable::new(cancel)
  }
}
