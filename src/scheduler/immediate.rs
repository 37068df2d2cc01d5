use std::{
  collections::VecDeque,
  sync::{Arc, Mutex},
};

use crate::prelude::*;

/// Runs every action synchronously, on the caller's thread, before
/// `schedule` returns.
///
/// Recursive scheduling is flattened into a loop inside the first call: a
/// continuation requested while the loop is running is queued and picked up by
/// the next turn, so the call stack does not grow with the iteration count.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
  fn schedule<F>(&self, action: F) -> BoxedDisposable
  where
    F: FnOnce(&Self) + Send + 'static,
  {
    action(self);
    BoxedDisposable::empty()
  }

  fn schedule_recursive<S, F>(&self, state: S, action: F) -> BoxedDisposable
  where
    S: Send + 'static,
    F: Fn(S, &Recurse<S>) + Send + Sync + 'static,
  {
    let inline = Arc::new(InlineLoop {
      action,
      cancel: Arc::new(BooleanDisposable::new()),
      queue: Mutex::new(LoopQueue { draining: false, pending: VecDeque::new() }),
    });
    let handle = BoxedDisposable::new(inline.cancel.clone());
    inline.push(state);
    handle
  }
}

struct LoopQueue<S> {
  draining: bool,
  pending: VecDeque<S>,
}

struct InlineLoop<S, F> {
  action: F,
  cancel: Arc<BooleanDisposable>,
  queue: Mutex<LoopQueue<S>>,
}

impl<S, F> InlineLoop<S, F>
where
  S: Send + 'static,
  F: Fn(S, &Recurse<S>) + Send + Sync + 'static,
{
  fn push(self: &Arc<Self>, state: S) {
    {
      let mut queue = self.queue.lock().unwrap();
      queue.pending.push_back(state);
      if queue.draining {
        return;
      }
      queue.draining = true;
    }

    loop {
      let next = {
        let mut queue = self.queue.lock().unwrap();
        let next = if self.cancel.is_disposed() { None } else { queue.pending.pop_front() };
        if next.is_none() {
          queue.pending.clear();
          queue.draining = false;
        }
        next
      };
      let Some(state) = next else { break };

      let this = self.clone();
      let recurse = Recurse::new(move |next: S| this.push(next));
      (self.action)(state, &recurse);
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};

  #[test]
  fn runs_before_returning() {
    let ran = Arc::new(AtomicUsize::new(0));
    let c_ran = ran.clone();
    let handle = IMMEDIATE.schedule(move |_| {
      c_ran.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(ran.load(Ordering::SeqCst), 1);
    handle.dispose();
    assert_eq!(ran.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn nested_schedule_is_inline() {
    let order = Arc::new(Mutex::new(vec![]));
    let c_order = order.clone();
    IMMEDIATE.schedule(move |scheduler| {
      c_order.lock().unwrap().push("outer start");
      let inner_order = c_order.clone();
      scheduler.schedule(move |_| inner_order.lock().unwrap().push("inner"));
      c_order.lock().unwrap().push("outer end");
    });
    assert_eq!(*order.lock().unwrap(), vec!["outer start", "inner", "outer end"]);
  }

  #[test]
  fn deep_recursion_does_not_overflow() {
    let last = Arc::new(AtomicUsize::new(0));
    let c_last = last.clone();
    IMMEDIATE.schedule_recursive(0usize, move |i, recurse| {
      c_last.store(i, Ordering::SeqCst);
      if i < 200_000 {
        recurse.schedule(i + 1);
      }
    });
    assert_eq!(last.load(Ordering::SeqCst), 200_000);
  }

  #[test]
  fn continuation_after_the_loop_restarts_it() {
    let kept = Arc::new(Mutex::new(None));
    let seen = Arc::new(Mutex::new(vec![]));
    let (c_kept, c_seen) = (kept.clone(), seen.clone());
    IMMEDIATE.schedule_recursive(0, move |i, recurse| {
      c_seen.lock().unwrap().push(i);
      if i == 0 {
        *c_kept.lock().unwrap() = Some(recurse.clone());
      }
    });
    assert_eq!(*seen.lock().unwrap(), vec![0]);

    let recurse = kept.lock().unwrap().take().unwrap();
    recurse.schedule(1);
    assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
  }

  #[test]
  fn cancelled_loop_ignores_later_continuations() {
    let kept = Arc::new(Mutex::new(None));
    let hits = Arc::new(AtomicUsize::new(0));
    let (c_kept, c_hits) = (kept.clone(), hits.clone());
    let handle = IMMEDIATE.schedule_recursive((), move |_, recurse| {
      c_hits.fetch_add(1, Ordering::SeqCst);
      *c_kept.lock().unwrap() = Some(recurse.clone());
    });
    handle.dispose();

    let recurse = kept.lock().unwrap().take().unwrap();
    recurse.schedule(());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }
}
