use std::sync::Arc;

use futures::{executor::ThreadPool, future};
use once_cell::sync::Lazy;

use crate::prelude::*;

static DEFAULT_POOL: Lazy<ThreadPool> =
  Lazy::new(|| ThreadPool::new().expect("failed to build the default thread pool"));

/// Spawns every action on a `futures` thread pool.
///
/// `schedule` never runs the action on the calling thread and returns right
/// away. Recursive continuations are spawned as new tasks, so they never nest
/// on any stack. Actions scheduled on a pool have no ordering guarantee
/// relative to each other.
#[derive(Clone)]
pub struct ThreadPoolScheduler {
  pool: ThreadPool,
}

impl ThreadPoolScheduler {
  pub fn new(pool: ThreadPool) -> Self { ThreadPoolScheduler { pool } }
}

impl Default for ThreadPoolScheduler {
  /// Shares the process-wide pool, built on first use.
  fn default() -> Self { ThreadPoolScheduler { pool: DEFAULT_POOL.clone() } }
}

impl Scheduler for ThreadPoolScheduler {
  fn schedule<F>(&self, action: F) -> BoxedDisposable
  where
    F: FnOnce(&Self) + Send + 'static,
  {
    let cancel = Arc::new(BooleanDisposable::new());
    let c_cancel = cancel.clone();
    let scheduler = self.clone();
    self.pool.spawn_ok(future::lazy(move |_| {
      if !c_cancel.is_disposed() {
        action(&scheduler);
      }
    }));
    BoxedDisposable::new(cancel)
  }
}
