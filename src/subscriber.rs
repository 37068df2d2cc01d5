use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
  },
};

use tracing::trace;

use crate::prelude::*;

/// Framework-managed wrapper around the observer of one subscription.
///
/// Every `Observable::subscribe` call wraps its observer in a fresh
/// `Subscriber`, hands a clone to the subscribe function, and returns the
/// `Subscriber` itself (boxed) as the release handle. It guarantees:
///
/// - at most one terminal notification reaches the observer, and nothing
///   reaches it afterwards;
/// - once stopped (terminated or disposed), [`Subscriber::is_stopped`] reports
///   it, which scheduled continuations check before emitting;
/// - on a terminal notification or on dispose, the teardown returned by the
///   subscribe function is disposed ("auto-detach").
pub struct Subscriber<Item, Err> {
  observer: Arc<Mutex<Option<BoxedObserver<Item, Err>>>>,
  stopped: Arc<AtomicBool>,
  teardown: Arc<SingleAssignmentDisposable>,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self {
    Subscriber {
      observer: self.observer.clone(),
      stopped: self.stopped.clone(),
      teardown: self.teardown.clone(),
    }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  pub fn new<O>(observer: O) -> Self
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    Subscriber {
      observer: Arc::new(Mutex::new(Some(Box::new(observer)))),
      stopped: Arc::new(AtomicBool::new(false)),
      teardown: Arc::new(SingleAssignmentDisposable::new()),
    }
  }

  /// Whether the subscription has terminated or been disposed.
  #[inline]
  pub fn is_stopped(&self) -> bool { self.stopped.load(Ordering::Acquire) }

  /// Attaches the resources the subscribe function produced. If the
  /// subscription already stopped, they are released immediately.
  pub(crate) fn set_teardown(&self, teardown: BoxedDisposable) { self.teardown.set(teardown) }

  fn take_observer(&self) -> Option<BoxedObserver<Item, Err>> { self.observer.lock().unwrap().take() }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  fn on_next(&mut self, value: Item) {
    if self.is_stopped() {
      trace!("on_next dropped, subscriber already stopped");
      return;
    }
    if let Some(observer) = self.observer.lock().unwrap().as_mut() {
      observer.on_next(value);
    }
  }

  fn on_error(&mut self, err: Err) {
    if self.stopped.swap(true, Ordering::AcqRel) {
      trace!("on_error dropped, subscriber already stopped");
      return;
    }
    if let Some(mut observer) = self.take_observer() {
      observer.on_error(err);
    }
    self.teardown.dispose();
  }

  fn on_completed(&mut self) {
    if self.stopped.swap(true, Ordering::AcqRel) {
      trace!("on_completed dropped, subscriber already stopped");
      return;
    }
    if let Some(mut observer) = self.take_observer() {
      observer.on_completed();
    }
    self.teardown.dispose();
  }
}

impl<Item, Err> Disposable for Subscriber<Item, Err> {
  fn dispose(&self) {
    self.stopped.store(true, Ordering::Release);
    // The observer may be mid-notification on this very stack; in that case it
    // is released with the last clone instead.
    if let Ok(mut observer) = self.observer.try_lock() {
      observer.take();
    }
    self.teardown.dispose();
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.is_stopped() }
}

impl<Item, Err> Debug for Subscriber<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscriber")
      .field("stopped", &self.is_stopped())
      .finish()
  }
}
