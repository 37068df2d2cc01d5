use std::{
  any::Any,
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
  },
};

use once_cell::sync::Lazy;

mod composite;
mod serial;
pub use composite::CompositeDisposable;
pub use serial::{SerialDisposable, SingleAssignmentDisposable};

/// A releasable resource or a cancellable piece of pending work.
///
/// `dispose` is idempotent: the first call releases, every later call is a
/// no-op. Implementations must never panic while disposing, a failing release
/// is the resource's own concern and must not stop sibling disposal.
pub trait Disposable: Send + Sync {
  fn dispose(&self);

  fn is_disposed(&self) -> bool;
}

impl<T: Disposable + ?Sized> Disposable for Arc<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<T: Disposable + ?Sized> Disposable for Box<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

/// A no-op disposable, used where nothing needs releasing.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyDisposable;

impl Disposable for EmptyDisposable {
  #[inline]
  fn dispose(&self) {}

  #[inline]
  fn is_disposed(&self) -> bool { true }
}

/// Runs a release action at most once, on the first `dispose`.
pub struct ActionDisposable(Mutex<Option<Box<dyn FnOnce() + Send>>>);

impl ActionDisposable {
  pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
    ActionDisposable(Mutex::new(Some(Box::new(action))))
  }
}

impl Disposable for ActionDisposable {
  fn dispose(&self) {
    // Take the action out first so it runs without the lock held.
    let action = self.0.lock().unwrap().take();
    if let Some(action) = action {
      action();
    }
  }

  fn is_disposed(&self) -> bool { self.0.lock().unwrap().is_none() }
}

impl Debug for ActionDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActionDisposable")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// A cancellation flag. Schedulers check it right before running an action.
#[derive(Debug, Default)]
pub struct BooleanDisposable(AtomicBool);

impl BooleanDisposable {
  pub fn new() -> Self { Self::default() }
}

impl Disposable for BooleanDisposable {
  #[inline]
  fn dispose(&self) { self.0.store(true, Ordering::Release) }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.load(Ordering::Acquire) }
}

static EMPTY: Lazy<BoxedDisposable> = Lazy::new(|| BoxedDisposable(Arc::new(EmptyDisposable)));

/// Type-erased, clonable handle to any [`Disposable`].
///
/// Every clone refers to the same underlying resource, so disposing one clone
/// disposes them all. Dropping a handle does *not* dispose it; use
/// [`BoxedDisposable::dispose_when_dropped`] for RAII release.
#[derive(Clone)]
pub struct BoxedDisposable(Arc<dyn Disposable>);

impl BoxedDisposable {
  /// Wraps `disposable`. Wrapping a `BoxedDisposable` returns it unchanged
  /// instead of nesting it.
  pub fn new<D: Disposable + 'static>(disposable: D) -> Self {
    let mut slot = Some(disposable);
    if let Some(boxed) = (&mut slot as &mut dyn Any).downcast_mut::<Option<BoxedDisposable>>() {
      if let Some(boxed) = boxed.take() {
        return boxed;
      }
    }
    match slot {
      Some(disposable) => BoxedDisposable(Arc::new(disposable)),
      None => BoxedDisposable::empty(),
    }
  }

  /// The shared no-op handle. Every call returns a clone of one instance.
  #[inline]
  pub fn empty() -> Self { EMPTY.clone() }

  #[inline]
  pub fn from_action(action: impl FnOnce() + Send + 'static) -> Self {
    BoxedDisposable(Arc::new(ActionDisposable::new(action)))
  }

  /// Whether both handles refer to the same underlying disposable.
  #[inline]
  pub fn ptr_eq(&self, other: &BoxedDisposable) -> bool { Arc::ptr_eq(&self.0, &other.0) }

  /// Activates "RAII" behavior for this handle: the returned guard disposes
  /// it as soon as the guard goes out of scope.
  ///
  /// **Attention:** if the return value is not bound to a variable, the
  /// subscription is disposed immediately.
  pub fn dispose_when_dropped(self) -> DisposableGuard { DisposableGuard(Some(self)) }
}

impl Disposable for BoxedDisposable {
  #[inline]
  fn dispose(&self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

impl Default for BoxedDisposable {
  fn default() -> Self { BoxedDisposable::empty() }
}

impl Debug for BoxedDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BoxedDisposable")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// Disposes the wrapped handle when dropped.
#[derive(Debug)]
#[must_use]
pub struct DisposableGuard(Option<BoxedDisposable>);

impl DisposableGuard {
  /// Consumes the guard without disposing, returning the inner handle.
  pub fn into_inner(mut self) -> BoxedDisposable { self.0.take().unwrap_or_default() }
}

impl Drop for DisposableGuard {
  fn drop(&mut self) {
    if let Some(inner) = self.0.take() {
      inner.dispose();
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::sync::atomic::AtomicUsize;

  fn counting() -> (Arc<AtomicUsize>, ActionDisposable) {
    let hits = Arc::new(AtomicUsize::new(0));
    let c_hits = hits.clone();
    let d = ActionDisposable::new(move || {
      c_hits.fetch_add(1, Ordering::SeqCst);
    });
    (hits, d)
  }

  #[test]
  fn action_runs_once() {
    let (hits, d) = counting();
    assert!(!d.is_disposed());
    d.dispose();
    d.dispose();
    d.dispose();
    assert!(d.is_disposed());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn empty_is_inert() {
    let d = BoxedDisposable::empty();
    d.dispose();
    d.dispose();
    assert!(d.is_disposed());
  }

  #[test]
  fn empty_is_one_shared_instance() {
    let a = BoxedDisposable::empty();
    let b = BoxedDisposable::default();
    assert!(a.ptr_eq(&b));
    assert!(BoxedDisposable::new(EmptyDisposable).is_disposed());
  }

  #[test]
  fn boxing_a_boxed_disposable_does_not_nest() {
    let (_, d) = counting();
    let boxed = BoxedDisposable::new(d);
    let again = BoxedDisposable::new(boxed.clone());
    assert!(boxed.ptr_eq(&again));
  }

  #[test]
  fn clones_share_state() {
    let (hits, d) = counting();
    let boxed = BoxedDisposable::new(d);
    let c_boxed = boxed.clone();
    c_boxed.dispose();
    assert!(boxed.is_disposed());
    boxed.dispose();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn guard_disposes_on_drop() {
    let (hits, d) = counting();
    {
      let _guard = BoxedDisposable::new(d).dispose_when_dropped();
      assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn guard_into_inner_keeps_it_alive() {
    let (hits, d) = counting();
    let inner = BoxedDisposable::new(d).dispose_when_dropped().into_inner();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    inner.dispose();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn boolean_flag() {
    let flag = BooleanDisposable::new();
    assert!(!flag.is_disposed());
    flag.dispose();
    flag.dispose();
    assert!(flag.is_disposed());
  }
}
