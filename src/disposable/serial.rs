use std::sync::Mutex;

use super::{BoxedDisposable, Disposable};

#[derive(Default)]
struct Slot {
  disposed: bool,
  current: Option<BoxedDisposable>,
}

/// A slot whose occupant can be replaced; replacing disposes the previous
/// occupant. Disposing the slot disposes the current occupant and every one
/// assigned later.
#[derive(Default)]
pub struct SerialDisposable(Mutex<Slot>);

impl SerialDisposable {
  pub fn new() -> Self { Self::default() }

  pub fn set<D: Disposable + 'static>(&self, disposable: D) {
    let disposable = BoxedDisposable::new(disposable);
    let retired = {
      let mut slot = self.0.lock().unwrap();
      if slot.disposed {
        Some(disposable)
      } else {
        slot.current.replace(disposable)
      }
    };
    if let Some(retired) = retired {
      retired.dispose();
    }
  }
}

impl Disposable for SerialDisposable {
  fn dispose(&self) {
    let current = {
      let mut slot = self.0.lock().unwrap();
      slot.disposed = true;
      slot.current.take()
    };
    if let Some(current) = current {
      current.dispose();
    }
  }

  fn is_disposed(&self) -> bool { self.0.lock().unwrap().disposed }
}

/// A slot that may be assigned exactly once. Assigning into an already
/// disposed slot disposes the newcomer on the spot, which makes it safe to
/// dispose a subscription before its teardown exists.
#[derive(Default)]
pub struct SingleAssignmentDisposable(Mutex<Slot>);

impl SingleAssignmentDisposable {
  pub fn new() -> Self { Self::default() }

  /// # Panics
  ///
  /// Panics if a disposable was already assigned.
  pub fn set<D: Disposable + 'static>(&self, disposable: D) {
    let disposable = BoxedDisposable::new(disposable);
    let mut slot = self.0.lock().unwrap();
    if slot.disposed {
      drop(slot);
      disposable.dispose();
    } else {
      assert!(slot.current.is_none(), "disposable already assigned");
      slot.current = Some(disposable);
    }
  }
}

impl Disposable for SingleAssignmentDisposable {
  fn dispose(&self) {
    let current = {
      let mut slot = self.0.lock().unwrap();
      slot.disposed = true;
      slot.current.take()
    };
    if let Some(current) = current {
      current.dispose();
    }
  }

  fn is_disposed(&self) -> bool { self.0.lock().unwrap().disposed }
}
