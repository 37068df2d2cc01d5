use std::{
  fmt::{Debug, Formatter},
  sync::Mutex,
};

use smallvec::SmallVec;

use super::{BoxedDisposable, Disposable};

/// Owns a group of disposables and releases them together.
///
/// Once disposed, the composite stays disposed: anything added afterwards is
/// disposed on the spot instead of being retained. `add`, `remove` and
/// `dispose` may race from different threads without losing or repeating a
/// child disposal.
///
/// # Examples
///
/// ```rust
/// use rxcore::prelude::*;
///
/// let group = CompositeDisposable::new();
/// group.add(BoxedDisposable::from_action(|| println!("released")));
/// group.dispose();
///
/// // Too late to join: disposed right away.
/// group.add(BoxedDisposable::from_action(|| println!("released at once")));
/// assert_eq!(group.len(), 0);
/// ```
#[derive(Default)]
pub struct CompositeDisposable(Mutex<Inner>);

#[derive(Default)]
struct Inner {
  disposed: bool,
  children: SmallVec<[BoxedDisposable; 2]>,
}

impl CompositeDisposable {
  pub fn new() -> Self { Self::default() }

  /// Creates a composite that already owns `children`.
  pub fn with<I>(children: I) -> Self
  where
    I: IntoIterator<Item = BoxedDisposable>,
  {
    let children = children.into_iter().collect();
    CompositeDisposable(Mutex::new(Inner { disposed: false, children }))
  }

  /// Retains `child`, or disposes it at once if the composite is disposed.
  ///
  /// Children disposed elsewhere are pruned lazily, only when the list is
  /// full and would otherwise grow, so a run of `add`s costs amortized O(1)
  /// each.
  pub fn add<D: Disposable + 'static>(&self, child: D) {
    let child = BoxedDisposable::new(child);
    let mut inner = self.0.lock().unwrap();
    if inner.disposed {
      drop(inner);
      child.dispose();
    } else {
      if inner.children.len() == inner.children.capacity() {
        inner.children.retain(|c| !c.is_disposed());
      }
      inner.children.push(child);
    }
  }

  /// Removes `child` (matched by identity) and disposes it. Returns whether
  /// it was found.
  pub fn remove(&self, child: &BoxedDisposable) -> bool {
    let removed = {
      let mut inner = self.0.lock().unwrap();
      let idx = inner.children.iter().position(|c| c.ptr_eq(child));
      idx.map(|idx| inner.children.remove(idx))
    };
    match removed {
      Some(child) => {
        child.dispose();
        true
      }
      None => false,
    }
  }

  /// Number of children currently held, including any disposed elsewhere
  /// that have not been pruned yet.
  pub fn len(&self) -> usize { self.0.lock().unwrap().children.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl FromIterator<BoxedDisposable> for CompositeDisposable {
  fn from_iter<I: IntoIterator<Item = BoxedDisposable>>(iter: I) -> Self { Self::with(iter) }
}

impl Disposable for CompositeDisposable {
  fn dispose(&self) {
    let children = {
      let mut inner = self.0.lock().unwrap();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      std::mem::take(&mut inner.children)
    };
    for child in children {
      child.dispose();
    }
  }

  fn is_disposed(&self) -> bool { self.0.lock().unwrap().disposed }
}

impl Debug for CompositeDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.lock().unwrap();
    f.debug_struct("CompositeDisposable")
      .field("disposed", &inner.disposed)
      .field("children", &inner.children.len())
      .finish()
  }
}
