use std::{
  fmt::{Debug, Formatter},
  sync::Arc,
};

use crate::prelude::*;

mod defer;
mod from_array;
mod generate;
mod of;
mod range;
mod repeat;
mod trivial;
mod using;

pub use defer::*;
pub use from_array::*;
pub use generate::*;
pub use of::*;
pub use range::*;
pub use repeat::*;
pub use trivial::*;
pub use using::*;

type SubscribeFn<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> BoxedDisposable + Send + Sync;

/// A representation of any set of values over any amount of time, pushed to
/// each observer that subscribes.
///
/// An `Observable` is an immutable handle around its subscribe function;
/// cloning it is cheap and every `subscribe` call runs the function afresh, so
/// subscriptions never share state.
pub struct Observable<Item, Err> {
  subscribe: Arc<SubscribeFn<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Observable { subscribe: self.subscribe.clone() } }
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// param `subscribe`: the function that is called each time the Observable
  /// is subscribed to. It is given a [`Subscriber`] to push notifications
  /// into, and returns the resources the subscription holds.
  pub fn new<F>(subscribe: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> BoxedDisposable + Send + Sync + 'static,
  {
    Observable { subscribe: Arc::new(subscribe) }
  }

  /// Like [`Observable::new`], but the subscribe function returns a bare
  /// cleanup callback, wrapped into an [`ActionDisposable`].
  ///
  /// ```rust
  /// use rxcore::prelude::*;
  ///
  /// let source = Observable::<i32, ()>::create(|mut subscriber| {
  ///   subscriber.on_next(1);
  ///   subscriber.on_completed();
  ///   || println!("cleaned up")
  /// });
  /// source.subscribe_next(|v| println!("{v}"));
  /// ```
  pub fn create<F, C>(subscribe: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> C + Send + Sync + 'static,
    C: FnOnce() + Send + 'static,
  {
    Observable::new(move |subscriber| BoxedDisposable::from_action(subscribe(subscriber)))
  }

  /// Like [`Observable::new`], but the subscribe function may return no
  /// resource at all, treated as the empty disposable.
  pub fn create_with_disposable<F>(subscribe: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> Option<BoxedDisposable> + Send + Sync + 'static,
  {
    Observable::new(move |subscriber| subscribe(subscriber).unwrap_or_default())
  }

  /// Subscribes `observer` and returns the handle that cancels the
  /// subscription and releases everything it holds.
  pub fn subscribe<O>(&self, observer: O) -> BoxedDisposable
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let subscriber = Subscriber::new(observer);
    let teardown = (self.subscribe)(subscriber.clone());
    subscriber.set_teardown(teardown);
    BoxedDisposable::new(subscriber)
  }

  /// Invokes an execution of the Observable with handlers for every
  /// notification.
  ///
  /// * `error`: A handler for a terminal event resulting from an error.
  /// * `complete`: A handler for a terminal event resulting from successful
  ///   completion.
  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> BoxedDisposable
  where
    N: FnMut(Item) + Send + 'static,
    E: FnMut(Err) + Send + 'static,
    C: FnMut() + Send + 'static,
  {
    self.subscribe(ObserverAll::new(next, error, complete))
  }

  /// Invokes an execution of the Observable, handling values only.
  pub fn subscribe_next<N>(&self, next: N) -> BoxedDisposable
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subscribe(ObserverNext(next))
  }
}

impl<Item, Err> Debug for Observable<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str("Observable") }
}
