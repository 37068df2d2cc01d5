//! Observer trait and implementations
//!
//! The Observer is the consumer side of the subscription protocol. It receives
//! any number of `on_next` notifications followed by at most one terminal
//! notification, either `on_error` or `on_completed`, never both.

/// Observer trait: the three-method sink a subscription pushes into.
///
/// The terminal exclusivity rule is enforced by the framework-managed
/// [`Subscriber`](crate::subscriber::Subscriber) that wraps every observer, so
/// implementations do not need to guard against late calls themselves.
pub trait Observer<Item, Err> {
  /// Receive the next value.
  fn on_next(&mut self, value: Item);

  /// Receive the error that terminates the sequence.
  fn on_error(&mut self, err: Err);

  /// Receive the successful end of the sequence.
  fn on_completed(&mut self);
}

/// Boxed observer with Send bound, the form stored by a subscription.
pub type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err> + Send>;

impl<Item, Err, O> Observer<Item, Err> for Box<O>
where
  O: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn on_next(&mut self, value: Item) { (**self).on_next(value) }

  #[inline]
  fn on_error(&mut self, err: Err) { (**self).on_error(err) }

  #[inline]
  fn on_completed(&mut self) { (**self).on_completed() }
}

/// Closure adapter handling all three notifications.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline(always)]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  #[inline(always)]
  fn on_next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn on_error(&mut self, err: Err) { (self.error)(err); }
  #[inline(always)]
  fn on_completed(&mut self) { (self.complete)(); }
}

/// Closure adapter for the `on_next` notification only. Errors and completion
/// are ignored.
#[derive(Clone)]
pub struct ObserverNext<N>(pub N);

impl<Item, Err, N> Observer<Item, Err> for ObserverNext<N>
where
  N: FnMut(Item),
{
  #[inline(always)]
  fn on_next(&mut self, value: Item) { (self.0)(value); }
  #[inline(always)]
  fn on_error(&mut self, _err: Err) {}
  #[inline(always)]
  fn on_completed(&mut self) {}
}

#[cfg(test)]
mod test {
  use super::*;

  struct TestObserver {
    values: Vec<i32>,
    completed: bool,
  }

  impl Observer<i32, ()> for TestObserver {
    fn on_next(&mut self, value: i32) { self.values.push(value); }

    fn on_error(&mut self, _: ()) {}

    fn on_completed(&mut self) { self.completed = true; }
  }

  #[test]
  fn observer_all() {
    let mut values: Vec<i32> = vec![];
    let mut errors: Vec<&str> = vec![];
    let mut completed = 0;
    {
      let mut obs = ObserverAll::new(
        |v: i32| values.push(v),
        |e: &'static str| errors.push(e),
        || completed += 1,
      );
      obs.on_next(1);
      obs.on_next(2);
      obs.on_error("boom");
      obs.on_completed();
    }
    assert_eq!(values, vec![1, 2]);
    assert_eq!(errors, vec!["boom"]);
    assert_eq!(completed, 1);
  }

  #[test]
  fn observer_next_ignores_terminals() {
    let mut sum = 0;
    {
      let mut obs = ObserverNext(|v: i32| sum += v);
      Observer::<i32, &str>::on_next(&mut obs, 10);
      Observer::<i32, &str>::on_next(&mut obs, 20);
      Observer::<i32, &str>::on_error(&mut obs, "ignored");
      Observer::<i32, &str>::on_completed(&mut obs);
    }
    assert_eq!(sum, 30);
  }

  #[test]
  fn test_observer_records() {
    let mut obs = TestObserver { values: vec![], completed: false };
    obs.on_next(1);
    obs.on_next(2);
    obs.on_completed();
    assert_eq!(obs.values, vec![1, 2]);
    assert!(obs.completed);
  }
}
