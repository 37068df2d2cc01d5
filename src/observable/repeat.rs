use std::sync::Arc;

use crate::prelude::*;

/// Creates an observable that emits `value` `count` times, then completes.
/// `None` repeats forever, until the subscription is disposed.
///
/// Rounds run on the current-thread scheduler, so an unbounded repeat of a
/// synchronous value never grows the call stack.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// observable::repeat::<_, ()>("tick", Some(3)).subscribe_next(|v| println!("{v}"));
/// // tick
/// // tick
/// // tick
/// ```
pub fn repeat<Item, Err>(value: Item, count: Option<usize>) -> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
{
  repeat_on(value, count, CURRENT_THREAD)
}

/// [`repeat`] with each emission sent through `scheduler`.
pub fn repeat_on<Item, Err, Sch>(value: Item, count: Option<usize>, scheduler: Sch) -> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
  Sch: Scheduler,
{
  return_value_on(value, scheduler).repeat(count)
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Re-subscribes to this observable each time it completes, `count` rounds
  /// in total (`None` for no limit), then completes. An error ends the
  /// sequence at once.
  ///
  /// Only one round is subscribed at a time; disposing the returned
  /// subscription releases it and stops any further round.
  pub fn repeat(&self, count: Option<usize>) -> Observable<Item, Err> {
    let source = self.clone();
    Observable::new(move |subscriber| {
      let round = Arc::new(SerialDisposable::new());
      let source = source.clone();
      let c_round = round.clone();
      let rounds = CURRENT_THREAD.schedule_recursive(0usize, move |done, recurse| {
        let mut subscriber = subscriber.clone();
        if subscriber.is_stopped() {
          return;
        }
        if count.is_some_and(|count| done >= count) {
          subscriber.on_completed();
          return;
        }
        let observer = RepeatObserver { subscriber, recurse: recurse.clone(), next_round: done + 1 };
        c_round.set(source.subscribe(observer));
      });
      BoxedDisposable::new(CompositeDisposable::with([rounds, BoxedDisposable::new(round)]))
    })
  }
}

struct RepeatObserver<Item, Err> {
  subscriber: Subscriber<Item, Err>,
  recurse: Recurse<usize>,
  next_round: usize,
}

impl<Item, Err> Observer<Item, Err> for RepeatObserver<Item, Err> {
  fn on_next(&mut self, value: Item) { self.subscriber.on_next(value) }

  fn on_error(&mut self, err: Err) { self.subscriber.on_error(err) }

  fn on_completed(&mut self) { self.recurse.schedule(self.next_round) }
}
