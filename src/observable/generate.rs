use std::{convert::Infallible, sync::Arc};

use tracing::debug;

use crate::prelude::*;

/// Generates a sequence by running a state-driven loop.
///
/// Starting from `initial`, each step evaluates `condition`; while it holds,
/// `selector` maps the state to the emitted value and `iterate` produces the
/// next state. When `condition` fails the sequence completes. The loop runs on
/// the current-thread scheduler.
///
/// # Examples
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::generate::<_, _, ()>(0, |x| *x < 3, |x| x + 1, |x| *x * 10)
///   .subscribe_next(|v| println!("{v}"));
/// // 0
/// // 10
/// // 20
/// ```
pub fn generate<State, Item, Err>(
  initial: State, condition: impl Fn(&State) -> bool + Send + Sync + 'static,
  iterate: impl Fn(State) -> State + Send + Sync + 'static,
  selector: impl Fn(&State) -> Item + Send + Sync + 'static,
) -> Observable<Item, Err>
where
  State: Clone + Send + Sync + 'static,
  Item: 'static,
  Err: 'static,
{
  generate_on(initial, condition, iterate, selector, CURRENT_THREAD)
}

/// [`generate`] with the loop driven by `scheduler`.
pub fn generate_on<State, Item, Err, Sch>(
  initial: State, condition: impl Fn(&State) -> bool + Send + Sync + 'static,
  iterate: impl Fn(State) -> State + Send + Sync + 'static,
  selector: impl Fn(&State) -> Item + Send + Sync + 'static, scheduler: Sch,
) -> Observable<Item, Err>
where
  State: Clone + Send + Sync + 'static,
  Item: 'static,
  Err: 'static,
  Sch: Scheduler,
{
  try_generate_on(
    initial,
    move |s| Ok::<_, Infallible>(condition(s)),
    move |s| Ok(iterate(s)),
    move |s| Ok(selector(s)),
    scheduler,
  )
  .map_err_infallible()
}

/// Fallible [`generate`]: each callback returns a `Result`. The first `Err`
/// is delivered as the sequence's `on_error` and stops the loop.
pub fn try_generate<State, Item, Err>(
  initial: State, condition: impl Fn(&State) -> Result<bool, Err> + Send + Sync + 'static,
  iterate: impl Fn(State) -> Result<State, Err> + Send + Sync + 'static,
  selector: impl Fn(&State) -> Result<Item, Err> + Send + Sync + 'static,
) -> Observable<Item, Err>
where
  State: Clone + Send + Sync + 'static,
  Item: 'static,
  Err: 'static,
{
  try_generate_on(initial, condition, iterate, selector, CURRENT_THREAD)
}

/// [`try_generate`] with the loop driven by `scheduler`.
pub fn try_generate_on<State, Item, Err, Sch>(
  initial: State, condition: impl Fn(&State) -> Result<bool, Err> + Send + Sync + 'static,
  iterate: impl Fn(State) -> Result<State, Err> + Send + Sync + 'static,
  selector: impl Fn(&State) -> Result<Item, Err> + Send + Sync + 'static, scheduler: Sch,
) -> Observable<Item, Err>
where
  State: Clone + Send + Sync + 'static,
  Item: 'static,
  Err: 'static,
  Sch: Scheduler,
{
  let callbacks = Arc::new((condition, iterate, selector));
  Observable::new(move |subscriber| {
    let callbacks = callbacks.clone();
    // The first step evaluates the initial state as is; later steps iterate.
    scheduler.schedule_recursive((initial.clone(), true), move |(state, first), recurse| {
      let mut subscriber = subscriber.clone();
      if subscriber.is_stopped() {
        return;
      }
      let (condition, iterate, selector) = &*callbacks;
      let step = (|| -> Result<(State, Option<Item>), Err> {
        let state = if first { state } else { iterate(state)? };
        let emit = if condition(&state)? { Some(selector(&state)?) } else { None };
        Ok((state, emit))
      })();

      match step {
        Ok((state, Some(item))) => {
          subscriber.on_next(item);
          recurse.schedule((state, false));
        }
        Ok((_, None)) => subscriber.on_completed(),
        Err(err) => {
          debug!("generate callback failed, terminating with on_error");
          subscriber.on_error(err);
        }
      }
    })
  })
}

impl<Item: 'static> Observable<Item, Infallible> {
  /// Re-types a sequence that cannot fail to any error type.
  pub(crate) fn map_err_infallible<Err: 'static>(self) -> Observable<Item, Err> {
    Observable::new(move |subscriber| self.subscribe(InfallibleObserver(subscriber)))
  }
}

struct InfallibleObserver<Item, Err>(Subscriber<Item, Err>);

impl<Item, Err> Observer<Item, Infallible> for InfallibleObserver<Item, Err> {
  fn on_next(&mut self, value: Item) { self.0.on_next(value) }

  fn on_error(&mut self, err: Infallible) { match err {} }

  fn on_completed(&mut self) { self.0.on_completed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use proptest::prelude::*;
  use std::sync::{Arc, Mutex};

  #[derive(Debug, PartialEq)]
  enum Event<T, E> {
    Next(T),
    Error(E),
    Completed,
  }

  fn events<T, E>(source: Observable<T, E>) -> Vec<Event<T, E>>
  where
    T: Send + 'static,
    E: Send + 'static,
  {
    let log = Arc::new(Mutex::new(vec![]));
    let (n, e, c) = (log.clone(), log.clone(), log.clone());
    source.subscribe_all(
      move |v| n.lock().unwrap().push(Event::Next(v)),
      move |err| e.lock().unwrap().push(Event::Error(err)),
      move || c.lock().unwrap().push(Event::Completed),
    );
    let mut log = log.lock().unwrap();
    std::mem::take(&mut *log)
  }

  #[test]
  fn counts_to_three() {
    let source = observable::generate::<_, _, ()>(0, |x| *x < 3, |x| x + 1, |x| *x);
    assert_eq!(
      events(source),
      vec![Event::Next(0), Event::Next(1), Event::Next(2), Event::Completed]
    );
  }

  #[test]
  fn false_initial_condition_completes_at_once() {
    let source = observable::generate::<_, i32, ()>(10, |x| *x < 3, |x| x + 1, |x| *x);
    assert_eq!(events(source), vec![Event::Completed]);
  }

  #[test]
  fn selector_failure_on_second_iteration() {
    let calls = Arc::new(Mutex::new(0));
    let c_calls = calls.clone();
    let source = observable::try_generate(
      0,
      |x| Ok(*x < 10),
      |x| Ok(x + 1),
      move |x| {
        *c_calls.lock().unwrap() += 1;
        if *x == 1 { Err("selector failed") } else { Ok(*x) }
      },
    );
    assert_eq!(events(source), vec![Event::Next(0), Event::Error("selector failed")]);
    assert_eq!(*calls.lock().unwrap(), 2);
  }

  #[test]
  fn iterate_failure_stops_the_loop() {
    let source = observable::try_generate(
      0,
      |x| Ok(*x < 10),
      |x| if x == 2 { Err("iterate failed") } else { Ok(x + 1) },
      |x| Ok(*x),
    );
    assert_eq!(
      events(source),
      vec![Event::Next(0), Event::Next(1), Event::Next(2), Event::Error("iterate failed")]
    );
  }

  #[test]
  fn condition_failure_is_an_error() {
    let source = observable::try_generate::<i32, i32, _>(0, |_| Err("nope"), |x| Ok(x), |x| Ok(*x));
    assert_eq!(events(source), vec![Event::Error("nope")]);
  }

  #[test]
  fn subscriptions_do_not_share_state() {
    let source = observable::generate::<_, _, ()>(1, |x| *x <= 2, |x| x * 2, |x| *x);
    let expected = vec![Event::Next(1), Event::Next(2), Event::Completed];
    assert_eq!(events(source.clone()), expected);
    assert_eq!(events(source), expected);
  }

  proptest! {
    #[test]
    fn matches_a_plain_loop(start in 0u32..50, bound in 0u32..200, step in 1u32..7) {
      let source = observable::generate_on::<_, _, (), _>(
        start, move |x| *x < bound, move |x| x + step, |x| *x, IMMEDIATE,
      );
      let mut expected: Vec<Event<u32, ()>> =
        (start..bound).step_by(step as usize).map(Event::Next).collect();
      expected.push(Event::Completed);
      prop_assert_eq!(events(source), expected);
    }
  }
}
