use crate::prelude::*;

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// # Examples
/// ```
/// use rxcore::prelude::*;
///
/// observable::empty::<i32, ()>()
///   .subscribe_next(|v| println!("{},", v));
///
/// // Result: nothing printed
/// ```
pub fn empty<Item: 'static, Err: 'static>() -> Observable<Item, Err> { empty_on(IMMEDIATE) }

/// [`empty`] with the completion sent through `scheduler`.
pub fn empty_on<Item, Err, Sch>(scheduler: Sch) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
  Sch: Scheduler,
{
  Observable::new(move |mut subscriber| scheduler.schedule(move |_| subscriber.on_completed()))
}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error.
pub fn never<Item: 'static, Err: 'static>() -> Observable<Item, Err> {
  Observable::new(|_| BoxedDisposable::empty())
}

/// Creates an observable that emits no items, just terminates with an error.
///
/// The error value is delivered unchanged.
///
/// # Arguments
///
/// * `err` - An error to emit and terminate with
pub fn throw_exception<Item, Err>(err: Err) -> Observable<Item, Err>
where
  Item: 'static,
  Err: Clone + Send + Sync + 'static,
{
  throw_exception_on(err, IMMEDIATE)
}

/// [`throw_exception`] with the error sent through `scheduler`.
pub fn throw_exception_on<Item, Err, Sch>(err: Err, scheduler: Sch) -> Observable<Item, Err>
where
  Item: 'static,
  Err: Clone + Send + Sync + 'static,
  Sch: Scheduler,
{
  Observable::new(move |mut subscriber| {
    let err = err.clone();
    scheduler.schedule(move |_| subscriber.on_error(err))
  })
}
