use crate::prelude::*;

/// Creates an observable producing a single value.
///
/// Emits the value, then completes, from one scheduled action on the
/// immediate scheduler. Never emits an error.
///
/// # Arguments
///
/// * `v` - A value to emit.
///
/// # Examples
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::return_value::<_, ()>(123)
///   .subscribe_next(|v| println!("{},", v));
/// ```
pub fn return_value<Item, Err>(v: Item) -> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
{
  return_value_on(v, IMMEDIATE)
}

/// [`return_value`] with the emission sent through `scheduler`.
pub fn return_value_on<Item, Err, Sch>(v: Item, scheduler: Sch) -> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
  Sch: Scheduler,
{
  Observable::new(move |mut subscriber| {
    let v = v.clone();
    scheduler.schedule(move |_| {
      subscriber.on_next(v);
      subscriber.on_completed();
    })
  })
}
