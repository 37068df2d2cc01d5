use std::sync::Arc;

use crate::prelude::*;

/// Creates an observable that emits every element of `items` in order, then
/// completes.
///
/// The elements are shared by all subscriptions; each subscription walks them
/// with its own index, on the current-thread scheduler.
///
/// # Examples
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::from_array::<_, ()>(vec![1, 2, 3])
///   .subscribe_next(|v| println!("{},", v));
/// ```
pub fn from_array<Item, Err>(items: impl Into<Arc<[Item]>>) -> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
{
  from_array_on(items, CURRENT_THREAD)
}

/// [`from_array`] with the enumeration driven by `scheduler`.
pub fn from_array_on<Item, Err, Sch>(
  items: impl Into<Arc<[Item]>>, scheduler: Sch,
) -> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
  Sch: Scheduler,
{
  let items: Arc<[Item]> = items.into();
  Observable::new(move |subscriber| {
    let items = items.clone();
    scheduler.schedule_recursive(0usize, move |idx, recurse| {
      let mut subscriber = subscriber.clone();
      if subscriber.is_stopped() {
        return;
      }
      match items.get(idx) {
        Some(item) => {
          subscriber.on_next(item.clone());
          recurse.schedule(idx + 1);
        }
        None => subscriber.on_completed(),
      }
    })
  })
}
