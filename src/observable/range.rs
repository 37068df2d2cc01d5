use crate::prelude::*;

/// Creates an observable of `count` sequential integers starting at `start`,
/// then completes.
///
/// Runs on the current-thread scheduler, one recursive step per value, so any
/// `count` is emitted without growing the call stack.
///
/// # Examples
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::range::<()>(1, 3).subscribe_next(|v| println!("{v}"));
/// // 1
/// // 2
/// // 3
/// ```
///
/// # Panics
///
/// Panics if the last value, `start + count - 1`, does not fit in an `i64`.
pub fn range<Err: 'static>(start: i64, count: usize) -> Observable<i64, Err> {
  range_on(start, count, CURRENT_THREAD)
}

/// [`range`] with the loop driven by `scheduler`.
///
/// # Panics
///
/// Panics if the last value, `start + count - 1`, does not fit in an `i64`.
pub fn range_on<Err, Sch>(start: i64, count: usize, scheduler: Sch) -> Observable<i64, Err>
where
  Err: 'static,
  Sch: Scheduler,
{
  let fits = count == 0
    || i64::try_from(count - 1)
      .ok()
      .and_then(|offset| start.checked_add(offset))
      .is_some();
  assert!(fits, "range({start}, {count}) overflows i64");
  Observable::new(move |subscriber| {
    scheduler.schedule_recursive(0usize, move |i, recurse| {
      let mut subscriber = subscriber.clone();
      if subscriber.is_stopped() {
        return;
      }
      if i < count {
        subscriber.on_next(start + i as i64);
        recurse.schedule(i + 1);
      } else {
        subscriber.on_completed();
      }
    })
  })
}
