use tracing::debug;

use crate::prelude::*;

/// Creates an observable that will on subscription defer to another observable
/// that is supplied by a factory function, run once at each subscription.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::return_value::<_, ()>("Hello!")
/// })
/// .subscribe_next(move |v| println!("{}", v));
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<Item, Err, F>(factory: F) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
  F: Fn() -> Observable<Item, Err> + Send + Sync + 'static,
{
  Observable::new(move |subscriber| factory().subscribe(subscriber))
}

/// Fallible [`defer`]. When the factory fails, the subscriber receives the
/// error through [`throw_exception`] and the subscription is still a valid
/// release handle.
pub fn try_defer<Item, Err, F>(factory: F) -> Observable<Item, Err>
where
  Item: 'static,
  Err: Clone + Send + Sync + 'static,
  F: Fn() -> Result<Observable<Item, Err>, Err> + Send + Sync + 'static,
{
  Observable::new(move |subscriber| match factory() {
    Ok(source) => source.subscribe(subscriber),
    Err(err) => {
      debug!("defer factory failed, terminating with on_error");
      throw_exception(err).subscribe(subscriber)
    }
  })
}
