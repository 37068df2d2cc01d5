use std::sync::Arc;

use tracing::debug;

use crate::prelude::*;

/// Creates an observable whose lifetime is tied to a resource.
///
/// On every subscription `resource_factory` acquires a fresh resource (or
/// `None`), and `observable_factory` builds the dependent sequence from it.
/// The resource is released together with the subscription: on dispose, or
/// as soon as the dependent sequence terminates.
///
/// A failing factory is delivered as `on_error`. A resource acquired before
/// `observable_factory` fails is released all the same.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// let source = observable::using(
///   || Ok(Some(BooleanDisposable::new())),
///   |_resource| Ok(observable::range::<()>(0, 3)),
/// );
/// source.subscribe_next(|v| println!("{v}"));
/// ```
pub fn using<Item, Err, R, RF, OF>(resource_factory: RF, observable_factory: OF) -> Observable<Item, Err>
where
  Item: 'static,
  Err: Clone + Send + Sync + 'static,
  R: Disposable + 'static,
  RF: Fn() -> Result<Option<R>, Err> + Send + Sync + 'static,
  OF: Fn(Option<Arc<R>>) -> Result<Observable<Item, Err>, Err> + Send + Sync + 'static,
{
  Observable::new(move |subscriber| {
    let resource = match resource_factory() {
      Ok(resource) => resource.map(Arc::new),
      Err(err) => {
        debug!("using resource factory failed, terminating with on_error");
        return throw_exception(err).subscribe(subscriber);
      }
    };

    let subscription = match observable_factory(resource.clone()) {
      Ok(source) => source.subscribe(subscriber),
      Err(err) => {
        debug!("using observable factory failed, terminating with on_error");
        throw_exception(err).subscribe(subscriber)
      }
    };

    let resources = CompositeDisposable::new();
    resources.add(subscription);
    if let Some(resource) = resource {
      resources.add(resource);
    }
    BoxedDisposable::new(resources)
  })
}
