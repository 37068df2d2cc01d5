use bencher::{benchmark_group, benchmark_main, Bencher};
use rxcore::prelude::*;
use std::sync::{
  atomic::{AtomicI64, Ordering},
  Arc,
};

fn range_on_trampoline(b: &mut Bencher) {
  b.iter(|| {
    let total = Arc::new(AtomicI64::new(0));
    let c_total = total.clone();
    observable::range::<()>(0, 1_000).subscribe_next(move |v| {
      c_total.fetch_add(v, Ordering::Relaxed);
    });
    total.load(Ordering::Relaxed)
  });
}

fn range_on_immediate(b: &mut Bencher) {
  b.iter(|| observable::range_on::<(), _>(0, 1_000, IMMEDIATE).subscribe_next(|_| {}));
}

fn from_array_of_strings(b: &mut Bencher) {
  let items: Vec<String> = (0..256).map(|i| i.to_string()).collect();
  let source = observable::from_array::<_, ()>(items);
  b.iter(|| source.subscribe_next(|s: String| drop(s)));
}

fn generate_loop(b: &mut Bencher) {
  let source = observable::generate::<_, _, ()>(0u32, |x| *x < 1_000, |x| x + 1, |x| *x);
  b.iter(|| source.subscribe_next(|_| {}));
}

fn composite_add_dispose(b: &mut Bencher) {
  b.iter(|| {
    let composite = CompositeDisposable::new();
    for _ in 0..64 {
      composite.add(BooleanDisposable::new());
    }
    composite.dispose();
  });
}

benchmark_group!(
  benches,
  range_on_trampoline,
  range_on_immediate,
  from_array_of_strings,
  generate_loop,
  composite_add_dispose
);
benchmark_main!(benches);
