//! # rxcore: the execution substrate of Reactive Extensions
//!
//! The subscription protocol, schedulers and disposables that every reactive
//! operator is built on, plus the primitive creation operators that exercise
//! them.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxcore::prelude::*;
//!
//! observable::range::<()>(0, 10).subscribe_all(
//!   |v| println!("Value: {}", v),
//!   |_| {},
//!   || println!("done"),
//! );
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A push-based sequence, subscribed afresh by every observer |
//! | [`Observer`] | Consumes `on_next`, `on_error` and `on_completed` notifications |
//! | [`Scheduler`] | Decides when and where scheduled work runs |
//! | [`Disposable`] | Handle that releases a resource or cancels pending work |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `ThreadPoolScheduler`, backed by the
//!   `futures` thread pool.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Scheduler`]: scheduler::Scheduler
//! [`Disposable`]: disposable::Disposable

pub mod disposable;
pub mod observable;
pub mod observer;
pub mod prelude;
pub mod scheduler;
pub mod subscriber;

pub use prelude::*;
