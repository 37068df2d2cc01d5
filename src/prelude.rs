//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::disposable::*;
// Creation operators, both as `observable::range(..)` and unqualified.
pub use crate::observable;
pub use crate::observable::*;
pub use crate::observer::*;
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::ThreadPoolScheduler;
pub use crate::scheduler::{
  CurrentThreadScheduler, ImmediateScheduler, Recurse, Scheduler, CURRENT_THREAD, IMMEDIATE,
};
pub use crate::subscriber::Subscriber;
