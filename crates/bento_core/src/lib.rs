//! # BENTO Core
//!
//! The scheduling kernel behind every BENTO effect:
//! - Virtual-clock timers and frame callbacks
//! - Cancellation scopes that own every handle they create
//! - Generational slot storage for short-lived visual entities
//!
//! ## Architecture Rules
//!
//! 1. **The host owns the clock** - nothing here reads wall time
//! 2. **Every handle has an owner** - a task always belongs to a scope
//! 3. **Stale handles are harmless** - lookups through a retired handle fail
//!
//! ## Example
//!
//! ```rust
//! use bento_core::Scheduler;
//!
//! let mut scheduler: Scheduler<&str> = Scheduler::new();
//! let scope = scheduler.open_scope("hover");
//! scheduler.schedule_in(scope, 50, "spawn");
//!
//! assert!(scheduler.poll_timer(49).is_none());
//! let fired = scheduler.poll_timer(50).map(|f| f.payload);
//! assert_eq!(fired, Some("spawn"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod pool;
pub mod schedule;

pub use error::{BentoError, BentoResult};
pub use pool::{SlotHandle, SlotPool};
pub use schedule::{CancelToken, Fired, Millis, Scheduler, ScopeId, TaskId};
