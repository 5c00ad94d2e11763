//! Lazy effect containers for deferred side effects.
//!
//! This module provides two containers that hold side-effecting computations
//! without running them:
//!
//! - [`EffSync`]: wraps a synchronous computation that runs when
//!   [`run`](EffSync::run) is called.
//! - [`Eff`]: wraps an asynchronous computation that runs when
//!   [`run`](Eff::run) is awaited (requires the `async` feature).
//!
//! Both support sequencing through `map` and `bind`, panic recovery through
//! `catch`, and guaranteed cleanup through `ensure`. Containers holding a
//! [`Triple`](crate::triple::Triple) payload additionally get `map_right`
//! and `bind_right`, which short-circuit on the error and empty branches.
//!
//! # Laziness
//!
//! Nothing happens at construction time. An effect chain is a description of
//! work; `run` consumes the chain and performs it exactly once.
//!
//! ```rust
//! use funcify::effect::EffSync;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let executed = Rc::new(Cell::new(false));
//! let seen = executed.clone();
//! let effect = EffSync::new(move || seen.set(true));
//! assert!(!executed.get());
//! effect.run();
//! assert!(executed.get());
//! ```

#[cfg(feature = "async")]
mod eff;
mod eff_sync;

#[cfg(feature = "async")]
pub use eff::{Eff, TimeoutError};
pub use eff_sync::EffSync;
