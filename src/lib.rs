//! # funcify
//!
//! A functional programming toolkit for Rust providing a three-state result
//! monad, lazy effect containers, and a runtime currying engine.
//!
//! ## Overview
//!
//! The toolkit has three subsystems:
//!
//! - **Triple**: a three-state result/optional monad (`Right` / `Left` /
//!   `Nothing`) with mapping, binding, recovery, and applicative operations
//! - **Curry**: a runtime currying engine that reconstructs the calling
//!   contract of a function (required/optional/variadic parameters), validates
//!   every incremental application against it, and decides when accumulated
//!   arguments are sufficient to trigger the real call — identically for
//!   synchronous and asynchronous chains
//! - **Effect**: lazy containers (`EffSync`, `Eff`) for deferring side
//!   effects, with worker-thread offload and timeout-bounded async running
//!
//! ## Feature Flags
//!
//! - `triple`: the three-state monad
//! - `curry`: the currying engine
//! - `effect`: lazy effect containers (sync)
//! - `async`: asynchronous currying and effect containers (pulls in `tokio`
//!   and `futures`)
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use funcify::curry::{Applied, Curry, Signature};
//! use funcify::args;
//!
//! let spec = Signature::builder()
//!     .required("a")
//!     .required("b")
//!     .build()
//!     .unwrap();
//! let add = Curry::new("add", spec, |call| {
//!     call.positional.iter().sum::<i32>()
//! });
//!
//! let step = add.apply(args![1]).unwrap();
//! let partial = match step {
//!     Applied::Partial(next) => next,
//!     Applied::Done(_) => unreachable!(),
//! };
//! assert_eq!(partial.apply(args![2]).unwrap().done(), Some(3));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use funcify::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "triple")]
    pub use crate::triple::*;

    #[cfg(feature = "curry")]
    pub use crate::curry::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "triple")]
pub mod triple;

#[cfg(feature = "curry")]
pub mod curry;

#[cfg(feature = "effect")]
pub mod effect;
