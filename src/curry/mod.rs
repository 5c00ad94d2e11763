//! The runtime currying engine.
//!
//! This module turns an arbitrary function into a step-wise,
//! signature-aware partial-application object:
//!
//! - [`Signature`] describes the function's calling contract once at wrap
//!   time (required/optional/variadic parameters), declared through
//!   [`SignatureBuilder`]
//! - [`BindingState`] accumulates incremental arguments as immutable
//!   snapshots, validating every step against the contract before the
//!   wrapped function ever runs
//! - [`Curry`] and [`AsyncCurry`] expose the state machine as callable
//!   values, differing only in whether a step returns a result directly or
//!   a suspended computation
//!
//! # Completion policy
//!
//! A chain auto-invokes once every declared non-variadic slot is bound
//! explicitly *and* each declared variadic channel has received at least one
//! value. An unbound optional slot keeps the chain open just like a required
//! one, so a caller can still override its default later; the touch
//! requirement likewise keeps a function with catch-all parameters from
//! firing the instant its named parameters are filled. Callers opt out
//! explicitly with `finalize`, which merges the declared defaults and
//! supplies empty captures for untouched channels.
//!
//! # Examples
//!
//! ```rust
//! use funcify::args;
//! use funcify::curry::{Curry, Signature};
//!
//! let spec = Signature::builder()
//!     .required("a")
//!     .required("b")
//!     .var_positional("rest")
//!     .build()
//!     .unwrap();
//! let gather = Curry::new("gather", spec, |call| {
//!     (call.positional, call.var_positional)
//! });
//!
//! // Both required parameters bound, but the catch-all channel is
//! // untouched: the chain does not fire.
//! let partial = gather.apply(args![1, 2]).unwrap().unwrap_partial();
//!
//! // Opt out of waiting for variadic input.
//! assert_eq!(partial.finalize().unwrap(), (vec![1, 2], vec![]));
//!
//! // Or touch the channel and let the policy fire.
//! let done = partial.apply(args![3, 4]).unwrap().unwrap_done();
//! assert_eq!(done, (vec![1, 2], vec![3, 4]));
//! ```

mod args_macro;
mod binding;
mod error;
mod signature;
mod sync;

#[cfg(feature = "async")]
mod async_curry;

pub use binding::{Applied, Args, BindingState, CallArgs, Origin, Step};
pub use error::{BadArguments, BadArgumentsKind, BadFunction, CurryError};
pub use signature::{Param, ParamKind, Signature, SignatureBuilder};
pub use sync::Curry;

#[cfg(feature = "async")]
pub use async_curry::AsyncCurry;
