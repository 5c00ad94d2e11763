//! The synchronous curry facade.
//!
//! [`Curry`] exposes a [`BindingState`] as a callable value: each
//! [`apply`](Curry::apply) either returns a new `Curry` continuation with the
//! same call contract or invokes the wrapped function and returns its bare
//! result. Continuations are plain cloneable values, so a partial application
//! can be branched into several independent chains.
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
//!     .optional("c", 0)
//!     .build()
//!     .unwrap();
//! let sum = Curry::new("sum", spec, |call| call.positional.iter().sum::<i32>());
//!
//! let partial = sum.apply(args![1]).unwrap().unwrap_partial();
//! assert_eq!(partial.apply(args![2, 3]).unwrap().done(), Some(6));
//!
//! // The same continuation can be reused with different arguments.
//! assert_eq!(partial.apply(args![5, 5]).unwrap().done(), Some(11));
//! ```

use std::fmt;
use std::sync::Arc;

use super::binding::{Applied, Args, BindingState, CallArgs, Origin, Step};
use super::error::CurryError;
use super::signature::Signature;

type SyncTarget<V, R> = Arc<dyn Fn(CallArgs<V>) -> R + Send + Sync>;

/// A synchronous curried callable.
///
/// Wraps a function once with its [`Signature`]; every incremental call
/// advances an immutable [`BindingState`] through the completion policy.
/// A terminal call invokes the original function and returns its result.
pub struct Curry<V, R> {
    target: SyncTarget<V, R>,
    state: BindingState<V>,
}

impl<V, R> Clone for Curry<V, R>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            state: self.state.clone(),
        }
    }
}

impl<V: fmt::Debug, R> fmt::Debug for Curry<V, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Curry")
            .field("origin", &self.state.origin().name())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<V, R> Curry<V, R> {
    /// Wraps a function under the given name and signature.
    ///
    /// The signature has already been validated by its builder; wrapping
    /// itself cannot fail.
    pub fn new<F>(name: impl Into<String>, spec: Signature<V>, target: F) -> Self
    where
        F: Fn(CallArgs<V>) -> R + Send + Sync + 'static,
    {
        Self::with_origin(Origin::new(name, false), spec, target)
    }

    /// Wraps a side-effecting function, marking it as impure.
    ///
    /// The flag travels with the wrapped callable's [`Origin`] through every
    /// continuation; the `Triple` monad refuses to compose with it.
    pub fn impure<F>(name: impl Into<String>, spec: Signature<V>, target: F) -> Self
    where
        F: Fn(CallArgs<V>) -> R + Send + Sync + 'static,
    {
        Self::with_origin(Origin::new(name, true), spec, target)
    }

    fn with_origin<F>(origin: Origin, spec: Signature<V>, target: F) -> Self
    where
        F: Fn(CallArgs<V>) -> R + Send + Sync + 'static,
    {
        Self {
            target: Arc::new(target),
            state: BindingState::empty(Arc::new(spec), Arc::new(origin)),
        }
    }

    /// The identity of the wrapped original function.
    #[inline]
    pub fn origin(&self) -> &Origin {
        self.state.origin()
    }

    /// The binding state accumulated so far.
    #[inline]
    pub fn state(&self) -> &BindingState<V> {
        &self.state
    }
}

impl<V: Clone, R> Curry<V, R> {
    /// Applies one incremental step.
    ///
    /// Returns [`Applied::Partial`] with a new continuation when the
    /// accumulated arguments are not yet sufficient, or [`Applied::Done`]
    /// with the wrapped function's result when the completion policy fires.
    /// This value is left untouched either way.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::BadArguments`] when the step does not fit the
    /// signature; the wrapped function is never invoked on invalid input.
    pub fn apply(&self, args: impl Into<Args<V>>) -> Result<Applied<Self, R>, CurryError> {
        match self.state.apply(args.into())? {
            Step::Continue(state) => Ok(Applied::Partial(Self {
                target: Arc::clone(&self.target),
                state,
            })),
            Step::Invoke(call) => Ok(Applied::Done((self.target)(call))),
        }
    }

    /// Invokes the wrapped function now, without waiting for the variadic
    /// channels to be touched.
    ///
    /// Untouched channels are supplied empty; defaults are merged as usual.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::BadArguments`] when required parameters remain
    /// unbound.
    pub fn finalize(&self) -> Result<R, CurryError> {
        Ok((self.target)(self.state.finalize()?))
    }
}
