//! The asynchronous curry facade.
//!
//! [`AsyncCurry`] runs the same state machine as [`Curry`](super::Curry);
//! the difference is that each step is a suspension point. Calling
//! [`apply`](AsyncCurry::apply) produces a lazy future - nothing, not even
//! validation, runs until the future is polled, and the final underlying
//! call is awaited in turn. Steps of a single chain are strictly sequential:
//! step *n+1* cannot begin validation before step *n*'s outcome is awaited.
//!
//! # Examples
//!
//! ```rust,ignore
//! use funcify::args;
//! use funcify::curry::{Applied, AsyncCurry, Signature};
//!
//! #[tokio::main]
//! async fn main() {
//!     let spec = Signature::builder()
//!         .required("a")
//!         .required("b")
//!         .build()
//!         .unwrap();
//!     let add = AsyncCurry::new("add", spec, |call| async move {
//!         call.positional.iter().sum::<i32>()
//!     });
//!
//!     let partial = add.apply(args![1]).await.unwrap().unwrap_partial();
//!     let result = partial.apply(args![2]).await.unwrap().unwrap_done();
//!     assert_eq!(result, 3);
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::binding::{Applied, Args, BindingState, CallArgs, Origin, Step};
use super::error::CurryError;
use super::signature::Signature;

type AsyncTarget<V, R> =
    Arc<dyn Fn(CallArgs<V>) -> Pin<Box<dyn Future<Output = R> + Send>> + Send + Sync>;

/// An asynchronous curried callable.
///
/// Identical state machine to the synchronous facade; a step returns a
/// suspended computation instead of a direct result. Dropping a step's
/// future before awaiting it cancels the step before the wrapped function
/// runs; no dedicated cancellation error kind exists.
pub struct AsyncCurry<V, R> {
    target: AsyncTarget<V, R>,
    state: BindingState<V>,
}

impl<V, R> Clone for AsyncCurry<V, R>
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

impl<V: fmt::Debug, R> fmt::Debug for AsyncCurry<V, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AsyncCurry")
            .field("origin", &self.state.origin().name())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<V, R> AsyncCurry<V, R> {
    /// Wraps an asynchronous function under the given name and signature.
    pub fn new<F, Fut>(name: impl Into<String>, spec: Signature<V>, target: F) -> Self
    where
        F: Fn(CallArgs<V>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self::with_origin(Origin::new(name, false), spec, target)
    }

    /// Wraps a side-effecting asynchronous function, marking it as impure.
    pub fn impure<F, Fut>(name: impl Into<String>, spec: Signature<V>, target: F) -> Self
    where
        F: Fn(CallArgs<V>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self::with_origin(Origin::new(name, true), spec, target)
    }

    fn with_origin<F, Fut>(origin: Origin, spec: Signature<V>, target: F) -> Self
    where
        F: Fn(CallArgs<V>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self {
            target: Arc::new(move |call| Box::pin(target(call))),
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

impl<V: Clone, R> AsyncCurry<V, R> {
    /// Applies one incremental step, awaiting the wrapped function when the
    /// completion policy fires.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::BadArguments`] when the step does not fit the
    /// signature; the wrapped function is never invoked on invalid input.
    pub async fn apply(&self, args: impl Into<Args<V>>) -> Result<Applied<Self, R>, CurryError> {
        match self.state.apply(args.into())? {
            Step::Continue(state) => Ok(Applied::Partial(Self {
                target: Arc::clone(&self.target),
                state,
            })),
            Step::Invoke(call) => Ok(Applied::Done((self.target)(call).await)),
        }
    }

    /// Invokes the wrapped function now, without waiting for the variadic
    /// channels to be touched.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::BadArguments`] when required parameters remain
    /// unbound.
    pub async fn finalize(&self) -> Result<R, CurryError> {
        let call = self.state.finalize()?;
        Ok((self.target)(call).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[tokio::test]
    async fn test_async_wrap_and_invoke() {
        let spec = Signature::builder()
            .required("a")
            .required("b")
            .build()
            .unwrap();
        let add = AsyncCurry::new("add", spec, |call: CallArgs<i32>| async move {
            call.positional.iter().sum::<i32>()
        });
        let partial = add.apply(args![1]).await.unwrap().unwrap_partial();
        assert_eq!(partial.apply(args![2]).await.unwrap().unwrap_done(), 3);
    }

    #[tokio::test]
    async fn test_validation_is_deferred_until_polled() {
        let spec = Signature::builder().required("a").build().unwrap();
        let wrapped = AsyncCurry::new("id", spec, |call: CallArgs<i32>| async move {
            call.positional[0]
        });
        // Building the step future runs nothing; dropping it cancels the
        // step before validation.
        let pending = wrapped.apply(args![1, 2]);
        drop(pending);

        let error = wrapped.apply(args![1, 2]).await.unwrap_err();
        assert!(error.bad_arguments().is_some());
    }

    #[tokio::test]
    async fn test_async_finalize() {
        let spec = Signature::builder()
            .required("a")
            .var_keyword("extra")
            .build()
            .unwrap();
        let wrapped = AsyncCurry::new("collect", spec, |call: CallArgs<i32>| async move {
            (call.positional[0], call.var_keyword.len())
        });
        let partial = wrapped.apply(args![7]).await.unwrap().unwrap_partial();
        assert_eq!(partial.finalize().await.unwrap(), (7, 0));
    }
}
