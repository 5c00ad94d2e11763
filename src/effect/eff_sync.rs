//! `EffSync` - deferred synchronous side effects.
//!
//! The `EffSync` type wraps a computation that may perform side effects.
//! Nothing runs until [`run`](EffSync::run) is called, which should happen
//! at the program's "edge".
//!
//! When the stored value is a [`Triple`], the `*_right` combinators apply
//! the short-circuit principle: error and empty branches flow through the
//! chain untouched and the supplied function never runs.
//!
//! # Examples
//!
//! ```rust
//! use funcify::effect::EffSync;
//!
//! // Create a pure effect
//! let effect = EffSync::of(42);
//! assert_eq!(effect.run(), 42);
//!
//! // Chain effects
//! let effect = EffSync::of(10)
//!     .map(|x| x * 2)
//!     .bind(|x| EffSync::of(x + 1));
//! assert_eq!(effect.run(), 21);
//! ```
//!
//! # Side Effect Deferral
//!
//! ```rust
//! use funcify::effect::EffSync;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let executed = Arc::new(AtomicBool::new(false));
//! let executed_clone = executed.clone();
//!
//! let effect = EffSync::new(move || {
//!     executed_clone.store(true, Ordering::SeqCst);
//!     42
//! });
//!
//! // Not executed yet
//! assert!(!executed.load(Ordering::SeqCst));
//!
//! assert_eq!(effect.run(), 42);
//! assert!(executed.load(Ordering::SeqCst));
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use crate::triple::Triple;

/// A lazy container for synchronous side effects.
///
/// `EffSync<A>` wraps a computation producing a value of type `A`. The
/// computation is consumed exactly once, by [`run`](Self::run).
pub struct EffSync<A> {
    /// The wrapped computation that produces a value of type `A`.
    effect: Box<dyn FnOnce() -> A>,
}

impl<A: 'static> EffSync<A> {
    /// Creates a new effect from a closure.
    ///
    /// The closure will not be executed until `run` is called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::effect::EffSync;
    ///
    /// let effect = EffSync::new(|| 10 + 20);
    /// assert_eq!(effect.run(), 30);
    /// ```
    pub fn new<F>(effect: F) -> Self
    where
        F: FnOnce() -> A + 'static,
    {
        Self {
            effect: Box::new(effect),
        }
    }

    /// Wraps a plain value in the container. No inspections happen here.
    pub fn of(value: A) -> Self {
        Self::new(move || value)
    }

    /// Starts the chain, executing the deferred computation.
    pub fn run(self) -> A {
        (self.effect)()
    }

    /// Applies a function to the eventual result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::effect::EffSync;
    ///
    /// let effect = EffSync::of(21).map(|x| x * 2);
    /// assert_eq!(effect.run(), 42);
    /// ```
    pub fn map<B, F>(self, function: F) -> EffSync<B>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        EffSync::new(move || function(self.run()))
    }

    /// Chains effects, passing the result of this one to a function that
    /// produces the next.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::effect::EffSync;
    ///
    /// let effect = EffSync::of(10).bind(|x| EffSync::of(x * 2));
    /// assert_eq!(effect.run(), 20);
    /// ```
    pub fn bind<B, F>(self, function: F) -> EffSync<B>
    where
        F: FnOnce(A) -> EffSync<B> + 'static,
        B: 'static,
    {
        EffSync::new(move || function(self.run()).run())
    }

    /// Catches panics in all deeper nested computations and hands the panic
    /// message to a recovery effect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::effect::EffSync;
    ///
    /// let panicking = EffSync::new(|| -> i32 { panic!("oops") });
    /// let recovered = panicking.catch(|message| EffSync::of(message.len() as i32));
    /// assert_eq!(recovered.run(), 4);
    /// ```
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(String) -> Self + 'static,
    {
        Self::new(move || match catch_unwind(AssertUnwindSafe(|| self.run())) {
            Ok(value) => value,
            // deref the box explicitly; a bare `&payload` would coerce the
            // box itself into the `dyn Any` and the downcasts would miss
            Err(payload) => handler(panic_message(payload.as_ref())).run(),
        })
    }

    /// Guarantees the cleanup runs after the computation, even when it
    /// panics - the synchronous counterpart of try/finally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::effect::EffSync;
    /// use std::sync::atomic::{AtomicBool, Ordering};
    /// use std::sync::Arc;
    ///
    /// let cleaned = Arc::new(AtomicBool::new(false));
    /// let flag = cleaned.clone();
    ///
    /// let effect = EffSync::of(1).ensure(move || flag.store(true, Ordering::SeqCst));
    /// assert_eq!(effect.run(), 1);
    /// assert!(cleaned.load(Ordering::SeqCst));
    /// ```
    pub fn ensure<F>(self, cleanup: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self::new(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| self.run()));
            cleanup();
            match outcome {
                Ok(value) => value,
                Err(payload) => resume_unwind(payload),
            }
        })
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload.downcast_ref::<&str>().map_or_else(
        || {
            payload
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "Unknown panic".to_string())
        },
        |string| (*string).to_string(),
    )
}

// =============================================================================
// Short-circuit combinators over Triple payloads
// =============================================================================

impl<A, E> EffSync<Triple<A, E>>
where
    A: 'static,
    E: 'static,
{
    /// Applies a function to the success branch of the stored triple; error
    /// and empty branches short-circuit without running the function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::effect::EffSync;
    /// use funcify::triple::Triple;
    ///
    /// let effect: EffSync<Triple<i32, String>> =
    ///     EffSync::of(Triple::pure(10)).map_right(|x| x * 2);
    /// assert_eq!(effect.run(), Triple::Right(20));
    ///
    /// let bad: EffSync<Triple<i32, String>> =
    ///     EffSync::of(Triple::Nothing).map_right(|x: i32| x * 2);
    /// assert!(bad.run().is_nothing());
    /// ```
    pub fn map_right<B, F>(self, function: F) -> EffSync<Triple<B, E>>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        EffSync::new(move || self.run().map(function))
    }

    /// Chains an effect-producing function over the success branch; error
    /// and empty branches short-circuit.
    pub fn bind_right<B, F>(self, function: F) -> EffSync<Triple<B, E>>
    where
        F: FnOnce(A) -> EffSync<Triple<B, E>> + 'static,
        B: 'static,
    {
        EffSync::new(move || match self.run() {
            Triple::Right(value) => function(value).run(),
            Triple::Left(error) => Triple::Left(error),
            Triple::Nothing => Triple::Nothing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_effect_is_lazy() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = counter.clone();
        let effect = EffSync::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            7
        });
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(effect.run(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_map_and_bind_chain() {
        let effect = EffSync::of(10).map(|x| x * 2).bind(|x| EffSync::of(x + 1));
        assert_eq!(effect.run(), 21);
    }

    #[test]
    fn test_catch_recovers_from_nested_panic() {
        let effect = EffSync::of(1)
            .map(|_| -> i32 { panic!("deep failure") })
            .catch(|message| EffSync::of(i32::try_from(message.len()).unwrap()));
        assert_eq!(effect.run(), 12);
    }

    #[test]
    fn test_catch_receives_the_panic_text() {
        let effect = EffSync::new(|| -> String { panic!("exact text") }).catch(EffSync::of);
        assert_eq!(effect.run(), "exact text");
    }

    #[test]
    fn test_catch_receives_formatted_panic_text() {
        let code = 7;
        let effect =
            EffSync::new(move || -> String { panic!("failure {code}") }).catch(EffSync::of);
        assert_eq!(effect.run(), "failure 7");
    }

    #[test]
    fn test_catch_passes_success_through() {
        let effect = EffSync::of(42).catch(|_| EffSync::of(0));
        assert_eq!(effect.run(), 42);
    }

    #[test]
    fn test_ensure_runs_on_panic() {
        let cleaned = Arc::new(AtomicUsize::new(0));
        let flag = cleaned.clone();
        let effect = EffSync::new(|| -> i32 { panic!("boom") })
            .ensure(move || {
                flag.fetch_add(1, Ordering::SeqCst);
            })
            .catch(|_| EffSync::of(0));
        assert_eq!(effect.run(), 0);
        assert_eq!(cleaned.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_map_right_short_circuits() {
        let touched = Arc::new(AtomicUsize::new(0));
        let seen = touched.clone();
        let effect: EffSync<Triple<i32, String>> = EffSync::of(Triple::Left("e".to_string()))
            .map_right(move |x: i32| {
                seen.fetch_add(1, Ordering::SeqCst);
                x * 2
            });
        assert!(effect.run().is_left());
        assert_eq!(touched.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bind_right_chains_success() {
        let effect: EffSync<Triple<i32, String>> = EffSync::of(Triple::pure(3))
            .bind_right(|x| EffSync::of(Triple::pure(x * 10)))
            .bind_right(|x| EffSync::of(Triple::pure(x + 1)));
        assert_eq!(effect.run(), Triple::Right(31));
    }
}
