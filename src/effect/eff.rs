//! `Eff` - deferred asynchronous side effects.
//!
//! The `Eff` type is the asynchronous counterpart of
//! [`EffSync`](super::EffSync): it wraps an async computation that runs only
//! when [`run`](Eff::run) is awaited. It additionally offers worker-thread
//! offload for blocking functions and a timeout-bounded run operation, and
//! the same short-circuit combinators over [`Triple`] payloads.
//!
//! # Examples
//!
//! ```rust,ignore
//! use funcify::effect::Eff;
//!
//! #[tokio::main]
//! async fn main() {
//!     let effect = Eff::of(10)
//!         .map(|x| x * 2)
//!         .bind(|x| Eff::of(x + 1));
//!     assert_eq!(effect.run().await, 21);
//! }
//! ```

use std::future::Future;
use std::panic::{AssertUnwindSafe, resume_unwind};
use std::pin::Pin;
use std::time::Duration;

use futures::FutureExt;

use super::eff_sync::panic_message;
use crate::triple::Triple;

/// A lazy container for asynchronous side effects.
///
/// `Eff<A>` wraps an async computation producing a value of type `A`. The
/// computation is consumed exactly once, by awaiting [`run`](Self::run) or
/// one of its bounded variants.
pub struct Eff<A> {
    /// The wrapped async computation that produces a value of type `A`.
    effect: Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = A> + Send>> + Send>,
}

// =============================================================================
// Constructors and Execution
// =============================================================================

impl<A: 'static> Eff<A> {
    /// Creates a new effect from an async closure.
    ///
    /// The closure will not be executed until `run` is awaited.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use funcify::effect::Eff;
    ///
    /// let effect = Eff::new(|| async {
    ///     tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    ///     42
    /// });
    /// assert_eq!(effect.run().await, 42);
    /// ```
    pub fn new<F, Fut>(effect: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            effect: Box::new(move || Box::pin(effect())),
        }
    }

    /// Creates an effect from an existing future that has not been polled
    /// yet.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            effect: Box::new(move || Box::pin(future)),
        }
    }

    /// Starts the chain, awaiting the deferred computation.
    pub async fn run(self) -> A {
        (self.effect)().await
    }
}

impl<A: Send + 'static> Eff<A> {
    /// Wraps a plain value in the container. No inspections happen here.
    pub fn of(value: A) -> Self {
        Self {
            effect: Box::new(move || Box::pin(async move { value })),
        }
    }

    /// Awaits the chain with a bounded wait.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError`] when the computation does not complete
    /// within the limit.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use funcify::effect::Eff;
    /// use std::time::Duration;
    ///
    /// let fast = Eff::of(42);
    /// assert_eq!(fast.run_timeout(Duration::from_secs(1)).await, Ok(42));
    /// ```
    pub async fn run_timeout(self, limit: Duration) -> Result<A, TimeoutError> {
        tokio::time::timeout(limit, self.run())
            .await
            .map_err(|_| TimeoutError { duration: limit })
    }

    /// Hands the deferred computation to the scheduler as a task.
    ///
    /// The effect starts running immediately on the runtime; the returned
    /// handle resolves to its result.
    pub fn spawn(self) -> tokio::task::JoinHandle<A> {
        tokio::spawn(self.run())
    }
}

// =============================================================================
// Combinators
// =============================================================================

impl<A: 'static> Eff<A> {
    /// Applies a function to the eventual result.
    pub fn map<B, F>(self, function: F) -> Eff<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: 'static,
    {
        Eff::new(move || async move { function(self.run().await) })
    }

    /// Chains effects, passing the result of this one to a function that
    /// produces the next.
    pub fn bind<B, F>(self, function: F) -> Eff<B>
    where
        F: FnOnce(A) -> Eff<B> + Send + 'static,
        B: 'static,
    {
        Eff::new(move || async move { function(self.run().await).run().await })
    }

}

impl<A: Send + 'static> Eff<A> {
    /// Catches panics in all deeper nested computations and hands the panic
    /// message to a recovery effect.
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(String) -> Self + Send + 'static,
    {
        Self::new(move || async move {
            match AssertUnwindSafe(self.run()).catch_unwind().await {
                Ok(value) => value,
                Err(payload) => handler(panic_message(payload.as_ref())).run().await,
            }
        })
    }

    /// Guarantees the cleanup effect runs after the computation, even when
    /// it panics - the asynchronous counterpart of try/finally.
    pub fn ensure<F, Fut>(self, cleanup: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::new(move || async move {
            let outcome = AssertUnwindSafe(self.run()).catch_unwind().await;
            cleanup().await;
            match outcome {
                Ok(value) => value,
                Err(payload) => resume_unwind(payload),
            }
        })
    }
    /// Applies a blocking function to the eventual result on a worker
    /// thread, keeping the scheduler free.
    ///
    /// # Panics
    ///
    /// A panic inside the function resumes on the awaiting task, so `catch`
    /// observes it like any other panic.
    pub fn map_to_thread<B, F>(self, function: F) -> Eff<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        Eff::new(move || async move {
            let value = self.run().await;
            match tokio::task::spawn_blocking(move || function(value)).await {
                Ok(result) => result,
                Err(join_error) if join_error.is_panic() => {
                    resume_unwind(join_error.into_panic())
                }
                Err(_) => panic!("worker thread cancelled"),
            }
        })
    }
}

// =============================================================================
// Short-circuit combinators over Triple payloads
// =============================================================================

impl<A, E> Eff<Triple<A, E>>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Applies a function to the success branch of the stored triple; error
    /// and empty branches short-circuit without running the function.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use funcify::effect::Eff;
    /// use funcify::triple::Triple;
    ///
    /// let effect: Eff<Triple<i32, String>> =
    ///     Eff::of(Triple::pure(10)).map_right(|x| x * 2);
    /// assert_eq!(effect.run().await, Triple::Right(20));
    /// ```
    pub fn map_right<B, F>(self, function: F) -> Eff<Triple<B, E>>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: 'static,
    {
        Eff::new(move || async move { self.run().await.map(function) })
    }

    /// Chains an effect-producing function over the success branch; error
    /// and empty branches short-circuit.
    pub fn bind_right<B, F>(self, function: F) -> Eff<Triple<B, E>>
    where
        F: FnOnce(A) -> Eff<Triple<B, E>> + Send + 'static,
        B: 'static,
    {
        Eff::new(move || async move {
            match self.run().await {
                Triple::Right(value) => function(value).run().await,
                Triple::Left(error) => Triple::Left(error),
                Triple::Nothing => Triple::Nothing,
            }
        })
    }

    /// Applies a blocking function to the success branch on a worker
    /// thread; error and empty branches short-circuit without leaving the
    /// scheduler.
    pub fn map_right_to_thread<B, F>(self, function: F) -> Eff<Triple<B, E>>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        self.bind_right(|value| {
            Eff::of(value).map_to_thread(|value| Triple::Right(function(value)))
        })
    }
}

// =============================================================================
// Timeout Error Type
// =============================================================================

/// Error type representing a bounded wait that ran out.
///
/// # Examples
///
/// ```rust
/// use funcify::effect::TimeoutError;
/// use std::time::Duration;
///
/// let error = TimeoutError {
///     duration: Duration::from_secs(5),
/// };
/// assert_eq!(format!("{}", error), "operation timed out after 5s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutError {
    /// The timeout duration that was exceeded.
    pub duration: Duration,
}

impl std::fmt::Display for TimeoutError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "operation timed out after {:?}", self.duration)
    }
}

impl std::error::Error for TimeoutError {}
