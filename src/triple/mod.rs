//! Triple - a three-state result/optional monad.
//!
//! This module provides the `Triple<A, E>` type, which represents a value
//! that is either a `Right(A)` (success), a `Left(E)` (error), or `Nothing`
//! (empty). It combines the roles of `Result` and `Option`:
//!
//! - Error handling with an explicit empty state
//! - Short-circuiting chains of transformations
//! - Applicative application of curried callables
//!
//! # Examples
//!
//! ```rust
//! use funcify::triple::Triple;
//!
//! let success: Triple<i32, String> = Triple::Right(42);
//! let failure: Triple<i32, String> = Triple::Left("error".to_string());
//! let empty: Triple<i32, String> = Triple::Nothing;
//!
//! // Map over the success value
//! let doubled = success.map(|x| x * 2);
//! assert_eq!(doubled, Triple::Right(84));
//!
//! // Left and Nothing short-circuit
//! assert_eq!(failure.map(|x: i32| x * 2), Triple::Left("error".to_string()));
//! assert_eq!(empty.map(|x: i32| x * 2), Triple::Nothing);
//!
//! // Eliminate all three branches at once
//! let described = Triple::<i32, String>::Right(7).unfold(
//!     |value| format!("value {value}"),
//!     |error| format!("error {error}"),
//!     || "empty".to_string(),
//! );
//! assert_eq!(described, "value 7");
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

#[cfg(feature = "curry")]
use crate::curry::{Applied, Args, BadArguments, BadArgumentsKind, Curry, CurryError};

/// A value in one of three states: success, error, or empty.
///
/// # Type Parameters
///
/// * `A` - The type of the success value
/// * `E` - The type of the error value
///
/// # Examples
///
/// ```rust
/// use funcify::triple::Triple;
///
/// let value: Triple<i32, String> = Triple::pure(21);
/// assert_eq!(value.map(|x| x * 2), Triple::Right(42));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Triple<A, E> {
    /// The success branch, holding a value available here and now.
    Right(A),
    /// The error branch.
    Left(E),
    /// The empty branch.
    Nothing,
}

impl<A, E> Triple<A, E> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Wraps a plain value in the success branch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let value: Triple<i32, String> = Triple::pure(42);
    /// assert!(value.is_right());
    /// ```
    #[inline]
    pub const fn pure(value: A) -> Self {
        Self::Right(value)
    }

    /// Converts an `Option` into a `Triple`, mapping `None` to `Nothing`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let present: Triple<i32, String> = Triple::from_option(Some(1));
    /// assert_eq!(present, Triple::Right(1));
    ///
    /// let absent: Triple<i32, String> = Triple::from_option(None);
    /// assert!(absent.is_nothing());
    /// ```
    #[inline]
    pub fn from_option(option: Option<A>) -> Self {
        option.map_or(Self::Nothing, Self::Right)
    }

    /// Wraps the value in the success branch if the predicate holds,
    /// otherwise produces `Nothing`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let kept: Triple<i32, String> = Triple::from_predicate(5, |x| *x > 0);
    /// assert_eq!(kept, Triple::Right(5));
    ///
    /// let dropped: Triple<i32, String> = Triple::from_predicate(0, |x| *x > 0);
    /// assert!(dropped.is_nothing());
    /// ```
    pub fn from_predicate<P>(value: A, predicate: P) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        if predicate(&value) {
            Self::Right(value)
        } else {
            Self::Nothing
        }
    }

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is a success value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Returns `true` if this is an error value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is the empty branch.
    #[inline]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Returns `true` for the error and empty branches - the states a
    /// short-circuiting collaborator propagates unchanged.
    #[inline]
    pub const fn is_bad(&self) -> bool {
        !self.is_right()
    }

    // =========================================================================
    // Value Extraction
    // =========================================================================

    /// Converts into the success value, consuming the triple.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let value: Triple<i32, String> = Triple::Right(42);
    /// assert_eq!(value.value(), Some(42));
    ///
    /// let empty: Triple<i32, String> = Triple::Nothing;
    /// assert_eq!(empty.value(), None);
    /// ```
    #[inline]
    pub fn value(self) -> Option<A> {
        match self {
            Self::Right(value) => Some(value),
            Self::Left(_) | Self::Nothing => None,
        }
    }

    /// Converts into the error value, consuming the triple.
    #[inline]
    pub fn error(self) -> Option<E> {
        match self {
            Self::Left(error) => Some(error),
            Self::Right(_) | Self::Nothing => None,
        }
    }

    /// Returns a reference to the success value if present.
    #[inline]
    pub const fn value_ref(&self) -> Option<&A> {
        match self {
            Self::Right(value) => Some(value),
            Self::Left(_) | Self::Nothing => None,
        }
    }

    /// Returns a reference to the error value if present.
    #[inline]
    pub const fn error_ref(&self) -> Option<&E> {
        match self {
            Self::Left(error) => Some(error),
            Self::Right(_) | Self::Nothing => None,
        }
    }

    /// Returns the success value, or the alternative for the error and
    /// empty branches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let value: Triple<i32, String> = Triple::Right(42);
    /// assert_eq!(value.get_or_else(0), 42);
    ///
    /// let empty: Triple<i32, String> = Triple::Nothing;
    /// assert_eq!(empty.get_or_else(0), 0);
    /// ```
    #[inline]
    pub fn get_or_else(self, alternative: A) -> A {
        match self {
            Self::Right(value) => value,
            Self::Left(_) | Self::Nothing => alternative,
        }
    }

    // =========================================================================
    // Mapping and Binding
    // =========================================================================

    /// Applies a function to the success value; the error and empty branches
    /// pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let value: Triple<i32, String> = Triple::Right(21);
    /// assert_eq!(value.map(|x| x * 2), Triple::Right(42));
    /// ```
    #[inline]
    pub fn map<B, F>(self, function: F) -> Triple<B, E>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Right(value) => Triple::Right(function(value)),
            Self::Left(error) => Triple::Left(error),
            Self::Nothing => Triple::Nothing,
        }
    }

    /// Applies a function to the error value; the success and empty branches
    /// pass through unchanged.
    #[inline]
    pub fn map_left<F, G>(self, function: G) -> Triple<A, F>
    where
        G: FnOnce(E) -> F,
    {
        match self {
            Self::Right(value) => Triple::Right(value),
            Self::Left(error) => Triple::Left(function(error)),
            Self::Nothing => Triple::Nothing,
        }
    }

    /// Applies a function that returns a `Triple`, flattening the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// fn checked_halve(x: i32) -> Triple<i32, String> {
    ///     if x % 2 == 0 { Triple::Right(x / 2) } else { Triple::Nothing }
    /// }
    ///
    /// let even: Triple<i32, String> = Triple::Right(42);
    /// assert_eq!(even.bind(checked_halve), Triple::Right(21));
    ///
    /// let odd: Triple<i32, String> = Triple::Right(7);
    /// assert!(odd.bind(checked_halve).is_nothing());
    /// ```
    #[inline]
    pub fn bind<B, F>(self, function: F) -> Triple<B, E>
    where
        F: FnOnce(A) -> Triple<B, E>,
    {
        match self {
            Self::Right(value) => function(value),
            Self::Left(error) => Triple::Left(error),
            Self::Nothing => Triple::Nothing,
        }
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Recovers from the error branch; the success and empty branches always
    /// return themselves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let failed: Triple<i32, String> = Triple::Left("boom".to_string());
    /// let recovered = failed.recover_from_left(|_| Triple::pure(0));
    /// assert_eq!(recovered, Triple::Right(0));
    ///
    /// let empty: Triple<i32, String> = Triple::Nothing;
    /// assert!(empty.recover_from_left(|_| Triple::pure(0)).is_nothing());
    /// ```
    #[inline]
    pub fn recover_from_left<F>(self, function: F) -> Self
    where
        F: FnOnce(E) -> Self,
    {
        match self {
            Self::Left(error) => function(error),
            other => other,
        }
    }

    /// Recovers from the empty branch; the success and error branches always
    /// return themselves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let empty: Triple<i32, String> = Triple::Nothing;
    /// let recovered = empty.recover_from_nothing(|| Triple::pure(7));
    /// assert_eq!(recovered, Triple::Right(7));
    /// ```
    #[inline]
    pub fn recover_from_nothing<F>(self, function: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Nothing => function(),
            other => other,
        }
    }

    // =========================================================================
    // Unfold
    // =========================================================================

    /// Eliminates the triple by applying one of three functions. As a rule,
    /// this completes a chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let empty: Triple<i32, String> = Triple::Nothing;
    /// let result = empty.unfold(|v| v.to_string(), |e| e, || "-".to_string());
    /// assert_eq!(result, "-");
    /// ```
    #[inline]
    pub fn unfold<T, R, L, N>(self, right: R, left: L, nothing: N) -> T
    where
        R: FnOnce(A) -> T,
        L: FnOnce(E) -> T,
        N: FnOnce() -> T,
    {
        match self {
            Self::Right(value) => right(value),
            Self::Left(error) => left(error),
            Self::Nothing => nothing(),
        }
    }
}

impl<A> Triple<A, String> {
    /// Runs a computation, capturing panics into the error branch.
    ///
    /// The panic payload's message becomes the `Left` value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::triple::Triple;
    ///
    /// let captured = Triple::capture(|| -> i32 { panic!("division by zero") });
    /// assert_eq!(captured, Triple::Left("division by zero".to_string()));
    ///
    /// let fine = Triple::capture(|| 42);
    /// assert_eq!(fine, Triple::Right(42));
    /// ```
    pub fn capture<F>(computation: F) -> Self
    where
        F: FnOnce() -> A,
    {
        match catch_unwind(AssertUnwindSafe(computation)) {
            Ok(value) => Self::Right(value),
            Err(payload) => {
                let message = if let Some(string) = payload.downcast_ref::<&str>() {
                    (*string).to_string()
                } else if let Some(string) = payload.downcast_ref::<String>() {
                    string.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Self::Left(message)
            }
        }
    }
}

// =============================================================================
// Applicative application of curried callables
// =============================================================================

#[cfg(feature = "curry")]
impl<V, R, E> Triple<Curry<V, R>, E>
where
    V: Clone,
    E: From<CurryError>,
{
    /// Applies a wrapped value to a wrapped curried callable through exactly
    /// one incremental application step.
    ///
    /// Error and empty branches on either side short-circuit; a rejected step
    /// becomes the error branch. The outcome keeps the chain's shape: a
    /// continuation stays [`Applied::Partial`], an invocation becomes
    /// [`Applied::Done`].
    ///
    /// # Panics
    ///
    /// Panics if the wrapped callable is marked impure - composing side
    /// effects into the monad is a contract violation, not a recoverable
    /// error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funcify::curry::{Applied, Curry, CurryError, Signature};
    /// use funcify::triple::Triple;
    ///
    /// let spec = Signature::builder().required("a").required("b").build().unwrap();
    /// let add = Curry::new("add", spec, |call| call.positional.iter().sum::<i32>());
    ///
    /// let outcome: Triple<_, CurryError> = Triple::pure(add)
    ///     .ap(Triple::pure(1))
    ///     .bind(|step| match step {
    ///         Applied::Partial(next) => Triple::pure(next).ap(Triple::pure(2)),
    ///         Applied::Done(_) => Triple::Nothing,
    ///     });
    /// assert_eq!(outcome.value().and_then(Applied::done), Some(3));
    /// ```
    pub fn ap(self, wrapped: Triple<V, E>) -> Triple<Applied<Curry<V, R>, R>, E> {
        match self {
            Self::Right(curried) => {
                assert!(
                    !curried.origin().is_impure(),
                    "Triple::ap: impure function '{}' can not be used",
                    curried.origin().name(),
                );
                match wrapped {
                    Triple::Right(value) => {
                        match curried.apply(Args::new().with_positional(value)) {
                            Ok(applied) => Triple::Right(applied),
                            Err(error) => Triple::Left(error.into()),
                        }
                    }
                    Triple::Left(error) => Triple::Left(error),
                    Triple::Nothing => Triple::Nothing,
                }
            }
            Self::Left(error) => Triple::Left(error),
            Self::Nothing => Triple::Nothing,
        }
    }
}

/// Applies Triple-wrapped positional arguments to a curried callable, one
/// incremental step per argument.
///
/// The first bad argument (or rejected step) short-circuits. Supplying more
/// arguments after the chain completed is reported as excess positional
/// input.
///
/// # Panics
///
/// Panics if the callable is marked impure, as [`Triple::ap`] does.
///
/// # Examples
///
/// ```rust
/// use funcify::curry::{Applied, Curry, CurryError, Signature};
/// use funcify::triple::{Triple, lift};
///
/// let spec = Signature::builder().required("a").required("b").build().unwrap();
/// let add = Curry::new("add", spec, |call| call.positional.iter().sum::<i32>());
///
/// let outcome: Triple<_, CurryError> =
///     lift(add, [Triple::pure(1), Triple::pure(2)]);
/// assert_eq!(outcome.value().and_then(Applied::done), Some(3));
/// ```
#[cfg(feature = "curry")]
pub fn lift<V, R, E, I>(curried: Curry<V, R>, wrapped_args: I) -> Triple<Applied<Curry<V, R>, R>, E>
where
    V: Clone,
    E: From<CurryError>,
    I: IntoIterator<Item = Triple<V, E>>,
{
    let function = curried.origin().name().to_string();
    let mut outcome: Triple<Applied<Curry<V, R>, R>, E> =
        Triple::Right(Applied::Partial(curried));
    for wrapped in wrapped_args {
        outcome = match outcome {
            Triple::Right(Applied::Partial(next)) => Triple::Right(next).ap(wrapped),
            Triple::Right(Applied::Done(_)) => {
                return Triple::Left(
                    CurryError::BadArguments(BadArguments {
                        function,
                        kind: BadArgumentsKind::TooManyPositional,
                    })
                    .into(),
                );
            }
            bad => return bad,
        };
    }
    outcome
}

// =============================================================================
// Debug Implementation
// =============================================================================

impl<A: fmt::Debug, E: fmt::Debug> fmt::Debug for Triple<A, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
            Self::Left(error) => formatter.debug_tuple("Left").field(error).finish(),
            Self::Nothing => formatter.write_str("Nothing"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<A, E> From<Result<A, E>> for Triple<A, E> {
    /// Converts a `Result` to a `Triple`: `Ok` becomes `Right`, `Err`
    /// becomes `Left`. The empty branch has no `Result` counterpart.
    #[inline]
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<A, E> From<Triple<A, E>> for Result<Option<A>, E> {
    /// Converts a `Triple` to a `Result`: `Right` becomes `Ok(Some)`,
    /// `Nothing` becomes `Ok(None)`, and `Left` becomes `Err`.
    #[inline]
    fn from(triple: Triple<A, E>) -> Self {
        match triple {
            Triple::Right(value) => Ok(Some(value)),
            Triple::Left(error) => Err(error),
            Triple::Nothing => Ok(None),
        }
    }
}
