//! Error types for the currying engine.
//!
//! Two failure families exist: [`BadFunction`] is raised at wrap time, when a
//! declared parameter list violates the calling-convention ordering invariant,
//! and [`BadArguments`] is raised at any incremental-application step, always
//! before the wrapped function is touched. Both are unified under
//! [`CurryError`].

use std::fmt;

/// A wrap-time failure: the declared parameter list cannot form a valid
/// signature.
///
/// # Examples
///
/// ```rust
/// use funcify::curry::{BadFunction, Signature};
///
/// let error = Signature::<i32>::builder()
///     .required("a")
///     .required("a")
///     .build()
///     .unwrap_err();
/// assert_eq!(
///     format!("{}", error),
///     "duplicate parameter 'a'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadFunction {
    /// Two parameters share the same name.
    DuplicateParameter(String),
    /// A parameter is declared out of calling-convention order
    /// (positional-only, positional-or-keyword, var-positional,
    /// keyword-only, var-keyword).
    ParameterOutOfOrder(String),
    /// More than one variadic-positional parameter is declared.
    MultipleVarPositional,
    /// More than one variadic-keyword parameter is declared.
    MultipleVarKeyword,
    /// A required positional parameter follows one with a default.
    RequiredAfterOptional(String),
}

impl fmt::Display for BadFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateParameter(name) => {
                write!(formatter, "duplicate parameter '{name}'")
            }
            Self::ParameterOutOfOrder(name) => {
                write!(
                    formatter,
                    "parameter '{name}' violates calling-convention ordering"
                )
            }
            Self::MultipleVarPositional => {
                write!(formatter, "more than one variadic-positional parameter")
            }
            Self::MultipleVarKeyword => {
                write!(formatter, "more than one variadic-keyword parameter")
            }
            Self::RequiredAfterOptional(name) => {
                write!(
                    formatter,
                    "required parameter '{name}' declared after an optional one"
                )
            }
        }
    }
}

impl std::error::Error for BadFunction {}

/// The reason an incremental application step was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadArgumentsKind {
    /// A parameter was bound more than once across the chain, by position,
    /// by keyword, or a mix of the two.
    Duplicate(String),
    /// A keyword name matches no declared parameter and the signature has no
    /// variadic-keyword channel.
    UnexpectedKeyword(String),
    /// More positional values were supplied than declared positional slots,
    /// and the signature has no variadic-positional channel.
    TooManyPositional,
    /// `finalize` was called while required parameters remain unbound.
    MissingRequired,
}

/// An application-time failure: the supplied arguments do not fit the
/// wrapped function's signature.
///
/// Raised before the wrapped function runs, so the underlying function never
/// observes a partially invalid call. The step that failed leaves its prior
/// binding state untouched and reusable.
///
/// # Examples
///
/// ```rust
/// use funcify::curry::{BadArguments, BadArgumentsKind};
///
/// let error = BadArguments {
///     function: "add".to_string(),
///     kind: BadArgumentsKind::Duplicate("a".to_string()),
/// };
/// assert_eq!(format!("{}", error), "add - duplicate argument 'a'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadArguments {
    /// The name of the wrapped function.
    pub function: String,
    /// Why the step was rejected.
    pub kind: BadArgumentsKind,
}

impl fmt::Display for BadArguments {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} - ", self.function)?;
        match &self.kind {
            BadArgumentsKind::Duplicate(name) => {
                write!(formatter, "duplicate argument '{name}'")
            }
            BadArgumentsKind::UnexpectedKeyword(name) => {
                write!(formatter, "unexpected keyword argument '{name}'")
            }
            BadArgumentsKind::TooManyPositional => {
                write!(formatter, "too many positional arguments")
            }
            BadArgumentsKind::MissingRequired => {
                write!(formatter, "missing required arguments")
            }
        }
    }
}

impl std::error::Error for BadArguments {}

/// Unified error type for the currying engine.
///
/// All fallible engine operations surface this type; failures are never
/// silently swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurryError {
    /// The declared parameter list is unsuitable for currying.
    BadFunction(BadFunction),
    /// The supplied arguments do not fit the signature.
    BadArguments(BadArguments),
}

impl CurryError {
    /// Returns the application-time failure, if that is what this error is.
    #[inline]
    pub const fn bad_arguments(&self) -> Option<&BadArguments> {
        match self {
            Self::BadArguments(error) => Some(error),
            Self::BadFunction(_) => None,
        }
    }
}

impl fmt::Display for CurryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadFunction(error) => write!(formatter, "{error}"),
            Self::BadArguments(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for CurryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadFunction(error) => Some(error),
            Self::BadArguments(error) => Some(error),
        }
    }
}

impl From<BadFunction> for CurryError {
    #[inline]
    fn from(error: BadFunction) -> Self {
        Self::BadFunction(error)
    }
}

impl From<BadArguments> for CurryError {
    #[inline]
    fn from(error: BadArguments) -> Self {
        Self::BadArguments(error)
    }
}
