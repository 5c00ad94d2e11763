//! The `args!` macro for building incremental application steps.

/// Builds the [`Args`](crate::curry::Args) of one incremental application.
///
/// Positional values come first, separated by commas; keyword values follow
/// a `;` as `name = value` pairs. Either part may be omitted.
///
/// # Examples
///
/// ## Positional values
///
/// ```
/// use funcify::args;
/// use funcify::curry::Args;
///
/// let step: Args<i32> = args![1, 2, 3];
/// assert_eq!(step.positional(), &[1, 2, 3]);
/// ```
///
/// ## Keyword values
///
/// ```
/// use funcify::args;
/// use funcify::curry::Args;
///
/// let step: Args<i32> = args![c = 3, d = 4];
/// assert_eq!(step.keyword().len(), 2);
/// ```
///
/// ## Mixed steps
///
/// ```
/// use funcify::args;
/// use funcify::curry::Args;
///
/// let step: Args<i32> = args![1, 2; c = 3];
/// assert_eq!(step.positional(), &[1, 2]);
/// assert_eq!(step.keyword(), &[("c".to_string(), 3)]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::curry::Args::new()
    };
    ($($name:ident = $value:expr),+ $(,)?) => {
        $crate::curry::Args::new()$(.with_keyword(stringify!($name), $value))+
    };
    ($($positional:expr),+ $(,)?) => {
        $crate::curry::Args::new()$(.with_positional($positional))+
    };
    ($($positional:expr),+ ; $($name:ident = $value:expr),+ $(,)?) => {
        $crate::curry::Args::new()
            $(.with_positional($positional))+
            $(.with_keyword(stringify!($name), $value))+
    };
}

#[cfg(test)]
mod tests {
    use crate::curry::Args;

    #[test]
    fn test_args_empty() {
        let step: Args<i32> = args![];
        assert!(step.is_empty());
    }

    #[test]
    fn test_args_positional_only() {
        let step: Args<i32> = args![1, 2];
        assert_eq!(step.positional(), &[1, 2]);
        assert!(step.keyword().is_empty());
    }

    #[test]
    fn test_args_keyword_only() {
        let step: Args<i32> = args![a = 1];
        assert_eq!(step.keyword(), &[("a".to_string(), 1)]);
    }

    #[test]
    fn test_args_mixed_with_trailing_comma() {
        let step: Args<i32> = args![1; b = 2, c = 3,];
        assert_eq!(step.positional(), &[1]);
        assert_eq!(step.keyword().len(), 2);
    }
}
