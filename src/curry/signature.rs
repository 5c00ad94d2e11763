//! Signature specification - the calling contract of a wrapped function.
//!
//! A [`Signature`] describes the declared parameters of a function: their
//! names, kinds, and default values. It is built once per wrap through
//! [`SignatureBuilder`] (the explicit-declaration counterpart of runtime
//! reflection), validated against the calling-convention ordering invariant,
//! and never mutated afterwards. Every binding state produced from the same
//! wrap shares the same specification read-only.
//!
//! # Examples
//!
//! ```rust
//! use funcify::curry::{ParamKind, Signature};
//!
//! let spec: Signature<i32> = Signature::builder()
//!     .required("a")
//!     .optional("c", 0)
//!     .var_positional("rest")
//!     .keyword_only("mode")
//!     .build()
//!     .unwrap();
//!
//! assert!(spec.has_var_positional());
//! assert!(!spec.has_var_keyword());
//! assert_eq!(spec.params()[3].kind(), ParamKind::KeywordOnly);
//! ```

use super::error::BadFunction;

/// The kind of a declared parameter, in calling-convention order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKind {
    /// Bindable by position only.
    PositionalOnly,
    /// Bindable by position or by keyword.
    PositionalOrKeyword,
    /// The catch-all positional channel (`*args`-style).
    VarPositional,
    /// Bindable by keyword only.
    KeywordOnly,
    /// The catch-all keyword channel (`**kwargs`-style).
    VarKeyword,
}

impl ParamKind {
    /// Returns `true` for the two catch-all channels.
    #[inline]
    pub const fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }

    /// Returns `true` if a value can be routed to this parameter by position.
    #[inline]
    pub const fn is_positional(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }
}

/// One declared parameter of a wrapped function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param<V> {
    name: String,
    kind: ParamKind,
    default: Option<V>,
}

impl<V> Param<V> {
    /// The parameter's name, unique within its signature.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter's kind.
    #[inline]
    pub const fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The declared default value, if any.
    #[inline]
    pub const fn default(&self) -> Option<&V> {
        self.default.as_ref()
    }

    /// Returns `true` if the parameter declares a default value.
    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns `true` if the parameter must be bound before invocation.
    #[inline]
    pub const fn is_required(&self) -> bool {
        !self.kind.is_variadic() && self.default.is_none()
    }
}

/// The immutable calling contract derived once from a function at wrap time.
///
/// Holds the ordered parameter descriptors plus derived lookup data used by
/// the binding algorithm. Shared via `Arc` by every binding state of the
/// same wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature<V> {
    params: Vec<Param<V>>,
    /// Indices of positional-eligible slots, in declaration order.
    positional_slots: Vec<usize>,
    /// Indices of keyword-only slots, in declaration order.
    keyword_slots: Vec<usize>,
    var_positional: Option<usize>,
    var_keyword: Option<usize>,
}

impl<V> Signature<V> {
    /// Starts declaring a signature.
    #[inline]
    pub const fn builder() -> SignatureBuilder<V> {
        SignatureBuilder { params: Vec::new() }
    }

    /// The ordered parameter descriptors.
    #[inline]
    pub fn params(&self) -> &[Param<V>] {
        &self.params
    }

    /// Returns `true` if the signature declares a catch-all positional channel.
    #[inline]
    pub const fn has_var_positional(&self) -> bool {
        self.var_positional.is_some()
    }

    /// Returns `true` if the signature declares a catch-all keyword channel.
    #[inline]
    pub const fn has_var_keyword(&self) -> bool {
        self.var_keyword.is_some()
    }

    /// Names of parameters that must be bound before invocation.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|param| param.is_required())
            .map(|param| param.name())
    }

    /// Looks up a declared parameter by name.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|param| param.name() == name)
    }

    /// Indices of positional-eligible slots, in declaration order.
    #[inline]
    pub(crate) fn positional_slots(&self) -> &[usize] {
        &self.positional_slots
    }

    /// Indices of keyword-only slots, in declaration order.
    #[inline]
    pub(crate) fn keyword_slots(&self) -> &[usize] {
        &self.keyword_slots
    }
}

const fn rank(kind: ParamKind) -> u8 {
    match kind {
        ParamKind::PositionalOnly => 0,
        ParamKind::PositionalOrKeyword => 1,
        ParamKind::VarPositional => 2,
        ParamKind::KeywordOnly => 3,
        ParamKind::VarKeyword => 4,
    }
}

/// Declares the parameters of a function to be wrapped, one at a time, in
/// declaration order.
///
/// `build` performs the wrap-time validation: parameters
/// must follow the calling convention (positional-only, positional-or-keyword,
/// var-positional, keyword-only, var-keyword), names must be unique, at most
/// one channel of each variadic kind may exist, and a required positional
/// parameter may not follow an optional one.
///
/// # Examples
///
/// ```rust
/// use funcify::curry::{BadFunction, Signature};
///
/// let error = Signature::<i32>::builder()
///     .keyword_only("mode")
///     .required("a")
///     .build()
///     .unwrap_err();
/// assert_eq!(error, BadFunction::ParameterOutOfOrder("a".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct SignatureBuilder<V> {
    params: Vec<Param<V>>,
}

impl<V> SignatureBuilder<V> {
    fn push(mut self, name: impl Into<String>, kind: ParamKind, default: Option<V>) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind,
            default,
        });
        self
    }

    /// Declares a positional-only parameter without a default.
    #[must_use]
    pub fn positional_only(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::PositionalOnly, None)
    }

    /// Declares a positional-only parameter with a default value.
    #[must_use]
    pub fn positional_only_with_default(self, name: impl Into<String>, default: V) -> Self {
        self.push(name, ParamKind::PositionalOnly, Some(default))
    }

    /// Declares a required positional-or-keyword parameter.
    #[must_use]
    pub fn required(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::PositionalOrKeyword, None)
    }

    /// Declares a positional-or-keyword parameter with a default value.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, default: V) -> Self {
        self.push(name, ParamKind::PositionalOrKeyword, Some(default))
    }

    /// Declares a required keyword-only parameter.
    #[must_use]
    pub fn keyword_only(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::KeywordOnly, None)
    }

    /// Declares a keyword-only parameter with a default value.
    #[must_use]
    pub fn keyword_only_with_default(self, name: impl Into<String>, default: V) -> Self {
        self.push(name, ParamKind::KeywordOnly, Some(default))
    }

    /// Declares the catch-all positional channel.
    #[must_use]
    pub fn var_positional(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::VarPositional, None)
    }

    /// Declares the catch-all keyword channel.
    #[must_use]
    pub fn var_keyword(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::VarKeyword, None)
    }

    /// Validates the declaration and produces the immutable [`Signature`].
    ///
    /// # Errors
    ///
    /// Returns [`BadFunction`] when the declared parameter list violates the
    /// calling-convention ordering invariant, repeats a name, declares more
    /// than one variadic channel of a kind, or places a required positional
    /// parameter after an optional one.
    pub fn build(self) -> Result<Signature<V>, BadFunction> {
        let mut positional_slots = Vec::new();
        let mut keyword_slots = Vec::new();
        let mut var_positional = None;
        let mut var_keyword = None;
        let mut previous_rank = 0_u8;
        let mut seen_optional_positional = false;

        for (index, param) in self.params.iter().enumerate() {
            if self.params[..index]
                .iter()
                .any(|earlier| earlier.name() == param.name())
            {
                return Err(BadFunction::DuplicateParameter(param.name().to_string()));
            }
            if rank(param.kind()) < previous_rank {
                return Err(BadFunction::ParameterOutOfOrder(param.name().to_string()));
            }
            previous_rank = rank(param.kind());

            match param.kind() {
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword => {
                    if param.has_default() {
                        seen_optional_positional = true;
                    } else if seen_optional_positional {
                        return Err(BadFunction::RequiredAfterOptional(
                            param.name().to_string(),
                        ));
                    }
                    positional_slots.push(index);
                }
                ParamKind::KeywordOnly => keyword_slots.push(index),
                ParamKind::VarPositional => {
                    if var_positional.is_some() {
                        return Err(BadFunction::MultipleVarPositional);
                    }
                    var_positional = Some(index);
                }
                ParamKind::VarKeyword => {
                    if var_keyword.is_some() {
                        return Err(BadFunction::MultipleVarKeyword);
                    }
                    var_keyword = Some(index);
                }
            }
        }

        Ok(Signature {
            params: self.params,
            positional_slots,
            keyword_slots,
            var_positional,
            var_keyword,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_builder_full_convention_order() {
        let spec: Signature<i32> = Signature::builder()
            .positional_only("x")
            .required("a")
            .optional("c", 0)
            .var_positional("rest")
            .keyword_only("mode")
            .keyword_only_with_default("verbose", 0)
            .var_keyword("extra")
            .build()
            .unwrap();

        assert_eq!(spec.params().len(), 7);
        assert!(spec.has_var_positional());
        assert!(spec.has_var_keyword());
        assert_eq!(spec.positional_slots(), &[0, 1, 2]);
        assert_eq!(spec.keyword_slots(), &[4, 5]);
        assert_eq!(
            spec.required_names().collect::<Vec<_>>(),
            vec!["x", "a", "mode"]
        );
    }

    #[rstest]
    fn test_builder_rejects_duplicate_name() {
        let error = Signature::<i32>::builder()
            .required("a")
            .optional("a", 0)
            .build()
            .unwrap_err();
        assert_eq!(error, BadFunction::DuplicateParameter("a".to_string()));
    }

    #[rstest]
    #[case::keyword_before_positional(
        Signature::<i32>::builder().keyword_only("k").required("a"),
        "a"
    )]
    #[case::var_keyword_before_keyword(
        Signature::<i32>::builder().var_keyword("kw").keyword_only("k"),
        "k"
    )]
    #[case::positional_after_var_positional(
        Signature::<i32>::builder().var_positional("rest").required("a"),
        "a"
    )]
    fn test_builder_rejects_out_of_order(
        #[case] builder: SignatureBuilder<i32>,
        #[case] offender: &str,
    ) {
        assert_eq!(
            builder.build().unwrap_err(),
            BadFunction::ParameterOutOfOrder(offender.to_string())
        );
    }

    #[rstest]
    fn test_builder_rejects_second_variadic_channel() {
        let error = Signature::<i32>::builder()
            .var_positional("rest")
            .var_positional("more")
            .build()
            .unwrap_err();
        assert_eq!(error, BadFunction::MultipleVarPositional);

        let error = Signature::<i32>::builder()
            .var_keyword("extra")
            .var_keyword("more")
            .build()
            .unwrap_err();
        assert_eq!(error, BadFunction::MultipleVarKeyword);
    }

    #[rstest]
    fn test_builder_rejects_required_after_optional() {
        let error = Signature::<i32>::builder()
            .optional("c", 0)
            .required("a")
            .build()
            .unwrap_err();
        assert_eq!(error, BadFunction::RequiredAfterOptional("a".to_string()));
    }

    #[rstest]
    fn test_required_keyword_only_after_optional_is_allowed() {
        let spec = Signature::<i32>::builder()
            .optional("c", 0)
            .keyword_only("mode")
            .build()
            .unwrap();
        assert_eq!(spec.required_names().collect::<Vec<_>>(), vec!["mode"]);
    }

    #[rstest]
    fn test_param_accessors() {
        let spec: Signature<i32> = Signature::builder().optional("c", 7).build().unwrap();
        let param = &spec.params()[0];
        assert_eq!(param.name(), "c");
        assert_eq!(param.kind(), ParamKind::PositionalOrKeyword);
        assert_eq!(param.default(), Some(&7));
        assert!(param.has_default());
        assert!(!param.is_required());
    }

    #[rstest]
    fn test_param_index_lookup() {
        let spec: Signature<i32> = Signature::builder()
            .required("a")
            .required("b")
            .build()
            .unwrap();
        assert_eq!(spec.param_index("b"), Some(1));
        assert_eq!(spec.param_index("missing"), None);
    }
}
