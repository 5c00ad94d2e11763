//! Binding state - the accumulating partial application.
//!
//! A [`BindingState`] is an immutable-per-step snapshot of the values bound
//! so far, together with a shared reference to the wrap's [`Signature`] and
//! the origin metadata of the wrapped function. Each incremental call
//! validates the new arguments against the calling contract *before* any
//! value is merged, then either produces a new state or reports that the
//! accumulated arguments are sufficient to invoke the wrapped function.
//!
//! The previous state is never mutated, so an intermediate continuation can
//! be branched into multiple independent chains.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::{BadArguments, BadArgumentsKind, CurryError};
use super::signature::{ParamKind, Signature};

/// Identity of a wrapped function: its name and purity flag.
///
/// The currying engine preserves this reference unchanged through every
/// continuation, so collaborators (such as the `Triple` monad's applicative
/// apply) can refuse to compose with impure functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    name: String,
    impure: bool,
}

impl Origin {
    pub(crate) fn new(name: impl Into<String>, impure: bool) -> Self {
        Self {
            name: name.into(),
            impure,
        }
    }

    /// The wrapped function's name, used in error messages.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the wrapped function was marked as side-effecting.
    #[inline]
    pub const fn is_impure(&self) -> bool {
        self.impure
    }
}

/// The arguments of one incremental application step.
///
/// Keyword entries keep their supply order so that a name repeated within a
/// single step is detected as a duplicate binding rather than silently
/// collapsed.
///
/// The [`args!`](crate::args) macro is the usual way to build one:
///
/// ```rust
/// use funcify::args;
/// use funcify::curry::Args;
///
/// let step: Args<i32> = args![1, 2; c = 3];
/// assert_eq!(step.positional(), &[1, 2]);
/// assert_eq!(step.keyword(), &[("c".to_string(), 3)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args<V> {
    positional: Vec<V>,
    keyword: Vec<(String, V)>,
}

impl<V> Args<V> {
    /// An empty step.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positional: Vec::new(),
            keyword: Vec::new(),
        }
    }

    /// Appends one positional value.
    #[must_use]
    pub fn with_positional(mut self, value: V) -> Self {
        self.positional.push(value);
        self
    }

    /// Appends one keyword value.
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: V) -> Self {
        self.keyword.push((name.into(), value));
        self
    }

    /// The positional values of this step, in supply order.
    #[inline]
    pub fn positional(&self) -> &[V] {
        &self.positional
    }

    /// The keyword values of this step, in supply order.
    #[inline]
    pub fn keyword(&self) -> &[(String, V)] {
        &self.keyword
    }

    /// Returns `true` if the step supplies no values at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    fn into_parts(self) -> (Vec<V>, Vec<(String, V)>) {
        (self.positional, self.keyword)
    }
}

impl<V> From<Vec<V>> for Args<V> {
    /// Treats a plain vector as purely positional arguments.
    fn from(positional: Vec<V>) -> Self {
        Self {
            positional,
            keyword: Vec::new(),
        }
    }
}

/// The fully assembled argument list handed to the wrapped function.
///
/// Declared values appear in declaration order with defaults merged in;
/// the two variadic channels carry whatever overflow the chain routed to
/// them (empty when the channel is absent or untouched at `finalize`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgs<V> {
    /// Values of the declared positional-eligible slots, in declaration order.
    pub positional: Vec<V>,
    /// Values routed to the catch-all positional channel.
    pub var_positional: Vec<V>,
    /// Values of the declared keyword-only slots, by name.
    pub keyword: BTreeMap<String, V>,
    /// Values routed to the catch-all keyword channel.
    pub var_keyword: BTreeMap<String, V>,
}

/// The outcome of one incremental application step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<V> {
    /// The accumulated arguments are not yet sufficient; the chain continues
    /// from this new state.
    Continue(BindingState<V>),
    /// The completion policy fired: invoke the wrapped function with these
    /// assembled arguments.
    Invoke(CallArgs<V>),
}

/// The facade-level outcome of one incremental application.
///
/// `Next` is the facade type itself (`Curry` or `AsyncCurry`), so a partial
/// step hands back a callable value with the same call contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied<Next, R> {
    /// The chain continues; further arguments may be applied to this value.
    Partial(Next),
    /// The wrapped function was invoked; this is its result.
    Done(R),
}

impl<Next, R> Applied<Next, R> {
    /// Returns `true` if the wrapped function was invoked.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Converts into the continuation, if the chain continued.
    #[inline]
    pub fn partial(self) -> Option<Next> {
        match self {
            Self::Partial(next) => Some(next),
            Self::Done(_) => None,
        }
    }

    /// Converts into the final result, if the wrapped function was invoked.
    #[inline]
    pub fn done(self) -> Option<R> {
        match self {
            Self::Partial(_) => None,
            Self::Done(result) => Some(result),
        }
    }

    /// Returns the continuation, consuming the outcome.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped function was invoked.
    #[inline]
    pub fn unwrap_partial(self) -> Next {
        match self {
            Self::Partial(next) => next,
            Self::Done(_) => panic!("called `Applied::unwrap_partial()` on a `Done` outcome"),
        }
    }

    /// Returns the final result, consuming the outcome.
    ///
    /// # Panics
    ///
    /// Panics if the chain continued instead of invoking.
    #[inline]
    pub fn unwrap_done(self) -> R {
        match self {
            Self::Partial(_) => panic!("called `Applied::unwrap_done()` on a `Partial` outcome"),
            Self::Done(result) => result,
        }
    }
}

/// An immutable snapshot of the arguments accumulated so far.
///
/// Created empty at wrap time; every [`apply`](Self::apply) produces a fresh
/// state and leaves this one untouched, so a failed step can be retried with
/// corrected arguments from the same continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingState<V> {
    spec: Arc<Signature<V>>,
    origin: Arc<Origin>,
    /// One entry per declared parameter; variadic slots stay `None`.
    slots: Vec<Option<V>>,
    var_positional: Vec<V>,
    var_keyword: BTreeMap<String, V>,
    touched_var_positional: bool,
    touched_var_keyword: bool,
}

impl<V> BindingState<V> {
    pub(crate) fn empty(spec: Arc<Signature<V>>, origin: Arc<Origin>) -> Self {
        let slots = (0..spec.params().len()).map(|_| None).collect();
        Self {
            spec,
            origin,
            slots,
            var_positional: Vec::new(),
            var_keyword: BTreeMap::new(),
            touched_var_positional: false,
            touched_var_keyword: false,
        }
    }

    /// The shared signature specification of this wrap.
    #[inline]
    pub fn spec(&self) -> &Signature<V> {
        &self.spec
    }

    /// The wrapped function's identity.
    #[inline]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Returns `true` once the catch-all positional channel has received at
    /// least one value.
    #[inline]
    pub const fn touched_var_positional(&self) -> bool {
        self.touched_var_positional
    }

    /// Returns `true` once the catch-all keyword channel has received at
    /// least one value.
    #[inline]
    pub const fn touched_var_keyword(&self) -> bool {
        self.touched_var_keyword
    }

    /// Returns `true` when every required parameter is bound, by position or
    /// by keyword.
    pub fn satisfied(&self) -> bool {
        self.spec
            .params()
            .iter()
            .enumerate()
            .filter(|(_, param)| param.is_required())
            .all(|(index, _)| self.slots[index].is_some())
    }

    /// Returns `true` when the completion policy would auto-invoke: every
    /// declared non-variadic slot is bound explicitly and each declared
    /// variadic channel has been touched.
    ///
    /// An unbound optional slot keeps the chain open; its default merges
    /// only on an explicit [`finalize`](Self::finalize).
    pub fn ready(&self) -> bool {
        self.spec
            .params()
            .iter()
            .enumerate()
            .filter(|(_, param)| !param.kind().is_variadic())
            .all(|(index, _)| self.slots[index].is_some())
            && (!self.spec.has_var_positional() || self.touched_var_positional)
            && (!self.spec.has_var_keyword() || self.touched_var_keyword)
    }

    fn bad(&self, kind: BadArgumentsKind) -> CurryError {
        CurryError::BadArguments(BadArguments {
            function: self.origin.name().to_string(),
            kind,
        })
    }
}

/// How one keyword entry of a step will be merged.
enum KeywordRoute<V> {
    Slot(usize, V),
    VarKeyword(String, V),
}

impl<V: Clone> BindingState<V> {
    /// Advances the chain by one incremental application.
    ///
    /// Validation happens before any value is merged: on error the step is
    /// aborted, nothing is recorded, and the wrapped function is guaranteed
    /// never to observe the invalid call. On success the new state is run
    /// through the completion policy.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::BadArguments`] on a duplicate binding, an
    /// unexpected keyword name, or excess positional input.
    pub fn apply(&self, args: Args<V>) -> Result<Step<V>, CurryError> {
        let (positional, keyword) = args.into_parts();

        // Route positional values left-to-right onto the not-yet-bound
        // positional-eligible slots; overflow goes to the catch-all channel.
        let free_slots: Vec<usize> = self
            .spec
            .positional_slots()
            .iter()
            .copied()
            .filter(|&index| self.slots[index].is_none())
            .collect();
        if positional.len() > free_slots.len() && !self.spec.has_var_positional() {
            return Err(self.bad(BadArgumentsKind::TooManyPositional));
        }
        let consumed = free_slots.len().min(positional.len());
        let target_slots = &free_slots[..consumed];

        // Route keyword values, rejecting re-bindings against the current
        // state, against this step's positional routing, and within the step.
        let mut routes: Vec<KeywordRoute<V>> = Vec::with_capacity(keyword.len());
        for (name, value) in keyword {
            let routed_in_step = routes.iter().any(|route| match route {
                KeywordRoute::Slot(index, _) => self.spec.params()[*index].name() == name,
                KeywordRoute::VarKeyword(captured, _) => *captured == name,
            });
            if routed_in_step {
                return Err(self.bad(BadArgumentsKind::Duplicate(name)));
            }

            match self.spec.param_index(&name) {
                Some(index)
                    if matches!(
                        self.spec.params()[index].kind(),
                        ParamKind::PositionalOrKeyword | ParamKind::KeywordOnly
                    ) =>
                {
                    if self.slots[index].is_some() || target_slots.contains(&index) {
                        return Err(self.bad(BadArgumentsKind::Duplicate(name)));
                    }
                    routes.push(KeywordRoute::Slot(index, value));
                }
                // Positional-only parameters and the variadic channels' own
                // names are not addressable by keyword; such names fall
                // through to the catch-all keyword channel when one exists.
                _ if self.spec.has_var_keyword() => {
                    if self.var_keyword.contains_key(&name) {
                        return Err(self.bad(BadArgumentsKind::Duplicate(name)));
                    }
                    routes.push(KeywordRoute::VarKeyword(name, value));
                }
                _ => return Err(self.bad(BadArgumentsKind::UnexpectedKeyword(name))),
            }
        }

        // Validation passed: merge into a fresh snapshot.
        let mut next = self.clone();
        let mut positional = positional.into_iter();
        for &index in target_slots {
            if let Some(value) = positional.next() {
                next.slots[index] = Some(value);
            }
        }
        for value in positional {
            next.var_positional.push(value);
            next.touched_var_positional = true;
        }
        for route in routes {
            match route {
                KeywordRoute::Slot(index, value) => next.slots[index] = Some(value),
                KeywordRoute::VarKeyword(name, value) => {
                    next.var_keyword.insert(name, value);
                    next.touched_var_keyword = true;
                }
            }
        }

        if next.ready() {
            Ok(Step::Invoke(next.assemble()))
        } else {
            Ok(Step::Continue(next))
        }
    }

    /// Forces completion once every required parameter is bound, regardless
    /// of whether the variadic channels were touched.
    ///
    /// Untouched channels are supplied empty; defaults are merged as usual.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::BadArguments`] with a missing-required kind when
    /// required parameters remain unbound.
    pub fn finalize(&self) -> Result<CallArgs<V>, CurryError> {
        if !self.satisfied() {
            return Err(self.bad(BadArgumentsKind::MissingRequired));
        }
        Ok(self.assemble())
    }

    /// Assembles the final argument list in declaration order, binding every
    /// unbound optional parameter to its declared default. A value bound
    /// explicitly anywhere in the chain is never overwritten, even when it
    /// equals the default.
    fn assemble(&self) -> CallArgs<V> {
        let resolve = |index: &usize| {
            let param = &self.spec.params()[*index];
            self.slots[*index].as_ref().map_or_else(
                || match param.default() {
                    Some(default) => default.clone(),
                    None => unreachable!("satisfied state binds every required parameter"),
                },
                Clone::clone,
            )
        };

        CallArgs {
            positional: self.spec.positional_slots().iter().map(resolve).collect(),
            var_positional: self.var_positional.clone(),
            keyword: self
                .spec
                .keyword_slots()
                .iter()
                .map(|index| (self.spec.params()[*index].name().to_string(), resolve(index)))
                .collect(),
            var_keyword: self.var_keyword.clone(),
        }
    }
}
