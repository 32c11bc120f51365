//! # Property Resolvers
//!
//! A [`PropertyResolver`] pairs a destination member name with a [`MemberStrategy`]
//! describing how that member is produced from the source instance.
//!
//! Strategies are built with the free functions in this module:
//!
//! - [`map_from`] - pure function of the source
//! - [`map_with`] - fallible function of the source with access to the registry
//!   (nested mappings)
//! - [`from_value`] - constant
//! - [`ignore`] - never written, suppresses convention mapping for the member
//!
//! and refined with [`MemberStrategy::when`] and [`MemberStrategy::null_substitute`].
//!
//! Typed strategies deserialize the source view into their own declared source
//! type. A resolver declared on `Foo` therefore keeps working when an extending
//! mapping runs it against a `FooExtend` that carries the same fields plus more.

use crate::framework::error::{BoxError, MapperError};
use crate::framework::finite;
use crate::framework::key::MappingKey;
use crate::framework::registry::MappingRegistry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type ResolveFn = dyn Fn(&ResolutionContext<'_>) -> Result<Value, MapperError> + Send + Sync;
type PredicateFn = dyn Fn(&ResolutionContext<'_>) -> Result<bool, MapperError> + Send + Sync;

/// Read-only view handed to every resolver during execution.
///
/// Resolvers only ever see the original source; sibling destination members are
/// not visible.
pub struct ResolutionContext<'a> {
    key: MappingKey,
    member: &'a str,
    source: &'a Value,
    registry: &'a MappingRegistry,
}

impl<'a> ResolutionContext<'a> {
    pub(crate) fn new(
        key: MappingKey,
        member: &'a str,
        source: &'a Value,
        registry: &'a MappingRegistry,
    ) -> Self {
        Self {
            key,
            member,
            source,
            registry,
        }
    }

    /// The mapping currently executing (not the one that declared the resolver).
    pub fn key(&self) -> MappingKey {
        self.key
    }

    pub fn member(&self) -> &str {
        self.member
    }

    /// The serialized source instance.
    pub fn source(&self) -> &'a Value {
        self.source
    }

    pub fn registry(&self) -> &'a MappingRegistry {
        self.registry
    }

    /// Deserializes the source view into `S`.
    pub fn source_as<S: DeserializeOwned>(&self) -> Result<S, MapperError> {
        S::deserialize(self.source).map_err(|source| MapperError::Conversion {
            key: self.key,
            source,
        })
    }
}

#[derive(Clone)]
enum ResolverKind {
    Compute(Arc<ResolveFn>),
    Constant(Value),
    Ignore,
}

fn compute<F>(resolve: F) -> ResolverKind
where
    F: Fn(&ResolutionContext<'_>) -> Result<Value, MapperError> + Send + Sync + 'static,
{
    ResolverKind::Compute(Arc::new(resolve))
}

fn predicate<F>(check: F) -> Arc<PredicateFn>
where
    F: Fn(&ResolutionContext<'_>) -> Result<bool, MapperError> + Send + Sync + 'static,
{
    Arc::new(check)
}

/// How a single destination member is produced.
#[derive(Clone)]
pub struct MemberStrategy {
    kind: ResolverKind,
    condition: Option<Arc<PredicateFn>>,
    null_substitution: Option<Value>,
}

impl MemberStrategy {
    fn new(kind: ResolverKind) -> Self {
        Self {
            kind,
            condition: None,
            null_substitution: None,
        }
    }

    /// Only write the member when `check` holds for the source.
    ///
    /// When it does not, the member keeps its default (or pre-allocated) value.
    pub fn when<S, P>(mut self, check: P) -> Self
    where
        S: DeserializeOwned + 'static,
        P: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(predicate(move |ctx| {
            let source: S = ctx.source_as()?;
            Ok(check(&source))
        }));
        self
    }

    /// Write `value` instead of a resolved `null`.
    pub fn null_substitute(mut self, value: impl Into<Value>) -> Self {
        self.null_substitution = Some(value.into());
        self
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self.kind, ResolverKind::Ignore)
    }

    /// `Ok(None)` means "leave the member alone".
    pub(crate) fn resolve(&self, ctx: &ResolutionContext<'_>) -> Result<Option<Value>, MapperError> {
        if let Some(condition) = &self.condition {
            if !condition(ctx)? {
                return Ok(None);
            }
        }

        let value = match &self.kind {
            ResolverKind::Compute(resolve) => resolve(ctx)?,
            ResolverKind::Constant(value) => value.clone(),
            ResolverKind::Ignore => return Ok(None),
        };

        match (&value, &self.null_substitution) {
            (Value::Null, Some(substitute)) => Ok(Some(substitute.clone())),
            _ => Ok(Some(value)),
        }
    }

    fn same_as(&self, other: &Self) -> bool {
        let kind = match (&self.kind, &other.kind) {
            (ResolverKind::Compute(a), ResolverKind::Compute(b)) => Arc::ptr_eq(a, b),
            (ResolverKind::Constant(a), ResolverKind::Constant(b)) => a == b,
            (ResolverKind::Ignore, ResolverKind::Ignore) => true,
            _ => false,
        };
        let condition = match (&self.condition, &other.condition) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        kind && condition && self.null_substitution == other.null_substitution
    }
}

impl fmt::Debug for MemberStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            ResolverKind::Compute(_) => "compute".to_string(),
            ResolverKind::Constant(value) => format!("constant({value})"),
            ResolverKind::Ignore => "ignore".to_string(),
        };
        f.debug_struct("MemberStrategy")
            .field("kind", &kind)
            .field("conditional", &self.condition.is_some())
            .field("null_substitution", &self.null_substitution)
            .finish()
    }
}

/// Computes a member from the source with a pure function.
///
/// ```
/// use automapper_recipe::framework::map_from;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User { first: String, last: String }
///
/// let _full_name = map_from(|u: &User| format!("{} {}", u.first, u.last));
/// ```
pub fn map_from<S, T, F>(resolve: F) -> MemberStrategy
where
    S: DeserializeOwned + 'static,
    T: Serialize,
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    MemberStrategy::new(compute(move |ctx| {
        let source: S = ctx.source_as()?;
        finite::to_value(&resolve(&source), ctx.key(), Some(ctx.member()))
    }))
}

/// Computes a member with a fallible function that can call back into the registry.
///
/// This is how nested objects are mapped:
///
/// ```ignore
/// map_with(|order: &Order, registry: &MappingRegistry| {
///     Ok(registry.map::<Customer, CustomerDto>(&order.customer)?)
/// })
/// ```
pub fn map_with<S, T, F>(resolve: F) -> MemberStrategy
where
    S: DeserializeOwned + 'static,
    T: Serialize,
    F: Fn(&S, &MappingRegistry) -> Result<T, BoxError> + Send + Sync + 'static,
{
    MemberStrategy::new(compute(move |ctx| {
        let source: S = ctx.source_as()?;
        let value = resolve(&source, ctx.registry()).map_err(|source| MapperError::Resolver {
            key: ctx.key(),
            member: ctx.member().to_string(),
            source,
        })?;
        finite::to_value(&value, ctx.key(), Some(ctx.member()))
    }))
}

/// Always writes `value`.
pub fn from_value(value: impl Into<Value>) -> MemberStrategy {
    MemberStrategy::new(ResolverKind::Constant(value.into()))
}

/// Never writes the member, not even by convention.
pub fn ignore() -> MemberStrategy {
    MemberStrategy::new(ResolverKind::Ignore)
}

/// A destination member name bound to a strategy, stamped with the mapping
/// that declared it.
#[derive(Debug, Clone)]
pub struct PropertyResolver {
    member: String,
    origin: MappingKey,
    strategy: MemberStrategy,
}

impl PropertyResolver {
    pub(crate) fn new(member: impl Into<String>, origin: MappingKey, strategy: MemberStrategy) -> Self {
        Self {
            member: member.into(),
            origin,
            strategy,
        }
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    /// The mapping whose configuration declared this resolver. For inherited
    /// resolvers this is the ancestor, not the mapping executing it.
    pub fn origin(&self) -> MappingKey {
        self.origin
    }

    pub fn strategy(&self) -> &MemberStrategy {
        &self.strategy
    }

    pub(crate) fn resolve(&self, ctx: &ResolutionContext<'_>) -> Result<Option<Value>, MapperError> {
        self.strategy.resolve(ctx)
    }
}

/// Two resolvers are equal when they are the same declaration: same member,
/// same origin, and the same underlying function.
impl PartialEq for PropertyResolver {
    fn eq(&self, other: &Self) -> bool {
        self.member == other.member
            && self.origin == other.origin
            && self.strategy.same_as(&other.strategy)
    }
}
