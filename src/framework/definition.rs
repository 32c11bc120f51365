//! # Mapping Definitions
//!
//! A [`MappingDefinition`] is what a registry stores per [`MappingKey`]: the
//! flattened resolver set, the optional parent it was extended from, and the
//! before/after hooks. Definitions are immutable once created and shared behind
//! an `Arc`, so executing them never takes a lock.
//!
//! [`MappingOptions`] is the untyped input to
//! [`MappingRegistry::create_mapping`](crate::framework::MappingRegistry::create_mapping).

use crate::framework::error::MapperError;
use crate::framework::finite;
use crate::framework::key::MappingKey;
use crate::framework::resolver::{MemberStrategy, PropertyResolver};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Destination member name -> resolver. At most one resolver per member.
pub type ResolverMap = BTreeMap<String, PropertyResolver>;

type HookFn = dyn Fn(&Value, &mut Value, MappingKey) -> Result<(), MapperError> + Send + Sync;

/// Callback run before resolvers compute or after every member is written.
#[derive(Clone)]
pub struct MappingHook {
    origin: MappingKey,
    run: Arc<HookFn>,
}

impl MappingHook {
    /// The mapping that declared the hook.
    pub fn origin(&self) -> MappingKey {
        self.origin
    }

    pub(crate) fn call(
        &self,
        source: &Value,
        destination: &mut Value,
        key: MappingKey,
    ) -> Result<(), MapperError> {
        (self.run)(source, destination, key)
    }

    pub fn same_as(&self, other: &Self) -> bool {
        self.origin == other.origin && Arc::ptr_eq(&self.run, &other.run)
    }
}

impl fmt::Debug for MappingHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingHook")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

fn hook_fn<F>(run: F) -> Arc<HookFn>
where
    F: Fn(&Value, &mut Value, MappingKey) -> Result<(), MapperError> + Send + Sync + 'static,
{
    Arc::new(run)
}

/// Wraps a typed `Fn(&S, &mut D)` so it can run on any mapping whose source and
/// destination carry `S`'s and `D`'s fields.
///
/// The hook sees `D` rebuilt from the destination object; whatever it writes is
/// merged back member by member, so members `D` does not know about survive.
fn typed_hook<S, D, F>(hook: F) -> Arc<HookFn>
where
    S: DeserializeOwned + 'static,
    D: Serialize + DeserializeOwned + 'static,
    F: Fn(&S, &mut D) + Send + Sync + 'static,
{
    hook_fn(move |source, destination, key| {
        let conversion = |source| MapperError::Conversion { key, source };
        let typed_source = S::deserialize(source).map_err(conversion)?;
        let mut typed_destination = D::deserialize(&*destination).map_err(conversion)?;

        hook(&typed_source, &mut typed_destination);

        match finite::to_value(&typed_destination, key, None)? {
            Value::Object(updated) => {
                if let Value::Object(members) = destination {
                    members.extend(updated);
                }
            }
            other => *destination = other,
        }
        Ok(())
    })
}

/// Configuration for one `create_mapping` call.
///
/// Members registered later win over earlier registrations of the same name.
#[derive(Default, Clone)]
pub struct MappingOptions {
    pub(crate) extends: Option<MappingKey>,
    pub(crate) members: Vec<(String, MemberStrategy)>,
    pub(crate) before_map: Option<Arc<HookFn>>,
    pub(crate) after_map: Option<Arc<HookFn>>,
}

impl MappingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inherit every resolver (and hook) of a previously created mapping.
    pub fn extends(mut self, parent: MappingKey) -> Self {
        self.extends = Some(parent);
        self
    }

    pub fn for_member(mut self, member: impl Into<String>, strategy: MemberStrategy) -> Self {
        self.members.push((member.into(), strategy));
        self
    }

    pub fn before_map<S, D, F>(mut self, hook: F) -> Self
    where
        S: DeserializeOwned + 'static,
        D: Serialize + DeserializeOwned + 'static,
        F: Fn(&S, &mut D) + Send + Sync + 'static,
    {
        self.before_map = Some(typed_hook(hook));
        self
    }

    pub fn after_map<S, D, F>(mut self, hook: F) -> Self
    where
        S: DeserializeOwned + 'static,
        D: Serialize + DeserializeOwned + 'static,
        F: Fn(&S, &mut D) + Send + Sync + 'static,
    {
        self.after_map = Some(typed_hook(hook));
        self
    }

    pub fn parent(&self) -> Option<MappingKey> {
        self.extends
    }

    /// Stamps every declared member with `origin`, last declaration winning.
    pub(crate) fn own_resolvers(&self, origin: MappingKey) -> ResolverMap {
        let mut resolvers = ResolverMap::new();
        for (member, strategy) in &self.members {
            resolvers.insert(
                member.clone(),
                PropertyResolver::new(member.clone(), origin, strategy.clone()),
            );
        }
        resolvers
    }

    pub(crate) fn own_hooks(&self, origin: MappingKey) -> (Option<MappingHook>, Option<MappingHook>) {
        let stamp = |run: &Arc<HookFn>| MappingHook {
            origin,
            run: Arc::clone(run),
        };
        (self.before_map.as_ref().map(stamp), self.after_map.as_ref().map(stamp))
    }
}

impl fmt::Debug for MappingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingOptions")
            .field("extends", &self.extends)
            .field(
                "members",
                &self.members.iter().map(|(m, _)| m.as_str()).collect::<Vec<_>>(),
            )
            .field("before_map", &self.before_map.is_some())
            .field("after_map", &self.after_map.is_some())
            .finish()
    }
}

/// A registered mapping, already flattened against its ancestors.
#[derive(Debug)]
pub struct MappingDefinition {
    key: MappingKey,
    parent: Option<MappingKey>,
    own: ResolverMap,
    resolvers: ResolverMap,
    before_map: Option<MappingHook>,
    after_map: Option<MappingHook>,
}

impl MappingDefinition {
    pub(crate) fn new(
        key: MappingKey,
        parent: Option<MappingKey>,
        own: ResolverMap,
        resolvers: ResolverMap,
        before_map: Option<MappingHook>,
        after_map: Option<MappingHook>,
    ) -> Self {
        Self {
            key,
            parent,
            own,
            resolvers,
            before_map,
            after_map,
        }
    }

    pub fn key(&self) -> MappingKey {
        self.key
    }

    /// The mapping this one was extended from, if any.
    pub fn parent(&self) -> Option<MappingKey> {
        self.parent
    }

    /// Resolvers declared on this mapping itself.
    pub fn own_resolvers(&self) -> &ResolverMap {
        &self.own
    }

    /// Every resolver the engine runs, inherited ones included.
    pub fn resolvers(&self) -> &ResolverMap {
        &self.resolvers
    }

    pub fn resolver(&self, member: &str) -> Option<&PropertyResolver> {
        self.resolvers.get(member)
    }

    pub fn before_map(&self) -> Option<&MappingHook> {
        self.before_map.as_ref()
    }

    pub fn after_map(&self) -> Option<&MappingHook> {
        self.after_map.as_ref()
    }
}
