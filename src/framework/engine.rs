//! # Execution Engine
//!
//! Runs a [`MappingDefinition`] against a concrete source instance.
//!
//! Execution happens in two phases so that no resolver ever observes a
//! partially built destination:
//!
//! 1. **Resolve**: every resolver (and convention match) computes its value from
//!    the serialized source only.
//! 2. **Write**: the collected values are written into the destination object.
//!
//! The `before_map` hook runs before phase 1 and `after_map` after phase 2. The
//! source is only ever borrowed.

use crate::framework::definition::MappingDefinition;
use crate::framework::error::MapperError;
use crate::framework::finite;
use crate::framework::registry::MappingRegistry;
use crate::framework::resolver::ResolutionContext;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Maps `source` into a freshly allocated `D::default()`.
pub fn execute<S, D>(
    registry: &MappingRegistry,
    definition: &MappingDefinition,
    source: &S,
) -> Result<D, MapperError>
where
    S: Serialize + ?Sized,
    D: Serialize + DeserializeOwned + Default,
{
    let mut destination = D::default();
    execute_into(registry, definition, source, &mut destination)?;
    Ok(destination)
}

/// Maps `source` into an existing destination. Members that receive no value
/// keep what they had.
///
/// The destination round-trips through its serialized form, so fields serde
/// never sees (`#[serde(skip)]`) are not members: they come back as their
/// `Default` value, not as what the pre-allocated destination held.
pub fn execute_into<S, D>(
    registry: &MappingRegistry,
    definition: &MappingDefinition,
    source: &S,
    destination: &mut D,
) -> Result<(), MapperError>
where
    S: Serialize + ?Sized,
    D: Serialize + DeserializeOwned,
{
    let key = definition.key();
    let mut value = finite::to_value(&*destination, key, None)?;
    if !value.is_object() {
        return Err(MapperError::NotAnObject {
            type_name: std::any::type_name::<D>(),
        });
    }

    let source = finite::to_value(source, key, None)?;
    populate(registry, definition, &source, &mut value)?;

    *destination =
        D::deserialize(value).map_err(|source| MapperError::Conversion { key, source })?;
    Ok(())
}

fn populate(
    registry: &MappingRegistry,
    definition: &MappingDefinition,
    source: &Value,
    destination: &mut Value,
) -> Result<(), MapperError> {
    let key = definition.key();

    if let Some(hook) = definition.before_map() {
        hook.call(source, destination, key)?;
    }

    let writes = match destination.as_object() {
        Some(members) => resolve_members(registry, definition, source, members)?,
        None => Vec::new(),
    };
    let written = writes.len();

    if let Value::Object(members) = destination {
        members.extend(writes);
    }

    if let Some(hook) = definition.after_map() {
        hook.call(source, destination, key)?;
    }

    debug!(mapping = %key, written, "Mapped");
    Ok(())
}

/// Phase 1: compute every value from the source alone.
fn resolve_members(
    registry: &MappingRegistry,
    definition: &MappingDefinition,
    source: &Value,
    destination: &Map<String, Value>,
) -> Result<Vec<(String, Value)>, MapperError> {
    let key = definition.key();
    let mut writes = Vec::with_capacity(destination.len());

    for (member, resolver) in definition.resolvers() {
        let ctx = ResolutionContext::new(key, member, source, registry);
        if let Some(value) = resolver.resolve(&ctx)? {
            writes.push((member.clone(), value));
        }
    }

    if registry.config().convention_mapping {
        // A destination member serialized conditionally (`skip_serializing_if`)
        // may be missing from the object, so source member names are
        // candidates too. Names the destination type doesn't have are dropped
        // when it is deserialized, unless it uses `deny_unknown_fields`.
        let source_only = source
            .as_object()
            .into_iter()
            .flat_map(|members| members.keys())
            .filter(|member| !destination.contains_key(member.as_str()));

        let mut unmapped = Vec::new();
        for member in destination.keys().chain(source_only) {
            if definition.resolver(member).is_some() {
                continue;
            }
            match source.get(member) {
                Some(value) => writes.push((member.clone(), value.clone())),
                None => unmapped.push(member.as_str()),
            }
        }
        if !unmapped.is_empty() {
            debug!(mapping = %key, ?unmapped, "Destination members left at their current value");
        }
    }

    Ok(writes)
}
