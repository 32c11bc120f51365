//! # Mapper Registry
//!
//! The [`MappingRegistry`] owns every [`MappingDefinition`], keyed by
//! [`MappingKey`]. It has two phases:
//!
//! - **Open**: profiles call [`create_mapping`](MappingRegistry::create_mapping)
//!   (or the typed [`create_map`](MappingRegistry::create_map)) one at a time
//!   through `&mut self`.
//! - **Sealed**: after [`seal`](MappingRegistry::seal) no mapping can be
//!   created; the registry is read-only and is shared through
//!   [`Mapper`](crate::framework::Mapper).
//!
//! Lookups and `map` calls only need `&self`, so the borrow checker already
//! keeps registration and execution apart.

use crate::framework::config::{DuplicatePolicy, MapperConfig};
use crate::framework::definition::{MappingDefinition, MappingOptions};
use crate::framework::engine;
use crate::framework::error::MapperError;
use crate::framework::expression::MappingExpression;
use crate::framework::key::MappingKey;
use crate::framework::linker::ExtensionLinker;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Open,
    Sealed,
}

pub struct MappingRegistry {
    config: MapperConfig,
    definitions: HashMap<MappingKey, Arc<MappingDefinition>>,
    state: RegistryState,
}

impl MappingRegistry {
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            definitions: HashMap::new(),
            state: RegistryState::Open,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn is_sealed(&self) -> bool {
        self.state == RegistryState::Sealed
    }

    /// Closes the registry for registration. Sealing twice is a no-op.
    pub fn seal(&mut self) {
        if self.state == RegistryState::Open {
            self.state = RegistryState::Sealed;
            info!(mappings = self.definitions.len(), "Registry sealed");
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = MappingKey> + '_ {
        self.definitions.keys().copied()
    }

    /// Registers a mapping for `key`.
    ///
    /// Fails with:
    /// - `RegistrySealed` once the registry is sealed
    /// - `DuplicateMapping` if `key` exists and the policy is `Reject`
    /// - `CyclicExtension` if `extends` leads back to `key`
    /// - `UnknownParentMapping` if `extends` names an unregistered mapping
    ///
    /// A failed call leaves the registry exactly as it was.
    pub fn create_mapping(
        &mut self,
        key: MappingKey,
        options: MappingOptions,
    ) -> Result<Arc<MappingDefinition>, MapperError> {
        if self.is_sealed() {
            warn!(mapping = %key, "Create rejected, registry sealed");
            return Err(MapperError::RegistrySealed { key });
        }

        let exists = self.definitions.contains_key(&key);
        if exists && self.config.duplicate_policy == DuplicatePolicy::Reject {
            warn!(mapping = %key, "Create rejected, already registered");
            return Err(MapperError::DuplicateMapping { key });
        }

        let parent = options.parent();
        let own = options.own_resolvers(key);
        let (before_map, after_map) = options.own_hooks(key);
        let linked = ExtensionLinker::new(&self.definitions)
            .link(key, parent, &own, before_map, after_map)
            .inspect_err(|e| warn!(mapping = %key, error = %e, "Create rejected"))?;

        let definition = Arc::new(MappingDefinition::new(
            key,
            parent,
            own,
            linked.resolvers,
            linked.before_map,
            linked.after_map,
        ));
        self.definitions.insert(key, Arc::clone(&definition));

        info!(
            mapping = %key,
            extends = ?parent.map(|p| p.to_string()),
            members = definition.resolvers().len(),
            replaced = exists,
            "Mapping created"
        );
        Ok(definition)
    }

    /// Starts a typed mapping declaration for `S -> D`.
    ///
    /// ```
    /// use automapper_recipe::framework::{map_from, MapperConfig, MappingRegistry};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize, Deserialize)]
    /// struct User { first: String, last: String }
    ///
    /// #[derive(Default, Serialize, Deserialize)]
    /// struct UserDto { full_name: String }
    ///
    /// let mut registry = MappingRegistry::new(MapperConfig::default());
    /// registry
    ///     .create_map::<User, UserDto>()
    ///     .for_member("full_name", map_from(|u: &User| format!("{} {}", u.first, u.last)))
    ///     .register()
    ///     .unwrap();
    ///
    /// let dto: UserDto = registry
    ///     .map(&User { first: "Ada".into(), last: "Lovelace".into() })
    ///     .unwrap();
    /// assert_eq!(dto.full_name, "Ada Lovelace");
    /// ```
    pub fn create_map<S: 'static, D: 'static>(&mut self) -> MappingExpression<'_, S, D> {
        MappingExpression::new(self)
    }

    pub fn get_mapping(&self, key: MappingKey) -> Option<&Arc<MappingDefinition>> {
        self.definitions.get(&key)
    }

    pub fn mapping<S: 'static, D: 'static>(&self) -> Option<&Arc<MappingDefinition>> {
        self.get_mapping(MappingKey::of::<S, D>())
    }

    fn lookup(&self, key: MappingKey) -> Result<&MappingDefinition, MapperError> {
        match self.definitions.get(&key) {
            Some(definition) => Ok(definition.as_ref()),
            None => {
                warn!(mapping = %key, "No mapping registered");
                Err(MapperError::MappingNotFound {
                    source_type: key.source,
                    destination_type: key.destination,
                })
            }
        }
    }

    pub fn map<S, D>(&self, source: &S) -> Result<D, MapperError>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + Default + 'static,
    {
        let key = MappingKey::of::<S, D>();
        let definition = self.lookup(key)?;
        engine::execute(self, definition, source)
            .inspect_err(|e| warn!(mapping = %key, error = %e, "Map failed"))
    }

    /// Maps into a pre-allocated destination; see [`engine::execute_into`] for
    /// what survives. Fields serde skips are reset to their `Default`.
    pub fn map_into<S, D>(&self, source: &S, destination: &mut D) -> Result<(), MapperError>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + 'static,
    {
        let key = MappingKey::of::<S, D>();
        let definition = self.lookup(key)?;
        engine::execute_into(self, definition, source, destination)
            .inspect_err(|e| warn!(mapping = %key, error = %e, "Map failed"))
    }

    /// Maps every element, stopping at the first failure.
    pub fn map_many<S, D>(&self, sources: &[S]) -> Result<Vec<D>, MapperError>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + Default + 'static,
    {
        let key = MappingKey::of::<S, D>();
        let definition = self.lookup(key)?;
        debug!(mapping = %key, count = sources.len(), "Map many");
        sources
            .iter()
            .map(|source| engine::execute(self, definition, source))
            .collect::<Result<Vec<D>, _>>()
            .inspect_err(|e| warn!(mapping = %key, error = %e, "Map failed"))
    }
}

impl std::fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingRegistry")
            .field("state", &self.state)
            .field("config", &self.config)
            .field(
                "mappings",
                &self.definitions.keys().map(|k| k.to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
