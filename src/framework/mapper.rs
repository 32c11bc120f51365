//! # Sealed Mapper Handle
//!
//! [`MapperBuilder`] is the startup routine: it owns the registry while every
//! profile runs, then seals it and hands out a [`Mapper`]. The `Mapper` is the
//! shared handle application code keeps. Cloning it is cheap and it is
//! `Send + Sync`, so concurrent `map` calls need no locking.

use crate::framework::config::MapperConfig;
use crate::framework::definition::MappingDefinition;
use crate::framework::error::MapperError;
use crate::framework::key::MappingKey;
use crate::framework::profile::{MappingProfile, ProfileRecord, ProfileState};
use crate::framework::registry::MappingRegistry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info_span};

#[derive(Default)]
pub struct MapperBuilder {
    config: MapperConfig,
    profiles: Vec<Box<dyn MappingProfile>>,
}

impl MapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Profiles run in the order they are added; a profile that extends another
    /// profile's mapping must come after it.
    pub fn add_profile(mut self, profile: impl MappingProfile + 'static) -> Self {
        self.profiles.push(Box::new(profile));
        self
    }

    /// Invokes every profile once, then seals the registry.
    ///
    /// Any profile error aborts the build; no partially populated mapper is
    /// ever returned.
    pub fn build(self) -> Result<Mapper, MapperError> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(self.profiles.len());
        for profile in &self.profiles {
            let name = profile.name().to_string();
            if !seen.insert(name.clone()) {
                error!(profile = %name, "Profile registered twice");
                return Err(MapperError::DuplicateProfile { profile: name });
            }
            records.push(ProfileRecord {
                name,
                state: ProfileState::Created,
            });
        }

        let mut registry = MappingRegistry::new(self.config);
        for (profile, record) in self.profiles.iter().zip(records.iter_mut()) {
            let span = info_span!("profile", profile = %record.name);
            let _enter = span.enter();

            profile
                .configure(&mut registry)
                .inspect_err(|e| error!(error = %e, "Profile failed"))?;
            record.state = ProfileState::Invoked;
            debug!(mappings = registry.len(), "Profile invoked");
        }

        registry.seal();
        for record in &mut records {
            record.state = ProfileState::Sealed;
        }

        Ok(Mapper {
            registry: Arc::new(registry),
            profiles: records.into(),
        })
    }
}

/// Shared, read-only handle to a sealed registry.
#[derive(Clone, Debug)]
pub struct Mapper {
    registry: Arc<MappingRegistry>,
    profiles: Arc<[ProfileRecord]>,
}

impl Mapper {
    pub fn builder() -> MapperBuilder {
        MapperBuilder::new()
    }

    /// Seals a registry the host populated by hand.
    pub fn from_registry(mut registry: MappingRegistry) -> Self {
        registry.seal();
        Self {
            registry: Arc::new(registry),
            profiles: Arc::from(Vec::new()),
        }
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn profiles(&self) -> &[ProfileRecord] {
        &self.profiles
    }

    pub fn get_mapping(&self, key: MappingKey) -> Option<&Arc<MappingDefinition>> {
        self.registry.get_mapping(key)
    }

    pub fn map<S, D>(&self, source: &S) -> Result<D, MapperError>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + Default + 'static,
    {
        self.registry.map(source)
    }

    pub fn map_into<S, D>(&self, source: &S, destination: &mut D) -> Result<(), MapperError>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + 'static,
    {
        self.registry.map_into(source, destination)
    }

    pub fn map_many<S, D>(&self, sources: &[S]) -> Result<Vec<D>, MapperError>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + Default + 'static,
    {
        self.registry.map_many(sources)
    }
}
