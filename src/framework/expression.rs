//! Typed front end for `create_mapping`.

use crate::framework::definition::{MappingDefinition, MappingOptions};
use crate::framework::error::MapperError;
use crate::framework::key::{extend, MappingKey};
use crate::framework::registry::MappingRegistry;
use crate::framework::resolver::MemberStrategy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// Fluent declaration of an `S -> D` mapping. Nothing is stored until
/// [`register`](MappingExpression::register) is called.
#[must_use = "a mapping expression does nothing until `register` is called"]
pub struct MappingExpression<'r, S, D> {
    registry: &'r mut MappingRegistry,
    options: MappingOptions,
    _types: PhantomData<fn(&S) -> D>,
}

impl<'r, S: 'static, D: 'static> MappingExpression<'r, S, D> {
    pub(crate) fn new(registry: &'r mut MappingRegistry) -> Self {
        Self {
            registry,
            options: MappingOptions::new(),
            _types: PhantomData,
        }
    }

    pub fn extends(mut self, parent: MappingKey) -> Self {
        self.options = self.options.extends(parent);
        self
    }

    /// Shorthand for `.extends(extend::<PS, PD>())`.
    pub fn extend<PS: 'static, PD: 'static>(self) -> Self {
        self.extends(extend::<PS, PD>())
    }

    pub fn for_member(mut self, member: impl Into<String>, strategy: MemberStrategy) -> Self {
        self.options = self.options.for_member(member, strategy);
        self
    }

    pub fn before_map<F>(mut self, hook: F) -> Self
    where
        S: DeserializeOwned,
        D: Serialize + DeserializeOwned,
        F: Fn(&S, &mut D) + Send + Sync + 'static,
    {
        self.options = self.options.before_map::<S, D, F>(hook);
        self
    }

    pub fn after_map<F>(mut self, hook: F) -> Self
    where
        S: DeserializeOwned,
        D: Serialize + DeserializeOwned,
        F: Fn(&S, &mut D) + Send + Sync + 'static,
    {
        self.options = self.options.after_map::<S, D, F>(hook);
        self
    }

    pub fn register(self) -> Result<Arc<MappingDefinition>, MapperError> {
        self.registry
            .create_mapping(MappingKey::of::<S, D>(), self.options)
    }
}
