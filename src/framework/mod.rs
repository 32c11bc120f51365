//! Generic object mapping engine.
//!
//! This module provides the building blocks for declaring mappings between
//! arbitrary type pairs and executing them.
//!
//! # Main Components
//!
//! - [`MappingRegistry`] - keyed store of mapping definitions; creation, lookup and execution
//! - [`MappingDefinition`] - flattened resolvers + hooks for one `(source, destination)` pair
//! - [`ExtensionLinker`] - flattens a parent mapping into a child at creation time
//! - [`PropertyResolver`] / [`MemberStrategy`] - how one destination member is produced
//! - [`engine`] - runs a definition against a source instance
//! - [`MappingProfile`] / [`MapperBuilder`] / [`Mapper`] - startup and the sealed shared handle
//! - [`MapperError`] - every failure the engine reports

pub mod config;
pub mod definition;
pub mod engine;
pub mod error;
pub mod expression;
pub mod finite;
pub mod key;
pub mod linker;
pub mod mapper;
pub mod profile;
pub mod registry;
pub mod resolver;

// Re-export core types for convenience
pub use config::{DuplicatePolicy, MapperConfig};
pub use definition::{MappingDefinition, MappingHook, MappingOptions, ResolverMap};
pub use error::{BoxError, MapperError};
pub use expression::MappingExpression;
pub use key::{extend, MappingKey, TypeKey};
pub use linker::{overlay, ExtensionLinker, LinkedMapping};
pub use mapper::{Mapper, MapperBuilder};
pub use profile::{profile_fn, FnProfile, MappingProfile, ProfileRecord, ProfileState};
pub use registry::{MappingRegistry, RegistryState};
pub use resolver::{
    from_value, ignore, map_from, map_with, MemberStrategy, PropertyResolver, ResolutionContext,
};
