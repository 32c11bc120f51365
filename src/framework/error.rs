//! # Framework Errors
//!
//! This module defines the common error type used throughout the mapping engine.
//! By centralizing error definitions, registration and execution failures are
//! reported the same way no matter which profile or mapping raised them.
//!
//! Registration-time errors (`DuplicateMapping`, `UnknownParentMapping`,
//! `CyclicExtension`, `RegistrySealed`, `DuplicateProfile`) abort startup.
//! Execution-time errors are returned to the immediate caller of `map`.

use crate::framework::key::{MappingKey, TypeKey};

/// Boxed error raised by a user-supplied resolver or hook.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur within the mapping engine.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("Mapping already registered: {key}")]
    DuplicateMapping { key: MappingKey },

    #[error("Mapping {child} extends {parent}, which is not registered")]
    UnknownParentMapping { child: MappingKey, parent: MappingKey },

    #[error("Cyclic extension: {}", format_chain(.chain))]
    CyclicExtension { chain: Vec<MappingKey> },

    #[error("No mapping registered for {source_type} -> {destination_type}")]
    MappingNotFound {
        source_type: TypeKey,
        destination_type: TypeKey,
    },

    #[error("Registry is sealed, cannot create mapping {key}")]
    RegistrySealed { key: MappingKey },

    #[error("Profile registered twice: {profile}")]
    DuplicateProfile { profile: String },

    #[error("{type_name} does not serialize to an object with named fields")]
    NotAnObject { type_name: &'static str },

    #[error("Cannot map {key}: non-finite float at `{path}` has no JSON representation")]
    NonFiniteFloat { key: MappingKey, path: String },

    #[error("Conversion failed while mapping {key}: {source}")]
    Conversion {
        key: MappingKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Resolver for member `{member}` of {key} failed: {source}")]
    Resolver {
        key: MappingKey,
        member: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

fn format_chain(chain: &[MappingKey]) -> String {
    chain
        .iter()
        .map(|key| format!("({key})"))
        .collect::<Vec<_>>()
        .join(" extends ")
}
