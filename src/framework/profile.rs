//! # Mapping Profiles
//!
//! A profile is a unit of mapping configuration. The host hands every profile
//! a `&mut MappingRegistry` exactly once during startup; after that the profile
//! has no further role.
//!
//! ```text
//! Created --configure()--> Invoked --registry sealed--> Sealed
//! ```

use crate::framework::error::MapperError;
use crate::framework::key::short_type_name;
use crate::framework::registry::MappingRegistry;

pub trait MappingProfile: Send {
    /// Name used in logs and for duplicate detection. Defaults to the type name
    /// without its module path; generic arguments are kept.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Declares this profile's mappings. Called once, in registration order.
    fn configure(&self, registry: &mut MappingRegistry) -> Result<(), MapperError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState {
    Created,
    Invoked,
    Sealed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub name: String,
    pub state: ProfileState,
}

/// A profile backed by a closure, for hosts that don't want a dedicated type.
pub struct FnProfile<F> {
    name: String,
    configure: F,
}

pub fn profile_fn<F>(name: impl Into<String>, configure: F) -> FnProfile<F>
where
    F: Fn(&mut MappingRegistry) -> Result<(), MapperError> + Send,
{
    FnProfile {
        name: name.into(),
        configure,
    }
}

impl<F> MappingProfile for FnProfile<F>
where
    F: Fn(&mut MappingRegistry) -> Result<(), MapperError> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&self, registry: &mut MappingRegistry) -> Result<(), MapperError> {
        (self.configure)(registry)
    }
}
