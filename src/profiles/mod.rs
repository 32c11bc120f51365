//! Mapping profiles for the [`model`](crate::model) types.

pub mod foo_extend_profile;
pub mod foo_profile;

pub use foo_extend_profile::FooExtendProfile;
pub use foo_profile::FooProfile;
