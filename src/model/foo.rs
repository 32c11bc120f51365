use serde::{Deserialize, Serialize};

/// Base source type.
///
/// # Mapping
/// Mapped to [`FooDto`] by [`FooProfile`](crate::profiles::FooProfile).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Foo {
    pub name: String,
}

/// Destination for [`Foo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooDto {
    pub name: String,
}

impl Foo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
