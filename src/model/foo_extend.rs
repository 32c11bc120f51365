use serde::{Deserialize, Serialize};

/// A [`Foo`](crate::model::Foo) with one extra field.
///
/// # Mapping
/// Mapped to [`FooExtendDto`] by
/// [`FooExtendProfile`](crate::profiles::FooExtendProfile), which reuses the
/// `Foo -> FooDto` mapping for `name` and only declares `extra` itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooExtend {
    pub name: String,
    pub extra: i64,
}

/// Destination for [`FooExtend`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooExtendDto {
    pub name: String,
    pub extra: i64,
}

impl FooExtend {
    pub fn new(name: impl Into<String>, extra: i64) -> Self {
        Self {
            name: name.into(),
            extra,
        }
    }
}
