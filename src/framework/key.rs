//! # Type Identity
//!
//! Mappings are keyed by the *declared* identity of their source and destination
//! types, never by their structural shape. Two structs with identical fields are
//! still two different [`TypeKey`]s.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable, comparable identifier for a Rust type.
///
/// Equality and hashing go through [`TypeId`] only; the name is carried for
/// log lines and error messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name, e.g. `automapper_recipe::model::foo::Foo`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without the module path (e.g. "Foo" instead of "automapper_recipe::model::foo::Foo").
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }
}

/// Strips the module path from a `std::any::type_name` result.
///
/// Generic parameters carry their own paths, so only the prefix before the
/// first `<` is stripped: `a::Wrap<b::X>` becomes `Wrap<b::X>`.
pub(crate) fn short_type_name(name: &str) -> &str {
    let head = name.split('<').next().unwrap_or(name);
    match head.rfind("::") {
        Some(idx) => &name[idx + 2..],
        None => name,
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Ordered `(source, destination)` pair identifying one mapping in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingKey {
    pub source: TypeKey,
    pub destination: TypeKey,
}

impl MappingKey {
    pub fn new(source: TypeKey, destination: TypeKey) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn of<S: ?Sized + 'static, D: ?Sized + 'static>() -> Self {
        Self::new(TypeKey::of::<S>(), TypeKey::of::<D>())
    }
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Names a previously created mapping as the parent of a new one.
///
/// ```
/// use automapper_recipe::framework::{extend, MappingKey};
///
/// struct Foo;
/// struct FooDto;
///
/// assert_eq!(extend::<Foo, FooDto>(), MappingKey::of::<Foo, FooDto>());
/// ```
pub fn extend<S: ?Sized + 'static, D: ?Sized + 'static>() -> MappingKey {
    MappingKey::of::<S, D>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Left {
        _value: u32,
    }

    struct Right {
        _value: u32,
    }

    #[test]
    fn same_shape_different_types_are_distinct() {
        assert_ne!(TypeKey::of::<Left>(), TypeKey::of::<Right>());
        assert_eq!(TypeKey::of::<Left>(), TypeKey::of::<Left>());
    }

    #[test]
    fn mapping_key_is_ordered() {
        let forward = MappingKey::of::<Left, Right>();
        let backward = MappingKey::of::<Right, Left>();
        assert_ne!(forward, backward);

        let keys: HashSet<_> = [forward, backward, MappingKey::of::<Left, Right>()]
            .into_iter()
            .collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn display_uses_short_names() {
        assert_eq!(MappingKey::of::<Left, Right>().to_string(), "Left -> Right");
        assert!(TypeKey::of::<Vec<Left>>().short_name().starts_with("Vec<"));
    }

    #[test]
    fn short_name_keeps_generic_arguments() {
        assert_eq!(short_type_name("a::b::Wrap<c::X>"), "Wrap<c::X>");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_ne!(
            short_type_name("p::Wrap<a::X>"),
            short_type_name("p::Wrap<b::X>")
        );
    }
}
