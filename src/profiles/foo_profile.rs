use crate::framework::{map_from, MapperError, MappingProfile, MappingRegistry};
use crate::model::{Foo, FooDto};

/// Registers `Foo -> FooDto`.
pub struct FooProfile;

impl MappingProfile for FooProfile {
    fn configure(&self, registry: &mut MappingRegistry) -> Result<(), MapperError> {
        registry
            .create_map::<Foo, FooDto>()
            .for_member("name", map_from(|foo: &Foo| foo.name.clone()))
            .register()?;
        Ok(())
    }
}
