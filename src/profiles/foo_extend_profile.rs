use crate::framework::{map_from, MapperError, MappingProfile, MappingRegistry};
use crate::model::{Foo, FooDto, FooExtend, FooExtendDto};

/// Registers `FooExtend -> FooExtendDto` on top of `Foo -> FooDto`.
///
/// Must run after [`FooProfile`](super::FooProfile).
pub struct FooExtendProfile;

impl MappingProfile for FooExtendProfile {
    fn configure(&self, registry: &mut MappingRegistry) -> Result<(), MapperError> {
        registry
            .create_map::<FooExtend, FooExtendDto>()
            .extend::<Foo, FooDto>()
            .for_member("extra", map_from(|foo: &FooExtend| foo.extra))
            .register()?;
        Ok(())
    }
}
