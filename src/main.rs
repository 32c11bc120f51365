use automapper_recipe::framework::MapperError;
use automapper_recipe::lifecycle::{setup_tracing, MapperSystem};
use automapper_recipe::model::{Foo, FooDto, FooExtend, FooExtendDto};
use tracing::{info, warn};

fn main() -> Result<(), MapperError> {
    setup_tracing();

    let system = MapperSystem::from_env()?;

    let foo = Foo::new("plain");
    let dto: FooDto = system.mapper.map(&foo)?;
    info!(?foo, ?dto, "Mapped Foo");

    let extended = FooExtend::new("a", 1);
    let dto: FooExtendDto = system.mapper.map(&extended)?;
    info!(?extended, ?dto, "Mapped FooExtend");

    // Only the forward direction is registered.
    if let Err(e) = system.mapper.map::<FooDto, Foo>(&FooDto { name: "reverse".into() }) {
        warn!(error = %e, "Reverse mapping unavailable");
    }

    Ok(())
}

