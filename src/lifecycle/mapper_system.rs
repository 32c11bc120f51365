use crate::framework::{Mapper, MapperBuilder, MapperConfig, MapperError};
use crate::profiles::{FooExtendProfile, FooProfile};
use tracing::info;

/// The application's initialization routine for the mapping engine.
///
/// `MapperSystem` is responsible for:
/// - **Profile Registration**: Handing every profile the registry exactly once
/// - **Ordering**: Registering parents before the profiles that extend them
/// - **Sealing**: Producing the read-only [`Mapper`] the rest of the app shares
///
/// # Example
///
/// ```ignore
/// let system = MapperSystem::new()?;
///
/// let dto: FooExtendDto = system.mapper.map(&FooExtend::new("a", 1))?;
/// ```
pub struct MapperSystem {
    /// Sealed, cloneable handle used for every `map` call
    pub mapper: Mapper,
}

impl MapperSystem {
    /// Builds the system with the default configuration.
    pub fn new() -> Result<Self, MapperError> {
        Self::with_config(MapperConfig::default())
    }

    /// Builds the system with configuration read from `MAPPER_*` variables.
    pub fn from_env() -> Result<Self, MapperError> {
        Self::with_config(MapperConfig::from_env()?)
    }

    /// Registers all profiles and seals the registry.
    ///
    /// # Errors
    ///
    /// Any registration error is fatal: the system is not created.
    pub fn with_config(config: MapperConfig) -> Result<Self, MapperError> {
        info!(?config, "Starting mapper system");

        // `FooExtendProfile` extends the mapping `FooProfile` declares, so
        // `FooProfile` goes first.
        let mapper = MapperBuilder::new()
            .with_config(config)
            .add_profile(FooProfile)
            .add_profile(FooExtendProfile)
            .build()?;

        info!(
            mappings = mapper.registry().len(),
            profiles = mapper.profiles().len(),
            "Mapper system ready"
        );
        Ok(Self { mapper })
    }
}
