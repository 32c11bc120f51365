//! # System Lifecycle & Orchestration
//!
//! This module is the host side of the mapping engine: it decides which
//! profiles exist, in which order they run, and when the registry is sealed.
//!
//! ## The Startup Pattern
//!
//! 1. **Configure** - build a [`MapperConfig`](crate::framework::MapperConfig), from code or `MAPPER_*` variables
//! 2. **Register** - add every profile to a [`MapperBuilder`](crate::framework::MapperBuilder), parents first
//! 3. **Seal** - `build()` invokes each profile once and seals the registry
//! 4. **Share** - clone the resulting [`Mapper`](crate::framework::Mapper) wherever mapping is needed
//!
//! Any registration error aborts startup. There is no partially registered
//! system to fall back to.
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging. See the [`tracing`](self::tracing) module.

pub mod mapper_system;
pub mod tracing;

pub use self::mapper_system::*;
pub use self::tracing::*;
