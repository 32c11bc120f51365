//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Registration**: every created mapping, with its parent and member count (`info`)
//! - **Profiles**: each profile runs inside a `profile` span
//! - **Sealing**: the registry size when it is sealed (`info`)
//! - **Execution**: each `map` call and any destination members left untouched (`debug`)
//! - **Errors**: rejected registrations and failed `map` calls, with both type names (`warn`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Registration summary only
//! RUST_LOG=info cargo run
//!
//! # Per-call mapping details
//! RUST_LOG=debug cargo run
//!
//! # Filter to the engine
//! RUST_LOG=automapper_recipe::framework=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Starting mapper system config=MapperConfig { duplicate_policy: Reject, convention_mapping: true }
//! INFO profile: Mapping created mapping=Foo -> FooDto extends=None members=1 replaced=false profile=FooProfile
//! INFO profile: Mapping created mapping=FooExtend -> FooExtendDto extends=Some("Foo -> FooDto") members=2 replaced=false profile=FooExtendProfile
//! INFO Registry sealed mappings=2
//! INFO Mapper system ready mappings=2 profiles=2
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
