#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Automapper Recipe
//!
//! > **A Recipe for declarative object mapping in Rust.**
//!
//! This crate implements a generic object mapping engine: a registry of
//! declarative mappings between arbitrary type pairs, convention-based and
//! explicit member resolution, and mapping inheritance, where a new mapping
//! reuses an existing one without re-declaring the shared members.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Declare once, map everywhere
//! A mapping is declared once, in a **profile**, during startup. After every
//! profile has run, the registry is **sealed** and becomes a read-only value
//! that any number of threads can map with concurrently.
//!
//! ### Inheritance without indirection
//! `extends` is resolved when the child mapping is created. The parent's
//! resolvers are flattened into the child, so executing a child never walks
//! a parent chain.
//!
//! ### Values cross the boundary through `serde`
//! Source instances are serialized, members are resolved from the serialized
//! view, and the destination is deserialized back. Any type that derives
//! `Serialize` and `Deserialize` can take part; nothing needs a custom derive.
//!
//! ## 🚀 Quick Start
//!
//! ```
//! use automapper_recipe::framework::{extend, map_from, Mapper, MappingProfile, MappingRegistry, MapperError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Foo { name: String }
//! #[derive(Default, Serialize, Deserialize)]
//! struct FooDto { name: String }
//! #[derive(Serialize, Deserialize)]
//! struct FooExtend { name: String, extra: i64 }
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct FooExtendDto { name: String, extra: i64 }
//!
//! struct Profile;
//!
//! impl MappingProfile for Profile {
//!     fn configure(&self, registry: &mut MappingRegistry) -> Result<(), MapperError> {
//!         registry.create_map::<Foo, FooDto>()
//!             .for_member("name", map_from(|f: &Foo| f.name.clone()))
//!             .register()?;
//!         registry.create_map::<FooExtend, FooExtendDto>()
//!             .extends(extend::<Foo, FooDto>())
//!             .for_member("extra", map_from(|f: &FooExtend| f.extra))
//!             .register()?;
//!         Ok(())
//!     }
//! }
//!
//! let mapper = Mapper::builder().add_profile(Profile).build().unwrap();
//! let dto: FooExtendDto = mapper.map(&FooExtend { name: "a".into(), extra: 1 }).unwrap();
//! assert_eq!(dto, FooExtendDto { name: "a".into(), extra: 1 });
//! ```
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Keys, resolvers, definitions, the extension linker, the registry, the
//! execution engine, and the profile/mapper lifecycle.
//! - **Key items**: [`MappingRegistry`](framework::MappingRegistry), [`Mapper`](framework::Mapper), [`MappingProfile`](framework::MappingProfile).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! The host's startup routine: register profiles in order, seal, share.
//! - **Key items**: [`MapperSystem`](lifecycle::MapperSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 3. The Implementation ([`model`], [`profiles`])
//! `Foo -> FooDto`, and `FooExtend -> FooExtendDto` extending it.
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod profiles;
