//! # IoC Registry
//!
//! A minimal dependency registry: register a recipe for producing an instance of an
//! abstract type, optionally under a named slot, and resolve a fresh instance later.
//!
//! Abstract types are any `?Sized + 'static` type, trait objects included. Each
//! `(type, instance name)` pair can be registered once and stays registered for the
//! registry's lifetime.
//!
//! ## Quick Start
//!
//! ```rust
//! use ioc_registry::{ConcreteType, Registry, RegistryApi};
//!
//! trait Flyer {
//!     fn fly(&self) -> &'static str;
//! }
//!
//! #[derive(Default)]
//! struct Sparrow;
//!
//! impl Flyer for Sparrow {
//!     fn fly(&self) -> &'static str {
//!         "flap"
//!     }
//! }
//!
//! let mut registry = Registry::new();
//!
//! // By concrete type: the parameterless constructor is compiled into a factory once.
//! let sparrow = ConcreteType::of::<Sparrow>()
//!     .with_default()
//!     .implements::<dyn Flyer>(|s| s)
//!     .build();
//! registry.register_type::<dyn Flyer>(&sparrow, None).unwrap();
//!
//! // By factory, under a named slot.
//! registry
//!     .register_factory::<dyn Flyer, _>(|| Box::new(Sparrow), Some("backup"))
//!     .unwrap();
//!
//! let flyer: Box<dyn Flyer> = registry.resolve(None).unwrap();
//! assert_eq!(flyer.fly(), "flap");
//! assert!(registry.is_registered::<dyn Flyer>(Some("backup")));
//! ```
//!
//! ## Features
//!
//! - **Keyed by type and name**: the unnamed slot and every named slot are independent
//! - **Write-once**: registering a key twice fails, the first registration stays
//! - **Compiled constructors**: concrete types are turned into factories at registration
//! - **Fresh instances**: every resolve runs the factory again
//! - **Tracing support**: `tracing` logs plus an optional per-registry event callback
//!
//! ## Main Items
//!
//! - [`Registry`] - the registry itself
//! - [`RegistryApi`] - registration, query and resolve operations
//! - [`ConcreteType`] - constructor and capability metadata for a concrete type
//! - [`MappingKey`] / [`TypeKey`] - registration identity
//! - [`RegistryError`] - every failure a registry operation can report
//! - [`define_registry!`] - opt-in process-wide registry

mod concrete_type;
mod macros;
mod mapping_key;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

pub use concrete_type::{ConcreteType, ConcreteTypeBuilder};
pub use mapping_key::{MappingKey, TypeKey};
pub use registry::Registry;
pub use registry_error::{RegistryError, Result};
pub use registry_event::{RegistryEvent, TraceCallback};
pub use registry_trait::{downcast, Factory, Instance, RegistryApi};
