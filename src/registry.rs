//! The registry: a map from [`MappingKey`] to [`Factory`].
//!
//! Each `Registry` owns its mappings; there is no shared or static state. The type
//! is not internally synchronized. Wrap it in a `Mutex` (or use
//! [`define_registry!`](crate::define_registry)) to share it between threads.
//!
//! # Examples
//!
//! ```
//! use ioc_registry::{ConcreteType, Registry, RegistryApi};
//!
//! trait Flyer {
//!     fn fly(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct Sparrow;
//!
//! impl Flyer for Sparrow {
//!     fn fly(&self) -> String {
//!         "sparrow takes off".to_string()
//!     }
//! }
//!
//! let mut registry = Registry::new();
//!
//! let sparrow = ConcreteType::of::<Sparrow>()
//!     .with_default()
//!     .implements::<dyn Flyer>(|s| s)
//!     .build();
//! registry.register_type::<dyn Flyer>(&sparrow, None).unwrap();
//!
//! let flyer: Box<dyn Flyer> = registry.resolve(None).unwrap();
//! assert_eq!(flyer.fly(), "sparrow takes off");
//!
//! // A key can only be registered once.
//! assert!(registry.register_type::<dyn Flyer>(&sparrow, None).is_err());
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    Factory, MappingKey, RegistryApi, RegistryError, RegistryEvent, Result, TraceCallback,
    TypeKey,
};

/// Registry of factories keyed by abstract type and instance name.
#[derive(Default)]
pub struct Registry {
    mappings: HashMap<MappingKey, Factory>,
    trace: Option<Arc<TraceCallback>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Iterate over the registered keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &MappingKey> {
        self.mappings.keys()
    }

    /// Set a tracing callback for registry operations.
    ///
    /// The callback will be invoked for every registration, registration check and
    /// factory lookup. Replaces any previous callback.
    pub fn set_trace_callback(&mut self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.trace = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// After calling this, no tracing events will be emitted.
    pub fn clear_trace_callback(&mut self) {
        self.trace = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        if let Some(callback) = self.trace.as_ref() {
            callback(&event);
        }
    }
}

impl RegistryApi for Registry {
    fn register_factory_dyn(
        &mut self,
        ty: TypeKey,
        factory: Option<Factory>,
        instance_name: Option<&str>,
    ) -> Result<()> {
        let factory = factory.ok_or(RegistryError::MissingArgument {
            argument: "factory",
        })?;

        let entry = match self.mappings.entry(MappingKey::new(ty, instance_name)) {
            Entry::Occupied(existing) => {
                return Err(RegistryError::AlreadyRegistered {
                    key: existing.key().trace_string(),
                })
            }
            Entry::Vacant(entry) => entry,
        };
        entry.insert(factory);

        debug!(type_name = ty.name(), instance = ?instance_name, "registered factory");
        self.emit_event(RegistryEvent::Register {
            type_name: ty.name(),
            instance_name: instance_name.map(str::to_owned),
        });

        Ok(())
    }

    fn is_registered_dyn(&self, ty: TypeKey, instance_name: Option<&str>) -> bool {
        let found = self
            .mappings
            .contains_key(&MappingKey::new(ty, instance_name));

        self.emit_event(RegistryEvent::IsRegistered {
            type_name: ty.name(),
            instance_name: instance_name.map(str::to_owned),
            found,
        });

        found
    }

    fn factory(&self, ty: TypeKey, instance_name: Option<&str>) -> Result<Factory> {
        let factory = self
            .mappings
            .get(&MappingKey::new(ty, instance_name))
            .cloned();

        trace!(type_name = ty.name(), instance = ?instance_name, found = factory.is_some(), "factory lookup");
        self.emit_event(RegistryEvent::Resolve {
            type_name: ty.name(),
            instance_name: instance_name.map(str::to_owned),
            found: factory.is_some(),
        });

        factory.ok_or_else(|| RegistryError::NotRegistered {
            type_name: ty.name(),
            instance_name: instance_name.map(str::to_owned),
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.mappings.keys().map(MappingKey::trace_string).collect();
        keys.sort_unstable();

        f.debug_struct("Registry")
            .field("mappings", &keys)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
