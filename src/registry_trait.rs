//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait. Implementors supply the three
//! untyped primitives (insert a factory, check a key, look a factory up); the
//! trait's default methods build registration by concrete type, the typed
//! conveniences and resolution on top of them.
//!
//! Registrations are keyed by [`MappingKey`](crate::MappingKey): abstract type plus
//! optional instance name. A key can be registered once; there is no overwrite and
//! no unregister.

use std::any::Any;
use std::sync::Arc;

use crate::{ConcreteType, RegistryError, Result, TypeKey};

/// A resolved, type-erased instance.
///
/// For an abstract type `T` the box holds a `Box<T>`, so a `dyn Flyer` registration
/// resolves to a `Box<dyn Any>` containing a `Box<dyn Flyer>`.
pub type Instance = Box<dyn Any>;

/// Zero-argument function producing a fresh [`Instance`] on every call.
pub type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// the untyped primitives `register_factory_dyn`, `is_registered_dyn` and `factory`
/// to be implemented.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------------------------------

    /// Register `factory` for `(ty, instance_name)`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingArgument`] if `factory` is `None`
    /// - [`RegistryError::AlreadyRegistered`] if the key is taken; the existing
    ///   registration is left untouched
    fn register_factory_dyn(
        &mut self,
        ty: TypeKey,
        factory: Option<Factory>,
        instance_name: Option<&str>,
    ) -> Result<()>;

    /// Whether a registration exists for exactly `(ty, instance_name)`.
    ///
    /// Never changes the mapping. Implementations may still report the query to an
    /// observer: [`Registry`](crate::Registry) sends
    /// [`RegistryEvent::IsRegistered`](crate::RegistryEvent::IsRegistered) to its
    /// trace callback.
    fn is_registered_dyn(&self, ty: TypeKey, instance_name: Option<&str>) -> bool;

    /// Look up the factory registered for `(ty, instance_name)`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if there is no registration for the key
    fn factory(&self, ty: TypeKey, instance_name: Option<&str>) -> Result<Factory>;

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Register `concrete` as the implementation of `abstract_type`.
    ///
    /// The concrete type's constructor is compiled into a factory here, once.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingArgument`] if `concrete` is `None`
    /// - [`RegistryError::IncompatibleTypes`] if `concrete` does not satisfy `abstract_type`
    /// - [`RegistryError::NoDefaultConstructor`] if `concrete` has no parameterless constructor
    /// - [`RegistryError::AlreadyRegistered`] if the key is taken
    fn register_type_dyn(
        &mut self,
        abstract_type: TypeKey,
        concrete: Option<&ConcreteType>,
        instance_name: Option<&str>,
    ) -> Result<()> {
        let concrete = concrete.ok_or(RegistryError::MissingArgument {
            argument: "concrete",
        })?;
        let factory = concrete.activator(abstract_type)?;
        self.register_factory_dyn(abstract_type, Some(factory), instance_name)
    }

    /// Register `concrete` as the implementation of `A`.
    ///
    /// See [`register_type_dyn`](Self::register_type_dyn) for errors.
    fn register_type<A: ?Sized + 'static>(
        &mut self,
        concrete: &ConcreteType,
        instance_name: Option<&str>,
    ) -> Result<()> {
        self.register_type_dyn(TypeKey::of::<A>(), Some(concrete), instance_name)
    }

    /// Register a typed factory for `T`.
    ///
    /// The factory is adapted to the untyped [`Factory`] signature and goes through
    /// the same duplicate check as [`register_factory_dyn`](Self::register_factory_dyn).
    fn register_factory<T, F>(&mut self, factory: F, instance_name: Option<&str>) -> Result<()>
    where
        T: ?Sized + 'static,
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move || -> Instance { Box::new(factory()) });
        self.register_factory_dyn(TypeKey::of::<T>(), Some(factory), instance_name)
    }

    // -------------------------------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------------------------------

    fn is_registered<T: ?Sized + 'static>(&self, instance_name: Option<&str>) -> bool {
        self.is_registered_dyn(TypeKey::of::<T>(), instance_name)
    }

    /// Build a new instance for `(ty, instance_name)`.
    ///
    /// The stored factory runs on every call; nothing is cached. A panicking
    /// factory unwinds through this call unchanged.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if there is no registration for the key
    fn resolve_dyn(&self, ty: TypeKey, instance_name: Option<&str>) -> Result<Instance> {
        let factory = self.factory(ty, instance_name)?;
        Ok(factory())
    }

    /// Build a new instance of `T`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if there is no registration for the key
    /// - [`RegistryError::TypeMismatch`] if the registered factory produced something
    ///   other than a `Box<T>`
    fn resolve<T: ?Sized + 'static>(&self, instance_name: Option<&str>) -> Result<Box<T>> {
        downcast(self.resolve_dyn(TypeKey::of::<T>(), instance_name)?)
    }
}

/// Checked conversion of a resolved [`Instance`] into `Box<T>`.
///
/// # Errors
///
/// - [`RegistryError::TypeMismatch`] if the instance does not hold a `Box<T>`
pub fn downcast<T: ?Sized + 'static>(instance: Instance) -> Result<Box<T>> {
    instance
        .downcast::<Box<T>>()
        .map(|boxed| *boxed)
        .map_err(|_| RegistryError::TypeMismatch {
            expected: std::any::type_name::<T>(),
        })
}
