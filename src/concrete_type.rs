//! Registration-time metadata for concrete types.
//!
//! A [`ConcreteType`] records what the registry needs to know about a concrete
//! type when it is registered without an explicit factory:
//!
//! - its parameterless constructor, if it has one
//! - the abstract types it satisfies, each with a compiler-checked upcast
//!
//! Declaring `implements::<dyn Flyer>(|s| s)` only compiles when the concrete type
//! really implements `Flyer`, so compatibility is verified statically. The registry
//! then only has to look the capability up once, at registration.
//!
//! # Compiled activators
//!
//! [`ConcreteType::activator`] turns a `(constructor, upcast)` pair into a
//! [`Factory`] closure. Both are plain function pointers captured by the closure, so
//! resolving never consults this metadata again. The compiled factory is cached per
//! abstract type: registering the same concrete type under several instance names
//! shares one closure.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::{Factory, Instance, RegistryError, Result, TypeKey};

/// Builds a factory for one abstract type from the concrete constructor.
type Compile<C> = Box<dyn Fn(fn() -> C) -> Factory + Send + Sync>;

/// A compile step with the constructor already bound.
type Activate = Box<dyn Fn() -> Factory + Send + Sync>;

struct Capability {
    ty: TypeKey,
    /// `None` when the concrete type has no parameterless constructor.
    activate: Option<Activate>,
    compiled: OnceLock<Factory>,
}

/// Type-erased description of a concrete type.
///
/// # Examples
///
/// ```rust
/// use ioc_registry::{ConcreteType, TypeKey};
///
/// trait Flyer {
///     fn fly(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct Sparrow;
///
/// impl Flyer for Sparrow {
///     fn fly(&self) -> &'static str {
///         "flap flap"
///     }
/// }
///
/// let sparrow = ConcreteType::of::<Sparrow>()
///     .with_default()
///     .implements::<dyn Flyer>(|s| s)
///     .build();
///
/// assert!(sparrow.satisfies(TypeKey::of::<dyn Flyer>()));
/// assert!(sparrow.has_constructor());
/// ```
pub struct ConcreteType {
    ty: TypeKey,
    has_constructor: bool,
    capabilities: HashMap<TypeId, Capability>,
}

impl ConcreteType {
    /// Start describing `C`.
    ///
    /// `C` always satisfies itself, so it can be registered under its own type
    /// without an `implements` call.
    pub fn of<C: 'static>() -> ConcreteTypeBuilder<C> {
        ConcreteTypeBuilder {
            constructor: None,
            upcasts: Vec::new(),
        }
        .implements::<C>(|c| c)
    }

    /// The concrete type's identity.
    pub fn ty(&self) -> TypeKey {
        self.ty
    }

    pub fn has_constructor(&self) -> bool {
        self.has_constructor
    }

    /// Whether this type was declared to satisfy `abstract_type`.
    pub fn satisfies(&self, abstract_type: TypeKey) -> bool {
        self.capabilities.contains_key(&abstract_type.id())
    }

    /// Returns the compiled factory producing this type as `abstract_type`.
    ///
    /// The first call for a given abstract type compiles the factory; later calls
    /// return the same `Arc`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::IncompatibleTypes`] if the type does not satisfy `abstract_type`
    /// - [`RegistryError::NoDefaultConstructor`] if no parameterless constructor was declared
    pub fn activator(&self, abstract_type: TypeKey) -> Result<Factory> {
        let capability = self.capabilities.get(&abstract_type.id()).ok_or(
            RegistryError::IncompatibleTypes {
                abstract_type: abstract_type.name(),
                concrete_type: self.ty.name(),
            },
        )?;

        let activate =
            capability
                .activate
                .as_ref()
                .ok_or(RegistryError::NoDefaultConstructor {
                    type_name: self.ty.name(),
                })?;

        let factory = capability.compiled.get_or_init(|| {
            debug!(
                concrete = self.ty.name(),
                abstract_type = abstract_type.name(),
                "compiled activator"
            );
            activate()
        });

        Ok(Arc::clone(factory))
    }
}

impl fmt::Debug for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut satisfies: Vec<&str> = self.capabilities.values().map(|c| c.ty.name()).collect();
        satisfies.sort_unstable();

        f.debug_struct("ConcreteType")
            .field("ty", &self.ty.name())
            .field("has_constructor", &self.has_constructor)
            .field("satisfies", &satisfies)
            .finish()
    }
}

/// Builder returned by [`ConcreteType::of`].
pub struct ConcreteTypeBuilder<C> {
    constructor: Option<fn() -> C>,
    upcasts: Vec<(TypeKey, Compile<C>)>,
}

impl<C: 'static> ConcreteTypeBuilder<C> {
    /// Declare the parameterless constructor.
    pub fn with_constructor(mut self, constructor: fn() -> C) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Use `C::default` as the parameterless constructor.
    pub fn with_default(self) -> Self
    where
        C: Default,
    {
        self.with_constructor(C::default)
    }

    /// Declare that `C` satisfies the abstract type `A`.
    ///
    /// The upcast is normally the identity closure `|c| c`, which the compiler
    /// accepts only when `Box<C>` coerces to `Box<A>`.
    ///
    /// Only the identity closure proves compatibility. Any other function is
    /// trusted as written: `implements::<dyn Flyer>(|_| Box::new(Eagle))` compiles,
    /// and resolving this type as `dyn Flyer` then yields an `Eagle`.
    pub fn implements<A: ?Sized + 'static>(mut self, upcast: fn(Box<C>) -> Box<A>) -> Self {
        self.upcasts.push((TypeKey::of::<A>(), compiler(upcast)));
        self
    }

    pub fn build(self) -> ConcreteType {
        let constructor = self.constructor;

        let capabilities = self
            .upcasts
            .into_iter()
            .map(|(ty, compile)| {
                let activate = constructor.map(|ctor| -> Activate { Box::new(move || compile(ctor)) });
                let capability = Capability {
                    ty,
                    activate,
                    compiled: OnceLock::new(),
                };
                (ty.id(), capability)
            })
            .collect();

        ConcreteType {
            ty: TypeKey::of::<C>(),
            has_constructor: constructor.is_some(),
            capabilities,
        }
    }
}

fn compiler<C: 'static, A: ?Sized + 'static>(upcast: fn(Box<C>) -> Box<A>) -> Compile<C> {
    Box::new(move |constructor: fn() -> C| -> Factory {
        Arc::new(move || -> Instance { Box::new(upcast(Box::new(constructor()))) })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Flyer {
        fn wings(&self) -> u8;
    }

    trait Swimmer {}

    #[derive(Default)]
    struct Sparrow;

    impl Flyer for Sparrow {
        fn wings(&self) -> u8 {
            2
        }
    }

    struct Rock(#[allow(dead_code)] u32);

    fn sparrow() -> ConcreteType {
        ConcreteType::of::<Sparrow>()
            .with_default()
            .implements::<dyn Flyer>(|s| s)
            .build()
    }

    #[test]
    fn test_satisfies_declared_and_self() {
        let concrete = sparrow();
        assert!(concrete.satisfies(TypeKey::of::<dyn Flyer>()));
        assert!(concrete.satisfies(TypeKey::of::<Sparrow>()));
        assert!(!concrete.satisfies(TypeKey::of::<dyn Swimmer>()));
        assert_eq!(concrete.ty(), TypeKey::of::<Sparrow>());
    }

    #[test]
    fn test_activator_produces_abstract_instance() {
        let factory = sparrow().activator(TypeKey::of::<dyn Flyer>()).unwrap();
        let instance = factory();
        let flyer = instance.downcast::<Box<dyn Flyer>>().unwrap();
        assert_eq!(flyer.wings(), 2);
    }

    #[test]
    fn test_activator_for_own_type() {
        let factory = sparrow().activator(TypeKey::of::<Sparrow>()).unwrap();
        assert!(factory().downcast::<Box<Sparrow>>().is_ok());
    }

    #[test]
    fn test_activator_incompatible() {
        let err = sparrow()
            .activator(TypeKey::of::<dyn Swimmer>())
            .err()
            .unwrap();
        assert!(matches!(err, RegistryError::IncompatibleTypes { .. }));
        assert!(err.to_string().contains("Swimmer"));
        assert!(err.to_string().contains("Sparrow"));
    }

    #[test]
    fn test_activator_without_constructor() {
        let rock = ConcreteType::of::<Rock>().build();
        assert!(!rock.has_constructor());

        let err = rock.activator(TypeKey::of::<Rock>()).err().unwrap();
        assert_eq!(
            err,
            RegistryError::NoDefaultConstructor {
                type_name: std::any::type_name::<Rock>()
            }
        );
    }

    #[test]
    fn test_compatibility_is_checked_before_constructor() {
        let rock = ConcreteType::of::<Rock>().build();
        let err = rock.activator(TypeKey::of::<dyn Flyer>()).err().unwrap();
        assert!(matches!(err, RegistryError::IncompatibleTypes { .. }));
    }

    #[test]
    fn test_compiled_factory_is_cached() {
        let concrete = sparrow();
        let first = concrete.activator(TypeKey::of::<dyn Flyer>()).unwrap();
        let second = concrete.activator(TypeKey::of::<dyn Flyer>()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let own = concrete.activator(TypeKey::of::<Sparrow>()).unwrap();
        assert!(!Arc::ptr_eq(&first, &own));
    }

    #[test]
    fn test_custom_constructor_runs_on_every_call() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn make_rock() -> Rock {
            Rock(CALLS.fetch_add(1, Ordering::SeqCst) as u32)
        }

        let rock = ConcreteType::of::<Rock>().with_constructor(make_rock).build();
        let factory = rock.activator(TypeKey::of::<Rock>()).unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        for _ in 0..3 {
            let _ = factory();
        }
        assert_eq!(CALLS.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_upcast_is_applied_as_written() {
        struct Glider;

        impl Flyer for Glider {
            fn wings(&self) -> u8 {
                0
            }
        }

        let sparrow = ConcreteType::of::<Sparrow>()
            .with_default()
            .implements::<dyn Flyer>(|_| Box::new(Glider))
            .build();

        let factory = sparrow.activator(TypeKey::of::<dyn Flyer>()).unwrap();
        let flyer = factory().downcast::<Box<dyn Flyer>>().unwrap();
        assert_eq!(flyer.wings(), 0);
    }

    #[test]
    fn test_debug_lists_capabilities() {
        let rendered = format!("{:?}", sparrow());
        assert!(rendered.contains("Sparrow"));
        assert!(rendered.contains("Flyer"));
        assert!(rendered.contains("has_constructor: true"));
    }
}
