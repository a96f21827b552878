//! Macros for creating process-wide registries.
//!
//! [`Registry`](crate::Registry) itself never lives in a static. A host that wants a
//! global registry opts in explicitly with [`define_registry!`].

/// Creates a process-wide registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - A `Mutex<Registry>` static (private)
/// - Free functions mirroring [`RegistryApi`](crate::RegistryApi)
///
/// Registration and lookup happen under the mutex, so the duplicate check and the
/// insert cannot interleave with another thread. The mutex is released before the
/// factory runs, which lets factories resolve their own dependencies from the same
/// registry.
///
/// # Examples
///
/// ```rust
/// use ioc_registry::define_registry;
///
/// trait Clock: Send {
///     fn now(&self) -> u64;
/// }
///
/// struct FixedClock;
///
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 {
///         1_700_000_000
///     }
/// }
///
/// define_registry!(services);
///
/// services::register_factory::<dyn Clock, _>(|| Box::new(FixedClock), None).unwrap();
///
/// let clock = services::resolve::<dyn Clock>(None).unwrap();
/// assert_eq!(clock.now(), 1_700_000_000);
/// assert!(services::is_registered::<dyn Clock>(None));
/// ```
///
/// # Multiple Registries
///
/// Each invocation creates an isolated registry:
///
/// ```rust
/// use ioc_registry::define_registry;
///
/// define_registry!(primary);
/// define_registry!(secondary);
///
/// primary::register_factory(|| Box::new("primary".to_string()), None).unwrap();
///
/// assert!(primary::is_registered::<String>(None));
/// assert!(!secondary::is_registered::<String>(None));
/// ```
///
/// # Tracing
///
/// The trace callback runs while the mutex is held. It must NOT call back into the
/// same registry, or it will deadlock. A callback that panics does not disable the
/// registry: the poisoned mutex is recovered on the next call.
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

            #[allow(unused_imports)]
            use $crate::RegistryApi;

            static REGISTRY: LazyLock<Mutex<$crate::Registry>> =
                LazyLock::new(|| Mutex::new($crate::Registry::new()));

            // Entries are inserted before any event fires, so a guard recovered
            // from a panicking trace callback never sees a half-applied write.
            fn lock() -> MutexGuard<'static, $crate::Registry> {
                REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
            }

            /// Register `concrete` as the implementation of `A`.
            pub fn register_type<A: ?Sized + 'static>(
                concrete: &$crate::ConcreteType,
                instance_name: Option<&str>,
            ) -> $crate::Result<()> {
                lock().register_type::<A>(concrete, instance_name)
            }

            /// Register a typed factory for `T`.
            pub fn register_factory<T, F>(
                factory: F,
                instance_name: Option<&str>,
            ) -> $crate::Result<()>
            where
                T: ?Sized + 'static,
                F: Fn() -> Box<T> + Send + Sync + 'static,
            {
                lock().register_factory::<T, F>(factory, instance_name)
            }

            /// Check if `T` is registered under `instance_name`.
            pub fn is_registered<T: ?Sized + 'static>(instance_name: Option<&str>) -> bool {
                lock().is_registered::<T>(instance_name)
            }

            /// Build a new instance of `T`.
            pub fn resolve<T: ?Sized + 'static>(
                instance_name: Option<&str>,
            ) -> $crate::Result<Box<T>> {
                let factory = lock().factory($crate::TypeKey::of::<T>(), instance_name)?;
                $crate::downcast(factory())
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                lock().set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                lock().clear_trace_callback()
            }
        }
    };
}
