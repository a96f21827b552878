/// Events emitted by a [`Registry`](crate::Registry) during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use ioc_registry::RegistryEvent;
///
/// let event = RegistryEvent::Register {
///     type_name: "i32",
///     instance_name: None,
/// };
/// assert_eq!(event.to_string(), "register { type_name: i32, instance: <default> }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A factory was registered.
    Register {
        /// The abstract type the factory is registered for.
        type_name: &'static str,
        instance_name: Option<String>,
    },

    /// A factory was looked up for resolution.
    Resolve {
        type_name: &'static str,
        instance_name: Option<String>,
        /// Whether a registration existed for the key.
        found: bool,
    },

    /// A registration check was performed.
    IsRegistered {
        type_name: &'static str,
        instance_name: Option<String>,
        found: bool,
    },
}

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

struct Instance<'a>(&'a Option<String>);

impl std::fmt::Display for Instance<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(name) => f.write_str(name),
            None => f.write_str("<default>"),
        }
    }
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register {
                type_name,
                instance_name,
            } => write!(
                f,
                "register {{ type_name: {}, instance: {} }}",
                type_name,
                Instance(instance_name)
            ),
            RegistryEvent::Resolve {
                type_name,
                instance_name,
                found,
            } => write!(
                f,
                "resolve {{ type_name: {}, instance: {}, found: {} }}",
                type_name,
                Instance(instance_name),
                found
            ),
            RegistryEvent::IsRegistered {
                type_name,
                instance_name,
                found,
            } => write!(
                f,
                "is_registered {{ type_name: {}, instance: {}, found: {} }}",
                type_name,
                Instance(instance_name),
                found
            ),
        }
    }
}
