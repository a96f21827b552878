use thiserror::Error;

/// Errors reported by registry operations.
///
/// Every variant is a hard failure of the call that triggered it. The registry
/// never retries, logs-and-continues or substitutes a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A required argument of a dynamic entry point was `None`.
    #[error("Required argument `{argument}` is missing")]
    MissingArgument { argument: &'static str },

    /// The concrete type does not declare that it satisfies the abstract type.
    #[error("Error trying to register the instance: '{abstract_type}' is not assignable from '{concrete_type}'")]
    IncompatibleTypes {
        abstract_type: &'static str,
        concrete_type: &'static str,
    },

    /// The concrete type has no parameterless constructor.
    #[error("Type '{type_name}' has no parameterless constructor")]
    NoDefaultConstructor { type_name: &'static str },

    /// The key already has a registration; `key` is its trace string.
    #[error("The requested mapping already exists - {key}")]
    AlreadyRegistered { key: String },

    #[error("Could not find mapping for type '{type_name}'")]
    NotRegistered {
        type_name: &'static str,
        instance_name: Option<String>,
    },

    /// A typed resolve produced an instance of a different type than requested.
    #[error("Resolved instance is not a '{expected}'")]
    TypeMismatch { expected: &'static str },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegistryError>;
