//! Registration identity.
//!
//! A registration is identified by the abstract type it fulfills plus an optional
//! instance name. The unnamed slot (`None`) is a key value of its own: it never
//! matches a named registration and a named registration never matches it.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of an abstract type.
///
/// Pairs the [`TypeId`] with the type's name. Only the `TypeId` takes part in
/// equality and hashing; the name is carried for diagnostics.
///
/// Works for unsized types too, so trait objects such as `dyn Flyer` can be used
/// as abstract types.
///
/// # Examples
///
/// ```rust
/// use ioc_registry::TypeKey;
///
/// trait Flyer {}
///
/// let key = TypeKey::of::<dyn Flyer>();
/// assert_eq!(key, TypeKey::of::<dyn Flyer>());
/// assert_ne!(key, TypeKey::of::<String>());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name, e.g. `"alloc::string::String"`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Composite lookup key: abstract type plus optional instance name.
///
/// Keys are immutable once built. Two keys built from the same `(type, name)` pair
/// are equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    ty: TypeKey,
    instance_name: Option<String>,
}

impl MappingKey {
    pub fn new(ty: TypeKey, instance_name: Option<&str>) -> Self {
        Self {
            ty,
            instance_name: instance_name.map(str::to_owned),
        }
    }

    pub fn ty(&self) -> TypeKey {
        self.ty
    }

    pub fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    /// Human-readable rendering used in error messages and logs.
    ///
    /// Not used for equality.
    pub fn trace_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance_name {
            Some(name) => write!(f, "{} (instance: {})", self.ty.name, name),
            None => write!(f, "{} (default instance)", self.ty.name),
        }
    }
}
