//! Integration tests for named instance slots.
//!
//! `(T, "a")`, `(T, "b")` and the unnamed `(T, None)` are three unrelated keys.

use ioc_registry::{Registry, RegistryApi, RegistryError};

trait Storage {
    fn backend(&self) -> &'static str;
}

struct Memory;
struct Disk;
struct Network;

impl Storage for Memory {
    fn backend(&self) -> &'static str {
        "memory"
    }
}

impl Storage for Disk {
    fn backend(&self) -> &'static str {
        "disk"
    }
}

impl Storage for Network {
    fn backend(&self) -> &'static str {
        "network"
    }
}

fn registry_with_named() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_factory::<dyn Storage, _>(|| Box::new(Memory), Some("a"))
        .unwrap();
    registry
        .register_factory::<dyn Storage, _>(|| Box::new(Disk), Some("b"))
        .unwrap();
    registry
}

#[test]
fn test_named_slots_resolve_their_own_factory() {
    let registry = registry_with_named();

    assert_eq!(registry.resolve::<dyn Storage>(Some("a")).unwrap().backend(), "memory");
    assert_eq!(registry.resolve::<dyn Storage>(Some("b")).unwrap().backend(), "disk");
}

#[test]
fn test_unnamed_slot_is_independent() {
    let mut registry = registry_with_named();

    assert!(!registry.is_registered::<dyn Storage>(None));
    let err = registry.resolve::<dyn Storage>(None).err().unwrap();
    assert!(matches!(
        err,
        RegistryError::NotRegistered {
            instance_name: None,
            ..
        }
    ));

    registry
        .register_factory::<dyn Storage, _>(|| Box::new(Network), None)
        .unwrap();

    assert_eq!(registry.resolve::<dyn Storage>(None).unwrap().backend(), "network");
    assert_eq!(registry.resolve::<dyn Storage>(Some("a")).unwrap().backend(), "memory");
    assert_eq!(registry.resolve::<dyn Storage>(Some("b")).unwrap().backend(), "disk");
}

#[test]
fn test_unknown_name_is_not_registered() {
    let registry = registry_with_named();

    assert!(!registry.is_registered::<dyn Storage>(Some("c")));
    let err = registry.resolve::<dyn Storage>(Some("c")).err().unwrap();
    assert_eq!(
        err,
        RegistryError::NotRegistered {
            type_name: std::any::type_name::<dyn Storage>(),
            instance_name: Some("c".to_string()),
        }
    );
}

#[test]
fn test_empty_name_is_not_the_default_slot() {
    let mut registry = Registry::new();
    registry
        .register_factory::<dyn Storage, _>(|| Box::new(Memory), Some(""))
        .unwrap();

    assert!(registry.is_registered::<dyn Storage>(Some("")));
    assert!(!registry.is_registered::<dyn Storage>(None));
}

#[test]
fn test_names_are_case_sensitive() {
    let registry = registry_with_named();
    assert!(!registry.is_registered::<dyn Storage>(Some("A")));
}

#[test]
fn test_duplicate_only_within_the_same_name() {
    let mut registry = registry_with_named();

    let err = registry
        .register_factory::<dyn Storage, _>(|| Box::new(Network), Some("a"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyRegistered { ref key } if key.contains("instance: a")));

    // Same name under another type is fine.
    registry
        .register_factory(|| Box::new("a for strings".to_string()), Some("a"))
        .unwrap();
    assert_eq!(
        *registry.resolve::<String>(Some("a")).unwrap(),
        "a for strings"
    );
}

#[test]
fn test_registrations_persist() {
    let registry = registry_with_named();

    for _ in 0..3 {
        let _ = registry.resolve::<dyn Storage>(Some("a")).unwrap();
        assert!(registry.is_registered::<dyn Storage>(Some("a")));
        assert!(registry.is_registered::<dyn Storage>(Some("b")));
    }
    assert_eq!(registry.len(), 2);
}
