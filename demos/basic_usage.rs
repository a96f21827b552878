//! Basic usage example for ioc-registry.
//!
//! Demonstrates:
//! - Describing a concrete type and registering it under a trait object
//! - Registering a typed factory
//! - Resolving fresh instances with `resolve()`
//! - Checking registration status with `is_registered()`
//! - The duplicate-registration and missing-registration errors
//!
//! Run with: `cargo run --example basic_usage`

use ioc_registry::{ConcreteType, Registry, RegistryApi};

trait Flyer {
    fn fly(&self) -> String;
}

#[derive(Default)]
struct Sparrow;

impl Flyer for Sparrow {
    fn fly(&self) -> String {
        "Sparrow flaps its wings".to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
}

fn main() {
    println!("=== ioc-registry: Basic Usage ===\n");

    let mut registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. Register a concrete type under a trait object
    // -------------------------------------------------------------------------
    println!("1. Registering Sparrow as dyn Flyer...");

    let sparrow = ConcreteType::of::<Sparrow>()
        .with_default()
        .implements::<dyn Flyer>(|s| s)
        .build();
    registry.register_type::<dyn Flyer>(&sparrow, None).unwrap();

    println!("   Registered: {:?}", sparrow);

    // -------------------------------------------------------------------------
    // 2. Register a typed factory
    // -------------------------------------------------------------------------
    println!("\n2. Registering an AppConfig factory...");

    registry
        .register_factory(
            || {
                Box::new(AppConfig {
                    name: "MyApp".to_string(),
                    version: 1,
                })
            },
            None,
        )
        .unwrap();

    println!("   Registered: AppConfig");

    // -------------------------------------------------------------------------
    // 3. Check registration status
    // -------------------------------------------------------------------------
    println!("\n3. Checking registration status with is_registered()...");

    println!("   is_registered::<dyn Flyer>() = {}", registry.is_registered::<dyn Flyer>(None));
    println!("   is_registered::<AppConfig>() = {}", registry.is_registered::<AppConfig>(None));
    println!("   is_registered::<Vec<u8>>()   = {}", registry.is_registered::<Vec<u8>>(None));

    // -------------------------------------------------------------------------
    // 4. Resolve instances
    // -------------------------------------------------------------------------
    println!("\n4. Resolving instances...");

    let flyer = registry.resolve::<dyn Flyer>(None).unwrap();
    let config = registry.resolve::<AppConfig>(None).unwrap();

    println!("   dyn Flyer: {}", flyer.fly());
    println!("   AppConfig: {:?}", config);

    // -------------------------------------------------------------------------
    // 5. Handle errors
    // -------------------------------------------------------------------------
    println!("\n5. Handling errors...");

    match registry.register_type::<dyn Flyer>(&sparrow, None) {
        Ok(()) => println!("   Registered twice?!"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    match registry.resolve::<Vec<u8>>(None) {
        Ok(value) => println!("   Found Vec<u8>: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n=== Example Complete ===");
    println!("The registry now holds {} registrations.", registry.len());
}
