//! Named instance example for ioc-registry.
//!
//! Demonstrates:
//! - Several implementations of one trait, each in its own named slot
//! - The unnamed slot as an independent default
//! - Tracing registry operations with a callback
//!
//! Run with: `cargo run --example named_instances`

use ioc_registry::{ConcreteType, Registry, RegistryApi};

trait Notifier {
    fn notify(&self, message: &str) -> String;
}

#[derive(Default)]
struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn notify(&self, message: &str) -> String {
        format!("email: {message}")
    }
}

#[derive(Default)]
struct SmsNotifier;

impl Notifier for SmsNotifier {
    fn notify(&self, message: &str) -> String {
        format!("sms: {message}")
    }
}

fn main() {
    println!("=== ioc-registry: Named Instances ===\n");

    let mut registry = Registry::new();
    registry.set_trace_callback(|event| println!("   [trace] {event}"));

    println!("1. Registering notifiers...");

    let email = ConcreteType::of::<EmailNotifier>()
        .with_default()
        .implements::<dyn Notifier>(|n| n)
        .build();
    let sms = ConcreteType::of::<SmsNotifier>()
        .with_default()
        .implements::<dyn Notifier>(|n| n)
        .build();

    registry.register_type::<dyn Notifier>(&email, Some("email")).unwrap();
    registry.register_type::<dyn Notifier>(&sms, Some("sms")).unwrap();
    registry.register_type::<dyn Notifier>(&email, None).unwrap();

    println!("\n2. Resolving each slot...");

    for slot in [Some("email"), Some("sms"), None] {
        let notifier = registry.resolve::<dyn Notifier>(slot).unwrap();
        println!("   {:?} -> {}", slot, notifier.notify("build finished"));
    }

    println!("\n3. Resolving an unknown slot...");

    if let Err(e) = registry.resolve::<dyn Notifier>(Some("pager")) {
        println!("   Error (expected): {e}");
    }

    println!("\n=== Example Complete ===");
}
