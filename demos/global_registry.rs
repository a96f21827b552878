//! Process-wide registry example for ioc-registry.
//!
//! Demonstrates:
//! - Opting into a global registry with `define_registry!`
//! - Factories that resolve their own dependencies from the same registry
//! - Resolving from several threads
//!
//! Run with: `cargo run --example global_registry`

use ioc_registry::{define_registry, ConcreteType};
use std::thread;

define_registry!(services);

trait Clock: Send {
    fn now(&self) -> u64;
}

#[derive(Default)]
struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        1_700_000_000
    }
}

struct AuditLog {
    clock: Box<dyn Clock>,
}

impl AuditLog {
    fn record(&self, action: &str) -> String {
        format!("[{}] {}", self.clock.now(), action)
    }
}

fn main() {
    println!("=== ioc-registry: Global Registry ===\n");

    println!("1. Wiring services...");

    let clock = ConcreteType::of::<FixedClock>()
        .with_default()
        .implements::<dyn Clock>(|c| c)
        .build();
    services::register_type::<dyn Clock>(&clock, None).unwrap();

    services::register_factory(
        || {
            Box::new(AuditLog {
                clock: services::resolve::<dyn Clock>(None).unwrap(),
            })
        },
        None,
    )
    .unwrap();

    println!("\n2. Resolving from worker threads...");

    let handles: Vec<_> = (0..3)
        .map(|worker| {
            thread::spawn(move || {
                let log = services::resolve::<AuditLog>(None).unwrap();
                log.record(&format!("worker {worker} started"))
            })
        })
        .collect();

    for handle in handles {
        println!("   {}", handle.join().unwrap());
    }

    println!("\n=== Example Complete ===");
}
