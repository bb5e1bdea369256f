//! Example showing how backend registration drives accelerator resolution.

use accelerator_core::prelude::*;

fn describe(label: &str, snapshot: PresenceSnapshot) {
    match resolve_with(&snapshot, false) {
        Ok(Some(backend)) => println!("  {label:<24} -> {backend}"),
        Ok(None) => println!("  {label:<24} -> no accelerator"),
        Err(err) => println!("  {label:<24} -> error: {err}"),
    }
}

fn main() {
    println!("Accelerator Resolution Example");
    println!("==============================\n");

    describe("nothing registered", PresenceSnapshot::empty());
    describe("cuda", PresenceSnapshot::empty().with(BackendKind::Cuda));
    describe(
        "cuda + mps",
        PresenceSnapshot::from_kinds([BackendKind::Cuda, BackendKind::Mps]),
    );
    describe(
        "privateuse1 + cuda",
        PresenceSnapshot::from_kinds([BackendKind::PrivateUse1, BackendKind::Cuda]),
    );

    println!("\nProcess registry");
    println!("----------------");
    println!("  overrides: {:?}", presence_config());
    match current_accelerator(false) {
        Ok(backend) => println!("  active accelerator: {backend:?}"),
        Err(err) => println!("  misconfigured: {err}"),
    }
}
