//! Integration test for seeding the process registry from the environment.
//!
//! The global configuration and registry are initialized once per process,
//! so this binary holds a single test that sets the variables before the
//! first call to `registry()`.

use accelerator_core::config::{FORCE_ABSENT_VAR, FORCE_PRESENT_VAR};
use accelerator_core::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_registry_seeded_from_environment() {
    std::env::set_var(FORCE_PRESENT_VAR, "mtia, XPU,cuda");
    std::env::set_var(FORCE_ABSENT_VAR, "xpu,cuda");

    assert_eq!(
        PresenceConfig::from_env(),
        Ok(PresenceConfig {
            forced_present: vec![BackendKind::Mtia, BackendKind::Xpu, BackendKind::Cuda],
            forced_absent: vec![BackendKind::Xpu, BackendKind::Cuda],
        })
    );

    // First use reads the variables and applies them
    let config = presence_config();
    assert_eq!(config.forced_absent, vec![BackendKind::Xpu, BackendKind::Cuda]);

    // Absence wins over presence for xpu and cuda
    assert_eq!(
        registry().snapshot(),
        PresenceSnapshot::empty().with(BackendKind::Mtia)
    );
    assert_eq!(current_accelerator(true), Ok(Some(BackendKind::Mtia)));
    assert_eq!(is_accelerator_available(), Ok(true));

    // An invalid name makes from_env fail without touching the seeded state
    std::env::set_var(FORCE_PRESENT_VAR, "mtia,tpu");
    assert_eq!(
        PresenceConfig::from_env(),
        Err(AcceleratorError::unknown_backend("tpu"))
    );
    assert_eq!(PresenceConfig::from_env_or_default(), PresenceConfig::default());
    assert_eq!(current_accelerator(false), Ok(Some(BackendKind::Mtia)));

    std::env::remove_var(FORCE_PRESENT_VAR);
    std::env::remove_var(FORCE_ABSENT_VAR);
}
