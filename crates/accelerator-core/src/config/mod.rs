//! Configuration utilities for accelerator resolution.

pub mod presence;

// Re-export key items
pub use presence::{
    presence_config, PresenceConfig, PresenceConfigBuilder, FORCE_ABSENT_VAR, FORCE_PRESENT_VAR,
};
