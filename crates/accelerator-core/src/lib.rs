//! Process-wide accelerator backend resolution.
//!
//! A process may link several accelerator backends, but at most one of them
//! governs where "default device" work runs. This crate answers which one,
//! and rejects registration states that make the answer ambiguous.
//!
//! # Key Concepts
//!
//! - **Backend kinds**: a closed set of accelerator integrations with a fixed
//!   priority ranking
//! - **Presence**: per-backend registration flags, read through an injected
//!   [`PresenceQuery`](crate::core::presence::PresenceQuery)
//! - **Override backend**: a privileged kind that wins outright and may
//!   coexist with any other backend
//! - **Checked resolution**: treats "no accelerator" as an error
//!
//! # Modules
//!
//! - [`core`](crate::core): backend kinds, presence state, the resolver and error types
//! - [`config`]: environment-driven presence overrides

pub mod config;
pub mod core;

// Re-export commonly used items at the crate root
pub use crate::core::{
    current_accelerator, is_accelerator_available, registry, resolve_snapshot, resolve_with,
    validate_presence, AcceleratorError, AcceleratorResolver, BackendKind, BackendRegistry,
    CachedResolver, PresenceQuery, PresenceSnapshot, Result, PRIORITY,
};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use accelerator_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{presence_config, PresenceConfig, PresenceConfigBuilder};
    pub use crate::core::backend::{BackendKind, PRIORITY};
    pub use crate::core::error::{AcceleratorError, Result};
    pub use crate::core::presence::{registry, BackendRegistry, PresenceQuery, PresenceSnapshot};
    pub use crate::core::resolver::{
        current_accelerator, is_accelerator_available, resolve_snapshot, resolve_with,
        validate_presence, AcceleratorResolver, CachedResolver,
    };
}
