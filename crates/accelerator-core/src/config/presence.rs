//! Environment-driven presence overrides.
//!
//! Deployments and test rigs can force backends present or absent without
//! touching backend initialization code. The overrides are read once from
//! the environment and applied when the global registry is first used.

use crate::core::backend::BackendKind;
use crate::core::error::Result;
use crate::core::presence::BackendRegistry;
use once_cell::sync::Lazy;
use std::env::VarError;

/// Comma-separated backend names to register at startup.
pub const FORCE_PRESENT_VAR: &str = "ACCELERATOR_FORCE_PRESENT";

/// Comma-separated backend names to keep unregistered at startup.
pub const FORCE_ABSENT_VAR: &str = "ACCELERATOR_FORCE_ABSENT";

/// Presence overrides applied to a [`BackendRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresenceConfig {
    /// Backends registered regardless of detection.
    pub forced_present: Vec<BackendKind>,
    /// Backends unregistered regardless of detection. Wins over `forced_present`.
    pub forced_absent: Vec<BackendKind>,
}

impl PresenceConfig {
    /// Read overrides from [`FORCE_PRESENT_VAR`] and [`FORCE_ABSENT_VAR`].
    pub fn from_env() -> Result<Self> {
        let present = read_var(FORCE_PRESENT_VAR);
        let absent = read_var(FORCE_ABSENT_VAR);
        Self::from_vars(present.as_deref(), absent.as_deref())
    }

    /// Like [`from_env`](Self::from_env), but invalid overrides are logged
    /// and replaced by the empty configuration.
    pub fn from_env_or_default() -> Self {
        let present = read_var(FORCE_PRESENT_VAR);
        let absent = read_var(FORCE_ABSENT_VAR);
        Self::from_vars_or_default(present.as_deref(), absent.as_deref())
    }

    /// Parse override lists given as raw variable values.
    pub fn from_vars(present: Option<&str>, absent: Option<&str>) -> Result<Self> {
        Ok(Self {
            forced_present: parse_list(present)?,
            forced_absent: parse_list(absent)?,
        })
    }

    /// Like [`from_vars`](Self::from_vars), falling back to the default on error.
    pub fn from_vars_or_default(present: Option<&str>, absent: Option<&str>) -> Self {
        Self::from_vars(present, absent).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid accelerator presence overrides");
            Self::default()
        })
    }

    /// Whether this configuration changes nothing.
    pub fn is_empty(&self) -> bool {
        self.forced_present.is_empty() && self.forced_absent.is_empty()
    }

    /// Apply the overrides to `registry`.
    pub fn apply(&self, registry: &BackendRegistry) {
        if self.is_empty() {
            return;
        }
        tracing::info!(
            present = ?self.forced_present,
            absent = ?self.forced_absent,
            "applying accelerator presence overrides"
        );
        for &kind in &self.forced_present {
            registry.register(kind);
        }
        for &kind in &self.forced_absent {
            registry.unregister(kind);
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            tracing::warn!(var = name, value = ?raw, "ignoring non-unicode accelerator override");
            None
        }
    }
}

fn parse_list(raw: Option<&str>) -> Result<Vec<BackendKind>> {
    let mut kinds = Vec::new();
    for name in raw.unwrap_or_default().split(',') {
        if name.trim().is_empty() {
            continue;
        }
        let kind: BackendKind = name.parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// Global presence configuration, read from the environment on first use.
pub static PRESENCE_CONFIG: Lazy<PresenceConfig> = Lazy::new(PresenceConfig::from_env_or_default);

/// Get the global presence configuration.
pub fn presence_config() -> &'static PresenceConfig {
    &PRESENCE_CONFIG
}

/// Builder for a custom presence configuration.
#[derive(Debug, Default)]
pub struct PresenceConfigBuilder {
    config: PresenceConfig,
}

impl PresenceConfigBuilder {
    /// Create a new builder with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force `kind` present.
    pub fn present(mut self, kind: BackendKind) -> Self {
        if !self.config.forced_present.contains(&kind) {
            self.config.forced_present.push(kind);
        }
        self
    }

    /// Force `kind` absent.
    pub fn absent(mut self, kind: BackendKind) -> Self {
        if !self.config.forced_absent.contains(&kind) {
            self.config.forced_absent.push(kind);
        }
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PresenceConfig {
        self.config
    }
}
