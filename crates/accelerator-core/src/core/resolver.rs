//! Resolution of the single active accelerator backend.
//!
//! # Rules
//!
//! 1. A registered override backend ([`BackendKind::PrivateUse1`]) wins
//!    outright and may coexist with anything else.
//! 2. Otherwise the first present backend in [`PRIORITY`] is selected, and
//!    every backend ranked below it must be absent.
//! 3. With nothing present the result is `None`, or
//!    [`AcceleratorError::AcceleratorRequiredUnavailable`] in checked mode.
//!
//! # Example
//!
//! ```
//! use accelerator_core::prelude::*;
//!
//! let presence = PresenceSnapshot::empty().with(BackendKind::Hip);
//! let resolver = AcceleratorResolver::new(presence);
//!
//! assert_eq!(resolver.resolve(true).unwrap(), Some(BackendKind::Hip));
//! ```

use crate::core::backend::{BackendKind, PRIORITY};
use crate::core::error::{AcceleratorError, Result};
use crate::core::presence::{registry, PresenceQuery, PresenceSnapshot};
use once_cell::sync::OnceCell;

/// Resolves a captured presence snapshot.
pub fn resolve_snapshot(snapshot: PresenceSnapshot, checked: bool) -> Result<Option<BackendKind>> {
    let outcome = select(snapshot, checked);
    match &outcome {
        Ok(backend) => tracing::debug!(?backend, checked, "accelerator resolved"),
        Err(AcceleratorError::ConfigurationConflict {
            selected,
            conflicting,
        }) => tracing::warn!(
            %selected,
            %conflicting,
            "conflicting accelerator backends registered"
        ),
        Err(err) => tracing::debug!(error = %err, checked, "accelerator resolution failed"),
    }
    outcome
}

fn select(snapshot: PresenceSnapshot, checked: bool) -> Result<Option<BackendKind>> {
    // The override is allowed alongside other backends, used by test harnesses.
    if snapshot.is_present(BackendKind::PrivateUse1) {
        return Ok(Some(BackendKind::PrivateUse1));
    }

    if let Some(selected) = PRIORITY.into_iter().find(|&kind| snapshot.is_present(kind)) {
        if let Some(&conflicting) = selected
            .lower_priority()
            .iter()
            .find(|&&kind| snapshot.is_present(kind))
        {
            return Err(AcceleratorError::conflict(selected, conflicting));
        }
        return Ok(Some(selected));
    }

    if checked {
        return Err(AcceleratorError::AcceleratorRequiredUnavailable);
    }
    Ok(None)
}

/// Resolves the active accelerator from any presence source.
///
/// Flags are taken through [`PresenceQuery::snapshot`] before deciding. For a
/// [`BackendRegistry`](crate::core::presence::BackendRegistry) that is a
/// single atomic load, so a racing registration cannot produce a mixed view.
pub fn resolve_with<P>(presence: &P, checked: bool) -> Result<Option<BackendKind>>
where
    P: PresenceQuery + ?Sized,
{
    resolve_snapshot(presence.snapshot(), checked)
}

/// Checks that the registered backends are mutually consistent.
///
/// Unlike checked resolution this accepts a process with no accelerator.
pub fn validate_presence<P>(presence: &P) -> Result<()>
where
    P: PresenceQuery + ?Sized,
{
    select(presence.snapshot(), false).map(|_| ())
}

/// Resolves the active accelerator for this process.
pub fn current_accelerator(checked: bool) -> Result<Option<BackendKind>> {
    resolve_snapshot(registry().snapshot(), checked)
}

/// Whether this process has an active accelerator.
///
/// A conflicting registration is reported as an error, not as `false`.
pub fn is_accelerator_available() -> Result<bool> {
    current_accelerator(false).map(|backend| backend.is_some())
}

/// Resolver bound to a presence source.
#[derive(Debug, Clone, Default)]
pub struct AcceleratorResolver<P> {
    presence: P,
}

impl<P: PresenceQuery> AcceleratorResolver<P> {
    /// Creates a resolver reading from `presence`.
    pub fn new(presence: P) -> Self {
        Self { presence }
    }

    /// Returns the active backend, `None`, or a validation failure.
    pub fn resolve(&self, checked: bool) -> Result<Option<BackendKind>> {
        resolve_with(&self.presence, checked)
    }

    /// Returns the presence source.
    pub fn presence(&self) -> &P {
        &self.presence
    }

    /// Consumes the resolver, returning the presence source.
    pub fn into_inner(self) -> P {
        self.presence
    }
}

/// Resolver that remembers its first successful answer.
///
/// Presence state is expected to be fixed once backends have initialized,
/// so the first `Ok` is reused. Failures are never cached.
#[derive(Debug)]
pub struct CachedResolver<P> {
    inner: AcceleratorResolver<P>,
    cached: OnceCell<Option<BackendKind>>,
}

impl<P: PresenceQuery> CachedResolver<P> {
    /// Creates a caching resolver reading from `presence`.
    pub fn new(presence: P) -> Self {
        Self {
            inner: AcceleratorResolver::new(presence),
            cached: OnceCell::new(),
        }
    }

    /// Resolves once, then answers from the cache.
    ///
    /// The cache is always filled in unchecked mode, so a `None` can be
    /// stored; `checked` is applied to the cached answer on every call.
    pub fn resolve(&self, checked: bool) -> Result<Option<BackendKind>> {
        let backend = *self.cached.get_or_try_init(|| self.inner.resolve(false))?;
        if backend.is_none() && checked {
            tracing::debug!(checked, "cached resolution has no accelerator");
            return Err(AcceleratorError::AcceleratorRequiredUnavailable);
        }
        Ok(backend)
    }

    /// The cached answer, if one has been computed.
    pub fn cached(&self) -> Option<Option<BackendKind>> {
        self.cached.get().copied()
    }

    /// Drops the cached answer so the next call re-resolves.
    pub fn reset(&mut self) {
        self.cached = OnceCell::new();
    }
}
