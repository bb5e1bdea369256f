//! Backend presence state.
//!
//! The resolver never asks the hardware anything. It reads presence flags
//! through [`PresenceQuery`], which backend libraries satisfy by registering
//! themselves in the process-wide [`BackendRegistry`] during initialization.
//! Tests substitute a [`PresenceSnapshot`] or a closure.

use crate::core::backend::BackendKind;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Read-only view of which backends are registered.
///
/// Implementations must be safe to query concurrently and must not change
/// state as a result of being queried.
pub trait PresenceQuery {
    /// Whether `kind` is currently registered.
    fn is_present(&self, kind: BackendKind) -> bool;

    /// All flags at once.
    ///
    /// The default queries each kind separately. Sources that can change
    /// concurrently override this to read every flag in one step.
    fn snapshot(&self) -> PresenceSnapshot {
        PresenceSnapshot::capture(self)
    }
}

impl<F> PresenceQuery for F
where
    F: Fn(BackendKind) -> bool,
{
    fn is_present(&self, kind: BackendKind) -> bool {
        self(kind)
    }
}

/// Immutable presence flags, one bit per [`BackendKind`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PresenceSnapshot {
    bits: u8,
}

impl PresenceSnapshot {
    /// Snapshot with every backend absent.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Snapshot with exactly the given backends present.
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = BackendKind>,
    {
        kinds.into_iter().fold(Self::empty(), Self::with)
    }

    /// Reads every flag from `source` once.
    pub fn capture<P: PresenceQuery + ?Sized>(source: &P) -> Self {
        Self::from_kinds(
            BackendKind::ALL
                .into_iter()
                .filter(|&kind| source.is_present(kind)),
        )
    }

    /// Returns a copy with `kind` marked present.
    pub fn with(self, kind: BackendKind) -> Self {
        Self {
            bits: self.bits | kind.bit(),
        }
    }

    /// Returns a copy with `kind` marked absent.
    pub fn without(self, kind: BackendKind) -> Self {
        Self {
            bits: self.bits & !kind.bit(),
        }
    }

    /// Present backends, in [`BackendKind::ALL`] order.
    pub fn present(self) -> impl Iterator<Item = BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(move |&kind| self.bits & kind.bit() != 0)
    }

    /// Whether no backend at all is present.
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        Self { bits }
    }
}

impl PresenceQuery for PresenceSnapshot {
    fn is_present(&self, kind: BackendKind) -> bool {
        self.bits & kind.bit() != 0
    }

    fn snapshot(&self) -> PresenceSnapshot {
        *self
    }
}

impl fmt::Debug for PresenceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.present()).finish()
    }
}

impl FromIterator<BackendKind> for PresenceSnapshot {
    fn from_iter<I: IntoIterator<Item = BackendKind>>(iter: I) -> Self {
        Self::from_kinds(iter)
    }
}

/// Process-wide registration state.
///
/// Backend libraries call [`register`](Self::register) while they initialize.
/// After that the flags are expected to stay fixed, but reads never lock and
/// stay valid even if a registration races with a query.
#[derive(Default)]
pub struct BackendRegistry {
    bits: AtomicU8,
}

impl BackendRegistry {
    /// Creates a registry with nothing registered.
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Marks `kind` as registered. Returns `false` if it already was.
    pub fn register(&self, kind: BackendKind) -> bool {
        let previous = self.bits.fetch_or(kind.bit(), Ordering::AcqRel);
        let newly = previous & kind.bit() == 0;
        if newly {
            tracing::info!(backend = %kind, "accelerator backend registered");
        }
        newly
    }

    /// Clears the registration of `kind`. Returns `false` if it was not set.
    pub fn unregister(&self, kind: BackendKind) -> bool {
        let previous = self.bits.fetch_and(!kind.bit(), Ordering::AcqRel);
        let was_set = previous & kind.bit() != 0;
        if was_set {
            tracing::info!(backend = %kind, "accelerator backend unregistered");
        }
        was_set
    }

    /// Consistent copy of all flags, read with a single atomic load.
    pub fn snapshot(&self) -> PresenceSnapshot {
        PresenceSnapshot::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl PresenceQuery for BackendRegistry {
    fn is_present(&self, kind: BackendKind) -> bool {
        self.bits.load(Ordering::Acquire) & kind.bit() != 0
    }

    fn snapshot(&self) -> PresenceSnapshot {
        BackendRegistry::snapshot(self)
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("present", &self.snapshot())
            .finish()
    }
}

/// Global registry, seeded from [`crate::config::presence_config`] on first use.
pub static REGISTRY: Lazy<BackendRegistry> = Lazy::new(|| {
    let registry = BackendRegistry::new();
    crate::config::presence_config().apply(&registry);
    registry
});

/// Get the process-wide backend registry.
pub fn registry() -> &'static BackendRegistry {
    &REGISTRY
}
