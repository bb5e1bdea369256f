//! Accelerator backend kinds and their priority ranking.
//!
//! The set of backends is closed at compile time. The ranking used by the
//! resolver lives in [`PRIORITY`] and nowhere else, so adding a backend means
//! one new variant and one table entry.

use crate::core::error::{AcceleratorError, Result};
use std::fmt;
use std::str::FromStr;

/// Types of accelerator backends a process can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendKind {
    /// User-registrable override backend, exempt from exclusivity checks
    #[cfg_attr(feature = "serde", serde(rename = "privateuseone", alias = "privateuse1"))]
    PrivateUse1,
    /// NVIDIA CUDA
    Cuda,
    /// Meta training and inference accelerator
    Mtia,
    /// AMD HIP
    Hip,
    /// Apple Metal Performance Shaders
    Mps,
    /// Intel XPU
    Xpu,
}

/// Non-override backends, highest priority first.
pub static PRIORITY: [BackendKind; 5] = [
    BackendKind::Cuda,
    BackendKind::Mtia,
    BackendKind::Hip,
    BackendKind::Mps,
    BackendKind::Xpu,
];

impl BackendKind {
    /// Every backend kind, override first.
    pub const ALL: [BackendKind; 6] = [
        BackendKind::PrivateUse1,
        BackendKind::Cuda,
        BackendKind::Mtia,
        BackendKind::Hip,
        BackendKind::Mps,
        BackendKind::Xpu,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::PrivateUse1 => "privateuseone",
            Self::Cuda => "cuda",
            Self::Mtia => "mtia",
            Self::Hip => "hip",
            Self::Mps => "mps",
            Self::Xpu => "xpu",
        }
    }

    /// Diagnostic label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::PrivateUse1 => "PrivateUse1",
            Self::Cuda => "CUDA",
            Self::Mtia => "MTIA",
            Self::Hip => "HIP",
            Self::Mps => "MPS",
            Self::Xpu => "XPU",
        }
    }

    /// Whether this is the override backend.
    pub fn is_override(self) -> bool {
        self == Self::PrivateUse1
    }

    /// Rank in [`PRIORITY`] (0 is highest), or `None` for the override.
    pub fn priority(self) -> Option<usize> {
        PRIORITY.iter().position(|&kind| kind == self)
    }

    /// Backends ranked strictly below this one.
    ///
    /// Empty for the override, which is not part of the ranking.
    pub fn lower_priority(self) -> &'static [BackendKind] {
        match self.priority() {
            Some(rank) => &PRIORITY[rank + 1..],
            None => &[],
        }
    }

    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BackendKind {
    type Err = AcceleratorError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "privateuseone" | "privateuse1" => Ok(Self::PrivateUse1),
            "cuda" => Ok(Self::Cuda),
            "mtia" => Ok(Self::Mtia),
            "hip" => Ok(Self::Hip),
            "mps" => Ok(Self::Mps),
            "xpu" => Ok(Self::Xpu),
            _ => Err(AcceleratorError::unknown_backend(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(format!("{}", BackendKind::Cuda), "CUDA");
        assert_eq!(format!("{}", BackendKind::Mps), "MPS");
        assert_eq!(format!("{}", BackendKind::PrivateUse1), "PrivateUse1");
    }

    #[test]
    fn test_priority_table() {
        assert_eq!(BackendKind::Cuda.priority(), Some(0));
        assert_eq!(BackendKind::Xpu.priority(), Some(4));
        assert_eq!(BackendKind::PrivateUse1.priority(), None);

        // Every non-override kind is ranked exactly once
        for kind in BackendKind::ALL {
            assert_eq!(kind.priority().is_none(), kind.is_override());
        }
    }

    #[test]
    fn test_lower_priority() {
        assert_eq!(
            BackendKind::Hip.lower_priority(),
            &[BackendKind::Mps, BackendKind::Xpu]
        );
        assert!(BackendKind::Xpu.lower_priority().is_empty());
        assert!(BackendKind::PrivateUse1.lower_priority().is_empty());
    }

    #[test]
    fn test_parse_names() {
        for kind in BackendKind::ALL {
            assert_eq!(kind.name().parse::<BackendKind>(), Ok(kind));
        }
        assert_eq!(" CUDA ".parse::<BackendKind>(), Ok(BackendKind::Cuda));
        assert_eq!(
            "PrivateUse1".parse::<BackendKind>(),
            Ok(BackendKind::PrivateUse1)
        );
        assert!(matches!(
            "tpu".parse::<BackendKind>(),
            Err(AcceleratorError::UnknownBackend { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&BackendKind::Cuda).unwrap(), "\"cuda\"");
        assert_eq!(
            serde_json::from_str::<BackendKind>("\"privateuse1\"").unwrap(),
            BackendKind::PrivateUse1
        );
        for kind in BackendKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_bits_are_distinct() {
        let mut seen = 0u8;
        for kind in BackendKind::ALL {
            assert_eq!(seen & kind.bit(), 0);
            seen |= kind.bit();
        }
    }
}
