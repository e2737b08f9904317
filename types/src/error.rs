//! Rejections raised by the ownership guards.
//!
//! Every rejection carries one of three wire codes, kept byte-for-byte
//! stable for consumers that match on strings:
//!
//! | Code | Variant |
//! |------|---------|
//! | `NOT_OWNER` | [`OwnershipError::Unauthorized`] |
//! | `ZERO_ADDRESS` | [`OwnershipError::InvalidArgument`] with [`InvalidOwner::ZeroAddress`] |
//! | `SAME_OWNER` | [`OwnershipError::InvalidArgument`] with [`InvalidOwner::SameOwner`] |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a proposed owner identity was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidOwner {
    /// The proposed owner is the null identity.
    ZeroAddress,
    /// The proposed owner already owns the registry.
    SameOwner,
}

impl InvalidOwner {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        RejectReason::from_invalid(self).as_str()
    }
}

impl fmt::Display for InvalidOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat view of every rejection code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    NotOwner,
    ZeroAddress,
    SameOwner,
}

impl RejectReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotOwner => "NOT_OWNER",
            Self::ZeroAddress => "ZERO_ADDRESS",
            Self::SameOwner => "SAME_OWNER",
        }
    }

    const fn from_invalid(reason: InvalidOwner) -> Self {
        match reason {
            InvalidOwner::ZeroAddress => Self::ZeroAddress,
            InvalidOwner::SameOwner => Self::SameOwner,
        }
    }
}

impl From<InvalidOwner> for RejectReason {
    fn from(value: InvalidOwner) -> Self {
        Self::from_invalid(value)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A guard rejected an ownership operation. State is untouched when this is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// The caller is not the current owner.
    #[error("unauthorized: NOT_OWNER")]
    Unauthorized,

    /// The requested owner is structurally invalid or redundant.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: InvalidOwner },
}

impl OwnershipError {
    #[must_use]
    pub const fn zero_address() -> Self {
        Self::InvalidArgument {
            reason: InvalidOwner::ZeroAddress,
        }
    }

    #[must_use]
    pub const fn same_owner() -> Self {
        Self::InvalidArgument {
            reason: InvalidOwner::SameOwner,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> RejectReason {
        match self {
            Self::Unauthorized => RejectReason::NotOwner,
            Self::InvalidArgument { reason } => RejectReason::from_invalid(*reason),
        }
    }

    /// The wire code, e.g. `"NOT_OWNER"`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.reason().as_str()
    }
}
