//! Caller and owner identities.
//!
//! An [`Identity`] is an opaque 20-byte address. It is only ever built from an
//! explicit byte array or parsed from its `0x`-prefixed hex form; there are no
//! implicit conversions from integers or strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of an identity in bytes.
pub const IDENTITY_LEN: usize = 20;

const HEX_PREFIX: &str = "0x";

/// A comparable, copyable principal identity.
///
/// # Invariants
///
/// - Always exactly [`IDENTITY_LEN`] bytes.
/// - [`Identity::ZERO`] is a well-formed value, but it is never a valid owner.
///
/// # Serde
///
/// Serializes as a lowercase `0x`-prefixed hex string. Deserialization accepts
/// either case and fails on a missing prefix, wrong length, or non-hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity([u8; IDENTITY_LEN]);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseIdentityError {
    #[error("identity must start with \"0x\"")]
    MissingPrefix,
    #[error("identity must have {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("identity is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl Identity {
    /// The null identity. Rejected as an owner everywhere.
    pub const ZERO: Self = Self([0; IDENTITY_LEN]);

    #[must_use]
    pub const fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl FromStr for Identity {
    type Err = ParseIdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(HEX_PREFIX)
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or(ParseIdentityError::MissingPrefix)?;

        let expected = IDENTITY_LEN * 2;
        if digits.len() != expected {
            return Err(ParseIdentityError::InvalidLength {
                expected,
                actual: digits.len(),
            });
        }

        let mut bytes = [0; IDENTITY_LEN];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Identity {
    type Error = ParseIdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEX_PREFIX}{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({self})")
    }
}
