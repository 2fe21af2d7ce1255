// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! BinaryId: 20-byte content-derived identifier
//!
//! Type fingerprints are `BinaryId`s computed over an entity's canonical
//! signature (see [`crate::schema::Entity::signature`]). The same hash is
//! available for arbitrary content through [`BinaryId::of`].

use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Size of a [`BinaryId`] in bytes.
pub const ID_SIZE: usize = 20;

/// BinaryId - 20-byte truncated SHA-256 digest
///
/// The all-zero id never results from hashing in practice and is reserved
/// on the wire as the null object marker.
///
/// # Example
///
/// ```
/// use objwire::BinaryId;
///
/// let id = BinaryId::of(b"hello");
/// assert_eq!(id, BinaryId::of(b"hello"));
/// assert_eq!(id.to_string().len(), 40);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BinaryId([u8; ID_SIZE]);

impl BinaryId {
    /// Create from raw 20-byte array
    pub const fn from_bytes(bytes: [u8; ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw 20-byte array
    pub const fn as_bytes(&self) -> &[u8; ID_SIZE] {
        &self.0
    }

    /// The null id.
    pub const fn zero() -> Self {
        Self([0u8; ID_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ID_SIZE]
    }

    /// Hash `data` into an id.
    ///
    /// 1. SHA-256 digest (32 bytes)
    /// 2. Truncate to 20 bytes (discard the trailing 12)
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let digest = hasher.finalize();

        let mut bytes = [0u8; ID_SIZE];
        bytes.copy_from_slice(&digest[..ID_SIZE]);
        Self(bytes)
    }
}

impl fmt::Debug for BinaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryId({})", self)
    }
}

impl fmt::Display for BinaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Error returned when parsing a hex id fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid binary id {input:?}: expected {} hex digits", ID_SIZE * 2)]
pub struct ParseIdError {
    input: String,
}

impl FromStr for BinaryId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError {
            input: s.to_string(),
        };
        if s.len() != ID_SIZE * 2 || !s.is_ascii() {
            return Err(err());
        }
        let mut bytes = [0u8; ID_SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| err())?;
        }
        Ok(Self(bytes))
    }
}

impl From<[u8; ID_SIZE]> for BinaryId {
    fn from(bytes: [u8; ID_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for BinaryId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
