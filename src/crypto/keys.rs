//! The `DerivedKey` type returned to callers.
//!
//! Derived keys are ephemeral: they are handed to the calling service and
//! never persisted. The wrapper zeroes its memory on drop and compares in
//! constant time so a timing side channel cannot leak key bytes.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Length of a derived key in bytes (256 bits).
pub const DERIVED_KEY_LEN: usize = 32;

/// A 32-byte key derived from a root key + service key + category.
///
/// Zeroed on drop. Use `as_bytes` to feed it into a cipher, or `to_hex`
/// for display/transport encoding.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; DERIVED_KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw derived key bytes.
    pub fn new(bytes: [u8; DERIVED_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.bytes
    }

    /// Lowercase hex encoding of the key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes[..].ct_eq(&other.bytes[..]).into()
    }
}

impl Eq for DerivedKey {}

/// Redacted — key material must never end up in debug output or logs.
impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}
