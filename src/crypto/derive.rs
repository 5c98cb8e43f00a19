//! Root key generation and per-service key derivation using HKDF-SHA256.
//!
//! A user's root key for a category is combined with the calling service's
//! own secret ("service key") to produce a key unique to that service.
//! HKDF (RFC 5869) takes `root_key || service_key` as input keying material
//! and the category string as the `info` context, so distinct categories
//! yield independent key material from the same inputs.
//!
//! Everything here is pure and stateless — no storage access, no caching.

use hkdf::Hkdf;
use rand::TryRngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::crypto::keys::{DerivedKey, DERIVED_KEY_LEN};
use crate::errors::{KeyfobError, Result};

/// Length of a freshly generated root key in bytes (256 bits).
pub const ROOT_KEY_LEN: usize = 32;

/// Minimum acceptable length for both root keys and service keys (128 bits).
pub const MIN_KEY_LEN: usize = 16;

/// Check the service key length floor.
///
/// Runs before any vault access so an underlong key can never trigger a
/// storage read, let alone a root key creation.
pub fn validate_service_key(service_key: &[u8]) -> Result<()> {
    if service_key.len() < MIN_KEY_LEN {
        return Err(KeyfobError::InvalidServiceKey);
    }
    Ok(())
}

/// Derive a 32-byte per-service key from a root key, a service key, and a
/// category.
///
/// Deterministic: the same three inputs always produce the same output.
/// The input keying material is `root_key || service_key` (root first —
/// the order is part of the derivation contract) and the category's raw
/// bytes are the HKDF `info` parameter. No salt is used.
///
/// Both length floors are enforced on every call, service key first, so a
/// short service key is rejected without inspecting the root key at all.
pub fn derive_key(root_key: &[u8], service_key: &[u8], category: &str) -> Result<DerivedKey> {
    validate_service_key(service_key)?;

    // A root key this short cannot have come from `generate_root_key` —
    // the stored record is damaged.
    if root_key.len() < MIN_KEY_LEN {
        return Err(KeyfobError::CorruptRootKey);
    }

    // ikm = root_key || service_key, zeroed once HKDF is done with it.
    let mut ikm = Zeroizing::new(Vec::with_capacity(root_key.len() + service_key.len()));
    ikm.extend_from_slice(root_key);
    ikm.extend_from_slice(service_key);

    // `salt` is None — HKDF substitutes a zero-filled salt internally.
    let hk = Hkdf::<Sha256>::new(None, &ikm);

    let mut okm = [0u8; DERIVED_KEY_LEN];
    hk.expand(category.as_bytes(), &mut okm)
        .map_err(|e| KeyfobError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(DerivedKey::new(okm))
}

/// Generate a fresh 32-byte root key from the OS random source.
///
/// A failure of the OS RNG is surfaced as `KeyGenerationFailed` rather
/// than falling back to a weaker source.
pub fn generate_root_key() -> Result<Zeroizing<Vec<u8>>> {
    let mut key = Zeroizing::new(vec![0u8; ROOT_KEY_LEN]);
    rand::rngs::OsRng
        .try_fill_bytes(&mut key)
        .map_err(|e| KeyfobError::KeyGenerationFailed(e.to_string()))?;
    Ok(key)
}
