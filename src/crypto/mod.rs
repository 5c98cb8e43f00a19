//! Cryptographic primitives for Keyfob.
//!
//! This module provides:
//! - HKDF-SHA256 per-service key derivation and root key generation (`derive`)
//! - The `DerivedKey` wrapper type (`keys`)

pub mod derive;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, generate_root_key, DerivedKey};
pub use derive::{derive_key, generate_root_key, validate_service_key, MIN_KEY_LEN, ROOT_KEY_LEN};
pub use keys::{DerivedKey, DERIVED_KEY_LEN};
