//! # pkix-crypto — Signing Backends and Fingerprints
//!
//! Concrete cryptography for the workspace:
//!
//! - **Ed25519** (`ed25519.rs`): key pairs and a buffering
//!   [`pkix_core::ContentSigner`] for proof-of-possession builders.
//! - **Fingerprints** (`fingerprint.rs`): SHA-256 over the exact DER of
//!   master list certificates.
//!
//! ## Crate Policy
//!
//! - No mocking of cryptographic operations in tests. All tests use real
//!   SHA-256 and real Ed25519.
//! - Private key bytes never leave `Ed25519KeyPair`.

pub mod ed25519;
pub mod fingerprint;
mod hex;

pub use ed25519::{ed25519_algorithm, Ed25519ContentSigner, Ed25519KeyPair, Ed25519PublicKey};
pub use fingerprint::{certificate_fingerprint, fingerprints, ContentDigest};
