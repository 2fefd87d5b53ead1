//! # Ed25519 Keys and Content Signer
//!
//! Key generation and a [`ContentSigner`] backend that signs the streamed
//! DER of a structure with Ed25519 (RFC 8410).
//!
//! ## Security Invariant
//!
//! - Private keys are never serialized or logged. `Ed25519KeyPair` does not
//!   implement `Serialize` and its `Debug` output is redacted.
//! - The only signing input is what a builder streamed into
//!   [`Ed25519ContentSigner::output`].
//! - A signer asked for a signature over nothing refuses. An empty buffer
//!   means the caller skipped the write phase.

use std::io::Write;

use ed25519_dalek::Signer;
use pkix_core::{
    AlgorithmIdentifier, BitString, ContentSigner, ObjectIdentifier, PkixError, Result,
    SubjectPublicKeyInfo,
};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::hex::{hex_prefix, to_hex};

/// The `id-Ed25519` AlgorithmIdentifier. Parameters are absent (RFC 8410 §3).
pub fn ed25519_algorithm() -> AlgorithmIdentifier {
    AlgorithmIdentifier::new(ObjectIdentifier::ed25519())
}

/// An Ed25519 public key (32 bytes). Serializes as lowercase hex.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The key as a `SubjectPublicKeyInfo`, ready for a certificate request.
    pub fn subject_public_key_info(&self) -> SubjectPublicKeyInfo {
        SubjectPublicKeyInfo::new(ed25519_algorithm(), BitString::new(self.0.to_vec()))
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(&self.0))
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex_prefix(&self.0))
    }
}

/// An Ed25519 key pair. Only a content signer ever uses the private half.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl Ed25519KeyPair {
    /// Generate a new random key pair from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Create a key pair from a 32-byte private key seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Shorthand for `public_key().subject_public_key_info()`.
    pub fn subject_public_key_info(&self) -> SubjectPublicKeyInfo {
        self.public_key().subject_public_key_info()
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Content signer
// ---------------------------------------------------------------------------

/// A [`ContentSigner`] that buffers written bytes and signs them on demand.
///
/// Each call to `signature()` consumes the buffer, so one signer can serve
/// several builds in sequence.
#[derive(Debug)]
pub struct Ed25519ContentSigner {
    key: Ed25519KeyPair,
    buffer: Vec<u8>,
}

impl Ed25519ContentSigner {
    pub fn new(key: Ed25519KeyPair) -> Self {
        Self {
            key,
            buffer: Vec::new(),
        }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.key.public_key()
    }

    /// Bytes written since the last signature.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

impl ContentSigner for Ed25519ContentSigner {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.buffer
    }

    fn algorithm_identifier(&self) -> AlgorithmIdentifier {
        ed25519_algorithm()
    }

    fn signature(&mut self) -> Result<Vec<u8>> {
        if self.buffer.is_empty() {
            return Err(PkixError::Signer(
                "signature requested before any content was written".to_string(),
            ));
        }
        let content = std::mem::take(&mut self.buffer);
        let signature = self.key.signing_key.sign(&content);
        debug!(content_len = content.len(), "signed streamed content");
        Ok(signature.to_bytes().to_vec())
    }
}
