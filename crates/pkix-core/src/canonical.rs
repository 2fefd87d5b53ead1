//! # Canonical DER Bytes
//!
//! This module defines `DerBytes`, the sole construction path for bytes
//! handed to a signer or compared for round-trip fidelity, along with the
//! [`Encode`] and [`Decode`] traits every structure implements.
//!
//! ## Security Invariant
//!
//! `DerBytes` has a private inner field. The only way to obtain one is by
//! encoding an [`Any`], whose writer emits minimal definite lengths and
//! sorts SET OF members. Any function that streams bytes to a signer takes
//! `&DerBytes`, so a hand-assembled or BER-encoded buffer cannot reach the
//! signature path.

use crate::config::DecodeLimits;
use crate::der::Any;
use crate::error::Result;

/// Bytes produced exclusively by the DER writer.
///
/// # Invariants
///
/// - Constructed only by [`Any::to_der`] (and therefore by [`Encode::to_der`]).
/// - Every length is definite and minimal; every SET OF is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerBytes(Vec<u8>);

impl DerBytes {
    pub(crate) fn from_encoded(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Access the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the encoding.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the encoding is empty. Never true for a real value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the encoded bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for DerBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for DerBytes {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<Vec<u8>> for DerBytes {
    fn eq(&self, other: &Vec<u8>) -> bool {
        &self.0 == other
    }
}

/// A structure with a DER representation.
pub trait Encode {
    /// The structure as a single TLV.
    fn to_any(&self) -> Any;

    /// The structure's DER encoding.
    fn to_der(&self) -> DerBytes {
        self.to_any().to_der()
    }
}

/// A structure that can be read back from DER.
pub trait Decode: Sized {
    /// Decode from an already framed TLV.
    fn from_any(any: &Any) -> Result<Self>;

    /// Decode from a complete DER buffer.
    fn from_der(bytes: &[u8]) -> Result<Self> {
        Self::from_der_with_limits(bytes, &DecodeLimits::default())
    }

    /// Decode from a complete DER buffer, enforcing `limits` on the input.
    fn from_der_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<Self> {
        let any = Any::from_der_with_limits(bytes, limits)?;
        Self::from_any(&any)
    }
}

impl Encode for Any {
    fn to_any(&self) -> Any {
        self.clone()
    }
}

impl Decode for Any {
    fn from_any(any: &Any) -> Result<Self> {
        Ok(any.clone())
    }
}
