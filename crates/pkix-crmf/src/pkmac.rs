//! # PKMACValue
//!
//! ```text
//! PKMACValue ::= SEQUENCE {
//!     algId  AlgorithmIdentifier,  -- id-PasswordBasedMac, typically
//!     value  BIT STRING }
//! ```
//!
//! Binds a public key to a shared secret when the requester has no name
//! the CA already knows. Computing the MAC belongs to whoever holds the
//! secret; this type only carries the result.

use pkix_core::{AlgorithmIdentifier, Any, BitString, Decode, Encode, Result};

/// A MAC over the DER of a `SubjectPublicKeyInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PkMacValue {
    pub algorithm: AlgorithmIdentifier,
    pub value: BitString,
}

impl PkMacValue {
    pub fn new(algorithm: AlgorithmIdentifier, value: BitString) -> Self {
        Self { algorithm, value }
    }
}

impl Encode for PkMacValue {
    fn to_any(&self) -> Any {
        Any::sequence(&[self.algorithm.to_any(), self.value.to_any()])
    }
}

impl Decode for PkMacValue {
    fn from_any(any: &Any) -> Result<Self> {
        let fields = any.sequence_fields("PKMACValue", 2)?;
        Ok(Self {
            algorithm: AlgorithmIdentifier::from_any(&fields[0])?,
            value: BitString::from_any(&fields[1])?,
        })
    }
}
