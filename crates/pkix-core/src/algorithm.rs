//! # Algorithm Identifiers and Public-Key Descriptors
//!
//! ```text
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm   OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY algorithm OPTIONAL }
//!
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         AlgorithmIdentifier,
//!     subjectPublicKey  BIT STRING }
//! ```

use crate::canonical::{Decode, Encode};
use crate::der::{Any, Tag};
use crate::error::{FormatError, Result};
use crate::primitives::{BitString, ObjectIdentifier};

/// An algorithm OID with optional, opaque parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    /// Kept verbatim; absent and explicit NULL are distinct encodings.
    pub parameters: Option<Any>,
}

impl AlgorithmIdentifier {
    /// An identifier with absent parameters.
    pub fn new(algorithm: ObjectIdentifier) -> Self {
        Self {
            algorithm,
            parameters: None,
        }
    }

    pub fn with_parameters(algorithm: ObjectIdentifier, parameters: Any) -> Self {
        Self {
            algorithm,
            parameters: Some(parameters),
        }
    }
}

impl Encode for AlgorithmIdentifier {
    fn to_any(&self) -> Any {
        match &self.parameters {
            Some(params) => Any::sequence(&[self.algorithm.to_any(), params.clone()]),
            None => Any::sequence(&[self.algorithm.to_any()]),
        }
    }
}

impl Decode for AlgorithmIdentifier {
    fn from_any(any: &Any) -> Result<Self> {
        any.expect_tag(Tag::SEQUENCE, "AlgorithmIdentifier")?;
        let mut fields = any.children()?.into_iter();
        let (algorithm, parameters) = match (fields.next(), fields.next(), fields.next()) {
            (Some(oid), params, None) => (ObjectIdentifier::from_any(&oid)?, params),
            (None, _, _) => return Err(FormatError::EmptyInput.into()),
            (Some(_), _, Some(_)) => {
                return Err(FormatError::WrongArity {
                    expected: 2,
                    got: 3 + fields.count(),
                }
                .into())
            }
        };
        Ok(Self {
            algorithm,
            parameters,
        })
    }
}

/// The public key whose possession a proof demonstrates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub subject_public_key: BitString,
}

impl SubjectPublicKeyInfo {
    pub fn new(algorithm: AlgorithmIdentifier, subject_public_key: BitString) -> Self {
        Self {
            algorithm,
            subject_public_key,
        }
    }
}

impl Encode for SubjectPublicKeyInfo {
    fn to_any(&self) -> Any {
        Any::sequence(&[self.algorithm.to_any(), self.subject_public_key.to_any()])
    }
}

impl Decode for SubjectPublicKeyInfo {
    fn from_any(any: &Any) -> Result<Self> {
        let fields = any.sequence_fields("SubjectPublicKeyInfo", 2)?;
        Ok(Self {
            algorithm: AlgorithmIdentifier::from_any(&fields[0])?,
            subject_public_key: BitString::from_any(&fields[1])?,
        })
    }
}
