//! # Certificate Record
//!
//! An X.509 certificate treated as an opaque value. Only the outer shape is
//! checked:
//!
//! ```text
//! Certificate ::= SEQUENCE {
//!     tbsCertificate       TBSCertificate,      -- SEQUENCE
//!     signatureAlgorithm   AlgorithmIdentifier, -- SEQUENCE
//!     signature            BIT STRING }
//! ```
//!
//! The record keeps the exact TLV it was decoded from, so re-encoding is
//! byte-identical no matter how the issuer laid out the inner fields.
//! Every decoding failure, including broken framing inside the record, is
//! reported as a [`TypeError`] against the `certificate` field.

use crate::canonical::{Decode, Encode};
use crate::der::{Any, Tag};
use crate::error::{PkixError, Result, TypeError};

const FIELD: &str = "certificate";

/// One certificate, held as its DER encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CertificateRecord {
    der: Any,
}

impl CertificateRecord {
    /// The record as a TLV.
    pub fn as_any(&self) -> &Any {
        &self.der
    }

    /// Contents of the `tbsCertificate` SEQUENCE.
    pub fn tbs_certificate(&self) -> Result<Any> {
        Ok(self.fields()?.swap_remove(0))
    }

    fn fields(&self) -> Result<Vec<Any>, TypeError> {
        let fields = self.der.children().map_err(as_type_error)?;
        if fields.len() != 3 {
            return Err(TypeError::malformed(
                FIELD,
                format!("expected 3 elements, got {}", fields.len()),
            ));
        }
        let expected = [
            (Tag::SEQUENCE, "tbsCertificate"),
            (Tag::SEQUENCE, "signatureAlgorithm"),
            (Tag::BIT_STRING, "signature"),
        ];
        for (field, (tag, name)) in fields.iter().zip(expected) {
            field.expect_tag(tag, name)?;
        }
        Ok(fields)
    }
}

fn as_type_error(err: PkixError) -> TypeError {
    match err {
        PkixError::Type(e) => e,
        other => TypeError::malformed(FIELD, other.to_string()),
    }
}

impl Encode for CertificateRecord {
    fn to_any(&self) -> Any {
        self.der.clone()
    }
}

impl Decode for CertificateRecord {
    fn from_any(any: &Any) -> Result<Self> {
        any.expect_tag(Tag::SEQUENCE, FIELD)?;
        let record = Self { der: any.clone() };
        let fields = record.fields()?;
        // The TBS body must itself be well-framed.
        fields[0].children().map_err(as_type_error)?;
        Ok(record)
    }
}
