//! # CSCA Master List
//!
//! A master list is the set of Country Signing CA certificates one issuing
//! authority vouches for. It is normally wrapped in CMS SignedData and
//! published through the PKD; this module handles only the inner content:
//!
//! ```text
//! CscaMasterList ::= SEQUENCE {
//!     version    CscaMasterListVersion,
//!     certList   SET OF Certificate }
//!
//! CscaMasterListVersion ::= INTEGER { v0(0) }
//! ```
//!
//! ## Invariants
//!
//! - The top-level SEQUENCE has exactly two elements. Anything else is a
//!   `FormatError`, never a defaulted field.
//! - The version is informational. Any INTEGER that fits in 64 bits is
//!   preserved and does not gate decoding of the certificate set; wider
//!   values are `TypeError::OutOfRange`.
//! - A single malformed certificate fails the whole decode.
//! - Certificates keep the order they had on the wire. Encoding emits the
//!   DER SET OF order, so `to_der(from_der(b)) == b` for canonical `b`.
//!
//! ## Concurrency
//!
//! `MasterList` is immutable after construction and is `Send + Sync`.
//! Accessors hand out owned copies; no caller can reach the internal
//! sequence.

use pkix_core::{
    Any, CertificateRecord, Decode, DecodeLimits, Encode, FormatError, Integer, PkixError, Result,
    Tag,
};
use tracing::{debug, warn};

/// The only version defined by Doc 9303.
pub const MASTER_LIST_V0: i64 = 0;

/// A decoded or assembled CSCA master list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterList {
    version: i64,
    certificates: Vec<CertificateRecord>,
}

/// What [`MasterList::get_instance`] accepts.
#[derive(Debug, Clone)]
pub enum MasterListSource {
    /// An already typed master list, passed through untouched.
    MasterList(MasterList),
    /// A generic SEQUENCE to be decoded.
    Sequence(Any),
    /// Anything else; rejected.
    Other(Any),
}

impl From<MasterList> for MasterListSource {
    fn from(list: MasterList) -> Self {
        Self::MasterList(list)
    }
}

impl From<Any> for MasterListSource {
    fn from(any: Any) -> Self {
        if any.tag() == Tag::SEQUENCE {
            Self::Sequence(any)
        } else {
            Self::Other(any)
        }
    }
}

impl MasterList {
    /// A version 0 list holding a copy of `certificates`.
    pub fn new(certificates: &[CertificateRecord]) -> Self {
        Self::with_version(MASTER_LIST_V0, certificates)
    }

    /// A list with an explicit version number.
    pub fn with_version(version: i64, certificates: &[CertificateRecord]) -> Self {
        Self {
            version,
            certificates: certificates.to_vec(),
        }
    }

    /// Resolve `source` into a master list.
    ///
    /// `None` yields `Ok(None)`. A typed list is returned as is, without
    /// re-encoding or re-validation. A SEQUENCE is decoded. Anything else is
    /// an argument error.
    pub fn get_instance(source: Option<MasterListSource>) -> Result<Option<Self>> {
        match source {
            None => Ok(None),
            Some(MasterListSource::MasterList(list)) => Ok(Some(list)),
            Some(MasterListSource::Sequence(seq)) => Self::from_sequence(&seq).map(Some),
            Some(MasterListSource::Other(any)) => Err(PkixError::Argument(format!(
                "unrecognized input type in get_instance: {}",
                any.tag()
            ))),
        }
    }

    /// Decode from an already framed SEQUENCE.
    pub fn from_sequence(seq: &Any) -> Result<Self> {
        Self::decode_sequence(seq, &DecodeLimits::default())
    }

    fn decode_sequence(seq: &Any, limits: &DecodeLimits) -> Result<Self> {
        seq.expect_tag(Tag::SEQUENCE, "CscaMasterList")?;
        let fields = seq.children()?;
        let (version_field, cert_set) = match fields.as_slice() {
            [] => return Err(FormatError::EmptyInput.into()),
            [version, certs] => (version, certs),
            _ => {
                return Err(FormatError::WrongArity {
                    expected: 2,
                    got: fields.len(),
                }
                .into())
            }
        };

        version_field.expect_tag(Tag::INTEGER, "version")?;
        let version = Integer::from_any(version_field)?.value();
        if version != MASTER_LIST_V0 {
            warn!(version, "master list carries an unrecognized version");
        }

        cert_set.expect_tag(Tag::SET, "certList")?;
        let members = cert_set.children()?;
        if members.len() > limits.max_set_members {
            return Err(FormatError::TooManyMembers {
                count: members.len(),
                limit: limits.max_set_members,
            }
            .into());
        }
        let certificates = members
            .iter()
            .map(CertificateRecord::from_any)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            version,
            certificates = certificates.len(),
            "decoded master list"
        );
        Ok(Self {
            version,
            certificates,
        })
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// An independent copy of the certificate sequence.
    pub fn certificates(&self) -> Vec<CertificateRecord> {
        self.certificates.clone()
    }

    /// Borrowing iteration in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &CertificateRecord> {
        self.certificates.iter()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}

impl Encode for MasterList {
    fn to_any(&self) -> Any {
        let members: Vec<Any> = self.certificates.iter().map(Encode::to_any).collect();
        let any = Any::sequence(&[
            Integer::new(self.version).to_any(),
            Any::set_of(&members),
        ]);
        debug!(
            version = self.version,
            certificates = members.len(),
            encoded_len = any.encoded_len(),
            "encoded master list"
        );
        any
    }
}

impl Decode for MasterList {
    fn from_any(any: &Any) -> Result<Self> {
        Self::decode_sequence(any, &DecodeLimits::default())
    }

    fn from_der_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<Self> {
        let any = Any::from_der_with_limits(bytes, limits)?;
        Self::decode_sequence(&any, limits)
    }
}
