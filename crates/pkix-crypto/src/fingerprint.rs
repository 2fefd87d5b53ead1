//! # Certificate Fingerprints
//!
//! SHA-256 over the exact DER of a certificate, the identifier PKD
//! operators use to compare master lists and deduplicate CSCA sets.
//!
//! ## Security Invariant
//!
//! The digest input is always the `DerBytes` produced by the record's own
//! encoder. `CertificateRecord` re-encodes byte-identically, so the
//! fingerprint of a decoded record equals the fingerprint of the bytes it
//! was read from.

use pkix_core::{CertificateRecord, Encode};
use pkix_icao::MasterList;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::hex::to_hex;

const PREFIX: &str = "sha256:";

/// A SHA-256 certificate fingerprint.
///
/// Displays and serializes as `sha256:<hex>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDigest {
    pub bytes: [u8; 32],
}

impl ContentDigest {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Render the digest as a lowercase hex string, without prefix.
    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PREFIX}{}", self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// SHA-256 fingerprint of one certificate.
pub fn certificate_fingerprint(certificate: &CertificateRecord) -> ContentDigest {
    let hash = Sha256::digest(certificate.to_der().as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(bytes)
}

/// Fingerprints of every certificate in `list`, in the list's order.
pub fn fingerprints(list: &MasterList) -> Vec<ContentDigest> {
    list.iter().map(certificate_fingerprint).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkix_core::Decode;

    const CERT: [u8; 15] = [
        0x30, 0x0d, 0x30, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x02, 0x00, 0x00,
    ];

    fn record() -> CertificateRecord {
        CertificateRecord::from_der(&CERT).unwrap()
    }

    #[test]
    fn test_fingerprint_matches_raw_digest() {
        let expected = Sha256::digest(CERT);
        assert_eq!(&certificate_fingerprint(&record()).bytes[..], &expected[..]);
    }

    #[test]
    fn test_display_is_prefixed_hex() {
        let fp = certificate_fingerprint(&record());
        let shown = fp.to_string();
        assert_eq!(shown, format!("sha256:{}", fp.to_hex()));
        assert_eq!(shown.len(), 7 + 64);
    }

    #[test]
    fn test_serializes_as_display_string() {
        let fp = certificate_fingerprint(&record());
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{fp}\""));
    }

    #[test]
    fn test_master_list_fingerprints_follow_list_order() {
        let a = record();
        let list = MasterList::new(&[a.clone(), a.clone()]);
        let fps = fingerprints(&list);
        assert_eq!(fps.len(), 2);
        assert_eq!(fps[0], fps[1]);
        assert!(fingerprints(&MasterList::new(&[])).is_empty());
    }
}
