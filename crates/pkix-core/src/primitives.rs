//! # Primitive Values — INTEGER, BIT STRING, OBJECT IDENTIFIER
//!
//! Each primitive decodes only its DER form: minimal two's-complement
//! integers, bit strings whose unused bits are zero, and object identifiers
//! with minimally encoded subidentifiers. A value decoded here re-encodes
//! to the identical contents octets.

use std::fmt;
use std::str::FromStr;

use crate::canonical::{Decode, Encode};
use crate::der::{Any, Tag};
use crate::error::{PkixError, Result, TypeError};

// ---------------------------------------------------------------------------
// INTEGER
// ---------------------------------------------------------------------------

/// An INTEGER small enough for `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Integer(i64);

impl Integer {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Minimal two's-complement contents octets.
    fn contents(self) -> Vec<u8> {
        let octets = self.0.to_be_bytes();
        let mut start = 0;
        while start < octets.len() - 1 {
            let (head, next) = (octets[start], octets[start + 1]);
            let redundant = (head == 0x00 && next & 0x80 == 0) || (head == 0xff && next & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        octets[start..].to_vec()
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(i64::from(value))
    }
}

impl Encode for Integer {
    fn to_any(&self) -> Any {
        Any::new(Tag::INTEGER, self.contents())
    }
}

impl Decode for Integer {
    fn from_any(any: &Any) -> Result<Self> {
        any.expect_tag(Tag::INTEGER, "INTEGER")?;
        let v = any.value();
        if v.is_empty() {
            return Err(TypeError::malformed("INTEGER", "empty contents").into());
        }
        if v.len() > 1 && ((v[0] == 0x00 && v[1] & 0x80 == 0) || (v[0] == 0xff && v[1] & 0x80 != 0)) {
            return Err(TypeError::malformed("INTEGER", "not minimally encoded").into());
        }
        if v.len() > 8 {
            return Err(TypeError::OutOfRange { field: "INTEGER" }.into());
        }
        let seed: i64 = if v[0] & 0x80 != 0 { -1 } else { 0 };
        let value = v.iter().fold(seed, |acc, octet| (acc << 8) | i64::from(*octet));
        Ok(Self(value))
    }
}

// ---------------------------------------------------------------------------
// BIT STRING
// ---------------------------------------------------------------------------

/// A BIT STRING: payload octets plus the count of unused trailing bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    unused_bits: u8,
    bytes: Vec<u8>,
}

impl BitString {
    /// An octet-aligned bit string (no unused bits).
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            unused_bits: 0,
            bytes: bytes.into(),
        }
    }

    /// A bit string whose final octet has `unused_bits` padding bits, which
    /// must be zero.
    pub fn with_unused_bits(bytes: impl Into<Vec<u8>>, unused_bits: u8) -> Result<Self> {
        let bytes = bytes.into();
        validate_bit_string(&bytes, unused_bits)?;
        Ok(Self { unused_bits, bytes })
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    /// Payload octets, without the leading unused-bits octet.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - usize::from(self.unused_bits)
    }
}

fn validate_bit_string(bytes: &[u8], unused_bits: u8) -> Result<(), TypeError> {
    if unused_bits > 7 {
        return Err(TypeError::malformed(
            "BIT STRING",
            format!("{unused_bits} unused bits"),
        ));
    }
    match bytes.last() {
        None if unused_bits != 0 => Err(TypeError::malformed(
            "BIT STRING",
            "unused bits declared on empty string",
        )),
        Some(last) if last & ((1u8 << unused_bits) - 1) != 0 => Err(TypeError::malformed(
            "BIT STRING",
            "unused bits are not zero",
        )),
        _ => Ok(()),
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BitString(len={}, unused={})",
            self.bytes.len(),
            self.unused_bits
        )
    }
}

impl Encode for BitString {
    fn to_any(&self) -> Any {
        let mut contents = Vec::with_capacity(self.bytes.len() + 1);
        contents.push(self.unused_bits);
        contents.extend_from_slice(&self.bytes);
        Any::new(Tag::BIT_STRING, contents)
    }
}

impl Decode for BitString {
    fn from_any(any: &Any) -> Result<Self> {
        any.expect_tag(Tag::BIT_STRING, "BIT STRING")?;
        let (unused_bits, bytes) = any
            .value()
            .split_first()
            .ok_or_else(|| TypeError::malformed("BIT STRING", "missing unused-bits octet"))?;
        Self::with_unused_bits(bytes.to_vec(), *unused_bits)
    }
}

// ---------------------------------------------------------------------------
// OBJECT IDENTIFIER
// ---------------------------------------------------------------------------

/// An OBJECT IDENTIFIER, held as its DER contents octets.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier(Vec<u8>);

impl ObjectIdentifier {
    /// Ed25519 (RFC 8410).
    pub fn ed25519() -> Self {
        Self(vec![0x2b, 0x65, 0x70])
    }

    /// Password-based MAC (RFC 4211 §4.4, `1.2.840.113533.7.66.13`).
    pub fn password_based_mac() -> Self {
        Self(vec![0x2a, 0x86, 0x48, 0x86, 0xf6, 0x7d, 0x07, 0x42, 0x0d])
    }

    /// HMAC-SHA256 (RFC 4231, `1.2.840.113549.2.9`).
    pub fn hmac_with_sha256() -> Self {
        Self(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x09])
    }

    /// Build from arcs, e.g. `[1, 3, 101, 112]`.
    pub fn from_arcs(arcs: &[u64]) -> Result<Self> {
        let (first, second, rest) = match arcs {
            [first, second, rest @ ..] => (*first, *second, rest),
            _ => {
                return Err(PkixError::Argument(
                    "object identifier needs at least two arcs".to_string(),
                ))
            }
        };
        if first > 2 || (first < 2 && second >= 40) {
            return Err(PkixError::Argument(format!(
                "invalid leading arcs {first}.{second}"
            )));
        }
        let head = (first * 40).checked_add(second).ok_or_else(|| {
            PkixError::Argument("second arc out of range".to_string())
        })?;
        let mut contents = Vec::new();
        push_base128(head, &mut contents);
        for arc in rest {
            push_base128(*arc, &mut contents);
        }
        Ok(Self(contents))
    }

    /// The arcs in order.
    pub fn arcs(&self) -> Vec<u64> {
        let mut arcs = Vec::new();
        let mut acc = 0u64;
        for octet in &self.0 {
            acc = (acc << 7) | u64::from(octet & 0x7f);
            if octet & 0x80 == 0 {
                if arcs.is_empty() {
                    let first = (acc / 40).min(2);
                    arcs.push(first);
                    arcs.push(acc - first * 40);
                } else {
                    arcs.push(acc);
                }
                acc = 0;
            }
        }
        arcs
    }

    /// Contents octets.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn validate(contents: &[u8]) -> Result<(), TypeError> {
        let Some(last) = contents.last() else {
            return Err(TypeError::malformed("OBJECT IDENTIFIER", "empty contents"));
        };
        if last & 0x80 != 0 {
            return Err(TypeError::malformed(
                "OBJECT IDENTIFIER",
                "truncated subidentifier",
            ));
        }
        let mut start_of_arc = true;
        let mut arc_len = 0usize;
        for octet in contents {
            if start_of_arc && *octet == 0x80 {
                return Err(TypeError::malformed(
                    "OBJECT IDENTIFIER",
                    "subidentifier not minimally encoded",
                ));
            }
            arc_len += 1;
            if arc_len > 9 {
                return Err(TypeError::OutOfRange {
                    field: "OBJECT IDENTIFIER",
                });
            }
            start_of_arc = octet & 0x80 == 0;
            if start_of_arc {
                arc_len = 0;
            }
        }
        Ok(())
    }
}

fn push_base128(mut value: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; 10];
    let mut n = 0;
    loop {
        groups[n] = (value & 0x7f) as u8;
        n += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..n).rev() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arcs = self.arcs();
        for (i, arc) in arcs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectIdentifier({self})")
    }
}

impl FromStr for ObjectIdentifier {
    type Err = PkixError;

    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|e| PkixError::Argument(format!("invalid arc {arc:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_arcs(&arcs)
    }
}

impl Encode for ObjectIdentifier {
    fn to_any(&self) -> Any {
        Any::new(Tag::OBJECT_IDENTIFIER, self.0.clone())
    }
}

impl Decode for ObjectIdentifier {
    fn from_any(any: &Any) -> Result<Self> {
        any.expect_tag(Tag::OBJECT_IDENTIFIER, "OBJECT IDENTIFIER")?;
        Self::validate(any.value())?;
        Ok(Self(any.value().to_vec()))
    }
}
