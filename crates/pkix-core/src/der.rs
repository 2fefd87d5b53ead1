//! # DER Framing — Tag/Length/Value
//!
//! The tagged-binary layer every structure in the workspace is built on.
//! Values are parsed one level at a time: an [`Any`] holds a tag and the raw
//! contents octets, and [`Any::children`] parses the next level on demand.
//!
//! ## Accepted Encoding
//!
//! Only the Distinguished Encoding Rules subset is accepted:
//!
//! - Low tag number form only (tag numbers 0..=30).
//! - Definite lengths, minimally encoded. The indefinite form is rejected.
//! - No bytes after the top-level value.
//!
//! Because every accepted length has exactly one encoding, re-emitting a
//! parsed [`Any`] reproduces its input byte for byte.

use std::cmp::Ordering;
use std::fmt;

use crate::canonical::DerBytes;
use crate::config::DecodeLimits;
use crate::error::{FormatError, Result, TypeError};

/// An identifier octet.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u8);

impl Tag {
    pub const BOOLEAN: Tag = Tag(0x01);
    pub const INTEGER: Tag = Tag(0x02);
    pub const BIT_STRING: Tag = Tag(0x03);
    pub const OCTET_STRING: Tag = Tag(0x04);
    pub const NULL: Tag = Tag(0x05);
    pub const OBJECT_IDENTIFIER: Tag = Tag(0x06);
    pub const UTF8_STRING: Tag = Tag(0x0c);
    pub const PRINTABLE_STRING: Tag = Tag(0x13);
    pub const IA5_STRING: Tag = Tag(0x16);
    pub const SEQUENCE: Tag = Tag(0x30);
    pub const SET: Tag = Tag(0x31);

    const CONSTRUCTED: u8 = 0x20;
    const CLASS_MASK: u8 = 0xc0;
    const CONTEXT_CLASS: u8 = 0x80;
    const NUMBER_MASK: u8 = 0x1f;

    /// Parse an identifier octet, rejecting the high tag number form.
    pub fn from_byte(byte: u8) -> Result<Self, FormatError> {
        if byte & Self::NUMBER_MASK == Self::NUMBER_MASK {
            return Err(FormatError::HighTagNumber(byte));
        }
        Ok(Self(byte))
    }

    /// A context-specific tag `[number]`.
    ///
    /// `number` must be below 31.
    pub const fn context(number: u8, constructed: bool) -> Self {
        let form = if constructed { Self::CONSTRUCTED } else { 0 };
        Self(Self::CONTEXT_CLASS | form | (number & Self::NUMBER_MASK))
    }

    /// The identifier octet.
    pub fn byte(self) -> u8 {
        self.0
    }

    /// The tag number within its class.
    pub fn number(self) -> u8 {
        self.0 & Self::NUMBER_MASK
    }

    pub fn is_constructed(self) -> bool {
        self.0 & Self::CONSTRUCTED != 0
    }

    pub fn is_context_specific(self) -> bool {
        self.0 & Self::CLASS_MASK == Self::CONTEXT_CLASS
    }

    fn universal_name(self) -> Option<&'static str> {
        let name = match self {
            Self::BOOLEAN => "BOOLEAN",
            Self::INTEGER => "INTEGER",
            Self::BIT_STRING => "BIT STRING",
            Self::OCTET_STRING => "OCTET STRING",
            Self::NULL => "NULL",
            Self::OBJECT_IDENTIFIER => "OBJECT IDENTIFIER",
            Self::UTF8_STRING => "UTF8String",
            Self::PRINTABLE_STRING => "PrintableString",
            Self::IA5_STRING => "IA5String",
            Self::SEQUENCE => "SEQUENCE",
            Self::SET => "SET",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.universal_name() {
            return f.write_str(name);
        }
        if self.is_context_specific() {
            return write!(f, "[{}]", self.number());
        }
        write!(f, "tag {:#04x}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self} {:#04x})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Any
// ---------------------------------------------------------------------------

/// A single parsed TLV: tag plus contents octets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Any {
    tag: Tag,
    value: Vec<u8>,
}

impl Any {
    /// A value with the given tag and raw contents.
    pub fn new(tag: Tag, value: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// The NULL value.
    pub fn null() -> Self {
        Self::new(Tag::NULL, Vec::new())
    }

    /// A constructed value whose contents are `children` in the given order.
    pub fn constructed(tag: Tag, children: &[Any]) -> Self {
        let mut value = Vec::with_capacity(children.iter().map(Any::encoded_len).sum());
        for child in children {
            child.encode_to(&mut value);
        }
        Self { tag, value }
    }

    /// A SEQUENCE of `children` in the given order.
    pub fn sequence(children: &[Any]) -> Self {
        Self::constructed(Tag::SEQUENCE, children)
    }

    /// A SET OF `members`, emitted in DER order regardless of input order.
    pub fn set_of(members: &[Any]) -> Self {
        let mut encodings: Vec<Vec<u8>> = members
            .iter()
            .map(|m| {
                let mut out = Vec::with_capacity(m.encoded_len());
                m.encode_to(&mut out);
                out
            })
            .collect();
        encodings.sort_by(|a, b| der_set_order(a, b));
        Self {
            tag: Tag::SET,
            value: encodings.concat(),
        }
    }

    /// The same contents under a different tag (IMPLICIT tagging).
    pub fn retagged(&self, tag: Tag) -> Self {
        Self {
            tag,
            value: self.value.clone(),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The contents octets.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Length of the full TLV encoding.
    pub fn encoded_len(&self) -> usize {
        1 + length_len(self.value.len()) + self.value.len()
    }

    /// Append the full TLV encoding to `out`.
    pub fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(self.tag.byte());
        encode_length(self.value.len(), out);
        out.extend_from_slice(&self.value);
    }

    /// The full TLV encoding.
    pub fn to_der(&self) -> DerBytes {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_to(&mut out);
        DerBytes::from_encoded(out)
    }

    /// Parse exactly one TLV spanning all of `bytes`.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Self::from_der_with_limits(bytes, &DecodeLimits::default())
    }

    /// Parse exactly one TLV spanning all of `bytes`, enforcing `limits`.
    pub fn from_der_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<Self> {
        if bytes.is_empty() {
            return Err(FormatError::EmptyInput.into());
        }
        if bytes.len() > limits.max_input_len {
            return Err(FormatError::InputTooLarge {
                len: bytes.len(),
                limit: limits.max_input_len,
            }
            .into());
        }
        let mut reader = DerReader::new(bytes);
        let any = reader.read_any()?;
        reader.finish()?;
        check_nesting(any.tag, &any.value, 1, limits.max_depth)?;
        Ok(any)
    }

    /// Require this value to carry `expected`.
    pub fn expect_tag(&self, expected: Tag, field: &'static str) -> Result<(), TypeError> {
        if self.tag != expected {
            return Err(TypeError::UnexpectedTag {
                field,
                expected,
                actual: self.tag,
            });
        }
        Ok(())
    }

    /// Parse the contents of a constructed value into its elements.
    pub fn children(&self) -> Result<Vec<Any>> {
        if !self.tag.is_constructed() {
            return Err(TypeError::malformed("children", format!("{} is primitive", self.tag)).into());
        }
        let mut reader = DerReader::new(&self.value);
        let mut out = Vec::new();
        while !reader.is_empty() {
            out.push(reader.read_any()?);
        }
        Ok(out)
    }

    /// Parse a SEQUENCE that must hold exactly `arity` elements.
    pub fn sequence_fields(&self, field: &'static str, arity: usize) -> Result<Vec<Any>> {
        self.expect_tag(Tag::SEQUENCE, field)?;
        let fields = self.children()?;
        if fields.len() != arity {
            return Err(FormatError::WrongArity {
                expected: arity,
                got: fields.len(),
            }
            .into());
        }
        Ok(fields)
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Sequential TLV reader over a borrowed buffer.
#[derive(Debug)]
pub struct DerReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.pos)
    }

    /// Read the next complete TLV.
    pub fn read_any(&mut self) -> Result<Any, FormatError> {
        let (tag, value) = self.read_tlv()?;
        Ok(Any::new(tag, value))
    }

    /// Read the next TLV without copying its contents.
    fn read_tlv(&mut self) -> Result<(Tag, &'a [u8]), FormatError> {
        let tag = Tag::from_byte(self.read_byte()?)?;
        let len = self.read_length()?;
        Ok((tag, self.read_slice(len)?))
    }

    /// Fail if any input is left over.
    pub fn finish(self) -> Result<(), FormatError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(FormatError::TrailingData { remaining }),
        }
    }

    fn read_byte(&mut self) -> Result<u8, FormatError> {
        let byte = *self.input.get(self.pos).ok_or(FormatError::Truncated {
            needed: 1,
            remaining: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_length(&mut self) -> Result<usize, FormatError> {
        let first = self.read_byte()?;
        if first < 0x80 {
            return Ok(usize::from(first));
        }
        if first == 0x80 {
            return Err(FormatError::IndefiniteLength);
        }
        let count = usize::from(first & 0x7f);
        if count > std::mem::size_of::<usize>() {
            return Err(FormatError::LengthOverflow);
        }
        let octets = self.read_slice(count)?;
        if octets[0] == 0 {
            return Err(FormatError::NonMinimalLength);
        }
        let len = octets
            .iter()
            .fold(0usize, |acc, octet| (acc << 8) | usize::from(*octet));
        if len < 0x80 {
            return Err(FormatError::NonMinimalLength);
        }
        Ok(len)
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(FormatError::Truncated {
                needed: len,
                remaining,
            });
        }
        let slice = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

/// Reject constructed values nested more than `limit` levels deep, counting
/// the top-level value as level 1.
///
/// Contents that do not frame are left for the typed decoder to report, so
/// a broken certificate still fails as a `TypeError` on its own field.
fn check_nesting(tag: Tag, value: &[u8], depth: usize, limit: usize) -> Result<(), FormatError> {
    if depth > limit {
        return Err(FormatError::TooDeep { limit });
    }
    if !tag.is_constructed() {
        return Ok(());
    }
    let mut reader = DerReader::new(value);
    while !reader.is_empty() {
        let Ok((child_tag, child_value)) = reader.read_tlv() else {
            return Ok(());
        };
        check_nesting(child_tag, child_value, depth + 1, limit)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Length and ordering helpers
// ---------------------------------------------------------------------------

/// Append a definite, minimal length.
pub(crate) fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let octets = len.to_be_bytes();
    let skip = octets.iter().take_while(|b| **b == 0).count();
    out.push(0x80 | (octets.len() - skip) as u8);
    out.extend_from_slice(&octets[skip..]);
}

fn length_len(len: usize) -> usize {
    if len < 0x80 {
        return 1;
    }
    let significant = std::mem::size_of::<usize>() - (len.leading_zeros() as usize / 8);
    1 + significant
}

/// X.690 §11.6 SET OF ordering: encodings compared as octet strings, the
/// shorter one padded with trailing zero octets.
pub fn der_set_order(a: &[u8], b: &[u8]) -> Ordering {
    let longest = a.len().max(b.len());
    for i in 0..longest {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        if x != y {
            return x.cmp(&y);
        }
    }
    a.len().cmp(&b.len())
}
