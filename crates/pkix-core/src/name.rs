//! # GeneralName
//!
//! ```text
//! GeneralName ::= CHOICE {
//!     otherName                   [0] OtherName,
//!     rfc822Name                  [1] IA5String,
//!     dNSName                     [2] IA5String,
//!     x400Address                 [3] ORAddress,
//!     directoryName               [4] Name,
//!     ediPartyName                [5] EDIPartyName,
//!     uniformResourceIdentifier   [6] IA5String,
//!     iPAddress                   [7] OCTET STRING,
//!     registeredID                [8] OBJECT IDENTIFIER }
//! ```
//!
//! Under the implicit tagging of RFC 5280 the string alternatives are
//! primitive `[n]` values. `directoryName` wraps a CHOICE (`Name`) and is
//! therefore explicitly tagged. The alternatives nothing here interprets
//! (`otherName`, `x400Address`, `ediPartyName`) are carried verbatim.

use std::fmt;

use crate::canonical::{Decode, Encode};
use crate::der::{Any, Tag};
use crate::error::{Result, TypeError};
use crate::primitives::ObjectIdentifier;

const RFC822_NAME: Tag = Tag::context(1, false);
const DNS_NAME: Tag = Tag::context(2, false);
const DIRECTORY_NAME: Tag = Tag::context(4, true);
const URI: Tag = Tag::context(6, false);
const IP_ADDRESS: Tag = Tag::context(7, false);
const REGISTERED_ID: Tag = Tag::context(8, false);

/// A sender identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneralName {
    Rfc822Name(String),
    DnsName(String),
    /// The DER `Name` (an RDNSequence), uninterpreted.
    DirectoryName(Any),
    Uri(String),
    /// Four octets for IPv4, sixteen for IPv6.
    IpAddress(Vec<u8>),
    RegisteredId(ObjectIdentifier),
    /// `otherName`, `x400Address` or `ediPartyName`, exactly as encoded.
    Other(Any),
}

impl GeneralName {
    /// An `rfc822Name`; the address must be ASCII.
    pub fn email(address: &str) -> Result<Self> {
        Ok(Self::Rfc822Name(ia5(address.as_bytes(), "rfc822Name")?))
    }

    /// A `dNSName`; the name must be ASCII.
    pub fn dns(name: &str) -> Result<Self> {
        Ok(Self::DnsName(ia5(name.as_bytes(), "dNSName")?))
    }

    /// A `uniformResourceIdentifier`; the URI must be ASCII.
    pub fn uri(uri: &str) -> Result<Self> {
        Ok(Self::Uri(ia5(uri.as_bytes(), "uniformResourceIdentifier")?))
    }

    /// A `directoryName` from the DER of a `Name`.
    pub fn directory(name: Any) -> Result<Self> {
        name.expect_tag(Tag::SEQUENCE, "directoryName")?;
        Ok(Self::DirectoryName(name))
    }

    pub fn ip(octets: &[u8]) -> Result<Self> {
        ip_octets(octets)?;
        Ok(Self::IpAddress(octets.to_vec()))
    }
}

fn ia5(bytes: &[u8], field: &'static str) -> Result<String, TypeError> {
    if !bytes.is_ascii() {
        return Err(TypeError::malformed(field, "non-ASCII octet in IA5String"));
    }
    String::from_utf8(bytes.to_vec()).map_err(|e| TypeError::malformed(field, e.to_string()))
}

fn ip_octets(octets: &[u8]) -> Result<(), TypeError> {
    match octets.len() {
        4 | 16 => Ok(()),
        n => Err(TypeError::malformed(
            "iPAddress",
            format!("{n} octets, expected 4 or 16"),
        )),
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rfc822Name(s) => write!(f, "email:{s}"),
            Self::DnsName(s) => write!(f, "dns:{s}"),
            Self::DirectoryName(name) => write!(f, "dirname:<{} bytes>", name.encoded_len()),
            Self::Uri(s) => write!(f, "uri:{s}"),
            Self::IpAddress(octets) if octets.len() == 4 => {
                write!(f, "ip:{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
            }
            Self::IpAddress(octets) => {
                f.write_str("ip:")?;
                for (i, pair) in octets.chunks(2).enumerate() {
                    if i > 0 {
                        f.write_str(":")?;
                    }
                    for octet in pair {
                        write!(f, "{octet:02x}")?;
                    }
                }
                Ok(())
            }
            Self::RegisteredId(oid) => write!(f, "rid:{oid}"),
            Self::Other(any) => write!(f, "other:{}", any.tag()),
        }
    }
}

impl Encode for GeneralName {
    fn to_any(&self) -> Any {
        match self {
            Self::Rfc822Name(s) => Any::new(RFC822_NAME, s.as_bytes()),
            Self::DnsName(s) => Any::new(DNS_NAME, s.as_bytes()),
            Self::DirectoryName(name) => Any::constructed(DIRECTORY_NAME, std::slice::from_ref(name)),
            Self::Uri(s) => Any::new(URI, s.as_bytes()),
            Self::IpAddress(octets) => Any::new(IP_ADDRESS, octets.clone()),
            Self::RegisteredId(oid) => oid.to_any().retagged(REGISTERED_ID),
            Self::Other(any) => any.clone(),
        }
    }
}

impl Decode for GeneralName {
    fn from_any(any: &Any) -> Result<Self> {
        let tag = any.tag();
        if !tag.is_context_specific() {
            return Err(TypeError::malformed(
                "GeneralName",
                format!("unexpected {tag}"),
            )
            .into());
        }
        let name = match tag {
            RFC822_NAME => Self::Rfc822Name(ia5(any.value(), "rfc822Name")?),
            DNS_NAME => Self::DnsName(ia5(any.value(), "dNSName")?),
            URI => Self::Uri(ia5(any.value(), "uniformResourceIdentifier")?),
            IP_ADDRESS => {
                ip_octets(any.value())?;
                Self::IpAddress(any.value().to_vec())
            }
            REGISTERED_ID => {
                Self::RegisteredId(ObjectIdentifier::from_any(&any.retagged(Tag::OBJECT_IDENTIFIER))?)
            }
            DIRECTORY_NAME => {
                let inner = any.children()?;
                match inner.as_slice() {
                    [name] => Self::directory(name.clone())?,
                    _ => {
                        return Err(TypeError::malformed(
                            "directoryName",
                            format!("explicit tag holds {} values", inner.len()),
                        )
                        .into())
                    }
                }
            }
            t if matches!(t.number(), 0 | 3 | 5) && t.is_constructed() => Self::Other(any.clone()),
            _ => {
                return Err(TypeError::malformed(
                    "GeneralName",
                    format!("unexpected {tag}"),
                )
                .into())
            }
        };
        Ok(name)
    }
}
