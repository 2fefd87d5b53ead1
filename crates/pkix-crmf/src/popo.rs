//! # Signature-Based Proof of Possession
//!
//! ```text
//! POPOSigningKey ::= SEQUENCE {
//!     poposkInput          [0] POPOSigningKeyInput OPTIONAL,
//!     algorithmIdentifier  AlgorithmIdentifier,
//!     signature            BIT STRING }
//!
//! POPOSigningKeyInput ::= SEQUENCE {
//!     authInfo  CHOICE {
//!         sender        [0] GeneralName,
//!         publicKeyMAC  PKMACValue },
//!     publicKey  SubjectPublicKeyInfo }
//! ```
//!
//! `poposkInput` is IMPLICIT (the SEQUENCE tag is replaced by `[0]`). The
//! `sender` alternative tags a CHOICE and is therefore EXPLICIT: `[0]`
//! wraps the full GeneralName TLV.
//!
//! ## Security Invariant
//!
//! `AuthInfo` is one enum, so a decoded or built input carries exactly one
//! alternative. The only surface that accepts both alternatives separately
//! is [`PopoSigningKeyInput::from_parts`], which rejects both-present and
//! neither-present with a `StateError`.

use pkix_core::{
    AlgorithmIdentifier, Any, BitString, Decode, Encode, GeneralName, Result, StateError,
    SubjectPublicKeyInfo, Tag, TypeError,
};

use crate::pkmac::PkMacValue;

const SENDER: Tag = Tag::context(0, true);
const POPOSK_INPUT: Tag = Tag::context(0, true);

/// The authentication alternative inside a signing-key input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthInfo {
    /// The requester is already known to the CA under this name.
    BySender(GeneralName),
    /// The requester proves knowledge of a shared secret.
    ByMac(PkMacValue),
}

impl Encode for AuthInfo {
    fn to_any(&self) -> Any {
        match self {
            Self::BySender(name) => Any::constructed(SENDER, &[name.to_any()]),
            Self::ByMac(mac) => mac.to_any(),
        }
    }
}

impl Decode for AuthInfo {
    fn from_any(any: &Any) -> Result<Self> {
        match any.tag() {
            SENDER => match any.children()?.as_slice() {
                [name] => Ok(Self::BySender(GeneralName::from_any(name)?)),
                other => Err(TypeError::malformed(
                    "sender",
                    format!("explicit tag holds {} values", other.len()),
                )
                .into()),
            },
            Tag::SEQUENCE => Ok(Self::ByMac(PkMacValue::from_any(any)?)),
            tag => Err(TypeError::malformed("authInfo", format!("unexpected {tag}")).into()),
        }
    }
}

/// The structure whose DER encoding is signed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PopoSigningKeyInput {
    pub auth_info: AuthInfo,
    pub public_key: SubjectPublicKeyInfo,
}

impl PopoSigningKeyInput {
    pub fn new(auth_info: AuthInfo, public_key: SubjectPublicKeyInfo) -> Self {
        Self {
            auth_info,
            public_key,
        }
    }

    /// Assemble from independently optional alternatives.
    ///
    /// Exactly one of `sender` and `mac` must be present.
    pub fn from_parts(
        sender: Option<GeneralName>,
        mac: Option<PkMacValue>,
        public_key: SubjectPublicKeyInfo,
    ) -> Result<Self> {
        let auth_info = match (sender, mac) {
            (Some(_), Some(_)) => return Err(StateError::SenderAndMacBothSet.into()),
            (None, None) => return Err(StateError::NeitherSenderNorMacSet.into()),
            (Some(name), None) => AuthInfo::BySender(name),
            (None, Some(mac)) => AuthInfo::ByMac(mac),
        };
        Ok(Self::new(auth_info, public_key))
    }

    /// The sender name, if this input authenticates by name.
    pub fn sender(&self) -> Option<&GeneralName> {
        match &self.auth_info {
            AuthInfo::BySender(name) => Some(name),
            AuthInfo::ByMac(_) => None,
        }
    }

    /// The MAC value, if this input authenticates by shared secret.
    pub fn public_key_mac(&self) -> Option<&PkMacValue> {
        match &self.auth_info {
            AuthInfo::ByMac(mac) => Some(mac),
            AuthInfo::BySender(_) => None,
        }
    }
}

impl Encode for PopoSigningKeyInput {
    fn to_any(&self) -> Any {
        Any::sequence(&[self.auth_info.to_any(), self.public_key.to_any()])
    }
}

impl Decode for PopoSigningKeyInput {
    fn from_any(any: &Any) -> Result<Self> {
        let fields = any.sequence_fields("POPOSigningKeyInput", 2)?;
        Ok(Self {
            auth_info: AuthInfo::from_any(&fields[0])?,
            public_key: SubjectPublicKeyInfo::from_any(&fields[1])?,
        })
    }
}

/// A signed proof of possession.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PopoSigningKey {
    pub input: PopoSigningKeyInput,
    pub algorithm: AlgorithmIdentifier,
    pub signature: BitString,
}

impl PopoSigningKey {
    pub fn new(
        input: PopoSigningKeyInput,
        algorithm: AlgorithmIdentifier,
        signature: BitString,
    ) -> Self {
        Self {
            input,
            algorithm,
            signature,
        }
    }
}

impl Encode for PopoSigningKey {
    fn to_any(&self) -> Any {
        Any::sequence(&[
            self.input.to_any().retagged(POPOSK_INPUT),
            self.algorithm.to_any(),
            self.signature.to_any(),
        ])
    }
}

impl Decode for PopoSigningKey {
    /// Requires `poposkInput`. RFC 4211 omits it only when the certificate
    /// template already carries subject and public key, a form this crate
    /// never produces.
    fn from_any(any: &Any) -> Result<Self> {
        let fields = any.sequence_fields("POPOSigningKey", 3)?;
        fields[0].expect_tag(POPOSK_INPUT, "poposkInput")?;
        Ok(Self {
            input: PopoSigningKeyInput::from_any(&fields[0].retagged(Tag::SEQUENCE))?,
            algorithm: AlgorithmIdentifier::from_any(&fields[1])?,
            signature: BitString::from_any(&fields[2])?,
        })
    }
}
