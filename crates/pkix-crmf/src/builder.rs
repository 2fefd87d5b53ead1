//! # Proof-of-Possession Builder
//!
//! Assembles a `POPOSigningKey` by encoding the signing-key input, streaming
//! it to a [`ContentSigner`], and wrapping the returned signature.
//!
//! ## Security Invariant
//!
//! The signer receives the complete DER encoding of the input in one
//! `write_all` before either `algorithm_identifier()` or `signature()` is
//! called. A builder with no authentication alternative, or with both,
//! fails before any byte reaches the signer.

use std::io::Write;

use pkix_core::{BitString, ContentSigner, Encode, GeneralName, Result, SubjectPublicKeyInfo};
use tracing::debug;

use crate::pkmac::PkMacValue;
use crate::popo::{PopoSigningKey, PopoSigningKeyInput};

/// Builder for [`PopoSigningKey`].
///
/// Setting the sender clears the MAC and setting the MAC clears the sender,
/// so the last setter wins. `build` borrows the builder, so one builder can
/// sign with several signers.
///
/// The builder is not internally synchronized. Callers sharing one across
/// threads must hold a lock around each set-then-build sequence.
#[derive(Debug, Clone)]
pub struct ProofOfPossessionBuilder {
    public_key: SubjectPublicKeyInfo,
    sender: Option<GeneralName>,
    mac: Option<PkMacValue>,
}

impl ProofOfPossessionBuilder {
    pub fn new(public_key: SubjectPublicKeyInfo) -> Self {
        Self {
            public_key,
            sender: None,
            mac: None,
        }
    }

    /// Authenticate by sender name. Clears any MAC previously set.
    pub fn set_sender(&mut self, name: GeneralName) -> &mut Self {
        self.sender = Some(name);
        self.mac = None;
        self
    }

    /// Authenticate by public-key MAC. Clears any sender previously set.
    pub fn set_mac_builder(&mut self, mac: PkMacValue) -> &mut Self {
        self.mac = Some(mac);
        self.sender = None;
        self
    }

    pub fn public_key(&self) -> &SubjectPublicKeyInfo {
        &self.public_key
    }

    pub fn sender(&self) -> Option<&GeneralName> {
        self.sender.as_ref()
    }

    pub fn mac(&self) -> Option<&PkMacValue> {
        self.mac.as_ref()
    }

    /// Sign the input with `signer` and return the assembled structure.
    ///
    /// Fails with a `StateError` when neither or both of sender and MAC are
    /// set. The check runs before the signer is touched.
    pub fn build<S: ContentSigner + ?Sized>(&self, signer: &mut S) -> Result<PopoSigningKey> {
        let input = PopoSigningKeyInput::from_parts(
            self.sender.clone(),
            self.mac.clone(),
            self.public_key.clone(),
        )?;
        let encoded = input.to_der();

        let sink = signer.output();
        sink.write_all(encoded.as_bytes())?;
        sink.flush()?;
        debug!(bytes = encoded.len(), "wrote signing-key input to signer");

        let algorithm = signer.algorithm_identifier();
        let signature = signer.signature()?;
        debug!(
            algorithm = %algorithm.algorithm,
            signature_len = signature.len(),
            "built proof of possession"
        );

        Ok(PopoSigningKey::new(input, algorithm, BitString::new(signature)))
    }
}
