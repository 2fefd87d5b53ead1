//! # Proof-of-Possession Builder Tests
//!
//! Exercises the builder against a recording signer that checks the
//! write-before-sign ordering, and against the real Ed25519 signer.

use std::cell::Cell;
use std::io::Write;

use ed25519_dalek::Verifier;
use pkix_core::{
    AlgorithmIdentifier, Any, BitString, ContentSigner, Decode, Encode, GeneralName,
    ObjectIdentifier, PkixError, Result, StateError, SubjectPublicKeyInfo,
};
use pkix_crmf::{
    AuthInfo, PkMacValue, PopoSigningKey, PopoSigningKeyInput, ProofOfPossessionBuilder,
};
use pkix_crypto::{Ed25519ContentSigner, Ed25519KeyPair, Ed25519PublicKey};

/// Records every byte written and every accessor call.
#[derive(Default)]
struct RecordingSigner {
    written: Vec<u8>,
    flushed: bool,
    algorithm_calls: Cell<usize>,
    signature_calls: usize,
    accessor_before_write: Cell<bool>,
}

impl RecordingSigner {
    fn touched(&self) -> bool {
        !self.written.is_empty() || self.algorithm_calls.get() > 0 || self.signature_calls > 0
    }
}

impl Write for RecordingSigner {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

impl ContentSigner for RecordingSigner {
    fn output(&mut self) -> &mut dyn Write {
        self
    }

    fn algorithm_identifier(&self) -> AlgorithmIdentifier {
        if self.written.is_empty() {
            self.accessor_before_write.set(true);
        }
        self.algorithm_calls.set(self.algorithm_calls.get() + 1);
        AlgorithmIdentifier::new(ObjectIdentifier::ed25519())
    }

    fn signature(&mut self) -> Result<Vec<u8>> {
        if self.written.is_empty() {
            self.accessor_before_write.set(true);
        }
        self.signature_calls += 1;
        Ok(vec![0x5a; 64])
    }
}

/// A signer whose sink always fails.
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl ContentSigner for BrokenSink {
    fn output(&mut self) -> &mut dyn Write {
        self
    }

    fn algorithm_identifier(&self) -> AlgorithmIdentifier {
        AlgorithmIdentifier::new(ObjectIdentifier::ed25519())
    }

    fn signature(&mut self) -> Result<Vec<u8>> {
        Ok(vec![0x00])
    }
}

fn verifying_key(public_key: &Ed25519PublicKey) -> ed25519_dalek::VerifyingKey {
    ed25519_dalek::VerifyingKey::from_bytes(public_key.as_bytes()).unwrap()
}

fn spki() -> SubjectPublicKeyInfo {
    Ed25519KeyPair::from_seed(&[3u8; 32]).subject_public_key_info()
}

fn sender() -> GeneralName {
    GeneralName::email("ra@example.org").unwrap()
}

fn mac() -> PkMacValue {
    PkMacValue::new(
        AlgorithmIdentifier::new(ObjectIdentifier::password_based_mac()),
        BitString::new(vec![0xc3; 32]),
    )
}

// ---------------------------------------------------------------------------
// Authentication choice
// ---------------------------------------------------------------------------

#[test]
fn test_neither_set_fails_before_signer_is_touched() {
    let builder = ProofOfPossessionBuilder::new(spki());
    let mut signer = RecordingSigner::default();
    match builder.build(&mut signer) {
        Err(PkixError::State(StateError::NeitherSenderNorMacSet)) => {}
        other => panic!("expected NeitherSenderNorMacSet, got {other:?}"),
    }
    assert!(!signer.touched());
}

#[test]
fn test_neither_set_message() {
    let err = ProofOfPossessionBuilder::new(spki())
        .build(&mut RecordingSigner::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid builder state: neither sender nor mac set");
}

#[test]
fn test_both_set_rejected_at_input_assembly() {
    let err = PopoSigningKeyInput::from_parts(Some(sender()), Some(mac()), spki()).unwrap_err();
    assert_eq!(err.to_string(), "invalid builder state: sender and mac both set");
}

#[test]
fn test_mac_then_sender_builds_with_sender_only() {
    let mut builder = ProofOfPossessionBuilder::new(spki());
    builder.set_mac_builder(mac()).set_sender(sender());
    let popo = builder.build(&mut RecordingSigner::default()).unwrap();
    assert_eq!(popo.input.sender(), Some(&sender()));
    assert!(popo.input.public_key_mac().is_none());
}

#[test]
fn test_sender_then_mac_builds_with_mac_only() {
    let mut builder = ProofOfPossessionBuilder::new(spki());
    builder.set_sender(sender()).set_mac_builder(mac());
    let popo = builder.build(&mut RecordingSigner::default()).unwrap();
    assert_eq!(popo.input.auth_info, AuthInfo::ByMac(mac()));
}

// ---------------------------------------------------------------------------
// Signer ordering
// ---------------------------------------------------------------------------

#[test]
fn test_full_input_written_before_accessors() {
    let mut builder = ProofOfPossessionBuilder::new(spki());
    builder.set_sender(sender());
    let mut signer = RecordingSigner::default();
    let popo = builder.build(&mut signer).unwrap();

    assert!(!signer.accessor_before_write.get());
    assert!(signer.flushed);
    assert_eq!(signer.algorithm_calls.get(), 1);
    assert_eq!(signer.signature_calls, 1);

    let expected = PopoSigningKeyInput::new(AuthInfo::BySender(sender()), spki()).to_der();
    assert_eq!(signer.written, expected.into_vec());
    assert_eq!(
        PopoSigningKeyInput::from_der(&signer.written).unwrap(),
        popo.input
    );
}

#[test]
fn test_signature_wrapped_with_zero_unused_bits() {
    let mut builder = ProofOfPossessionBuilder::new(spki());
    builder.set_mac_builder(mac());
    let popo = builder.build(&mut RecordingSigner::default()).unwrap();
    assert_eq!(popo.signature.unused_bits(), 0);
    assert_eq!(popo.signature.raw_bytes(), &[0x5a; 64][..]);
    assert_eq!(popo.algorithm, AlgorithmIdentifier::new(ObjectIdentifier::ed25519()));
}

#[test]
fn test_sink_failure_propagates_as_io() {
    let mut builder = ProofOfPossessionBuilder::new(spki());
    builder.set_sender(sender());
    assert!(matches!(
        builder.build(&mut BrokenSink),
        Err(PkixError::Io(_))
    ));
}

#[test]
fn test_builder_reusable_across_signers() {
    let mut builder = ProofOfPossessionBuilder::new(spki());
    builder.set_sender(sender());
    let mut first = RecordingSigner::default();
    let mut second = RecordingSigner::default();
    let a = builder.build(&mut first).unwrap();
    let b = builder.build(&mut second).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.written, second.written);
}

#[test]
fn test_build_through_trait_object() {
    let mut builder = ProofOfPossessionBuilder::new(spki());
    builder.set_sender(sender());
    let mut recording = RecordingSigner::default();
    let signer: &mut dyn ContentSigner = &mut recording;
    assert!(builder.build(signer).is_ok());
}

// ---------------------------------------------------------------------------
// End to end with Ed25519
// ---------------------------------------------------------------------------

#[test]
fn test_ed25519_signature_verifies_over_input_der() {
    let key = Ed25519KeyPair::from_seed(&[9u8; 32]);
    let public_key = key.public_key();
    let mut builder = ProofOfPossessionBuilder::new(key.subject_public_key_info());
    builder.set_sender(GeneralName::dns("client.example").unwrap());

    let mut signer = Ed25519ContentSigner::new(key);
    let popo = builder.build(&mut signer).unwrap();

    assert_eq!(popo.algorithm.algorithm.to_string(), "1.3.101.112");
    assert!(popo.algorithm.parameters.is_none());
    assert_eq!(popo.signature.raw_bytes().len(), 64);

    let signed = popo.input.to_der();
    let sig = ed25519_dalek::Signature::from_slice(popo.signature.raw_bytes()).unwrap();
    verifying_key(&public_key)
        .verify(signed.as_bytes(), &sig)
        .expect("signature covers the DER of the input");
}

#[test]
fn test_ed25519_signer_serves_consecutive_builds() {
    let key = Ed25519KeyPair::generate();
    let public_key = verifying_key(&key.public_key());
    let mut builder = ProofOfPossessionBuilder::new(key.subject_public_key_info());
    let mut signer = Ed25519ContentSigner::new(key);

    builder.set_sender(sender());
    let first = builder.build(&mut signer).unwrap();
    builder.set_mac_builder(mac());
    let second = builder.build(&mut signer).unwrap();

    for popo in [&first, &second] {
        let sig = ed25519_dalek::Signature::from_slice(popo.signature.raw_bytes()).unwrap();
        assert!(public_key.verify(popo.input.to_der().as_bytes(), &sig).is_ok());
    }
}

#[test]
fn test_built_structure_round_trips() {
    let key = Ed25519KeyPair::from_seed(&[5u8; 32]);
    let mut builder = ProofOfPossessionBuilder::new(key.subject_public_key_info());
    builder.set_mac_builder(mac());
    let popo = builder.build(&mut Ed25519ContentSigner::new(key)).unwrap();

    let der = popo.to_der();
    let outer = Any::from_der(der.as_bytes()).unwrap();
    assert_eq!(outer.children().unwrap()[0].tag().byte(), 0xa0);
    assert_eq!(PopoSigningKey::from_der(der.as_bytes()).unwrap(), popo);
}
