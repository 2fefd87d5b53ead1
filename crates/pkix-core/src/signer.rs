//! # Content Signer Capability
//!
//! Abstracts "digest these bytes and sign them" behind a trait so that
//! structure builders never touch key material. Backends range from an
//! in-memory Ed25519 key to an HSM session.
//!
//! ## Ordering Contract
//!
//! A signer is used in two phases:
//!
//! 1. Every byte to be authenticated is written to [`ContentSigner::output`].
//! 2. Only then are [`ContentSigner::algorithm_identifier`] and
//!    [`ContentSigner::signature`] called.
//!
//! A caller that asks for the signature before the content is complete gets
//! a signature over a prefix, which verifies against nothing. Builders in
//! this workspace encode the full structure into a `DerBytes` first and
//! write it in a single `write_all` before touching either accessor.

use std::io::Write;

use crate::algorithm::AlgorithmIdentifier;
use crate::error::Result;

/// A signing backend that consumes the exact bytes to authenticate.
pub trait ContentSigner {
    /// Sink receiving the bytes to be signed.
    fn output(&mut self) -> &mut dyn Write;

    /// Identifier of the signature algorithm this signer applies.
    fn algorithm_identifier(&self) -> AlgorithmIdentifier;

    /// Signature over everything written to [`ContentSigner::output`] so far.
    fn signature(&mut self) -> Result<Vec<u8>>;
}
