//! # pkix-crmf — Certificate Request Proof of Possession
//!
//! Implements the signature-based proof-of-possession structures of
//! RFC 4211 (CRMF):
//!
//! - **PKMACValue** (`pkmac.rs`): MAC-based authentication of a public key.
//! - **POPOSigningKey** (`popo.rs`): the signing-key input, its
//!   authentication choice, and the signed envelope.
//! - **Builder** (`builder.rs`): streams the DER input to a
//!   [`pkix_core::ContentSigner`] and assembles the result.
//!
//! ## Crate Policy
//!
//! - Depends only on `pkix-core` internally. Concrete signers live in
//!   `pkix-crypto` and appear here only as dev-dependencies.
//! - The builder never touches key material.

pub mod builder;
pub mod pkmac;
pub mod popo;

pub use builder::ProofOfPossessionBuilder;
pub use pkmac::PkMacValue;
pub use popo::{AuthInfo, PopoSigningKey, PopoSigningKeyInput};
