//! # pkix-core — Foundational Types for PKIX Structures
//!
//! This crate is the leaf of the workspace. It defines the DER
//! tagged-binary layer, the shared certificate-profile structures, and the
//! signer capability the higher crates build on. Every other crate in the
//! workspace depends on `pkix-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **DER only.** The reader accepts definite, minimal lengths and low tag
//!    numbers; the writer emits exactly that form and sorts SET OF members.
//!    Decoding a canonical buffer and re-encoding it is byte-identical.
//!
//! 2. **`DerBytes` newtype.** Bytes handed to a signer must be `DerBytes`,
//!    which only the writer constructs. No hand-assembled buffers reach the
//!    signature path.
//!
//! 3. **Errors name their kind.** Framing problems are `FormatError`, wrong
//!    field shapes are `TypeError`, builder misuse is `StateError`. Nothing
//!    decodes partially.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pkix-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod algorithm;
pub mod canonical;
pub mod certificate;
pub mod config;
pub mod der;
pub mod error;
pub mod name;
pub mod primitives;
pub mod signer;

// Re-export primary types for ergonomic imports.
pub use algorithm::{AlgorithmIdentifier, SubjectPublicKeyInfo};
pub use canonical::{Decode, DerBytes, Encode};
pub use certificate::CertificateRecord;
pub use config::DecodeLimits;
pub use der::{Any, DerReader, Tag};
pub use error::{FormatError, PkixError, Result, StateError, TypeError};
pub use name::GeneralName;
pub use primitives::{BitString, Integer, ObjectIdentifier};
pub use signer::ContentSigner;
