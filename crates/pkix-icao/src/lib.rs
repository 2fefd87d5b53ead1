//! # pkix-icao — ICAO Master List Structures
//!
//! Decoding and encoding of the CSCA master list defined in ICAO Doc 9303
//! Part 12. The CMS envelope around a published list is out of scope; this
//! crate consumes and produces the encapsulated content.
//!
//! ## Crate Policy
//!
//! - Depends only on `pkix-core` internally.
//! - Byte-exact round trips are tested against hand-assembled DER, not
//!   against this crate's own encoder alone.

pub mod master_list;

pub use master_list::{MasterList, MasterListSource, MASTER_LIST_V0};
