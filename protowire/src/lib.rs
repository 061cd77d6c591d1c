//! Protobuf messages of the ledger block format.
//!
//! The message structs mirror the platform's `common`, `peer` and `rwset`
//! packages field for field (same tags, same wire types), so blocks produced by
//! the ledger decode and re-encode without loss of modelled fields. They are
//! maintained in-tree instead of being generated at build time.
//!
//! `BlockData` additionally carries the `preimage_space` side channel
//! (tag 2) holding the cleartext values erased from the block's writes.

#[allow(clippy::derive_partial_eq_without_eq)]
pub mod common;
#[allow(clippy::derive_partial_eq_without_eq)]
pub mod kvrwset;
#[allow(clippy::derive_partial_eq_without_eq)]
pub mod peer;
#[allow(clippy::derive_partial_eq_without_eq)]
pub mod rwset;

pub mod codec;
pub mod raw;

pub use prost::{DecodeError, Message};
