//! Preimage space redaction for ledger blocks.
//!
//! A block may carry a preimage space: the cleartext values of its key-value writes,
//! held alongside the block data so that the writes themselves can be erased while the
//! block stays verifiable. This crate validates that every write of a block is backed
//! by its preimage space and derives the vanilla (cleared) form of a block.

pub mod decoder;
pub mod errors;
pub mod membership;
pub mod preimage;
pub mod redactor;
pub mod testutils;
pub mod validator;

pub use errors::{DecodeResult, DecodeStage, MalformedError, RedactionError, RedactionResult};
pub use membership::{PreimageSet, member_of};
pub use preimage::{PreimageSpace, extract_preimages};
pub use redactor::{attach_preimages, clear_kv_writes, collect_preimages, reinstate_preimages, to_vanilla};
pub use validator::{check_writes_covered, validate};
