use crate::{
    decoder::block_writes,
    errors::{RedactionError, RedactionResult},
    membership::member_of,
    preimage::{PreimageSpace, extract_preimages},
    redactor::is_cleared,
};
use erasure_core::{debug, warn};
use erasure_protowire::common::Block;

/// Validates that every key-value write of `block` is backed by its own attached preimage
/// space and returns the block on success.
///
/// Writes whose value was cleared carry no cleartext and need no backing, so the vanilla
/// form of a valid block validates against the same preimage space.
pub fn validate(block: &Block) -> RedactionResult<Block> {
    let preimages = extract_preimages(block);
    check_writes_covered(&preimages, block)?;
    Ok(block.clone())
}

/// Checks that the value of every write of `block` is a member of `preimages`. Envelopes
/// are decoded and checked in block order and the first write without a preimage aborts
/// the scan.
pub fn check_writes_covered(preimages: &PreimageSpace, block: &Block) -> RedactionResult<()> {
    let set = preimages.to_set();
    let mut checked = 0;
    for tx in block_writes(block)? {
        let tx = tx?;
        for (namespace, write) in tx.writes() {
            if is_cleared(write) {
                continue;
            }
            if !member_of(&write.value, &set) {
                warn!(
                    "Block {}: write to key {} of namespace {} in tx {} has no matching preimage",
                    block.number(),
                    write.key,
                    namespace,
                    tx.tx_id
                );
                return Err(RedactionError::PreimageMismatch {
                    envelope: tx.envelope,
                    tx_id: tx.tx_id.clone(),
                    namespace: namespace.to_string(),
                    key: write.key.clone(),
                });
            }
            checked += 1;
        }
    }
    debug!("Block {}: {} write values covered by {} preimages", block.number(), checked, preimages.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::MalformedError,
        redactor::{attach_preimages, collect_preimages, to_vanilla},
        testutils::{EnvelopeBuilder, block_with_envelopes, kv_rwset},
    };
    use erasure_protowire::common::HeaderType;

    fn sample_block() -> Block {
        let mut block = block_with_envelopes(
            3,
            vec![
                EnvelopeBuilder::endorser("tx-a").namespace("assets", kv_rwset(&[("k1", b"v1"), ("k2", b"v2")])).build(),
                EnvelopeBuilder::endorser("tx-b").namespace("assets", kv_rwset(&[("k3", b"v3")])).build(),
            ],
        );
        let preimages = collect_preimages(&block).unwrap();
        attach_preimages(&mut block, preimages);
        block
    }

    #[test]
    fn test_validate_returns_block() {
        let block = sample_block();
        assert_eq!(validate(&block).unwrap(), block);
    }

    #[test]
    fn test_missing_preimage() {
        let mut block = sample_block();
        attach_preimages(&mut block, vec![b"v1".to_vec(), b"v2".to_vec()].into());
        let err = validate(&block).unwrap_err();
        assert_eq!(
            err,
            RedactionError::PreimageMismatch {
                envelope: 1,
                tx_id: "tx-b".to_string(),
                namespace: "assets".to_string(),
                key: "k3".to_string()
            }
        );
        assert!(err.is_preimage_mismatch());
    }

    #[test]
    fn test_first_mismatch_aborts() {
        let mut block = sample_block();
        attach_preimages(&mut block, PreimageSpace::new());
        match validate(&block).unwrap_err() {
            RedactionError::PreimageMismatch { envelope, key, .. } => {
                assert_eq!(envelope, 0);
                assert_eq!(key, "k1");
            }
            err => panic!("unexpected error {err}"),
        }
    }

    #[test]
    fn test_superset_and_duplicates_pass() {
        let mut block = sample_block();
        let preimages = vec![b"x".to_vec(), b"v3".to_vec(), b"v2".to_vec(), b"v1".to_vec(), b"v1".to_vec(), vec![]];
        attach_preimages(&mut block, preimages.into());
        assert!(validate(&block).is_ok());
    }

    #[test]
    fn test_vanilla_block_validates() {
        let block = sample_block();
        let vanilla = to_vanilla(&block).unwrap();
        assert!(validate(&vanilla).is_ok());

        // Cleared writes need no backing at all
        let mut bare = vanilla.clone();
        attach_preimages(&mut bare, PreimageSpace::new());
        assert!(validate(&bare).is_ok());
    }

    #[test]
    fn test_empty_block_validates() {
        assert!(validate(&block_with_envelopes(0, vec![])).is_ok());
    }

    #[test]
    fn test_only_first_action_is_checked() {
        let mut block = block_with_envelopes(
            1,
            vec![
                EnvelopeBuilder::endorser("tx")
                    .namespace("ns", kv_rwset(&[("a", b"1")]))
                    .action()
                    .namespace("ns", kv_rwset(&[("b", b"uncovered")]))
                    .build(),
            ],
        );
        attach_preimages(&mut block, vec![b"1".to_vec()].into());
        assert!(validate(&block).is_ok());
    }

    #[test]
    fn test_malformed_blocks_are_rejected() {
        let config = block_with_envelopes(1, vec![EnvelopeBuilder::endorser("cfg").header_type(HeaderType::Config).build()]);
        assert!(matches!(validate(&config), Err(RedactionError::Malformed(MalformedError::UnexpectedHeaderType { .. }))));

        assert_eq!(validate(&Block::default()).unwrap_err(), RedactionError::Malformed(MalformedError::MissingBlockData));
    }
}
