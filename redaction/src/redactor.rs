use crate::{
    decoder::{TxWriteSet, decode_block_writes, for_each_write_set_mut},
    errors::{DecodeResult, RedactionError, RedactionResult},
    preimage::PreimageSpace,
};
use erasure_core::{debug, trace};
use erasure_protowire::{common::Block, kvrwset::KvWrite};

/// A write whose value was cleared carries no cleartext
pub fn is_cleared(write: &KvWrite) -> bool {
    write.value.is_empty()
}

/// Replaces the value of every key-value write of `block` with the empty placeholder.
/// Keys, delete flags, reads and every other field are preserved. Returns the number
/// of writes that still held a value.
pub fn clear_kv_writes(block: &mut Block) -> DecodeResult<usize> {
    let mut cleared = 0;
    for_each_write_set_mut(block, |envelope, namespace, kv| {
        for write in kv.writes.iter_mut().filter(|write| !is_cleared(write)) {
            trace!("Clearing write {} of namespace {} in envelope {}", write.key, namespace, envelope);
            write.value.clear();
            cleared += 1;
        }
    })?;
    Ok(cleared)
}

/// Derives the vanilla form of `block`: an equivalent block in which every write value is
/// cleared while the attached preimage space is kept. Applying it twice yields the same block.
pub fn to_vanilla(block: &Block) -> DecodeResult<Block> {
    let mut vanilla = block.clone();
    let cleared = clear_kv_writes(&mut vanilla)?;
    debug!("Derived vanilla form of block {} ({} write values cleared)", block.number(), cleared);
    Ok(vanilla)
}

/// Attaches `preimages` as the preimage space of `block`, replacing any previous one
pub fn attach_preimages(block: &mut Block, preimages: PreimageSpace) {
    block.data.get_or_insert_with(Default::default).preimage_space = preimages.into_inner();
}

/// Collects the value of every key-value write of `block`, one entry per write in
/// traversal order (envelope, namespace, write). Cleared writes contribute an empty entry.
pub fn collect_preimages(block: &Block) -> DecodeResult<PreimageSpace> {
    Ok(decode_block_writes(block)?.into_iter().flat_map(|tx| tx.namespaces).flat_map(|ns| ns.writes).map(|write| write.value).collect())
}

/// Refills the cleared writes of `block` from `preimages`. Writes and preimages are paired
/// by position in traversal order, so the space must hold exactly one entry per write, as
/// produced by [`collect_preimages`]. Writes that still hold a value are left as they are.
/// Returns the number of writes refilled. On error `block` is left untouched.
pub fn reinstate_preimages(block: &mut Block, preimages: &PreimageSpace) -> RedactionResult<usize> {
    let writes: usize = decode_block_writes(block)?.iter().map(TxWriteSet::write_count).sum();
    if writes != preimages.len() {
        return Err(RedactionError::PreimageCountMismatch { writes, preimages: preimages.len() });
    }

    let mut values = preimages.iter();
    let mut reinstated = 0;
    for_each_write_set_mut(block, |_, _, kv| {
        for (write, value) in kv.writes.iter_mut().zip(values.by_ref()) {
            if is_cleared(write) && !value.is_empty() {
                write.value = value.to_vec();
                reinstated += 1;
            }
        }
    })?;
    debug!("Reinstated {} of {} write values of block {}", reinstated, writes, block.number());
    Ok(reinstated)
}
