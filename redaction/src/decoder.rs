//! Decoding of endorser transaction envelopes down to their key-value write sets.
//!
//! Every envelope of a block is unpacked through the nested encodings
//! `Envelope -> Payload -> Transaction -> ChaincodeActionPayload -> ProposalResponsePayload
//! -> ChaincodeAction -> TxReadWriteSet -> KvRwSet`. Only the first action of a transaction
//! is consulted. A failure at any step aborts with a [`MalformedError`] naming the envelope
//! and the step.

use crate::errors::{DecodeResult, DecodeStage, MalformedError};
use erasure_protowire::{
    Message,
    common::{Block, ChannelHeader, Envelope, HeaderType, Payload},
    kvrwset::{KvRwSet, KvWrite},
    peer::{ChaincodeAction, ChaincodeActionPayload, ProposalResponsePayload, Transaction},
    raw::{Occurrence, field_value, replace_field},
    rwset::TxReadWriteSet,
};

/// The writes a transaction performed on a single namespace
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NsWriteSet {
    pub namespace: String,
    pub writes: Vec<KvWrite>,
}

/// The decoded writes of one endorser transaction, in namespace order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TxWriteSet {
    /// Position of the envelope within the block data
    pub envelope: usize,
    pub tx_id: String,
    pub namespaces: Vec<NsWriteSet>,
}

impl TxWriteSet {
    pub fn write_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.writes.len()).sum()
    }

    /// Iterates `(namespace, write)` pairs in traversal order
    pub fn writes(&self) -> impl Iterator<Item = (&str, &KvWrite)> {
        self.namespaces.iter().flat_map(|ns| ns.writes.iter().map(move |write| (ns.namespace.as_str(), write)))
    }
}

fn decode_stage<M: Message + Default>(envelope: usize, stage: DecodeStage, bytes: &[u8]) -> DecodeResult<M> {
    M::decode(bytes).map_err(|source| MalformedError::Decode { envelope, stage, source })
}

/// A length-delimited field of a `stage` message embedding the next layer
#[derive(Clone, Copy)]
struct Link {
    stage: DecodeStage,
    tag: u32,
    field: &'static str,
    occurrence: Occurrence,
}

impl Link {
    const fn new(stage: DecodeStage, tag: u32, field: &'static str) -> Self {
        Self { stage, tag, field, occurrence: Occurrence::Last }
    }
}

const ENVELOPE_PAYLOAD: Link = Link::new(DecodeStage::Envelope, 1, "payload");
const PAYLOAD_DATA: Link = Link::new(DecodeStage::Payload, 2, "data");
const FIRST_ACTION: Link = Link { occurrence: Occurrence::Nth(0), ..Link::new(DecodeStage::Transaction, 1, "actions") };
const ACTION_PAYLOAD: Link = Link::new(DecodeStage::Transaction, 2, "action payload");
const ENDORSED_ACTION: Link = Link::new(DecodeStage::ChaincodeActionPayload, 2, "action");
const RESPONSE_PAYLOAD: Link = Link::new(DecodeStage::ChaincodeActionPayload, 1, "proposal_response_payload");
const CHAINCODE_ACTION: Link = Link::new(DecodeStage::ProposalResponsePayload, 2, "extension");
const RESULTS: Link = Link::new(DecodeStage::ChaincodeAction, 1, "results");
const NS_KV_RWSET: Link = Link::new(DecodeStage::TxReadWriteSet, 2, "rwset");

fn ns_rwset(ns_index: usize) -> Link {
    Link { occurrence: Occurrence::Nth(ns_index), ..Link::new(DecodeStage::TxReadWriteSet, 2, "ns_rwset") }
}

/// An endorser envelope decoded down to the key-value sets of its namespaces, together with
/// its original bytes so that modified sets can be spliced back in.
struct DecodedEnvelope {
    index: usize,
    tx_id: String,
    raw: Vec<u8>,
    namespaces: Vec<String>,
    /// Decoded `rwset` of every namespace, index aligned with `namespaces`
    kv_rwsets: Vec<KvRwSet>,
    /// Namespaces whose key-value set was modified since decoding
    modified: Vec<bool>,
}

impl DecodedEnvelope {
    fn decode(index: usize, bytes: &[u8]) -> DecodeResult<Self> {
        let envelope: Envelope = decode_stage(index, DecodeStage::Envelope, bytes)?;
        let payload: Payload = decode_stage(index, DecodeStage::Payload, &envelope.payload)?;

        let header = payload.header.as_ref().ok_or(MalformedError::MissingField {
            envelope: index,
            stage: DecodeStage::Payload,
            field: "header",
        })?;
        let channel_header: ChannelHeader = decode_stage(index, DecodeStage::ChannelHeader, &header.channel_header)?;
        if channel_header.r#type != HeaderType::EndorserTransaction as i32 {
            return Err(MalformedError::UnexpectedHeaderType { envelope: index, header_type: channel_header.r#type });
        }
        let tx_id = channel_header.tx_id;

        let transaction: Transaction = decode_stage(index, DecodeStage::Transaction, &payload.data)?;
        let Some(first_action) = transaction.actions.first() else {
            return Err(MalformedError::NoActions { envelope: index, tx_id });
        };

        let action_payload: ChaincodeActionPayload =
            decode_stage(index, DecodeStage::ChaincodeActionPayload, &first_action.payload)?;
        let endorsed_action = action_payload.action.ok_or(MalformedError::MissingField {
            envelope: index,
            stage: DecodeStage::ChaincodeActionPayload,
            field: "action",
        })?;
        let response_payload: ProposalResponsePayload =
            decode_stage(index, DecodeStage::ProposalResponsePayload, &endorsed_action.proposal_response_payload)?;
        let chaincode_action: ChaincodeAction = decode_stage(index, DecodeStage::ChaincodeAction, &response_payload.extension)?;
        let tx_rwset: TxReadWriteSet = decode_stage(index, DecodeStage::TxReadWriteSet, &chaincode_action.results)?;
        let kv_rwsets = tx_rwset
            .ns_rwset
            .iter()
            .map(|ns| decode_stage(index, DecodeStage::KvReadWriteSet, &ns.rwset))
            .collect::<DecodeResult<Vec<KvRwSet>>>()?;

        Ok(Self {
            index,
            tx_id,
            raw: bytes.to_vec(),
            namespaces: tx_rwset.ns_rwset.into_iter().map(|ns| ns.namespace).collect(),
            modified: vec![false; kv_rwsets.len()],
            kv_rwsets,
        })
    }

    fn into_write_set(self) -> TxWriteSet {
        let namespaces = self
            .namespaces
            .into_iter()
            .zip(self.kv_rwsets)
            .map(|(namespace, kv)| NsWriteSet { namespace, writes: kv.writes })
            .collect();
        TxWriteSet { envelope: self.index, tx_id: self.tx_id, namespaces }
    }

    fn field<'a>(&self, link: Link, message: &'a [u8]) -> DecodeResult<&'a [u8]> {
        let stage = link.stage;
        field_value(message, link.tag, link.occurrence)
            .map_err(|source| MalformedError::Decode { envelope: self.index, stage, source })?
            .ok_or(MalformedError::MissingField { envelope: self.index, stage, field: link.field })
    }

    fn replace(&self, link: Link, message: &[u8], value: &[u8]) -> DecodeResult<Vec<u8>> {
        replace_field(message, link.tag, link.occurrence, value)
            .map_err(|source| MalformedError::Decode { envelope: self.index, stage: link.stage, source })
    }

    /// Returns the envelope bytes with every modified key-value set spliced in. Each layer on the
    /// path to a modified set is rewritten in the single field embedding the next layer, so all
    /// other bytes are kept and an envelope without modifications is returned as it was decoded.
    fn encode(self) -> DecodeResult<Vec<u8>> {
        if !self.modified.contains(&true) {
            return Ok(self.raw);
        }

        let payload = self.field(ENVELOPE_PAYLOAD, &self.raw)?;
        let transaction = self.field(PAYLOAD_DATA, payload)?;
        let action = self.field(FIRST_ACTION, transaction)?;
        let action_payload = self.field(ACTION_PAYLOAD, action)?;
        let endorsed_action = self.field(ENDORSED_ACTION, action_payload)?;
        let response_payload = self.field(RESPONSE_PAYLOAD, endorsed_action)?;
        let chaincode_action = self.field(CHAINCODE_ACTION, response_payload)?;

        let mut tx_rwset = self.field(RESULTS, chaincode_action)?.to_vec();
        for (ns_index, kv) in self.kv_rwsets.iter().enumerate().filter(|(ns_index, _)| self.modified[*ns_index]) {
            let ns = self.replace(NS_KV_RWSET, self.field(ns_rwset(ns_index), &tx_rwset)?, &kv.encode_to_vec())?;
            tx_rwset = self.replace(ns_rwset(ns_index), &tx_rwset, &ns)?;
        }

        let chaincode_action = self.replace(RESULTS, chaincode_action, &tx_rwset)?;
        let response_payload = self.replace(CHAINCODE_ACTION, response_payload, &chaincode_action)?;
        let endorsed_action = self.replace(RESPONSE_PAYLOAD, endorsed_action, &response_payload)?;
        let action_payload = self.replace(ENDORSED_ACTION, action_payload, &endorsed_action)?;
        let action = self.replace(ACTION_PAYLOAD, action, &action_payload)?;
        let transaction = self.replace(FIRST_ACTION, transaction, &action)?;
        let payload = self.replace(PAYLOAD_DATA, payload, &transaction)?;
        self.replace(ENVELOPE_PAYLOAD, &self.raw, &payload)
    }
}

/// Decodes the key-value writes of a single endorser envelope found at `index` of the block data
pub fn decode_envelope_writes(index: usize, envelope: &[u8]) -> DecodeResult<TxWriteSet> {
    DecodedEnvelope::decode(index, envelope).map(DecodedEnvelope::into_write_set)
}

/// Lazily decodes the envelopes of `block` in block order. Fails upfront only if the block carries no data.
pub fn block_writes(block: &Block) -> DecodeResult<impl Iterator<Item = DecodeResult<TxWriteSet>> + '_> {
    let data = block.data.as_ref().ok_or(MalformedError::MissingBlockData)?;
    Ok(data.data.iter().enumerate().map(|(index, envelope)| decode_envelope_writes(index, envelope)))
}

/// Decodes the key-value writes of every envelope of `block`
pub fn decode_block_writes(block: &Block) -> DecodeResult<Vec<TxWriteSet>> {
    block_writes(block)?.collect()
}

/// Hands the decoded key-value set of every namespace of every envelope to `f` (together
/// with the envelope index and the namespace name) and writes the sets `f` modified back
/// into the block. Envelopes and namespaces left unmodified keep their exact bytes, as do
/// fields of the modified envelopes that are not on the path to a modified set.
///
/// All envelopes are decoded before `f` is first invoked, so on a malformed block the
/// error is returned and `block` is left untouched.
pub fn for_each_write_set_mut<F>(block: &mut Block, mut f: F) -> DecodeResult<()>
where
    F: FnMut(usize, &str, &mut KvRwSet),
{
    let data = block.data.as_mut().ok_or(MalformedError::MissingBlockData)?;
    let mut decoded = data
        .data
        .iter()
        .enumerate()
        .map(|(index, envelope)| DecodedEnvelope::decode(index, envelope))
        .collect::<DecodeResult<Vec<_>>>()?;

    for envelope in decoded.iter_mut() {
        let kvs = envelope.namespaces.iter().zip(envelope.kv_rwsets.iter_mut()).zip(envelope.modified.iter_mut());
        for ((namespace, kv), modified) in kvs {
            let before = kv.clone();
            f(envelope.index, namespace, kv);
            *modified = *kv != before;
        }
    }

    data.data = decoded.into_iter().map(DecodedEnvelope::encode).collect::<DecodeResult<Vec<_>>>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{EnvelopeBuilder, block_with_envelopes, kv_rwset};
    use erasure_protowire::{
        common::Header,
        peer::{ChaincodeActionPayload, TransactionAction},
    };

    fn sample_block() -> Block {
        block_with_envelopes(
            5,
            vec![
                EnvelopeBuilder::endorser("tx-a")
                    .namespace("assets", kv_rwset(&[("k1", b"v1"), ("k2", b"v2")]))
                    .namespace("_lifecycle", kv_rwset(&[]))
                    .build(),
                EnvelopeBuilder::endorser("tx-b").namespace("assets", kv_rwset(&[("k3", b"v3")])).build(),
            ],
        )
    }

    #[test]
    fn test_decode_block_writes() {
        let writes = decode_block_writes(&sample_block()).unwrap();
        assert_eq!(writes.len(), 2);

        assert_eq!(writes[0].envelope, 0);
        assert_eq!(writes[0].tx_id, "tx-a");
        assert_eq!(writes[0].namespaces.len(), 2);
        assert_eq!(writes[0].write_count(), 2);
        let keys = writes[0].writes().map(|(ns, w)| format!("{ns}/{}", w.key)).collect::<Vec<_>>();
        assert_eq!(keys, vec!["assets/k1", "assets/k2"]);

        assert_eq!(writes[1].envelope, 1);
        assert_eq!(writes[1].namespaces[0].writes[0].value, b"v3");
    }

    #[test]
    fn test_only_first_action_is_decoded() {
        let envelope = EnvelopeBuilder::endorser("tx")
            .namespace("first", kv_rwset(&[("a", b"1")]))
            .action()
            .namespace("second", kv_rwset(&[("b", b"2")]))
            .build();
        let writes = decode_envelope_writes(0, &envelope).unwrap();
        assert_eq!(writes.namespaces.len(), 1);
        assert_eq!(writes.namespaces[0].namespace, "first");
    }

    #[test]
    fn test_malformed_stages() {
        let valid = EnvelopeBuilder::endorser("tx").namespace("ns", kv_rwset(&[("a", b"1")])).build();

        let err = decode_envelope_writes(3, &valid[..valid.len() / 2]).unwrap_err();
        assert!(matches!(err, MalformedError::Decode { envelope: 3, stage: DecodeStage::Envelope, .. }), "{err}");

        let garbage_payload = Envelope { payload: vec![0xff, 0xff], signature: vec![] }.encode_to_vec();
        let err = decode_envelope_writes(0, &garbage_payload).unwrap_err();
        assert_eq!(err.stage(), Some(DecodeStage::Payload));

        let headerless = Envelope { payload: Payload { header: None, data: vec![] }.encode_to_vec(), signature: vec![] };
        let err = decode_envelope_writes(0, &headerless.encode_to_vec()).unwrap_err();
        assert_eq!(err, MalformedError::MissingField { envelope: 0, stage: DecodeStage::Payload, field: "header" });

        let config = EnvelopeBuilder::endorser("cfg").header_type(HeaderType::Config).build();
        let err = decode_envelope_writes(1, &config).unwrap_err();
        assert_eq!(err, MalformedError::UnexpectedHeaderType { envelope: 1, header_type: HeaderType::Config as i32 });

        let no_actions = EnvelopeBuilder::endorser("empty").build();
        let err = decode_envelope_writes(2, &no_actions).unwrap_err();
        assert_eq!(err, MalformedError::NoActions { envelope: 2, tx_id: "empty".to_string() });
    }

    #[test]
    fn test_missing_endorsed_action() {
        let transaction = Transaction {
            actions: vec![TransactionAction {
                header: vec![],
                payload: ChaincodeActionPayload { chaincode_proposal_payload: vec![1, 2], action: None }.encode_to_vec(),
            }],
        };
        let channel_header =
            ChannelHeader { r#type: HeaderType::EndorserTransaction as i32, tx_id: "tx".to_string(), ..Default::default() };
        let payload = Payload {
            header: Some(Header { channel_header: channel_header.encode_to_vec(), signature_header: vec![] }),
            data: transaction.encode_to_vec(),
        };
        let envelope = Envelope { payload: payload.encode_to_vec(), signature: vec![] }.encode_to_vec();

        let err = decode_envelope_writes(0, &envelope).unwrap_err();
        assert_eq!(err, MalformedError::MissingField { envelope: 0, stage: DecodeStage::ChaincodeActionPayload, field: "action" });
    }

    #[test]
    fn test_for_each_write_set_mut() {
        let mut block = sample_block();
        let mut visited = vec![];
        for_each_write_set_mut(&mut block, |index, namespace, kv| {
            visited.push((index, namespace.to_string()));
            for write in kv.writes.iter_mut() {
                write.value.extend_from_slice(b"!");
            }
        })
        .unwrap();
        assert_eq!(visited, vec![(0, "assets".to_string()), (0, "_lifecycle".to_string()), (1, "assets".to_string())]);

        let values = decode_block_writes(&block)
            .unwrap()
            .iter()
            .flat_map(|tx| tx.writes().map(|(_, w)| w.value.clone()).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(values, vec![b"v1!".to_vec(), b"v2!".to_vec(), b"v3!".to_vec()]);
    }

    #[test]
    fn test_unmodified_envelopes_keep_their_bytes() {
        let mut block = sample_block();
        if let Some(data) = block.data.as_mut() {
            // An envelope field 15 the messages do not model
            data.data[1].extend_from_slice(&[0x7a, 0x01, 0x00]);
        }
        let original = block.clone();
        for_each_write_set_mut(&mut block, |_, _, _| {}).unwrap();
        assert_eq!(block, original);

        for_each_write_set_mut(&mut block, |index, _, kv| {
            if index == 0 {
                kv.writes.clear();
            }
        })
        .unwrap();
        assert_ne!(block.envelopes()[0], original.envelopes()[0]);
        assert_eq!(block.envelopes()[1], original.envelopes()[1]);
        assert_eq!(decode_envelope_writes(0, &block.envelopes()[0]).unwrap().write_count(), 0);
    }

    #[test]
    fn test_for_each_write_set_mut_leaves_malformed_block_untouched() {
        let mut block = sample_block();
        if let Some(data) = block.data.as_mut() {
            data.data.push(EnvelopeBuilder::endorser("empty").build());
        }
        let original = block.clone();

        let mut calls = 0;
        let err = for_each_write_set_mut(&mut block, |_, _, _| calls += 1).unwrap_err();
        assert!(matches!(err, MalformedError::NoActions { envelope: 2, .. }));
        assert_eq!(calls, 0);
        assert_eq!(block, original);
    }

    #[test]
    fn test_block_without_data() {
        assert_eq!(decode_block_writes(&Block::default()).unwrap_err(), MalformedError::MissingBlockData);
        assert!(block_writes(&block_with_envelopes(0, vec![])).unwrap().next().is_none());
    }
}
