//! Builders of synthetic endorser blocks for tests.

use erasure_protowire::{
    Message,
    common::{Block, BlockData, BlockHeader, BlockMetadata, ChannelHeader, Envelope, Header, HeaderType, Payload, Timestamp},
    kvrwset::{KvRead, KvRwSet, KvWrite, Version},
    peer::{
        ChaincodeAction, ChaincodeActionPayload, ChaincodeEndorsedAction, ChaincodeId, Endorsement, ProposalResponsePayload, Response,
        Transaction, TransactionAction,
    },
    rwset::{DataModel, NsReadWriteSet, TxReadWriteSet},
};

pub const TEST_CHANNEL: &str = "testchannel";

/// A key-value set with one read and the given `(key, value)` writes
pub fn kv_rwset(writes: &[(&str, &[u8])]) -> KvRwSet {
    KvRwSet {
        reads: vec![KvRead { key: "read-key".to_string(), version: Some(Version { block_num: 4, tx_num: 0 }) }],
        writes: writes.iter().map(|(key, value)| KvWrite { key: key.to_string(), is_delete: false, value: value.to_vec() }).collect(),
        ..Default::default()
    }
}

pub fn delete_write(key: &str) -> KvWrite {
    KvWrite { key: key.to_string(), is_delete: true, value: vec![] }
}

/// Builds the encoded bytes of a single transaction envelope. Namespaces are added to the
/// most recently started action, and an envelope built without any namespace has no actions.
pub struct EnvelopeBuilder {
    header_type: HeaderType,
    tx_id: String,
    actions: Vec<Vec<(String, KvRwSet)>>,
    chaincode_action_trailer: Vec<u8>,
}

impl EnvelopeBuilder {
    pub fn endorser(tx_id: &str) -> Self {
        Self { header_type: HeaderType::EndorserTransaction, tx_id: tx_id.to_string(), actions: vec![], chaincode_action_trailer: vec![] }
    }

    pub fn header_type(mut self, header_type: HeaderType) -> Self {
        self.header_type = header_type;
        self
    }

    /// Starts a new action
    pub fn action(mut self) -> Self {
        self.actions.push(vec![]);
        self
    }

    pub fn namespace(mut self, namespace: &str, rwset: KvRwSet) -> Self {
        if self.actions.is_empty() {
            self.actions.push(vec![]);
        }
        if let Some(action) = self.actions.last_mut() {
            action.push((namespace.to_string(), rwset));
        }
        self
    }

    /// Appends raw `bytes` to the encoded chaincode action of every action, e.g. a field
    /// no message struct models
    pub fn chaincode_action_trailer(mut self, bytes: &[u8]) -> Self {
        self.chaincode_action_trailer.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let trailer = self.chaincode_action_trailer;
        let actions = self.actions.into_iter().map(|namespaces| transaction_action(namespaces, &trailer)).collect();
        let transaction = Transaction { actions };
        envelope(self.header_type, &self.tx_id, &transaction)
    }
}

fn transaction_action(namespaces: Vec<(String, KvRwSet)>, chaincode_action_trailer: &[u8]) -> TransactionAction {
    let chaincode_name = namespaces.first().map(|(name, _)| name.clone()).unwrap_or_default();
    let ns_rwset = namespaces
        .into_iter()
        .map(|(namespace, kv)| NsReadWriteSet { namespace, rwset: kv.encode_to_vec(), collection_hashed_rwset: vec![] })
        .collect();
    let results = TxReadWriteSet { data_model: DataModel::Kv as i32, ns_rwset };
    let chaincode_action = ChaincodeAction {
        results: results.encode_to_vec(),
        events: vec![],
        response: Some(Response { status: 200, message: String::new(), payload: vec![] }),
        chaincode_id: Some(ChaincodeId { path: String::new(), name: chaincode_name, version: "1.0".to_string() }),
        interest: None,
    };
    let extension = [chaincode_action.encode_to_vec().as_slice(), chaincode_action_trailer].concat();
    let response_payload = ProposalResponsePayload { proposal_hash: vec![7; 32], extension };
    let action_payload = ChaincodeActionPayload {
        chaincode_proposal_payload: vec![0x0a, 0x02, 0x08, 0x01],
        action: Some(ChaincodeEndorsedAction {
            proposal_response_payload: response_payload.encode_to_vec(),
            endorsements: vec![Endorsement { endorser: b"peer0.org1".to_vec(), signature: vec![0x30; 8] }],
        }),
    };
    TransactionAction { header: vec![0x0a, 0x00], payload: action_payload.encode_to_vec() }
}

fn envelope(header_type: HeaderType, tx_id: &str, transaction: &Transaction) -> Vec<u8> {
    let channel_header = ChannelHeader {
        r#type: header_type as i32,
        timestamp: Some(Timestamp { seconds: 1_650_000_000, nanos: 0 }),
        channel_id: TEST_CHANNEL.to_string(),
        tx_id: tx_id.to_string(),
        ..Default::default()
    };
    let payload = Payload {
        header: Some(Header { channel_header: channel_header.encode_to_vec(), signature_header: vec![0x0a, 0x01, 0x01] }),
        data: transaction.encode_to_vec(),
    };
    Envelope { payload: payload.encode_to_vec(), signature: vec![0x30; 8] }.encode_to_vec()
}

/// A block numbered `number` holding `envelopes` and an empty preimage space
pub fn block_with_envelopes(number: u64, envelopes: Vec<Vec<u8>>) -> Block {
    Block {
        header: Some(BlockHeader { number, previous_hash: vec![1; 32], data_hash: vec![2; 32] }),
        data: Some(BlockData { data: envelopes, preimage_space: vec![] }),
        metadata: Some(BlockMetadata { metadata: vec![vec![], vec![], vec![]] }),
    }
}
