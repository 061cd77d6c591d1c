use erasure_protowire::{DecodeError, common::HeaderType};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The step of the envelope decode pipeline at which a block was found malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    Envelope,
    Payload,
    ChannelHeader,
    Transaction,
    ChaincodeActionPayload,
    ProposalResponsePayload,
    ChaincodeAction,
    TxReadWriteSet,
    KvReadWriteSet,
}

impl Display for DecodeStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DecodeStage::Envelope => "envelope",
            DecodeStage::Payload => "payload",
            DecodeStage::ChannelHeader => "channel header",
            DecodeStage::Transaction => "transaction",
            DecodeStage::ChaincodeActionPayload => "chaincode action payload",
            DecodeStage::ProposalResponsePayload => "proposal response payload",
            DecodeStage::ChaincodeAction => "chaincode action",
            DecodeStage::TxReadWriteSet => "transaction read-write set",
            DecodeStage::KvReadWriteSet => "namespace read-write set",
        };
        f.write_str(name)
    }
}

fn header_type_name(header_type: i32) -> String {
    HeaderType::try_from(header_type).ok().map(|x| x.as_str_name().to_string()).unwrap_or_else(|| format!("unknown type {header_type}"))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedError {
    #[error("block carries no block data")]
    MissingBlockData,

    #[error("envelope {envelope}: cannot decode {stage}: {source}")]
    Decode {
        envelope: usize,
        stage: DecodeStage,
        #[source]
        source: DecodeError,
    },

    #[error("envelope {envelope}: {stage} has no {field}")]
    MissingField { envelope: usize, stage: DecodeStage, field: &'static str },

    #[error("envelope {envelope}: expected an ENDORSER_TRANSACTION header but found {}", header_type_name(*header_type))]
    UnexpectedHeaderType { envelope: usize, header_type: i32 },

    #[error("envelope {envelope}: transaction {tx_id} has no actions")]
    NoActions { envelope: usize, tx_id: String },
}

impl MalformedError {
    /// Index of the offending envelope within the block data, if the failure is envelope specific.
    pub fn envelope(&self) -> Option<usize> {
        match self {
            MalformedError::MissingBlockData => None,
            MalformedError::Decode { envelope, .. }
            | MalformedError::MissingField { envelope, .. }
            | MalformedError::UnexpectedHeaderType { envelope, .. }
            | MalformedError::NoActions { envelope, .. } => Some(*envelope),
        }
    }

    pub fn stage(&self) -> Option<DecodeStage> {
        match self {
            MalformedError::Decode { stage, .. } | MalformedError::MissingField { stage, .. } => Some(*stage),
            MalformedError::UnexpectedHeaderType { .. } => Some(DecodeStage::ChannelHeader),
            MalformedError::NoActions { .. } => Some(DecodeStage::Transaction),
            MalformedError::MissingBlockData => None,
        }
    }
}

pub type DecodeResult<T> = std::result::Result<T, MalformedError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedactionError {
    #[error("malformed block: {0}")]
    Malformed(#[from] MalformedError),

    #[error("write to key {key:?} of namespace {namespace} in envelope {envelope} (tx {tx_id}) has no matching preimage")]
    PreimageMismatch { envelope: usize, tx_id: String, namespace: String, key: String },

    #[error("cannot reinstate {preimages} preimages into {writes} writes")]
    PreimageCountMismatch { writes: usize, preimages: usize },
}

impl RedactionError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, RedactionError::Malformed(_))
    }

    pub fn is_preimage_mismatch(&self) -> bool {
        matches!(self, RedactionError::PreimageMismatch { .. })
    }
}

pub type RedactionResult<T> = std::result::Result<T, RedactionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MalformedError::UnexpectedHeaderType { envelope: 2, header_type: HeaderType::Config as i32 };
        assert_eq!(err.to_string(), "envelope 2: expected an ENDORSER_TRANSACTION header but found CONFIG");
        assert_eq!(err.stage(), Some(DecodeStage::ChannelHeader));

        let err = MalformedError::UnexpectedHeaderType { envelope: 0, header_type: 77 };
        assert!(err.to_string().ends_with("unknown type 77"));

        let err = MalformedError::MissingField { envelope: 1, stage: DecodeStage::ChaincodeActionPayload, field: "action" };
        assert_eq!(err.to_string(), "envelope 1: chaincode action payload has no action");
        assert_eq!(err.envelope(), Some(1));

        let err: RedactionError = MalformedError::MissingBlockData.into();
        assert!(err.is_malformed());
        assert!(!err.is_preimage_mismatch());
        assert_eq!(err.to_string(), "malformed block: block carries no block data");
    }
}
