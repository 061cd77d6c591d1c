/// This is finalized block structure to be shared among the orderer and peer.
/// Note that the BlockHeader chains to the previous BlockHeader, and the BlockData hash is embedded
/// in the BlockHeader. This makes it natural and obvious that the Data is included in the hash, but
/// the Metadata is not.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<BlockHeader>,
    #[prost(message, optional, tag = "2")]
    pub data: ::core::option::Option<BlockData>,
    #[prost(message, optional, tag = "3")]
    pub metadata: ::core::option::Option<BlockMetadata>,
}

/// BlockHeader is the element of the block which forms the block chain.
/// The block header is hashed using the configured chain hashing algorithm
/// over the ASN.1 encoding of the BlockHeader.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHeader {
    /// The position in the blockchain
    #[prost(uint64, tag = "1")]
    pub number: u64,
    /// The hash of the previous block header
    #[prost(bytes = "vec", tag = "2")]
    pub previous_hash: ::prost::alloc::vec::Vec<u8>,
    /// The hash of the BlockData, by MerkleTree
    #[prost(bytes = "vec", tag = "3")]
    pub data_hash: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockData {
    /// Marshaled envelopes
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub data: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
    /// Cleartext values erased from the writes of `data`. Not covered by `data_hash`.
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub preimage_space: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockMetadata {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub metadata: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

/// Envelope wraps a Payload with a signature so that the message may be authenticated
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Envelope {
    /// A marshaled Payload
    #[prost(bytes = "vec", tag = "1")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
    /// A signature by the creator specified in the Payload header
    #[prost(bytes = "vec", tag = "2")]
    pub signature: ::prost::alloc::vec::Vec<u8>,
}

/// Payload is the message contents (and header to allow for signing)
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Payload {
    /// Header is included to provide identity and prevent replay
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<Header>,
    /// Data, the encoding of which is defined by the type in the header
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(bytes = "vec", tag = "1")]
    pub channel_header: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature_header: ::prost::alloc::vec::Vec<u8>,
}

/// Header is a generic replay prevention and identity message to include in a signed payload
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelHeader {
    /// Header types 0-10000 are reserved and defined by HeaderType
    #[prost(enumeration = "HeaderType", tag = "1")]
    pub r#type: i32,
    /// Version indicates message protocol version
    #[prost(int32, tag = "2")]
    pub version: i32,
    /// Timestamp is the local time when the message was created
    /// by the sender
    #[prost(message, optional, tag = "3")]
    pub timestamp: ::core::option::Option<Timestamp>,
    /// Identifier of the channel this message is bound for
    #[prost(string, tag = "4")]
    pub channel_id: ::prost::alloc::string::String,
    /// An unique identifier that is used end-to-end.
    #[prost(string, tag = "5")]
    pub tx_id: ::prost::alloc::string::String,
    /// The epoch in which this header was generated, where epoch is defined based on block height
    #[prost(uint64, tag = "6")]
    pub epoch: u64,
    /// Extension that may be attached based on the header type
    #[prost(bytes = "vec", tag = "7")]
    pub extension: ::prost::alloc::vec::Vec<u8>,
    /// If mutual TLS is employed, this represents
    /// the hash of the client's TLS certificate
    #[prost(bytes = "vec", tag = "8")]
    pub tls_cert_hash: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureHeader {
    /// Creator of the message, a marshaled msp.SerializedIdentity
    #[prost(bytes = "vec", tag = "1")]
    pub creator: ::prost::alloc::vec::Vec<u8>,
    /// Arbitrary number that may only be used once. Can be used to detect replay attacks.
    #[prost(bytes = "vec", tag = "2")]
    pub nonce: ::prost::alloc::vec::Vec<u8>,
}

/// Wire-compatible with `google.protobuf.Timestamp`
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum HeaderType {
    /// Used for messages which are signed but opaque
    Message = 0,
    /// Used for messages which express the channel config
    Config = 1,
    /// Used for transactions which update the channel config
    ConfigUpdate = 2,
    /// Used by the SDK to submit endorser based transactions
    EndorserTransaction = 3,
    /// Was used internally by the orderer for management, no longer used since system channel was removed
    OrdererTransaction = 4,
    /// Used as the type for Envelope messages submitted to instruct the Deliver API to seek
    DeliverSeekInfo = 5,
    /// Used for packaging chaincode artifacts for install
    ChaincodePackage = 6,
}

impl HeaderType {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Message => "MESSAGE",
            Self::Config => "CONFIG",
            Self::ConfigUpdate => "CONFIG_UPDATE",
            Self::EndorserTransaction => "ENDORSER_TRANSACTION",
            Self::OrdererTransaction => "ORDERER_TRANSACTION",
            Self::DeliverSeekInfo => "DELIVER_SEEK_INFO",
            Self::ChaincodePackage => "CHAINCODE_PACKAGE",
        }
    }
}

impl Block {
    /// The marshaled envelopes of the block, empty if the block carries no data.
    pub fn envelopes(&self) -> &[::prost::alloc::vec::Vec<u8>] {
        self.data.as_ref().map(|data| data.data.as_slice()).unwrap_or_default()
    }

    /// The preimage space side channel, empty if none was attached.
    pub fn preimage_space(&self) -> &[::prost::alloc::vec::Vec<u8>] {
        self.data.as_ref().map(|data| data.preimage_space.as_slice()).unwrap_or_default()
    }

    pub fn number(&self) -> u64 {
        self.header.as_ref().map(|header| header.number).unwrap_or_default()
    }
}
