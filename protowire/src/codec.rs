use crate::common::Block;
use base64::{Engine, engine::general_purpose::STANDARD};
use prost::Message;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid base64 block encoding: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid protobuf block encoding: {0}")]
    Protobuf(#[from] prost::DecodeError),
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

pub fn decode_block(bytes: &[u8]) -> CodecResult<Block> {
    Ok(Block::decode(bytes)?)
}

pub fn encode_block(block: &Block) -> Vec<u8> {
    block.encode_to_vec()
}

/// Decodes a standard base64 block encoding. Whitespace (line wrapping, trailing newline) is ignored.
pub fn decode_block_base64(text: &str) -> CodecResult<Block> {
    let compact = text.chars().filter(|c| !c.is_ascii_whitespace()).collect::<String>();
    let bytes = STANDARD.decode(compact)?;
    decode_block(&bytes)
}

pub fn encode_block_base64(block: &Block) -> String {
    STANDARD.encode(encode_block(block))
}
