use erasure_core::log::LogError;
use erasure_protowire::codec::CodecError;
use erasure_redaction::{MalformedError, RedactionError};
use std::{io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}: invalid hex preimage: {source}")]
    Hex {
        path: String,
        line: usize,
        #[source]
        source: hex::FromHexError,
    },

    #[error("invalid block file: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Malformed(#[from] MalformedError),

    #[error(transparent)]
    Redaction(#[from] RedactionError),

    #[error(transparent)]
    Log(#[from] LogError),
}

impl CliError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;
