// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fatal, pre-run errors.
//!
//! Per-transfer failures are not here: they are values of
//! [`TransferError`](crate::transfer::TransferError) and never abort a run.

use std::io;
use std::path::PathBuf;

use crate::blockchain::ChainError;

/// Bad or missing configuration. Aborts before the first transfer.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read chain list {path}: {source}")]
    ChainList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid chain list {path}: {source}")]
    ChainListFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Selected chain `{0}` not found in chain list. Please check your config.")]
    UnknownNetwork(String),

    #[error("No private key: set {0} or pass --key-file")]
    MissingPrivateKey(&'static str),

    #[error("Failed to read key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid key material: {0}")]
    InvalidKey(#[source] ChainError),

    #[error("Addresses file not found: {path}")]
    AddressFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid token contract address `{0}`")]
    InvalidTokenAddress(String),

    #[error("Failed to read bytecode file {path}: {source}")]
    BytecodeFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid bytecode in {path}: {reason}")]
    InvalidBytecode { path: PathBuf, reason: String },

    #[error("Cannot connect: {0}")]
    Connection(#[source] ChainError),
}

/// Failure while setting up a transfer run.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read starting account state: {0}")]
    Chain(#[from] ChainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let unknown = ConfigError::UnknownNetwork("Goerli".to_string());
        assert!(unknown.to_string().contains("`Goerli`"));

        let missing = ConfigError::AddressFile {
            path: PathBuf::from("addresses.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(missing.to_string(), "Addresses file not found: addresses.txt");
    }

    #[test]
    fn init_error_wraps_both_sources() {
        let config: InitError = ConfigError::MissingPrivateKey("PRIVATE_KEY").into();
        assert!(matches!(config, InitError::Config(_)));
        assert!(config.to_string().contains("PRIVATE_KEY"));

        let chain: InitError = ChainError::RpcError("connection refused".to_string()).into();
        assert!(matches!(chain, InitError::Chain(_)));
    }
}
