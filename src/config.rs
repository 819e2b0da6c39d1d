// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Chain selection, key material and input files. Values come from the
//! command line, falling back to the environment (a `.env` file in the working
//! directory is loaded first).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PRIVATE_KEY` | Hex private key of the sending account | Required unless `PRIVATE_KEY_FILE` |
//! | `PRIVATE_KEY_FILE` | PEM private key file | - |
//! | `CHAINS_FILE` | JSON chain list | `chains.json` |
//! | `SELECTED_CHAIN` | Network name to use | `Ethereum Sepolia` |
//! | `ADDRESSES_FILE` | Recipient list | `addresses.txt` |
//! | `AMOUNT_TO_SEND` | Amount per recipient | `0.01` |
//! | `TOKEN_CONTRACT_ADDRESS` | ERC-20 to send; empty sends native currency | empty |
//! | `LOG_FILE` | Append-only log file | `report.log` / `deployment.log` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::fs;
use std::path::Path;

use alloy::primitives::{Address, Bytes};

use crate::blockchain::{Account, NetworkConfig};
use crate::error::ConfigError;
use crate::transfer::TransferMode;

/// Environment variable holding the hex private key.
///
/// Never logged; read only at startup.
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Default chain list path.
pub const DEFAULT_CHAINS_FILE: &str = "chains.json";

/// Default network name.
pub const DEFAULT_NETWORK: &str = "Ethereum Sepolia";

/// Default recipient list path.
pub const DEFAULT_ADDRESSES_FILE: &str = "addresses.txt";

/// Default amount sent to each recipient.
pub const DEFAULT_AMOUNT: &str = "0.01";

/// Default log file of the `send` command.
pub const DEFAULT_SEND_LOG: &str = "report.log";

/// Default log file of the `deploy` command.
pub const DEFAULT_DEPLOY_LOG: &str = "deployment.log";

/// Parse a chain list (JSON array of network entries).
pub fn parse_chain_list(json: &str, path: &Path) -> Result<Vec<NetworkConfig>, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::ChainListFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Find `name` in a chain list. Matching ignores case and surrounding whitespace.
pub fn select_network(chains: &[NetworkConfig], name: &str) -> Result<NetworkConfig, ConfigError> {
    let wanted = name.trim().to_lowercase();
    chains
        .iter()
        .find(|chain| chain.name.trim().to_lowercase() == wanted)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownNetwork(name.trim().to_string()))
}

/// Load the chain list at `path` and select `name` from it.
pub fn load_network(path: &Path, name: &str) -> Result<NetworkConfig, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::ChainList {
        path: path.to_path_buf(),
        source,
    })?;
    select_network(&parse_chain_list(&json, path)?, name)
}

/// Build the sending account from a PEM key file, or else from a hex key.
pub fn load_account(
    key_file: Option<&Path>,
    private_key: Option<&str>,
    chain_id: u64,
) -> Result<Account, ConfigError> {
    if let Some(path) = key_file {
        let pem = fs::read(path).map_err(|source| ConfigError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Account::from_pem(&pem, chain_id).map_err(ConfigError::InvalidKey);
    }

    match private_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => Account::from_hex(key, chain_id).map_err(ConfigError::InvalidKey),
        None => Err(ConfigError::MissingPrivateKey(PRIVATE_KEY_ENV)),
    }
}

/// Native mode for a missing or empty token address, token mode otherwise.
pub fn transfer_mode(token: Option<&str>) -> Result<TransferMode, ConfigError> {
    match token.map(str::trim).filter(|token| !token.is_empty()) {
        None => Ok(TransferMode::Native),
        Some(raw) => raw
            .parse::<Address>()
            .map(TransferMode::Token)
            .map_err(|_| ConfigError::InvalidTokenAddress(raw.to_string())),
    }
}

/// Read compiled contract creation code from a hex file (`solc --bin` output).
pub fn load_bytecode(path: &Path) -> Result<Bytes, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::BytecodeFile {
        path: path.to_path_buf(),
        source,
    })?;
    let hex = text.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.is_empty() {
        return Err(ConfigError::InvalidBytecode {
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }
    alloy::hex::decode(hex)
        .map(Bytes::from)
        .map_err(|e| ConfigError::InvalidBytecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
