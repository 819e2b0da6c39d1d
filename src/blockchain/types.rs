// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

/// Decimals of every EVM native currency (wei per ether).
pub const NATIVE_DECIMALS: u8 = 18;

/// EVM network configuration, one entry of the chain list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Network name for display and lookup
    pub name: String,
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Chain ID
    pub chain_id: u64,
    /// Native currency symbol (e.g., "ETH", "BNB")
    pub symbol: String,
    /// Block explorer URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

impl NetworkConfig {
    /// Explorer link for a transaction, if the network has an explorer.
    pub fn tx_url(&self, tx_hash: &TxHash) -> Option<String> {
        self.explorer_url
            .as_deref()
            .map(|base| format!("{}/tx/{:?}", base.trim_end_matches('/'), tx_hash))
    }
}

/// An unsigned call from the account, before nonce and fees are attached.
///
/// `to == None` is a contract creation with `input` as the init code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
}

impl CallRequest {
    /// Plain value transfer.
    pub fn native(from: Address, to: Address, value: U256) -> Self {
        Self {
            from,
            to: Some(to),
            value,
            input: Bytes::new(),
        }
    }

    /// Contract call carrying no native value.
    pub fn contract_call(from: Address, contract: Address, input: Bytes) -> Self {
        Self {
            from,
            to: Some(contract),
            value: U256::ZERO,
            input,
        }
    }

    /// Contract creation.
    pub fn deploy(from: Address, init_code: Bytes) -> Self {
        Self {
            from,
            to: None,
            value: U256::ZERO,
            input: init_code,
        }
    }
}

/// Nonce and legacy fee fields attached to a [`CallRequest`] at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
}

/// Transaction receipt after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas actually used
    pub gas_used: u64,
    /// Price actually paid per unit of gas
    pub effective_gas_price: u128,
    /// Whether the transaction was successful
    pub success: bool,
    /// Address of the created contract, for deployments
    pub contract_address: Option<Address>,
}

impl TxReceipt {
    /// Native currency actually spent on gas.
    pub fn gas_cost(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}

/// Fee for `gas` units at `gas_price` wei each.
pub fn gas_cost(gas: u64, gas_price: u128) -> U256 {
    U256::from(gas) * U256::from(gas_price)
}
