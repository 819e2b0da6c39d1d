// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The RPC surface the transfer engine and deployer rely on.
//!
//! [`EvmClient`](super::EvmClient) implements it over an alloy HTTP provider;
//! tests implement it in memory.

use std::future::Future;

use alloy::primitives::{Address, TxHash, U256};

use super::client::ChainError;
use super::types::{CallRequest, TxParams, TxReceipt};

/// Chain operations used by a batch run.
///
/// Every method is a single round trip; nothing is cached.
pub trait Chain {
    /// Nonce for the next transaction, counting pending ones.
    fn pending_nonce(&self, address: Address)
        -> impl Future<Output = Result<u64, ChainError>> + Send;

    /// Native balance in wei.
    fn balance(&self, address: Address) -> impl Future<Output = Result<U256, ChainError>> + Send;

    /// Current quoted gas price in wei.
    fn gas_price(&self) -> impl Future<Output = Result<u128, ChainError>> + Send;

    /// Latest block number.
    fn block_number(&self) -> impl Future<Output = Result<u64, ChainError>> + Send;

    /// Gas estimate for `call`.
    fn estimate_gas(
        &self,
        call: &CallRequest,
    ) -> impl Future<Output = Result<u64, ChainError>> + Send;

    /// Sign `call` with the account key and broadcast it.
    fn submit(
        &self,
        call: &CallRequest,
        params: TxParams,
    ) -> impl Future<Output = Result<TxHash, ChainError>> + Send;

    /// Block until `tx_hash` is mined and return its receipt.
    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<TxReceipt, ChainError>> + Send;

    /// ERC-20 `name()`.
    fn token_name(&self, token: Address) -> impl Future<Output = Result<String, ChainError>> + Send;

    /// ERC-20 `symbol()`.
    fn token_symbol(&self, token: Address)
        -> impl Future<Output = Result<String, ChainError>> + Send;

    /// ERC-20 `decimals()`.
    fn token_decimals(&self, token: Address) -> impl Future<Output = Result<u8, ChainError>> + Send;

    /// ERC-20 `totalSupply()`.
    fn token_total_supply(
        &self,
        token: Address,
    ) -> impl Future<Output = Result<U256, ChainError>> + Send;

    /// ERC-20 `balanceOf(owner)`.
    fn token_balance(
        &self,
        token: Address,
        owner: Address,
    ) -> impl Future<Output = Result<U256, ChainError>> + Send;
}
