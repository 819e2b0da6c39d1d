// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory [`Chain`] for tests.
//!
//! Mines every accepted transaction immediately. Enforces the nonce the way a
//! node does, so a ledger that drifts from the chain shows up as a failed
//! submission.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, U256};
use alloy::sol_types::SolCall;

use super::chain::Chain;
use super::client::ChainError;
use super::erc20::IERC20;
use super::types::{CallRequest, TxParams, TxReceipt};

pub const ONE_ETH: u64 = 1_000_000_000_000_000_000;
pub const GWEI: u128 = 1_000_000_000;

/// A transaction the mock accepted.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub call: CallRequest,
    pub params: TxParams,
    pub tx_hash: TxHash,
}

#[derive(Debug, Clone)]
pub struct MockToken {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    pub balance: U256,
}

#[derive(Debug)]
struct MockState {
    nonce: u64,
    balance: U256,
    gas_price: u128,
    gas_estimate: u64,
    block_number: u64,
    revert_gas_used: u64,
    reverting: HashSet<usize>,
    failing_receipts: HashSet<usize>,
    omit_contract_address: bool,
    failing_estimates: HashSet<Address>,
    token: Option<MockToken>,
    deployed_address: Address,
    submitted: Vec<Submitted>,
    receipts: HashMap<TxHash, TxReceipt>,
    calls: usize,
}

/// Clones share state, so a test can keep a handle to a chain it moved
/// into an engine.
#[derive(Clone)]
pub struct MockChain {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// Nonce 7, 1 ETH, 1 gwei gas price, 21k gas per transaction.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                nonce: 7,
                balance: U256::from(ONE_ETH),
                gas_price: GWEI,
                gas_estimate: 21_000,
                block_number: 100,
                revert_gas_used: 15_000,
                reverting: HashSet::new(),
                failing_receipts: HashSet::new(),
                omit_contract_address: false,
                failing_estimates: HashSet::new(),
                token: None,
                deployed_address: Address::with_last_byte(0xcc),
                submitted: Vec::new(),
                receipts: HashMap::new(),
                calls: 0,
            })),
        }
    }

    pub fn with_balance(self, balance: U256) -> Self {
        self.state.lock().unwrap().balance = balance;
        self
    }

    pub fn with_gas(self, gas_estimate: u64, gas_price: u128) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.gas_estimate = gas_estimate;
            state.gas_price = gas_price;
        }
        self
    }

    /// The `index`-th accepted submission (0-based) is mined but reverts.
    pub fn reverting(self, index: usize) -> Self {
        self.state.lock().unwrap().reverting.insert(index);
        self
    }

    /// The `index`-th accepted submission is mined, but waiting for its
    /// receipt times out.
    pub fn failing_receipt(self, index: usize) -> Self {
        self.state.lock().unwrap().failing_receipts.insert(index);
        self
    }

    /// Contract creations are mined without a contract address in the receipt.
    pub fn without_contract_address(self) -> Self {
        self.state.lock().unwrap().omit_contract_address = true;
        self
    }

    /// Gas estimation fails for calls to `to`.
    pub fn failing_estimate(self, to: Address) -> Self {
        self.state.lock().unwrap().failing_estimates.insert(to);
        self
    }

    pub fn with_token(self, token: MockToken) -> Self {
        self.state.lock().unwrap().token = Some(token);
        self
    }

    pub fn submitted(&self) -> Vec<Submitted> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// Number of chain calls made so far.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn chain_balance(&self) -> U256 {
        self.state.lock().unwrap().balance
    }

    pub fn chain_nonce(&self) -> u64 {
        self.state.lock().unwrap().nonce
    }

    pub fn deployed_address(&self) -> Address {
        self.state.lock().unwrap().deployed_address
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state
    }

    fn token(&self, token: Address) -> Result<MockToken, ChainError> {
        match &self.state().token {
            Some(t) if t.address == token => Ok(t.clone()),
            _ => Err(ChainError::ContractError(format!("no contract at {token}"))),
        }
    }
}

impl Chain for MockChain {
    async fn pending_nonce(&self, _address: Address) -> Result<u64, ChainError> {
        Ok(self.state().nonce)
    }

    async fn balance(&self, _address: Address) -> Result<U256, ChainError> {
        Ok(self.state().balance)
    }

    async fn gas_price(&self) -> Result<u128, ChainError> {
        Ok(self.state().gas_price)
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        let mut state = self.state();
        state.block_number += 1;
        Ok(state.block_number)
    }

    async fn estimate_gas(&self, call: &CallRequest) -> Result<u64, ChainError> {
        let state = self.state();
        match call.to {
            Some(to) if state.failing_estimates.contains(&to) => {
                Err(ChainError::RpcError("Gas estimation failed: execution reverted".into()))
            }
            _ => Ok(state.gas_estimate),
        }
    }

    async fn submit(&self, call: &CallRequest, params: TxParams) -> Result<TxHash, ChainError> {
        let mut state = self.state();
        if params.nonce != state.nonce {
            return Err(ChainError::TransactionFailed(format!(
                "nonce mismatch: expected {}, got {}",
                state.nonce, params.nonce
            )));
        }

        let index = state.submitted.len();
        let tx_hash = TxHash::with_last_byte(index as u8 + 1);
        let block_number = state.block_number + 1;
        state.block_number = block_number;
        state.nonce += 1;

        let success = !state.reverting.contains(&index);
        let gas_used = if success {
            params.gas_limit
        } else {
            state.revert_gas_used
        };
        let gas_cost = U256::from(gas_used) * U256::from(params.gas_price);

        if success {
            state.balance = state.balance.saturating_sub(call.value + gas_cost);
            if let (Some(token), Some(to)) = (state.token.as_mut(), call.to) {
                if to == token.address {
                    if let Ok(transfer) = IERC20::transferCall::abi_decode(&call.input) {
                        token.balance = token.balance.saturating_sub(transfer.amount);
                    }
                }
            }
        } else {
            state.balance = state.balance.saturating_sub(gas_cost);
        }

        let contract_address = (call.to.is_none() && success && !state.omit_contract_address)
            .then_some(state.deployed_address);
        state.receipts.insert(
            tx_hash,
            TxReceipt {
                tx_hash,
                block_number: Some(block_number),
                gas_used,
                effective_gas_price: params.gas_price,
                success,
                contract_address,
            },
        );
        state.submitted.push(Submitted {
            call: call.clone(),
            params,
            tx_hash,
        });
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, ChainError> {
        let state = self.state();
        let index = state.submitted.iter().position(|tx| tx.tx_hash == tx_hash);
        if index.is_some_and(|index| state.failing_receipts.contains(&index)) {
            return Err(ChainError::ReceiptTimeout(120));
        }
        state
            .receipts
            .get(&tx_hash)
            .cloned()
            .ok_or_else(|| ChainError::RpcError("Transaction not found".into()))
    }

    async fn token_name(&self, token: Address) -> Result<String, ChainError> {
        Ok(self.token(token)?.name)
    }

    async fn token_symbol(&self, token: Address) -> Result<String, ChainError> {
        Ok(self.token(token)?.symbol)
    }

    async fn token_decimals(&self, token: Address) -> Result<u8, ChainError> {
        Ok(self.token(token)?.decimals)
    }

    async fn token_total_supply(&self, token: Address) -> Result<U256, ChainError> {
        Ok(self.token(token)?.total_supply)
    }

    async fn token_balance(&self, token: Address, _owner: Address) -> Result<U256, ChainError> {
        Ok(self.token(token)?.balance)
    }
}
