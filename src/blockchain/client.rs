// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM JSON-RPC client with local-key signing.

use std::time::Duration;

use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, TxHash, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    rpc::types::TransactionRequest,
};
use tokio::time::{interval, timeout};

use super::chain::Chain;
use super::erc20::Erc20Contract;
use super::signing::Account;
use super::types::{CallRequest, NetworkConfig, TxParams, TxReceipt};

/// How often a pending transaction is checked for a receipt.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How long to wait for a receipt before giving up.
const RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP provider type with all fillers and a signing wallet.
type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// EVM client bound to one network and one signing account.
pub struct EvmClient {
    /// Network configuration
    network: NetworkConfig,
    /// Alloy HTTP provider
    provider: SigningProvider,
    /// EIP-155 chain ID of the signing account
    chain_id: u64,
    receipt_poll_interval: Duration,
    receipt_timeout: Duration,
}

impl EvmClient {
    /// Create a client for `network` that signs with `account`.
    ///
    /// No request is made until the first call.
    pub fn connect(network: NetworkConfig, account: &Account) -> Result<Self, ChainError> {
        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new()
            .wallet(account.wallet())
            .connect_http(url);

        Ok(Self {
            network,
            provider,
            chain_id: account.chain_id(),
            receipt_poll_interval: RECEIPT_POLL_INTERVAL,
            receipt_timeout: RECEIPT_TIMEOUT,
        })
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Poll for a receipt until one appears.
    async fn poll_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, ChainError> {
        let mut ticker = interval(self.receipt_poll_interval);
        loop {
            ticker.tick().await;

            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ChainError::RpcError(format!("Failed to get receipt: {e}")))?;

            match receipt {
                Some(receipt) => {
                    return Ok(TxReceipt {
                        tx_hash,
                        block_number: receipt.block_number,
                        gas_used: receipt.gas_used,
                        effective_gas_price: receipt.effective_gas_price,
                        success: receipt.status(),
                        contract_address: receipt.contract_address,
                    });
                }
                None => tracing::debug!(tx_hash = %tx_hash, "Transaction pending"),
            }
        }
    }

    fn erc20(&self, token: Address) -> Erc20Contract<SigningProvider> {
        Erc20Contract::new(&self.provider, token)
    }
}

/// Convert a call to an alloy request without nonce or fee fields.
fn to_request(call: &CallRequest) -> TransactionRequest {
    let tx = TransactionRequest::default()
        .with_from(call.from)
        .with_value(call.value);

    match call.to {
        Some(to) => tx.with_to(to).with_input(call.input.clone()),
        None => tx.with_deploy_code(call.input.clone()),
    }
}

impl Chain for EvmClient {
    async fn pending_nonce(&self, address: Address) -> Result<u64, ChainError> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(|e| ChainError::RpcError(format!("Failed to get nonce: {e}")))
    }

    async fn balance(&self, address: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ChainError::RpcError(format!("Failed to get balance: {e}")))
    }

    async fn gas_price(&self) -> Result<u128, ChainError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ChainError::RpcError(format!("Failed to get gas price: {e}")))
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ChainError::RpcError(format!("Failed to get block number: {e}")))
    }

    async fn estimate_gas(&self, call: &CallRequest) -> Result<u64, ChainError> {
        self.provider
            .estimate_gas(to_request(call))
            .await
            .map_err(|e| ChainError::RpcError(format!("Gas estimation failed: {e}")))
    }

    async fn submit(&self, call: &CallRequest, params: TxParams) -> Result<TxHash, ChainError> {
        // Legacy pricing at the quoted gas price; every field is set so the
        // fillers leave the request alone and only the wallet signs it.
        let tx = to_request(call)
            .with_nonce(params.nonce)
            .with_gas_limit(params.gas_limit)
            .with_gas_price(params.gas_price)
            .with_chain_id(self.chain_id);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::TransactionFailed(format!("Failed to send: {e}")))?;

        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, ChainError> {
        timeout(self.receipt_timeout, self.poll_receipt(tx_hash))
            .await
            .map_err(|_| ChainError::ReceiptTimeout(self.receipt_timeout.as_secs()))?
    }

    async fn token_name(&self, token: Address) -> Result<String, ChainError> {
        self.erc20(token).name().await
    }

    async fn token_symbol(&self, token: Address) -> Result<String, ChainError> {
        self.erc20(token).symbol().await
    }

    async fn token_decimals(&self, token: Address) -> Result<u8, ChainError> {
        self.erc20(token).decimals().await
    }

    async fn token_total_supply(&self, token: Address) -> Result<U256, ChainError> {
        self.erc20(token).total_supply().await
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        self.erc20(token).balance_of(owner).await
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("No receipt after {0}s")]
    ReceiptTimeout(u64),
}
