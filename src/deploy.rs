// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 contract deployment from compiled init code.

use std::time::Duration;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use tokio::time::sleep;

use crate::blockchain::{
    format_amount, gas_cost, CallRequest, Chain, ChainError, NetworkConfig, TxParams,
    NATIVE_DECIMALS,
};
use crate::logging::TransferLog;

const BLOCK_POLL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(
        "Insufficient funds for gas: need {} but balance is {}",
        native(.required),
        native(.available)
    )]
    InsufficientFunds { required: U256, available: U256 },

    #[error("Deployment transaction {0} reverted")]
    Reverted(TxHash),

    #[error("Receipt for {0} has no contract address")]
    MissingContractAddress(TxHash),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

fn native(amount: &U256) -> String {
    format_amount(*amount, NATIVE_DECIMALS)
}

/// A confirmed contract creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
    /// Estimated fee, in wei
    pub spent: U256,
    /// Balance before deployment minus the estimated fee
    pub remaining_balance: U256,
}

pub struct Deployer<C, L> {
    chain: C,
    log: L,
    network: NetworkConfig,
    sender: Address,
    poll_interval: Duration,
}

impl<C: Chain, L: TransferLog> Deployer<C, L> {
    pub fn new(chain: C, network: NetworkConfig, sender: Address, log: L) -> Self {
        Self {
            chain,
            log,
            network,
            sender,
            poll_interval: BLOCK_POLL_INTERVAL,
        }
    }

    /// Interval between block number polls after confirmation.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Deploy `bytecode` and wait one block past its confirmation.
    ///
    /// Nothing is broadcast when the balance does not cover the estimated fee.
    pub async fn deploy(&self, bytecode: Bytes) -> Result<Deployment, DeployError> {
        self.log.info("Starting contract deployment.");

        let call = CallRequest::deploy(self.sender, bytecode);
        let gas_limit = self.chain.estimate_gas(&call).await?;
        let gas_price = self.chain.gas_price().await?;
        let total_cost = gas_cost(gas_limit, gas_price);

        let balance = self.chain.balance(self.sender).await?;
        if balance < total_cost {
            return Err(DeployError::InsufficientFunds {
                required: total_cost,
                available: balance,
            });
        }

        let nonce = self.chain.pending_nonce(self.sender).await?;
        let params = TxParams {
            nonce,
            gas_limit,
            gas_price,
        };
        let tx_hash = self.chain.submit(&call, params).await?;
        tracing::debug!(tx_hash = %tx_hash, nonce, gas_limit, gas_price, "Deployment broadcast");

        let receipt = self.chain.wait_for_receipt(tx_hash).await?;
        if !receipt.success {
            return Err(DeployError::Reverted(tx_hash));
        }
        let address = receipt
            .contract_address
            .ok_or(DeployError::MissingContractAddress(tx_hash))?;

        self.log
            .info(&format!("Contract deployed. Transaction hash: {tx_hash:?}"));

        let remaining_balance = balance.saturating_sub(total_cost);
        let symbol = &self.network.symbol;
        self.log.info(&format!(
            "Spent: {} {symbol} | Remaining Balance: {} {symbol}",
            native(&total_cost),
            native(&remaining_balance)
        ));

        self.wait_for_blocks(1).await?;

        Ok(Deployment {
            address,
            tx_hash,
            spent: total_cost,
            remaining_balance,
        })
    }

    async fn wait_for_blocks(&self, blocks: u64) -> Result<(), ChainError> {
        let target = self.chain.block_number().await? + blocks;
        while self.chain.block_number().await? < target {
            sleep(self.poll_interval).await;
        }
        self.log.info(&format!("Waited for {blocks} block(s)."));
        Ok(())
    }

    /// Log name, symbol and total supply of the token at `address`.
    ///
    /// Read failures are logged, not returned.
    pub async fn log_contract_info(&self, address: Address) {
        match self.contract_info(address).await {
            Ok((name, symbol, total_supply)) => {
                self.log.info(&format!("Contract address: {address}"));
                self.log.info(&format!("Contract Name: {name}"));
                self.log.info(&format!("Ticker (Symbol): {symbol}"));
                self.log
                    .info(&format!("Total Supply: {total_supply} {symbol}"));
            }
            Err(e) => {
                self.log.error(&format!(
                    "Error retrieving contract information for {address}: {e}"
                ));
            }
        }
    }

    async fn contract_info(&self, address: Address) -> Result<(String, String, String), ChainError> {
        let name = self.chain.token_name(address).await?;
        let symbol = self.chain.token_symbol(address).await?;
        let decimals = self.chain.token_decimals(address).await?;
        let total_supply = self.chain.token_total_supply(address).await?;
        Ok((name, symbol, format_amount(total_supply, decimals)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::mock::{MockChain, MockToken, GWEI, ONE_ETH};
    use crate::logging::RecordingLog;

    const INIT_CODE: &[u8] = &[0x60, 0x80, 0x60, 0x40, 0x52];

    fn network() -> NetworkConfig {
        NetworkConfig {
            name: "BSC Testnet".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 97,
            symbol: "tBNB".to_string(),
            explorer_url: None,
        }
    }

    fn deployer<'a>(chain: &MockChain, log: &'a RecordingLog) -> Deployer<MockChain, &'a RecordingLog> {
        Deployer::new(chain.clone(), network(), Address::with_last_byte(1), log)
            .with_poll_interval(Duration::from_millis(1))
    }

    fn token(address: Address) -> MockToken {
        MockToken {
            address,
            name: "Web3 Forces".to_string(),
            symbol: "W3F".to_string(),
            decimals: 18,
            total_supply: U256::from(1_000_000u64) * U256::from(ONE_ETH),
            balance: U256::ZERO,
        }
    }

    #[tokio::test]
    async fn deploys_and_reports_cost() {
        let chain = MockChain::new().with_gas(1_000_000, GWEI);
        let log = RecordingLog::default();

        let deployment = deployer(&chain, &log)
            .deploy(Bytes::from_static(INIT_CODE))
            .await
            .unwrap();

        assert_eq!(deployment.address, chain.deployed_address());
        assert_eq!(deployment.spent, U256::from(1_000_000u128 * GWEI));

        let submitted = chain.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].call.to, None);
        assert_eq!(&submitted[0].call.input[..], INIT_CODE);
        assert_eq!(submitted[0].params.nonce, 7);

        let infos = log.infos();
        assert!(infos.contains(&"Spent: 0.001 tBNB | Remaining Balance: 0.999 tBNB".to_string()));
        assert_eq!(infos.last().unwrap(), "Waited for 1 block(s).");
    }

    #[tokio::test]
    async fn refuses_to_broadcast_without_funds() {
        let chain = MockChain::new()
            .with_gas(1_000_000, GWEI)
            .with_balance(U256::from(999_999u128 * GWEI));
        let log = RecordingLog::default();

        let result = deployer(&chain, &log)
            .deploy(Bytes::from_static(INIT_CODE))
            .await;

        assert!(matches!(result, Err(DeployError::InsufficientFunds { .. })));
        assert!(chain.submitted().is_empty());
    }

    #[tokio::test]
    async fn reverted_deployment_is_an_error() {
        let chain = MockChain::new().reverting(0);
        let log = RecordingLog::default();

        let result = deployer(&chain, &log)
            .deploy(Bytes::from_static(INIT_CODE))
            .await;

        assert!(matches!(result, Err(DeployError::Reverted(_))));
    }

    #[tokio::test]
    async fn receipt_without_contract_address_is_an_error() {
        let chain = MockChain::new().without_contract_address();
        let log = RecordingLog::default();

        let result = deployer(&chain, &log)
            .deploy(Bytes::from_static(INIT_CODE))
            .await;

        assert!(matches!(
            result,
            Err(DeployError::MissingContractAddress(tx_hash)) if tx_hash == TxHash::with_last_byte(1)
        ));
        assert_eq!(chain.submitted().len(), 1);
    }

    #[tokio::test]
    async fn logs_contract_info_after_deployment() {
        let chain = MockChain::new();
        let chain = chain.clone().with_token(token(chain.deployed_address()));
        let log = RecordingLog::default();
        let deployer = deployer(&chain, &log);

        let deployment = deployer.deploy(Bytes::from_static(INIT_CODE)).await.unwrap();
        deployer.log_contract_info(deployment.address).await;

        let infos = log.infos();
        assert!(infos.contains(&"Contract Name: Web3 Forces".to_string()));
        assert!(infos.contains(&"Ticker (Symbol): W3F".to_string()));
        assert!(infos.contains(&"Total Supply: 1000000 W3F".to_string()));
        assert!(log.errors().is_empty());
    }

    #[tokio::test]
    async fn contract_info_failure_is_logged_not_returned() {
        let chain = MockChain::new();
        let log = RecordingLog::default();

        deployer(&chain, &log)
            .log_contract_info(Address::with_last_byte(0x42))
            .await;

        let errors = log.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error retrieving contract information for"));
    }
}
