// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Transfer Engine
//!
//! Sends the same amount to every recipient of a list, one transaction at a
//! time.
//!
//! ## Strategy
//!
//! 1. Read the recipient list, then the account's pending nonce and balance.
//! 2. For each recipient: quote gas, check the local balance estimate, sign
//!    with the local nonce, broadcast and wait for the receipt.
//! 3. Update the local ledger from the receipt only. The chain is not re-read
//!    between transfers.
//!
//! A failed transfer is logged and the run moves on to the next recipient.
//!
//! ## Reverts
//!
//! A mined-but-reverted transaction still uses its nonce and pays for the gas
//! it burned, so the ledger advances the nonce and subtracts
//! `gas_used * effective_gas_price` from the receipt. The value is not
//! subtracted.

use std::path::Path;

use alloy::primitives::{Address, TxHash, U256};

use super::ledger::RunningLedger;
use super::outcome::{RunSummary, TokenBalance, Transfer, TransferError, TransferOutcome};
use super::{TransferMode, TransferPlan};
use crate::blockchain::erc20::encode_transfer;
use crate::blockchain::{
    format_amount, gas_cost, parse_amount, CallRequest, Chain, ChainError, NetworkConfig,
    TxParams, NATIVE_DECIMALS,
};
use crate::error::InitError;
use crate::logging::TransferLog;
use crate::recipients::RecipientList;

/// Sequential batch sender.
pub struct TransferEngine<C, L> {
    chain: C,
    log: L,
    network: NetworkConfig,
    sender: Address,
    recipients: RecipientList,
    plan: TransferPlan,
    ledger: RunningLedger,
}

impl<C: Chain, L: TransferLog> TransferEngine<C, L> {
    /// Load the recipient list at `address_file`, then read the sender's
    /// starting nonce and balance.
    ///
    /// A missing address file fails before any chain request is made.
    pub async fn initialize(
        chain: C,
        network: NetworkConfig,
        sender: Address,
        address_file: &Path,
        plan: TransferPlan,
        log: L,
    ) -> Result<Self, InitError> {
        let recipients = RecipientList::load(address_file)?;
        tracing::info!(
            path = %address_file.display(),
            count = recipients.len(),
            "Loaded recipient addresses"
        );
        Ok(Self::with_recipients(chain, network, sender, recipients, plan, log).await?)
    }

    /// Start from an already loaded recipient list.
    pub async fn with_recipients(
        chain: C,
        network: NetworkConfig,
        sender: Address,
        recipients: RecipientList,
        plan: TransferPlan,
        log: L,
    ) -> Result<Self, ChainError> {
        let nonce = chain.pending_nonce(sender).await?;
        let balance = chain.balance(sender).await?;

        tracing::info!(
            network = %network.name,
            chain_id = network.chain_id,
            sender = %sender,
            nonce,
            balance = %format_amount(balance, NATIVE_DECIMALS),
            "Transfer engine ready"
        );

        Ok(Self {
            chain,
            log,
            network,
            sender,
            recipients,
            plan,
            ledger: RunningLedger::new(nonce, balance),
        })
    }

    /// Current ledger state.
    pub fn ledger(&self) -> RunningLedger {
        self.ledger
    }

    /// Send to every recipient in order and log each outcome.
    ///
    /// Never stops early: every recipient is attempted exactly once.
    pub async fn run(&mut self) -> RunSummary {
        let mut ledger = self.ledger;
        let mut summary = RunSummary::default();
        let amount = self.plan.amount.as_str();

        for recipient in self.recipients.iter() {
            let outcome = match self.plan.mode {
                TransferMode::Native => self.send_native(&mut ledger, recipient, amount).await,
                TransferMode::Token(token) => {
                    self.send_token(&mut ledger, recipient, amount, token).await
                }
            };
            self.report(recipient, &outcome);
            summary.record(&outcome);
        }

        self.ledger = ledger;
        self.log.info(&format!(
            "Run complete: {} attempted, {} succeeded, {} failed",
            summary.attempted, summary.succeeded, summary.failed
        ));
        summary
    }

    /// Send `amount` of native currency to `recipient`.
    ///
    /// `ledger` is only touched once a transaction has been mined.
    pub async fn send_native(
        &self,
        ledger: &mut RunningLedger,
        recipient: &str,
        amount: &str,
    ) -> TransferOutcome {
        let to = parse_recipient(recipient)?;
        let value = parse_amount(amount, NATIVE_DECIMALS)?;

        let gas_price = self.chain.gas_price().await?;
        let call = CallRequest::native(self.sender, to, value);
        let gas_limit = self.chain.estimate_gas(&call).await?;
        let total_cost = value.saturating_add(gas_cost(gas_limit, gas_price));

        if !ledger.covers(total_cost) {
            return Err(TransferError::InsufficientFunds {
                required: total_cost,
                available: ledger.balance(),
            });
        }

        let (tx_hash, nonce) = self
            .confirm(ledger, &call, gas_limit, gas_price, total_cost)
            .await?;

        Ok(Transfer {
            recipient: recipient.to_string(),
            tx_hash,
            nonce,
            amount: amount.to_string(),
            symbol: self.network.symbol.clone(),
            native_balance: ledger.balance(),
            token_balance: None,
        })
    }

    /// Send `amount` of the ERC-20 at `token` to `recipient`.
    ///
    /// Only the gas is checked against the native balance estimate. A
    /// shortfall in the token balance shows up as a reverted transaction.
    pub async fn send_token(
        &self,
        ledger: &mut RunningLedger,
        recipient: &str,
        amount: &str,
        token: Address,
    ) -> TransferOutcome {
        let to = parse_recipient(recipient)?;
        let decimals = self.chain.token_decimals(token).await?;
        let symbol = self.chain.token_symbol(token).await?;
        let units = parse_amount(amount, decimals)?;

        let call = CallRequest::contract_call(self.sender, token, encode_transfer(to, units));
        let gas_price = self.chain.gas_price().await?;
        let gas_limit = self.chain.estimate_gas(&call).await?;
        let fee = gas_cost(gas_limit, gas_price);

        if !ledger.covers(fee) {
            return Err(TransferError::InsufficientFunds {
                required: fee,
                available: ledger.balance(),
            });
        }

        let (tx_hash, nonce) = self.confirm(ledger, &call, gas_limit, gas_price, fee).await?;

        // The transfer is final at this point; a failed read only loses the
        // balance line.
        let token_balance = match self.chain.token_balance(token, self.sender).await {
            Ok(raw) => Some(TokenBalance { raw, decimals }),
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "Failed to read token balance");
                None
            }
        };

        Ok(Transfer {
            recipient: recipient.to_string(),
            tx_hash,
            nonce,
            amount: amount.to_string(),
            symbol,
            native_balance: ledger.balance(),
            token_balance,
        })
    }

    /// Sign with the ledger nonce, broadcast, wait for the receipt and settle
    /// the ledger.
    async fn confirm(
        &self,
        ledger: &mut RunningLedger,
        call: &CallRequest,
        gas_limit: u64,
        gas_price: u128,
        cost: U256,
    ) -> Result<(TxHash, u64), TransferError> {
        let nonce = ledger.nonce();
        let params = TxParams {
            nonce,
            gas_limit,
            gas_price,
        };

        let tx_hash = self.chain.submit(call, params).await?;
        tracing::debug!(tx_hash = %tx_hash, nonce, gas_limit, gas_price, "Transaction broadcast");

        let receipt = self.chain.wait_for_receipt(tx_hash).await?;
        tracing::debug!(
            tx_hash = %tx_hash,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            success = receipt.success,
            "Transaction mined"
        );

        if !receipt.success {
            let gas_spent = receipt.gas_cost();
            ledger.record_revert(gas_spent);
            return Err(TransferError::Reverted { tx_hash, gas_spent });
        }

        ledger.record_success(cost);
        Ok((tx_hash, nonce))
    }

    fn report(&self, recipient: &str, outcome: &TransferOutcome) {
        let symbol = &self.network.symbol;
        match outcome {
            Ok(transfer) => {
                let native_balance = format_amount(transfer.native_balance, NATIVE_DECIMALS);
                match (&self.plan.mode, &transfer.token_balance) {
                    (TransferMode::Native, _) => {
                        self.log.info(&format!(
                            "Transaction success: {} {} sent to {} | Tx Hash: {:?}",
                            transfer.amount, transfer.symbol, recipient, transfer.tx_hash
                        ));
                        self.log
                            .info(&format!("Remaining Balance: {native_balance} {symbol}"));
                    }
                    (TransferMode::Token(_), token_balance) => {
                        self.log.info(&format!(
                            "Token transfer success: {} {} sent to {} | Tx Hash: {:?}",
                            transfer.amount, transfer.symbol, recipient, transfer.tx_hash
                        ));
                        if let Some(balance) = token_balance {
                            self.log.info(&format!(
                                "Remaining Token Balance: {} {}",
                                balance.formatted(),
                                transfer.symbol
                            ));
                        }
                        self.log.info(&format!(
                            "Estimated Remaining Balance: {native_balance} {symbol}"
                        ));
                    }
                }
                if let Some(url) = self.network.tx_url(&transfer.tx_hash) {
                    self.log.info(&format!("Explorer: {url}"));
                }
            }
            Err(e @ TransferError::InsufficientFunds { .. }) => match self.plan.mode {
                TransferMode::Native => self.log.error(&format!(
                    "Insufficient funds for transaction to {recipient}. Transaction aborted. ({e})"
                )),
                TransferMode::Token(_) => self.log.error(&format!(
                    "Insufficient {symbol} for gas to send {} to {recipient}. Transaction aborted. ({e})",
                    self.plan.amount
                )),
            },
            Err(TransferError::Reverted { tx_hash, gas_spent }) => {
                self.log.error(&format!(
                    "Transaction to {recipient} reverted | Tx Hash: {tx_hash:?} | Gas spent: {} {symbol}",
                    format_amount(*gas_spent, NATIVE_DECIMALS)
                ));
            }
            Err(TransferError::Submission(e)) => {
                self.log
                    .error(&format!("Error during transaction to {recipient}: {e}"));
            }
        }
    }
}

fn parse_recipient(recipient: &str) -> Result<Address, ChainError> {
    recipient
        .parse::<Address>()
        .map_err(|e| ChainError::InvalidAddress(format!("{recipient}: {e}")))
}
