// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Result of a single transfer and of a whole run.

use alloy::primitives::{TxHash, U256};

use crate::blockchain::{format_amount, ChainError, NATIVE_DECIMALS};

/// Outcome of one recipient's transfer.
pub type TransferOutcome = Result<Transfer, TransferError>;

/// A mined, successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub recipient: String,
    pub tx_hash: TxHash,
    /// Nonce the transaction was sent with
    pub nonce: u64,
    /// Amount as requested (decimal string)
    pub amount: String,
    /// Symbol of what was sent
    pub symbol: String,
    /// Native balance estimate after the transfer, in wei
    pub native_balance: U256,
    /// Token balance re-read after a token transfer
    pub token_balance: Option<TokenBalance>,
}

/// Token balance read from the chain, with the decimals to display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub raw: U256,
    pub decimals: u8,
}

impl TokenBalance {
    pub fn formatted(&self) -> String {
        format_amount(self.raw, self.decimals)
    }
}

/// Why a transfer did not go through. None of these stop the run.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(
        "Insufficient funds: need {} but estimated balance is {}",
        native(.required),
        native(.available)
    )]
    InsufficientFunds { required: U256, available: U256 },

    #[error(transparent)]
    Submission(#[from] ChainError),

    #[error("Transaction {tx_hash} reverted (gas spent: {})", native(.gas_spent))]
    Reverted { tx_hash: TxHash, gas_spent: U256 },
}

fn native(amount: &U256) -> String {
    format_amount(*amount, NATIVE_DECIMALS)
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &TransferOutcome) {
        self.attempted += 1;
        match outcome {
            Ok(_) => self.succeeded += 1,
            Err(_) => self.failed += 1,
        }
    }
}
