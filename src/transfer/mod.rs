// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Batch transfers: one confirmed transaction per recipient, in list order.

pub mod engine;
pub mod ledger;
pub mod outcome;

use alloy::primitives::Address;

pub use engine::TransferEngine;
pub use ledger::RunningLedger;
pub use outcome::{RunSummary, TokenBalance, Transfer, TransferError, TransferOutcome};

/// What every transfer of a run sends. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// The chain's native currency
    Native,
    /// An ERC-20 token at this contract address
    Token(Address),
}

/// Amount and mode shared by every transfer of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    /// Decimal amount per recipient, in whole units (e.g. "0.01")
    pub amount: String,
    pub mode: TransferMode,
}
