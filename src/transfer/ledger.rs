// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local nonce and balance tracking for one run.

use alloy::primitives::U256;

/// Running nonce and native balance estimate of the sending account.
///
/// Seeded once from the chain and then updated only from mined receipts. The
/// run is assumed to be the account's only writer; if anything else spends
/// from the account mid-run, the nonce here goes stale and later submissions
/// are rejected by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningLedger {
    nonce: u64,
    balance: U256,
}

impl RunningLedger {
    pub fn new(nonce: u64, balance: U256) -> Self {
        Self { nonce, balance }
    }

    /// Nonce of the next transaction.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Estimated native balance in wei.
    pub fn balance(&self) -> U256 {
        self.balance
    }

    pub fn covers(&self, cost: U256) -> bool {
        self.balance >= cost
    }

    /// A transaction costing `cost` was mined and succeeded.
    pub fn record_success(&mut self, cost: U256) {
        self.nonce += 1;
        self.balance = self.balance.saturating_sub(cost);
    }

    /// A transaction was mined but reverted: the nonce is used and only the
    /// gas was paid.
    pub fn record_revert(&mut self, gas_spent: U256) {
        self.nonce += 1;
        self.balance = self.balance.saturating_sub(gas_spent);
    }
}
