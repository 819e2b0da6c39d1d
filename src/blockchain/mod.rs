// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration for EVM networks.
//!
//! This module provides functionality for:
//! - Querying native and ERC-20 balances and token metadata
//! - Gas estimation, transaction signing and broadcasting
//! - Waiting for receipts
//! - Decimal amount conversion

pub mod chain;
pub mod client;
pub mod erc20;
pub mod signing;
pub mod types;
pub mod units;

#[cfg(test)]
pub mod mock;

pub use chain::Chain;
pub use client::{ChainError, EvmClient};
pub use signing::Account;
pub use types::*;
pub use units::{format_amount, parse_amount};
