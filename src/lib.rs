// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM Batch Sender - ERC-20 deployment and batch transfers for EVM testnets
//!
//! Sends native currency or an ERC-20 token to every address of a list, one
//! confirmed transaction at a time, tracking nonce and balance locally.
//!
//! ## Modules
//!
//! - `blockchain` - JSON-RPC client, signing, ERC-20 bindings, amounts
//! - `cli` - Command line arguments (clap)
//! - `config` - Chain list, key material and input files
//! - `deploy` - Contract deployment and token info
//! - `logging` - Console and file logging, outcome log interface
//! - `recipients` - Recipient address list
//! - `transfer` - Sequential transfer engine and running ledger

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod recipients;
pub mod transfer;
