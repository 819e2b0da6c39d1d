// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command line arguments. Every option falls back to an environment variable.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{
    DEFAULT_ADDRESSES_FILE, DEFAULT_AMOUNT, DEFAULT_CHAINS_FILE, DEFAULT_DEPLOY_LOG,
    DEFAULT_NETWORK, DEFAULT_SEND_LOG,
};

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Batch native/ERC-20 transfers and ERC-20 deployment for EVM testnets")]
#[command(
    long_about = "Sends the same amount of native currency or of an ERC-20 token to every \
    address of a list, one confirmed transaction at a time, and deploys compiled ERC-20 \
    contracts. The private key is read from PRIVATE_KEY unless --key-file is given."
)]
pub struct Cli {
    /// JSON chain list
    #[arg(long, env = "CHAINS_FILE", default_value = DEFAULT_CHAINS_FILE)]
    pub chains: PathBuf,

    /// Name of the network to use, as listed in the chain list
    #[arg(long, env = "SELECTED_CHAIN", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// PEM-encoded secp256k1 private key (takes precedence over PRIVATE_KEY)
    #[arg(long, env = "PRIVATE_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send the same amount to every address of a list
    Send(SendArgs),
    /// Deploy a compiled ERC-20 contract and print its details
    Deploy(DeployArgs),
}

#[derive(clap::Args, Debug)]
pub struct SendArgs {
    /// Recipient list, one address per line
    #[arg(long, env = "ADDRESSES_FILE", default_value = DEFAULT_ADDRESSES_FILE)]
    pub addresses: PathBuf,

    /// Amount per recipient, in whole units
    #[arg(long, env = "AMOUNT_TO_SEND", default_value = DEFAULT_AMOUNT)]
    pub amount: String,

    /// ERC-20 contract to send; native currency when empty
    #[arg(long, env = "TOKEN_CONTRACT_ADDRESS")]
    pub token: Option<String>,

    /// Append-only log file
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_SEND_LOG)]
    pub log_file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct DeployArgs {
    /// Contract creation code as hex (`solc --bin` output)
    #[arg(long)]
    pub bytecode: PathBuf,

    /// Append-only log file
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_DEPLOY_LOG)]
    pub log_file: PathBuf,
}

impl Command {
    pub fn log_file(&self) -> &PathBuf {
        match self {
            Command::Send(args) => &args.log_file,
            Command::Deploy(args) => &args.log_file,
        }
    }
}
