// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use evm_batch_sender::blockchain::{Account, EvmClient, NetworkConfig};
use evm_batch_sender::cli::{Cli, Command, DeployArgs, SendArgs};
use evm_batch_sender::config::{self, PRIVATE_KEY_ENV};
use evm_batch_sender::deploy::Deployer;
use evm_batch_sender::error::ConfigError;
use evm_batch_sender::logging::{init_logging, TracingLog, LOG_TARGET};
use evm_batch_sender::transfer::{TransferEngine, TransferPlan};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Keep the guard until return so buffered lines reach the log file.
    let _guard = match init_logging(cli.command.log_file()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: LOG_TARGET, "{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let network = config::load_network(&cli.chains, &cli.network)?;
    let private_key = std::env::var(PRIVATE_KEY_ENV).ok();
    let account = config::load_account(
        cli.key_file.as_deref(),
        private_key.as_deref(),
        network.chain_id,
    )?;

    tracing::info!(
        network = %network.name,
        chain_id = network.chain_id,
        account = %account.address(),
        "Using network"
    );

    let client = EvmClient::connect(network.clone(), &account)
        .map_err(ConfigError::Connection)?;

    match cli.command {
        Command::Send(args) => send(client, network, &account, args).await,
        Command::Deploy(args) => deploy(client, network, &account, args).await,
    }
}

async fn send(
    client: EvmClient,
    network: NetworkConfig,
    account: &Account,
    args: SendArgs,
) -> Result<()> {
    let plan = TransferPlan {
        amount: args.amount,
        mode: config::transfer_mode(args.token.as_deref())?,
    };

    let mut engine = TransferEngine::initialize(
        client,
        network,
        account.address(),
        &args.addresses,
        plan,
        TracingLog,
    )
    .await?;

    engine.run().await;
    Ok(())
}

async fn deploy(
    client: EvmClient,
    network: NetworkConfig,
    account: &Account,
    args: DeployArgs,
) -> Result<()> {
    let bytecode = config::load_bytecode(&args.bytecode)?;
    let deployer = Deployer::new(client, network, account.address(), TracingLog);

    let deployment = deployer
        .deploy(bytecode)
        .await
        .context("Error during contract deployment")?;

    deployer.log_contract_info(deployment.address).await;
    Ok(())
}
