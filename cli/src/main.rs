// Copyright (c) 2026 Lumen Contributors. MIT License.
// See LICENSE for details.

//! # Lumen CLI
//!
//! Command-line client for the Lumen wallet library: key generation,
//! address derivation, and a full signed-transfer demo against an
//! in-memory ledger.

mod cli;
mod ledger;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use lumen_wallet::config::Network;
use lumen_wallet::crypto::{CurveId, Keypair, PublicKey};
use lumen_wallet::identity::{Address, Wallet};
use lumen_wallet::ledger::Ledger;

use crate::cli::{Commands, DemoArgs, DeriveArgs, LumenCli, NewArgs};
use crate::ledger::MemoryLedger;
use crate::logging::{init_logging, LogFormat};

fn main() -> Result<()> {
    let args = LumenCli::parse();

    init_logging(
        "lumen=info,lumen_wallet=info",
        LogFormat::from_str_lossy(&args.log_format),
    );

    match args.command {
        Commands::New(new_args) => cmd_new(new_args),
        Commands::Derive(derive_args) => cmd_derive(derive_args),
        Commands::Demo(demo_args) => cmd_demo(demo_args),
        Commands::Version => {
            println!("lumen {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn parse_curve(name: &str) -> Result<CurveId> {
    match CurveId::from_name(name) {
        Some(curve) => Ok(curve),
        None => bail!("unknown curve '{}' (expected nist-p256 or secp256k1)", name),
    }
}

fn parse_network(name: &str) -> Result<Network> {
    match Network::from_name(name) {
        Some(network) => Ok(network),
        None => bail!("unknown network '{}' (expected mainnet or testnet)", name),
    }
}

fn cmd_new(args: NewArgs) -> Result<()> {
    let curve = parse_curve(&args.curve)?;
    let network = parse_network(&args.network)?;

    let keypair = Keypair::generate(curve).context("keypair generation failed")?;
    let secret = keypair.secret_key_bytes();
    let (wallet, created) = Wallet::from_secret_bytes(curve, network, &secret)
        .context("wallet construction failed")?;

    info!(
        address = %created.address,
        curve = %created.curve,
        network = %created.network,
        "wallet created"
    );

    println!("address:    {}", wallet.address());
    println!("public key: {}", wallet.public_key().to_hex());
    if args.show_secret {
        println!("secret key: {}", hex::encode(secret));
    }
    Ok(())
}

fn cmd_derive(args: DeriveArgs) -> Result<()> {
    let curve = parse_curve(&args.curve)?;
    let network = parse_network(&args.network)?;

    let public_key = PublicKey::from_hex(curve, &args.public_key)
        .context("could not parse the public key")?;
    let address = Address::derive(&public_key, network);

    println!("{}", address);
    Ok(())
}

/// Three wallets, one faucet credit, one signed transfer, three balances.
fn cmd_demo(args: DemoArgs) -> Result<()> {
    let curve = parse_curve(&args.curve)?;
    let network = parse_network(&args.network)?;
    if args.value == 0 {
        bail!("transfer value must be greater than zero");
    }

    let mut ledger = MemoryLedger::new();

    let (miner, miner_created) =
        Wallet::generate(curve, network).context("miner wallet generation failed")?;
    let (alice, alice_created) =
        Wallet::generate(curve, network).context("sender wallet generation failed")?;
    let (bob, bob_created) =
        Wallet::generate(curve, network).context("recipient wallet generation failed")?;
    for created in [&miner_created, &alice_created, &bob_created] {
        info!(
            address = %created.address,
            curve = %created.curve,
            network = %created.network,
            "wallet created"
        );
    }

    // Fund the sender so the transfer can settle.
    ledger.credit(alice.address(), args.value.saturating_mul(10));

    let tx = alice
        .transfer_to(bob.address(), args.value)
        .context("transfer authorization failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&tx).context("could not serialize the transfer")?
    );

    ledger
        .accept_transaction(&tx)
        .context("ledger rejected the transfer")?;
    info!(
        sender = %tx.sender(),
        recipient = %tx.recipient(),
        value = tx.value(),
        "transfer accepted"
    );

    println!("miner balance:     {}", ledger.total_amount(miner.address()));
    println!("sender balance:    {}", ledger.total_amount(alice.address()));
    println!("recipient balance: {}", ledger.total_amount(bob.address()));
    Ok(())
}
