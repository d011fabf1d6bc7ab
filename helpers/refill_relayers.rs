//! Relayer Refill Tool
//!
//! Tops up every relayer signer of a network whose balance dropped below
//! 5 CELO with a 50 CELO transfer from the refiller account.
//!
//! Requires `REFILLER_PRIVATE_KEY` (hex) plus `GCP_PROJECT_ID` and
//! `RELAYER_MNEMONIC_SECRET_ID` for the relayer mnemonic.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example refill_relayers -- alfajores --addresses infra/relayer_addresses.json
//! ```
use alloy::{
    primitives::{utils::format_ether, Address, TxHash, U256},
    signers::local::PrivateKeySigner,
};
use clap::Parser;
use dotenvy::dotenv;
use eyre::{eyre, Result, WrapErr};
use oracle_relayer::{
    constants::{
        DEFAULT_RPC_TIMEOUT_MS, RECEIPT_POLL_INTERVAL, RECEIPT_TIMEOUT, REFILL_MIN_BALANCE_CELO,
        REFILL_TRANSFER_AMOUNT_CELO, WEI_PER_CELO,
    },
    domain::wait_for_receipt,
    models::{RelayNetwork, RelayerAddresses},
    services::{
        get_network_provider, EvmProviderTrait, GcpSecretManagerService, LocalSigner,
        RelaySigner, RelaySignerTrait, SecretServiceTrait,
    },
    utils::{derive_relayer_account, rate_feed_key_to_name},
};
use std::{env, str::FromStr, sync::Arc};

/// Command line arguments for the refill
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Network to refill on: mainnet or alfajores
    #[arg(value_parser = RelayNetwork::from_str)]
    network: RelayNetwork,

    /// Path of the relayer addresses JSON file
    #[arg(short, long, default_value = "infra/relayer_addresses.json")]
    addresses: String,

    /// Overrides the network's public RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,
}

struct Transfer {
    rate_feed_key: String,
    address: Address,
    hash: TxHash,
}

fn celo(amount: u64) -> U256 {
    U256::from(amount) * U256::from(WEI_PER_CELO)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    let args = Args::parse();
    let network = args.network;

    println!("Refilling relayer accounts on {}...", network);

    let addresses = RelayerAddresses::from_file(&args.addresses)?;

    let refiller_key =
        env::var("REFILLER_PRIVATE_KEY").wrap_err("REFILLER_PRIVATE_KEY must be set")?;
    let refiller = PrivateKeySigner::from_str(refiller_key.trim())
        .map_err(|e| eyre!("Invalid REFILLER_PRIVATE_KEY: {}", e))?;

    let project_id = env::var("GCP_PROJECT_ID").wrap_err("GCP_PROJECT_ID must be set")?;
    let secret_id =
        env::var("RELAYER_MNEMONIC_SECRET_ID").wrap_err("RELAYER_MNEMONIC_SECRET_ID must be set")?;
    let mnemonic = GcpSecretManagerService::new(project_id)
        .get_secret(&secret_id)
        .await
        .wrap_err("Failed to fetch relayer mnemonic")?;

    let provider = Arc::new(get_network_provider(
        network,
        args.rpc_url.as_deref(),
        DEFAULT_RPC_TIMEOUT_MS,
    )?);
    let wallet = RelaySigner::new(
        LocalSigner::new(refiller),
        provider.clone(),
        network.chain_id(),
    );

    let min_balance = celo(REFILL_MIN_BALANCE_CELO);
    let transfer_amount = celo(REFILL_TRANSFER_AMOUNT_CELO);
    let mut transfers = Vec::new();

    for (key, _relayer_address) in addresses.environment(network.relayer_addresses_key()) {
        let identity = derive_relayer_account(&mnemonic.to_str(), &rate_feed_key_to_name(key))
            .wrap_err_with(|| format!("Failed to derive signer for {}", key))?;
        let balance = provider.get_balance(identity.address).await?;

        println!(
            "{}: {} - Balance: {} CELO",
            key,
            identity.address,
            format_ether(balance)
        );

        if balance >= min_balance {
            println!("  Balance is sufficient.");
            continue;
        }

        println!(
            "  Low balance detected. Transferring {} CELO...",
            REFILL_TRANSFER_AMOUNT_CELO
        );
        let sent = match wallet.send_value(identity.address, transfer_amount).await {
            Ok(hash) => wait_for_receipt(
                provider.as_ref(),
                hash,
                RECEIPT_TIMEOUT,
                RECEIPT_POLL_INTERVAL,
            )
            .await
            .map_err(|e| e.to_string())
            .and_then(|receipt| {
                receipt
                    .succeeded
                    .then_some(hash)
                    .ok_or_else(|| format!("transfer {} reverted", hash))
            }),
            Err(e) => Err(e.to_string()),
        };

        match sent {
            Ok(hash) => {
                println!("  Transaction sent: {}", hash);
                transfers.push(Transfer {
                    rate_feed_key: key.to_string(),
                    address: identity.address,
                    hash,
                });
            }
            Err(e) => eprintln!("  Error transferring CELO to {}: {}", key, e),
        }
    }

    if transfers.is_empty() {
        println!("\nNo transfers were needed. All relayer accounts have sufficient balance.");
    } else {
        println!("\nTransfers made:");
        for transfer in &transfers {
            println!(
                "- {}: {} CELO to {} (tx: {})",
                transfer.rate_feed_key,
                REFILL_TRANSFER_AMOUNT_CELO,
                transfer.address,
                transfer.hash
            );
        }
    }

    Ok(())
}
