//! Relayer Signer Lookup Tool
//!
//! Prints the signer address derived for each rate feed, i.e. the account
//! that has to be funded and whitelisted on the feed's relayer contract.
//!
//! Reads the mnemonic from Secret Manager using `GCP_PROJECT_ID` and
//! `RELAYER_MNEMONIC_SECRET_ID`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example get_relayer_signer -- CELO/PHP PHP/USD
//! ```
use clap::Parser;
use dotenvy::dotenv;
use eyre::{Result, WrapErr};
use oracle_relayer::{
    services::{GcpSecretManagerService, SecretServiceTrait},
    utils::derive_relayer_account,
};
use std::env;

/// Command line arguments for signer lookup
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rate feeds to derive the signer for, e.g. CELO/PHP
    #[arg(required = true)]
    rate_feeds: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    let args = Args::parse();

    let project_id = env::var("GCP_PROJECT_ID").wrap_err("GCP_PROJECT_ID must be set")?;
    let secret_id =
        env::var("RELAYER_MNEMONIC_SECRET_ID").wrap_err("RELAYER_MNEMONIC_SECRET_ID must be set")?;

    let mnemonic = GcpSecretManagerService::new(project_id)
        .get_secret(&secret_id)
        .await
        .wrap_err("Failed to fetch relayer mnemonic")?;

    for rate_feed in &args.rate_feeds {
        let identity = derive_relayer_account(&mnemonic.to_str(), rate_feed)
            .wrap_err_with(|| format!("Failed to derive signer for {}", rate_feed))?;
        println!("{}: {}", rate_feed, identity.address);
    }

    Ok(())
}
