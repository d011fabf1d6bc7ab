//! Aegis Config Export Tool
//!
//! Generates the monitoring config values for every relayer listed in the
//! relayer addresses file: rate feed ids, signer wallets, the freshness
//! metric per rate feed and the balance metric per signer.
//!
//! Reads the mnemonic from Secret Manager using `GCP_PROJECT_ID` and
//! `RELAYER_MNEMONIC_SECRET_ID`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example aegis_export -- --addresses infra/relayer_addresses.json
//! ```
use alloy::primitives::Address;
use clap::Parser;
use dotenvy::dotenv;
use eyre::{Result, WrapErr};
use oracle_relayer::{
    models::{RelayerAddresses, RELAYER_ADDRESS_ENVIRONMENTS},
    services::{GcpSecretManagerService, SecretServiceTrait},
    utils::{
        derive_relayer_account, rate_feed_key_to_label, rate_feed_key_to_name, relayed_label,
        to_rate_feed_id,
    },
};
use std::{collections::HashMap, env, fmt::Write};

/// Command line arguments for the export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the relayer addresses JSON file
    #[arg(short, long, default_value = "infra/relayer_addresses.json")]
    addresses: String,
}

#[derive(Debug)]
struct Relayer {
    label: String,
    rate_feed_id: Address,
    signer_address: Address,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    let args = Args::parse();

    let addresses = RelayerAddresses::from_file(&args.addresses)?;

    let project_id = env::var("GCP_PROJECT_ID").wrap_err("GCP_PROJECT_ID must be set")?;
    let secret_id =
        env::var("RELAYER_MNEMONIC_SECRET_ID").wrap_err("RELAYER_MNEMONIC_SECRET_ID must be set")?;
    let mnemonic = GcpSecretManagerService::new(project_id)
        .get_secret(&secret_id)
        .await
        .wrap_err("Failed to fetch relayer mnemonic")?;

    let mut relayers: Vec<Relayer> = Vec::new();
    let mut positions: HashMap<Address, usize> = HashMap::new();

    for environment in RELAYER_ADDRESS_ENVIRONMENTS {
        for (key, _relayer_address) in addresses.environment(environment) {
            let label = rate_feed_key_to_label(key);
            let rate_feed_id = to_rate_feed_id(&relayed_label(&label));
            let identity = derive_relayer_account(&mnemonic.to_str(), &rate_feed_key_to_name(key))
                .wrap_err_with(|| format!("Failed to derive signer for {}", key))?;

            let relayer = Relayer {
                label,
                rate_feed_id,
                signer_address: identity.address,
            };
            // later environments replace earlier entries of the same rate feed in place
            match positions.get(&rate_feed_id) {
                Some(&index) => relayers[index] = relayer,
                None => {
                    positions.insert(rate_feed_id, relayers.len());
                    relayers.push(relayer);
                }
            }
        }
    }

    println!("\x1b[1m{}\x1b[0m", generate_config_yaml(&relayers)?);
    Ok(())
}

fn generate_config_yaml(relayers: &[Relayer]) -> Result<String> {
    let mut yaml = String::new();
    writeln!(yaml)?;
    writeln!(yaml, "###############################################################")?;
    writeln!(yaml, "# Exemplary aegis config.yaml with all relevant values to add #")?;
    writeln!(yaml, "###############################################################")?;
    writeln!(yaml)?;
    writeln!(yaml, "global:")?;
    writeln!(yaml, "  vars:")?;
    writeln!(yaml, "    # Rate Feed IDs")?;
    for relayer in relayers {
        writeln!(
            yaml,
            "    '{}': '{}'",
            relayed_label(&relayer.label),
            relayer.rate_feed_id
        )?;
    }
    writeln!(yaml)?;
    writeln!(yaml, "    # Relayer Signer Wallets")?;
    for relayer in relayers {
        writeln!(
            yaml,
            "    RelayerSigner{}: '{}'",
            relayer.label, relayer.signer_address
        )?;
    }
    writeln!(yaml)?;
    writeln!(yaml, "metrics:")?;
    writeln!(yaml, "  # Checks for rate feed freshness")?;
    writeln!(
        yaml,
        "  - source: SortedOracles.isOldestReportExpired(address rateFeed)(bool,address)"
    )?;
    write_metric_header(&mut yaml)?;
    for relayer in relayers {
        writeln!(yaml, "      - [{}]", relayed_label(&relayer.label))?;
    }
    writeln!(yaml)?;
    writeln!(
        yaml,
        "  # Checks if the signer wallets have enough CELO to pay for the relay() transactions"
    )?;
    writeln!(yaml, "  - source: CELOToken.balanceOf(address owner)(uint256)")?;
    write_metric_header(&mut yaml)?;
    for relayer in relayers {
        writeln!(yaml, "      - [RelayerSigner{}]", relayer.label)?;
    }
    writeln!(yaml)?;
    writeln!(yaml, "################################################################")?;
    writeln!(yaml, "# Copy/paste the relevant values above into aegis' config.yaml #")?;
    writeln!(yaml, "################################################################")?;
    Ok(yaml)
}

fn write_metric_header(yaml: &mut String) -> std::fmt::Result {
    writeln!(yaml, "    schedule: 0/10 * * * * *")?;
    writeln!(yaml, "    type: gauge")?;
    writeln!(yaml, "    chains: all")?;
    writeln!(yaml, "    variants:")
}
