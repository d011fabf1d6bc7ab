//! Relayer contract addresses per deployment environment.
//!
//! The file maps an environment key (`staging`, `prod`) to rate feed keys
//! (`celo_php`) and the relayer contract deployed for them:
//!
//! ```json
//! { "staging": { "celo_php": "0x..." }, "prod": { "celo_php": "0x..." } }
//! ```
//!
//! Rate feeds keep the order they have in the file.
use std::{fs, path::Path};

use alloy::primitives::Address;
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Environment keys in the order deployments are promoted.
pub const RELAYER_ADDRESS_ENVIRONMENTS: [&str; 2] = ["staging", "prod"];

#[derive(Debug, Error)]
pub enum RelayerAddressesError {
    #[error("Failed to read relayer addresses file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid relayer addresses JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RelayerAddresses(IndexMap<String, IndexMap<String, Address>>);

impl RelayerAddresses {
    pub fn from_json(json: &str) -> Result<Self, RelayerAddressesError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RelayerAddressesError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RelayerAddressesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Relayers of one environment keyed by rate feed key. Empty if unknown.
    pub fn environment(&self, key: &str) -> impl Iterator<Item = (&str, Address)> {
        self.0
            .get(key)
            .into_iter()
            .flat_map(|feeds| feeds.iter().map(|(feed, address)| (feed.as_str(), *address)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ADDRESSES: &str = r#"{
        "staging": {
            "php_usd": "0x1111111111111111111111111111111111111111",
            "celo_php": "0x2222222222222222222222222222222222222222"
        },
        "prod": {
            "celo_php": "0x3333333333333333333333333333333333333333"
        }
    }"#;

    #[test]
    fn test_environment_lists_feeds_in_file_order() {
        let addresses = RelayerAddresses::from_json(ADDRESSES).unwrap();
        let staging: Vec<_> = addresses.environment("staging").collect();
        assert_eq!(
            staging,
            vec![
                ("php_usd", address!("1111111111111111111111111111111111111111")),
                ("celo_php", address!("2222222222222222222222222222222222222222")),
            ]
        );
        assert_eq!(addresses.environment("prod").count(), 1);
        assert_eq!(addresses.environment("dev").count(), 0);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ADDRESSES.as_bytes()).unwrap();

        let addresses = RelayerAddresses::from_file(file.path()).unwrap();
        assert_eq!(addresses, RelayerAddresses::from_json(ADDRESSES).unwrap());
    }

    #[test]
    fn test_missing_file() {
        let err = RelayerAddresses::from_file("/nonexistent/relayer_addresses.json").unwrap_err();
        assert!(matches!(err, RelayerAddressesError::Io { .. }));
    }

    #[test]
    fn test_invalid_address() {
        let err = RelayerAddresses::from_json(r#"{"prod": {"celo_php": "0x12"}}"#).unwrap_err();
        assert!(matches!(err, RelayerAddressesError::Json(_)));
    }
}
