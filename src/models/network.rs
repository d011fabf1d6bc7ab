use core::fmt;

/// Chains the relayer can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
#[repr(u64)]
pub enum RelayNetwork {
    #[strum(serialize = "mainnet", serialize = "celo")]
    Celo = 42220,
    #[strum(serialize = "alfajores", serialize = "celo-alfajores")]
    CeloAlfajores = 44787,
}

impl RelayNetwork {
    /// Selects the network from the deployment environment name.
    ///
    /// `development` targets the test network, every other value targets
    /// production.
    pub fn from_node_env(node_env: &str) -> Self {
        if node_env.eq_ignore_ascii_case("development") {
            RelayNetwork::CeloAlfajores
        } else {
            RelayNetwork::Celo
        }
    }

    pub const fn chain_id(self) -> u64 {
        self as u64
    }

    pub const fn name(self) -> &'static str {
        match self {
            RelayNetwork::Celo => "mainnet",
            RelayNetwork::CeloAlfajores => "alfajores",
        }
    }

    pub const fn public_rpc_url(self) -> &'static str {
        match self {
            RelayNetwork::Celo => "https://forno.celo.org",
            RelayNetwork::CeloAlfajores => "https://alfajores-forno.celo-testnet.org",
        }
    }

    /// Key of this network's section in the relayer address file.
    pub const fn relayer_addresses_key(self) -> &'static str {
        match self {
            RelayNetwork::Celo => "prod",
            RelayNetwork::CeloAlfajores => "staging",
        }
    }
}

impl fmt::Display for RelayNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
