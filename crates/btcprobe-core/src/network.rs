//! Network selection and the per-network encoding constants.
//!
//! Every encoding call takes a [`NetworkParams`] explicitly; nothing in this
//! crate falls back to a process-wide default network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeriveError;

// ==============================================================================
// Network
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Signet,
        Network::Regtest,
    ];

    #[must_use]
    pub const fn params(self) -> NetworkParams {
        match self {
            Self::Mainnet => NetworkParams {
                network: self,
                pubkey_hash_version: 0x00,
                script_hash_version: 0x05,
                wif_version: 0x80,
                bech32_hrp: "bc",
            },
            Self::Testnet | Self::Signet => NetworkParams {
                network: self,
                pubkey_hash_version: 0x6f,
                script_hash_version: 0xc4,
                wif_version: 0xef,
                bech32_hrp: "tb",
            },
            Self::Regtest => NetworkParams {
                network: self,
                pubkey_hash_version: 0x6f,
                script_hash_version: 0xc4,
                wif_version: 0xef,
                bech32_hrp: "bcrt",
            },
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Signet => write!(f, "signet"),
            Self::Regtest => write!(f, "regtest"),
        }
    }
}

/// Accepts both our own names and the chain names Bitcoin Core reports in
/// `getblockchaininfo` (`main`, `test`, ...).
impl FromStr for Network {
    type Err = DeriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "bitcoin" => Ok(Self::Mainnet),
            "test" | "testnet" | "testnet3" => Ok(Self::Testnet),
            "signet" => Ok(Self::Signet),
            "regtest" => Ok(Self::Regtest),
            other => Err(DeriveError::UnsupportedNetwork(format!(
                "unrecognized network name `{other}`"
            ))),
        }
    }
}

impl TryFrom<bitcoin::Network> for Network {
    type Error = DeriveError;

    fn try_from(network: bitcoin::Network) -> Result<Self, Self::Error> {
        match network {
            bitcoin::Network::Bitcoin => Ok(Self::Mainnet),
            bitcoin::Network::Testnet => Ok(Self::Testnet),
            bitcoin::Network::Signet => Ok(Self::Signet),
            bitcoin::Network::Regtest => Ok(Self::Regtest),
            other => Err(DeriveError::UnsupportedNetwork(format!(
                "no encoding table for {other}"
            ))),
        }
    }
}

// ==============================================================================
// Network Params
// ==============================================================================

/// Version bytes and Bech32 prefix used when rendering keys and addresses
/// for one network.
///
/// Fields are public so a caller can inspect them, but encoders only accept a
/// value that matches the table for its `network` exactly (see
/// [`NetworkParams::validate`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    pub network: Network,
    pub pubkey_hash_version: u8,
    pub script_hash_version: u8,
    pub wif_version: u8,
    pub bech32_hrp: &'static str,
}

impl NetworkParams {
    pub const MAINNET: NetworkParams = Network::Mainnet.params();
    pub const TESTNET: NetworkParams = Network::Testnet.params();
    pub const SIGNET: NetworkParams = Network::Signet.params();
    pub const REGTEST: NetworkParams = Network::Regtest.params();

    /// Confirm these params are one of the known tables and return the
    /// network they belong to.
    pub fn validate(&self) -> Result<Network, DeriveError> {
        if *self == self.network.params() {
            Ok(self.network)
        } else {
            Err(DeriveError::UnsupportedNetwork(format!(
                "params (p2pkh=0x{:02x}, p2sh=0x{:02x}, wif=0x{:02x}, hrp={}) do not match {}",
                self.pubkey_hash_version,
                self.script_hash_version,
                self.wif_version,
                self.bech32_hrp,
                self.network
            )))
        }
    }
}

impl From<Network> for NetworkParams {
    fn from(network: Network) -> Self {
        network.params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_core_chain_names() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("Regtest".parse::<Network>().unwrap(), Network::Regtest);
        assert_eq!("signet".parse::<Network>().unwrap(), Network::Signet);
    }

    #[test]
    fn rejects_unknown_network_name() {
        let err = "litecoin".parse::<Network>().expect_err("must reject");
        assert!(matches!(err, DeriveError::UnsupportedNetwork(_)));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn builtin_params_validate() {
        for network in Network::ALL {
            assert_eq!(network.params().validate().unwrap(), network);
        }
    }

    #[test]
    fn tampered_params_are_rejected() {
        let mut params = NetworkParams::TESTNET;
        params.pubkey_hash_version = 0x30;
        assert!(matches!(
            params.validate(),
            Err(DeriveError::UnsupportedNetwork(_))
        ));

        let mut params = NetworkParams::MAINNET;
        params.bech32_hrp = "ltc";
        assert!(matches!(
            params.validate(),
            Err(DeriveError::UnsupportedNetwork(_))
        ));
    }

    #[test]
    fn maps_bitcoin_crate_networks() {
        assert_eq!(
            Network::try_from(bitcoin::Network::Bitcoin).unwrap(),
            Network::Mainnet
        );
        assert_eq!(
            Network::try_from(bitcoin::Network::Regtest).unwrap(),
            Network::Regtest
        );
    }
}
