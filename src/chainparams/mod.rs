//! Network profiles and the registry that selects the active one.
//!
//! Every profile is built once at startup, its genesis block rebuilt and
//! checked against the hardcoded hash and merkle root. A mismatch is an
//! error from the factory; the daemon treats it as fatal.

pub mod networks;
pub mod profile;
pub mod registry;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::consensus::genesis::GenesisError;
use crate::crypto::hash::HashParseError;

pub use networks::{main_defaults, main_profile, test_overrides, test_profile};
pub use profile::{NetworkProfile, ProfileDefaults, ProfileOverrides, build_profile};
pub use registry::ChainRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Main,
    Test,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 2] = [NetworkKind::Main, NetworkKind::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Main => "main",
            NetworkKind::Test => "test",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid network name: {0}")]
pub struct NetworkNameError(pub String);

impl FromStr for NetworkKind {
    type Err = NetworkNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkKind::Main),
            "test" | "testnet" => Ok(NetworkKind::Test),
            other => Err(NetworkNameError(other.to_string())),
        }
    }
}

/// Address kinds with their own Base58 version prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}

#[derive(Debug, thiserror::Error)]
pub enum ChainParamsError {
    #[error("{network} network: {source}")]
    Genesis {
        network: NetworkKind,
        #[source]
        source: GenesisError,
    },
    #[error("malformed constant {name}: {source}")]
    InvalidConstant {
        name: &'static str,
        #[source]
        source: HashParseError,
    },
    #[error("{0} network: proof-of-work limit must be non-zero")]
    InvalidPowLimit(NetworkKind),
    #[error("networks {first} and {second} share message start {magic}")]
    DuplicateMagic {
        first: NetworkKind,
        second: NetworkKind,
        magic: String,
    },
    #[error("network {0} registered twice")]
    DuplicateNetwork(NetworkKind),
    #[error("network {0} is not registered")]
    UnknownNetwork(NetworkKind),
}
