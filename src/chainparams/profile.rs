// Network profile: one immutable parameter set per network
use serde::Serialize;

use super::{Base58Type, ChainParamsError, NetworkKind};
use crate::consensus::genesis::{GenesisSpec, create_genesis_block};
use crate::consensus::pow::Target;
use crate::crypto::hash::Hash256;
use crate::net::seeds::{DnsSeed, NetAddress, SeedSpec6, expand_seeds_now};
use crate::primitives::block::Block;

/// Base58 version prefixes, one per address kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

/// A complete description of a network, before anything is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub kind: NetworkKind,
    pub magic_bytes: [u8; 4],
    pub default_port: u16,
    pub rpc_port: u16,
    pub pow_limit: Target,
    pub genesis: GenesisSpec,
    pub base58_prefixes: Base58Prefixes,
    pub dns_seeds: Vec<DnsSeed>,
    pub seed_table: Vec<SeedSpec6>,
    pub last_pow_block: i32,
    pub data_dir_name: String,
}

/// Fields a derived network replaces. `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOverrides {
    pub kind: Option<NetworkKind>,
    pub magic_bytes: Option<[u8; 4]>,
    pub default_port: Option<u16>,
    pub rpc_port: Option<u16>,
    pub pow_limit: Option<Target>,
    pub genesis_time: Option<u32>,
    pub genesis_nonce: Option<u32>,
    pub genesis_hash: Option<Hash256>,
    pub genesis_merkle_root: Option<Hash256>,
    pub base58_prefixes: Option<Base58Prefixes>,
    pub dns_seeds: Option<Vec<DnsSeed>>,
    pub seed_table: Option<Vec<SeedSpec6>>,
    pub last_pow_block: Option<i32>,
    pub data_dir_name: Option<String>,
}

impl ProfileDefaults {
    /// Pure merge; nothing is hashed or validated here.
    pub fn apply(mut self, o: ProfileOverrides) -> ProfileDefaults {
        if let Some(v) = o.kind {
            self.kind = v;
        }
        if let Some(v) = o.magic_bytes {
            self.magic_bytes = v;
        }
        if let Some(v) = o.default_port {
            self.default_port = v;
        }
        if let Some(v) = o.rpc_port {
            self.rpc_port = v;
        }
        if let Some(v) = o.pow_limit {
            self.pow_limit = v;
        }
        if let Some(v) = o.genesis_time {
            self.genesis.block_time = v;
        }
        if let Some(v) = o.genesis_nonce {
            self.genesis.nonce = v;
        }
        if let Some(v) = o.genesis_hash {
            self.genesis.expected_hash = v;
        }
        if let Some(v) = o.genesis_merkle_root {
            self.genesis.expected_merkle_root = v;
        }
        if let Some(v) = o.base58_prefixes {
            self.base58_prefixes = v;
        }
        if let Some(v) = o.dns_seeds {
            self.dns_seeds = v;
        }
        if let Some(v) = o.seed_table {
            self.seed_table = v;
        }
        if let Some(v) = o.last_pow_block {
            self.last_pow_block = v;
        }
        if let Some(v) = o.data_dir_name {
            self.data_dir_name = v;
        }
        self
    }
}

/// A built and validated network profile. Read-only after construction.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    kind: NetworkKind,
    magic_bytes: [u8; 4],
    default_port: u16,
    rpc_port: u16,
    pow_limit: Target,
    genesis: Block,
    base58_prefixes: Base58Prefixes,
    dns_seeds: Vec<DnsSeed>,
    fixed_seeds: Vec<NetAddress>,
    last_pow_block: i32,
    data_dir_name: String,
}

/// Builds `base` with `overrides` applied, rebuilding and checking the
/// genesis block.
pub fn build_profile(
    base: ProfileDefaults,
    overrides: ProfileOverrides,
) -> Result<NetworkProfile, ChainParamsError> {
    let d = base.apply(overrides);

    if d.pow_limit.0.is_zero() {
        return Err(ChainParamsError::InvalidPowLimit(d.kind));
    }

    let genesis = create_genesis_block(&d.genesis, d.pow_limit).map_err(|source| {
        ChainParamsError::Genesis {
            network: d.kind,
            source,
        }
    })?;

    let fixed_seeds = expand_seeds_now(&d.seed_table);

    log::debug!(
        "built {} profile: magic {}, port {}, genesis {}",
        d.kind,
        hex::encode(d.magic_bytes),
        d.default_port,
        genesis.hash()
    );

    Ok(NetworkProfile {
        kind: d.kind,
        magic_bytes: d.magic_bytes,
        default_port: d.default_port,
        rpc_port: d.rpc_port,
        pow_limit: d.pow_limit,
        genesis,
        base58_prefixes: d.base58_prefixes,
        dns_seeds: d.dns_seeds,
        fixed_seeds,
        last_pow_block: d.last_pow_block,
        data_dir_name: d.data_dir_name,
    })
}

impl NetworkProfile {
    pub fn network_id(&self) -> NetworkKind {
        self.kind
    }

    pub fn magic_bytes(&self) -> [u8; 4] {
        self.magic_bytes
    }

    /// Whether a message start belongs to this network.
    pub fn accepts_magic(&self, magic: &[u8; 4]) -> bool {
        &self.magic_bytes == magic
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    pub fn pow_limit(&self) -> Target {
        self.pow_limit
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.genesis.hash()
    }

    pub fn genesis_merkle_root(&self) -> Hash256 {
        self.genesis.header.merkle_root
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    pub fn base58_prefixes(&self) -> &Base58Prefixes {
        &self.base58_prefixes
    }

    pub fn dns_seeds(&self) -> &[DnsSeed] {
        &self.dns_seeds
    }

    pub fn fixed_seeds(&self) -> &[NetAddress] {
        &self.fixed_seeds
    }

    pub fn last_pow_block(&self) -> i32 {
        self.last_pow_block
    }

    /// Subdirectory of the data dir; empty for main.
    pub fn data_dir_name(&self) -> &str {
        &self.data_dir_name
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            network: self.kind,
            magic_bytes: hex::encode(self.magic_bytes),
            default_port: self.default_port,
            rpc_port: self.rpc_port,
            pow_limit: self.pow_limit.to_hex(),
            pow_limit_bits: format!("{:08x}", self.pow_limit.to_compact()),
            genesis_hash: self.genesis_hash(),
            genesis_merkle_root: self.genesis_merkle_root(),
            genesis_time: self.genesis.header.time,
            genesis_nonce: self.genesis.header.nonce,
            base58_prefixes: self.base58_prefixes.clone(),
            dns_seeds: self.dns_seeds.clone(),
            fixed_seeds: self.fixed_seeds.clone(),
            last_pow_block: self.last_pow_block,
        }
    }
}

/// JSON view of a profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub network: NetworkKind,
    pub magic_bytes: String,
    pub default_port: u16,
    pub rpc_port: u16,
    pub pow_limit: String,
    pub pow_limit_bits: String,
    pub genesis_hash: Hash256,
    pub genesis_merkle_root: Hash256,
    pub genesis_time: u32,
    pub genesis_nonce: u32,
    pub base58_prefixes: Base58Prefixes,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<NetAddress>,
    pub last_pow_block: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::networks::main_defaults;

    #[test]
    fn test_apply_keeps_unset_fields() {
        let base = main_defaults().unwrap();
        let merged = base.clone().apply(ProfileOverrides {
            rpc_port: Some(1),
            ..Default::default()
        });
        assert_eq!(merged.rpc_port, 1);
        assert_eq!(merged.default_port, base.default_port);
        assert_eq!(merged.genesis, base.genesis);
    }

    #[test]
    fn test_apply_genesis_fields() {
        let merged = main_defaults().unwrap().apply(ProfileOverrides {
            genesis_time: Some(5),
            genesis_nonce: Some(6),
            ..Default::default()
        });
        assert_eq!(merged.genesis.block_time, 5);
        assert_eq!(merged.genesis.nonce, 6);
        // coinbase is shared and untouched
        assert_eq!(
            merged.genesis.coinbase_time,
            main_defaults().unwrap().genesis.coinbase_time
        );
    }

    #[test]
    fn test_zero_pow_limit_rejected() {
        let err = build_profile(
            main_defaults().unwrap(),
            ProfileOverrides {
                pow_limit: Some(Target(primitive_types::U256::zero())),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ChainParamsError::InvalidPowLimit(NetworkKind::Main)));
    }

    #[test]
    fn test_mismatched_genesis_is_an_error_not_a_panic() {
        let err = build_profile(
            main_defaults().unwrap(),
            ProfileOverrides {
                genesis_nonce: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ChainParamsError::Genesis {
                network: NetworkKind::Main,
                ..
            }
        ));
        assert!(err.to_string().starts_with("main network: genesis hash mismatch"));
    }

    #[test]
    fn test_summary_serializes() {
        let profile =
            build_profile(main_defaults().unwrap(), ProfileOverrides::default()).unwrap();
        let json = serde_json::to_value(profile.summary()).unwrap();
        assert_eq!(json["network"], "main");
        assert_eq!(json["magic_bytes"], "c5cb1aae");
        assert_eq!(json["pow_limit_bits"], "1e0fffff");
        assert_eq!(json["base58_prefixes"]["pubkey_address"][0], 63);
    }
}
