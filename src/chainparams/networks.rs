// Main and test network parameter tables
//
// These values are historical data shared with every deployed node. Keep
// them as they are, including the main network's identical pubkey and
// script prefixes.

use super::profile::{Base58Prefixes, NetworkProfile, ProfileDefaults, ProfileOverrides, build_profile};
use super::{ChainParamsError, NetworkKind};
use crate::consensus::genesis::{GENESIS_COINBASE_TIME, GENESIS_TIMESTAMP_MESSAGE, GenesisSpec};
use crate::consensus::pow::Target;
use crate::crypto::hash::Hash256;
use crate::net::seeds::{DnsSeed, SeedSpec6};

/// Main message start: rarely used upper ASCII, not valid UTF-8, and a large
/// 32-bit int at any alignment.
pub const MAIN_MAGIC: [u8; 4] = [0xc5, 0xcb, 0x1a, 0xae];
pub const MAIN_P2P_PORT: u16 = 38008;
pub const MAIN_RPC_PORT: u16 = 38009;
pub const MAIN_POW_LIMIT_SHIFT: u32 = 20;
/// Thu, 05 Jul 2018 21:00:00 GMT
pub const MAIN_GENESIS_TIME: u32 = 1_530_824_400;
pub const MAIN_GENESIS_NONCE: u32 = 403_743;
pub const MAIN_GENESIS_HASH: &str =
    "875f779060a38b8d1859dac0623b2b9de4d32012b1ccf43b007a0b55e93471af";
pub const MAIN_LAST_POW_BLOCK: i32 = 125_000;

pub const TEST_MAGIC: [u8; 4] = [0x79, 0x1a, 0x09, 0x3b];
pub const TEST_P2P_PORT: u16 = 17799;
pub const TEST_RPC_PORT: u16 = 19977;
pub const TEST_POW_LIMIT_SHIFT: u32 = 8;
/// Sat, 11 Mar 2017 01:28:20 GMT
pub const TEST_GENESIS_TIME: u32 = 1_489_195_700;
pub const TEST_GENESIS_NONCE: u32 = 55;
pub const TEST_GENESIS_HASH: &str =
    "aada3e4103f4137b99cf92f43af14c86215619c1fe70777f13652362accc91ba";
/// The PoW phase never ends on the test network.
pub const TEST_LAST_POW_BLOCK: i32 = i32::MAX;

/// Both networks share the genesis coinbase, hence the merkle root.
pub const GENESIS_MERKLE_ROOT: &str =
    "4c605f3f2b3ac1e2a9233399924e41b57b002000d70a41ef7bc66ccadf879c91";

/// Compiled-in fallback peers. Operators add more through a seed list file.
pub const MAIN_SEEDS: &[SeedSpec6] = &[];
pub const TEST_SEEDS: &[SeedSpec6] = &[];

fn hash_const(name: &'static str, s: &str) -> Result<Hash256, ChainParamsError> {
    Hash256::from_hex(s).map_err(|source| ChainParamsError::InvalidConstant { name, source })
}

pub fn main_defaults() -> Result<ProfileDefaults, ChainParamsError> {
    Ok(ProfileDefaults {
        kind: NetworkKind::Main,
        magic_bytes: MAIN_MAGIC,
        default_port: MAIN_P2P_PORT,
        rpc_port: MAIN_RPC_PORT,
        pow_limit: Target::max_shifted(MAIN_POW_LIMIT_SHIFT),
        genesis: GenesisSpec {
            timestamp_message: GENESIS_TIMESTAMP_MESSAGE.to_string(),
            coinbase_time: GENESIS_COINBASE_TIME,
            block_time: MAIN_GENESIS_TIME,
            nonce: MAIN_GENESIS_NONCE,
            version: 1,
            expected_hash: hash_const("MAIN_GENESIS_HASH", MAIN_GENESIS_HASH)?,
            expected_merkle_root: hash_const("GENESIS_MERKLE_ROOT", GENESIS_MERKLE_ROOT)?,
        },
        base58_prefixes: Base58Prefixes {
            pubkey_address: vec![63],
            script_address: vec![63],
            secret_key: vec![100],
            ext_public_key: vec![0x50, 0xE7, 0xFC, 0x0A],
            ext_secret_key: vec![0x50, 0x9E, 0x04, 0x2F],
        },
        dns_seeds: vec![
            DnsSeed::new("seed1.skullcash.tk", "seed1.skullcash.tk"),
            DnsSeed::new("seed2.skullcash.tk", "seed2.skullcash.tk"),
            DnsSeed::new("seed3.skullcash.tk", "seed3.skullcash.tk"),
            DnsSeed::new("seed4.skullcash.tk", "seed4.skullcash.tk"),
        ],
        seed_table: MAIN_SEEDS.to_vec(),
        last_pow_block: MAIN_LAST_POW_BLOCK,
        data_dir_name: String::new(),
    })
}

/// What the test network changes relative to main.
pub fn test_overrides() -> Result<ProfileOverrides, ChainParamsError> {
    Ok(ProfileOverrides {
        kind: Some(NetworkKind::Test),
        magic_bytes: Some(TEST_MAGIC),
        default_port: Some(TEST_P2P_PORT),
        rpc_port: Some(TEST_RPC_PORT),
        pow_limit: Some(Target::max_shifted(TEST_POW_LIMIT_SHIFT)),
        genesis_time: Some(TEST_GENESIS_TIME),
        genesis_nonce: Some(TEST_GENESIS_NONCE),
        genesis_hash: Some(hash_const("TEST_GENESIS_HASH", TEST_GENESIS_HASH)?),
        genesis_merkle_root: None,
        base58_prefixes: Some(Base58Prefixes {
            pubkey_address: vec![100],
            script_address: vec![125],
            secret_key: vec![41],
            ext_public_key: vec![0x1D, 0x9B, 0x7F, 0x74],
            ext_secret_key: vec![0x1D, 0xC0, 0xFC, 0x28],
        }),
        dns_seeds: Some(Vec::new()),
        seed_table: Some(TEST_SEEDS.to_vec()),
        last_pow_block: Some(TEST_LAST_POW_BLOCK),
        data_dir_name: Some("testnet".to_string()),
    })
}

pub fn main_profile() -> Result<NetworkProfile, ChainParamsError> {
    build_profile(main_defaults()?, ProfileOverrides::default())
}

pub fn test_profile() -> Result<NetworkProfile, ChainParamsError> {
    build_profile(main_defaults()?, test_overrides()?)
}
