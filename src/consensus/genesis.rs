// Genesis block definition
//
// The genesis block is rebuilt from its recipe at startup and must hash to
// the hardcoded constants. Its coinbase output is empty: it predates the
// ledger that would track it and can never be spent.

use super::pow::Target;
use crate::crypto::hash::Hash256;
use crate::primitives::block::{Block, BlockHeader};
use crate::primitives::script::Script;
use crate::primitives::transaction::{Transaction, TxIn, TxOut};

/// Number pushed after OP_0 in the genesis coinbase script.
pub const GENESIS_COINBASE_MARKER: i64 = 42;

/// Shared by every network: the test network only changes block fields.
pub const GENESIS_TIMESTAMP_MESSAGE: &str = "SkullCash born Thu, 05 Jul 2018 21:00:00 GMT";

/// Coinbase time: Thu, 05 Jul 2018 21:00:00 GMT
pub const GENESIS_COINBASE_TIME: u32 = 1_530_824_400;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenesisError {
    #[error("genesis hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch { expected: Hash256, computed: Hash256 },
    #[error("genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch { expected: Hash256, computed: Hash256 },
    #[error("genesis bits {found:#010x} do not encode the proof-of-work limit ({expected:#010x})")]
    BitsMismatch { expected: u32, found: u32 },
}

/// Everything needed to rebuild one network's genesis block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisSpec {
    pub timestamp_message: String,
    pub coinbase_time: u32,
    pub block_time: u32,
    pub nonce: u32,
    pub version: i32,
    pub expected_hash: Hash256,
    pub expected_merkle_root: Hash256,
}

pub fn genesis_coinbase(spec: &GenesisSpec) -> Transaction {
    let script_sig = Script::new()
        .push_int(0)
        .push_bignum(GENESIS_COINBASE_MARKER)
        .push_slice(spec.timestamp_message.as_bytes());

    Transaction {
        version: 1,
        time: spec.coinbase_time,
        inputs: vec![TxIn::coinbase(script_sig)],
        outputs: vec![TxOut::empty()],
        lock_time: 0,
    }
}

/// Assembles the block without checking it.
pub fn build_genesis_block(spec: &GenesisSpec, pow_limit: Target) -> Block {
    let transactions = vec![genesis_coinbase(spec)];
    let header = BlockHeader {
        version: spec.version,
        prev_block_hash: Hash256::ZERO,
        merkle_root: Block::compute_merkle_root(&transactions),
        time: spec.block_time,
        bits: pow_limit.to_compact(),
        nonce: spec.nonce,
    };
    Block {
        header,
        transactions,
    }
}

pub fn verify_genesis_block(
    block: &Block,
    spec: &GenesisSpec,
    pow_limit: Target,
) -> Result<(), GenesisError> {
    let expected_bits = pow_limit.to_compact();
    if block.header.bits != expected_bits {
        return Err(GenesisError::BitsMismatch {
            expected: expected_bits,
            found: block.header.bits,
        });
    }

    let merkle_root = block.build_merkle_root();
    if merkle_root != spec.expected_merkle_root || block.header.merkle_root != merkle_root {
        return Err(GenesisError::MerkleRootMismatch {
            expected: spec.expected_merkle_root,
            computed: merkle_root,
        });
    }

    let hash = block.hash();
    if hash != spec.expected_hash {
        return Err(GenesisError::HashMismatch {
            expected: spec.expected_hash,
            computed: hash,
        });
    }
    Ok(())
}

/// Whether the header hash meets the target its own `bits` encode.
///
/// The pinned genesis hashes are SHA-256d values and do not, so this is
/// reported rather than enforced.
pub fn meets_own_bits(block: &Block) -> bool {
    Target::from_compact(block.header.bits).is_ok_and(|target| target.is_met_by(&block.hash()))
}

/// Builds and verifies in one step.
pub fn create_genesis_block(spec: &GenesisSpec, pow_limit: Target) -> Result<Block, GenesisError> {
    let block = build_genesis_block(spec, pow_limit);
    verify_genesis_block(&block, spec, pow_limit)?;
    log::debug!(
        "genesis {} verified (merkle {}, time {}, nonce {}, meets target: {})",
        block.hash(),
        block.header.merkle_root,
        block.header.time,
        block.header.nonce,
        meets_own_bits(&block)
    );
    Ok(block)
}
