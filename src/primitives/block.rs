// Data Structures: Block
use super::encode::{Encodable, write_hash, write_i32, write_u32, write_vec};
use super::transaction::Transaction;
use crate::crypto::hash::{Hash256, hash_sha256d_concat};

pub const BLOCK_HEADER_BYTES: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// Computes the block hash: SHA-256d of the 80 byte header
    pub fn hash(&self) -> Hash256 {
        Hash256::hash(&self.serialize())
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        write_i32(buf, self.version);
        write_hash(buf, &self.prev_block_hash);
        write_hash(buf, &self.merkle_root);
        write_u32(buf, self.time);
        write_u32(buf, self.bits);
        write_u32(buf, self.nonce);
    }
}

/// A Full Block containing the header and ordered transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    // The first transaction must always be the coinbase.
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    /// Compute the Merkle Root over the txids using SHA-256d.
    pub fn compute_merkle_root(transactions: &[Transaction]) -> Hash256 {
        if transactions.is_empty() {
            return Hash256::ZERO;
        }

        let mut current_level: Vec<Hash256> = transactions.iter().map(|tx| tx.txid()).collect();

        while current_level.len() > 1 {
            let next_level = current_level
                .chunks(2)
                .map(|pair| {
                    // Duplicate last element if odd number
                    let right = pair.get(1).unwrap_or(&pair[0]);
                    Hash256(hash_sha256d_concat(pair[0].as_bytes(), right.as_bytes()))
                })
                .collect();
            current_level = next_level;
        }

        current_level[0]
    }

    /// Merkle root of this block's own transactions.
    pub fn build_merkle_root(&self) -> Hash256 {
        Self::compute_merkle_root(&self.transactions)
    }
}

impl Encodable for Block {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        self.header.consensus_encode(buf);
        write_vec(buf, &self.transactions);
    }
}
