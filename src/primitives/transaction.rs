// Data Structures: Transaction
//
// Proof-of-stake layout: the transaction carries its own timestamp right
// after the version, so txids differ from plain Bitcoin for the same
// inputs and outputs.
use super::encode::{
    Encodable, write_hash, write_i32, write_i64, write_u32, write_var_bytes, write_vec,
};
use super::script::Script;
use crate::crypto::hash::Hash256;

pub const UNITS_PER_SKULL: i64 = 100_000_000;
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint a coinbase input refers to.
    pub const fn null() -> Self {
        OutPoint {
            txid: Hash256::ZERO,
            vout: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    pub fn coinbase(script_sig: Script) -> Self {
        TxIn {
            prevout: OutPoint::null(),
            script_sig,
            sequence: SEQUENCE_FINAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: i64,
    pub script_pubkey: Script,
}

impl TxOut {
    /// Zero value, empty script. Used for outputs that can never be spent.
    pub fn empty() -> Self {
        TxOut {
            value: 0,
            script_pubkey: Script::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub time: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Transaction ID: SHA-256d of the full serialization
    pub fn txid(&self) -> Hash256 {
        Hash256::hash(&self.serialize())
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }
}

impl Encodable for OutPoint {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        write_hash(buf, &self.txid);
        write_u32(buf, self.vout);
    }
}

impl Encodable for TxIn {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        self.prevout.consensus_encode(buf);
        write_var_bytes(buf, self.script_sig.as_bytes());
        write_u32(buf, self.sequence);
    }
}

impl Encodable for TxOut {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        write_i64(buf, self.value);
        write_var_bytes(buf, self.script_pubkey.as_bytes());
    }
}

impl Encodable for Transaction {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        write_i32(buf, self.version);
        write_u32(buf, self.time);
        write_vec(buf, &self.inputs);
        write_vec(buf, &self.outputs);
        write_u32(buf, self.lock_time);
    }
}
