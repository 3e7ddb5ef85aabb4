// Consensus serialization
//
// Little-endian fixed-width integers and Bitcoin compact-size prefixes.
// Hashes are written in internal byte order.

use crate::crypto::hash::Hash256;

/// Types with a canonical consensus byte encoding.
pub trait Encodable {
    fn consensus_encode(&self, buf: &mut Vec<u8>);

    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.consensus_encode(&mut buf);
        buf
    }
}

pub fn write_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn write_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn write_i64(buf: &mut Vec<u8>, v: i64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn write_hash(buf: &mut Vec<u8>, h: &Hash256) {
    buf.extend_from_slice(h.as_bytes());
}

pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Length-prefixed byte string.
pub fn write_var_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    write_compact_size(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

pub fn write_vec<T: Encodable>(buf: &mut Vec<u8>, items: &[T]) {
    write_compact_size(buf, items.len() as u64);
    for item in items {
        item.consensus_encode(buf);
    }
}
