// Cryptographic Hashing Wrappers
use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

/// SHA-256: single pass, used by the double-hash helpers below
pub fn hash_sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256d: block header hashes, txids and merkle nodes
pub fn hash_sha256d(data: &[u8]) -> [u8; 32] {
    hash_sha256(&hash_sha256(data))
}

/// SHA-256d Concat: Hashes a then b without allocating a temporary Vec
pub fn hash_sha256d_concat(a: &[u8], b: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    let first: [u8; 32] = hasher.finalize().into();
    hash_sha256(&first)
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HashParseError {
    #[error("Invalid hash hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Invalid hash length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// A 256-bit hash in internal (little-endian) byte order.
///
/// Text form is the conventional reversed hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    pub fn hash(data: &[u8]) -> Self {
        Hash256(hash_sha256d(data))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parses display-order hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(HashParseError::InvalidLength(bytes.len()));
        }
        bytes.reverse();
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Hash256(out))
    }

    pub fn to_hex(&self) -> String {
        let mut rev = self.0;
        rev.reverse();
        hex::encode(rev)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash256::from_hex(s)
    }
}

impl serde::Serialize for Hash256 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256d_empty() {
        // well-known double SHA-256 of the empty string
        assert_eq!(
            hex::encode(hash_sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_concat_matches_buffer() {
        let joined = [b"skull".as_slice(), b"cash".as_slice()].concat();
        assert_eq!(hash_sha256d_concat(b"skull", b"cash"), hash_sha256d(&joined));
    }

    #[test]
    fn test_hex_is_reversed() {
        let mut raw = [0u8; 32];
        raw[31] = 0xab;
        let h = Hash256(raw);
        assert!(h.to_hex().starts_with("ab00"));
        assert_eq!(Hash256::from_hex(&h.to_hex()).unwrap(), h);
    }

    #[test]
    fn test_hex_prefix_and_length() {
        let s = format!("0x{}", "00".repeat(32));
        assert_eq!(Hash256::from_hex(&s).unwrap(), Hash256::ZERO);
        assert_eq!(
            Hash256::from_hex("abcd"),
            Err(HashParseError::InvalidLength(2))
        );
        assert!(matches!(
            Hash256::from_hex("zz"),
            Err(HashParseError::InvalidHex(_))
        ));
    }
}
