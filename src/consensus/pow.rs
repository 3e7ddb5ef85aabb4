// Proof-of-work targets and their compact ("nBits") encoding
use primitive_types::U256;

use crate::crypto::hash::Hash256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompactError {
    #[error("compact target {0:#010x} is negative")]
    Negative(u32),
    #[error("compact target {0:#010x} overflows 256 bits")]
    Overflow(u32),
}

/// A 256-bit difficulty target. Larger means easier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(pub U256);

impl Target {
    /// `!0 >> shift`, the form every network's limit is authored in.
    pub fn max_shifted(shift: u32) -> Self {
        Target(U256::MAX >> shift)
    }

    pub fn to_compact(self) -> u32 {
        let mut size = (self.0.bits() as u32).div_ceil(8);
        let mut compact = if size <= 3 {
            self.0.low_u32() << (8 * (3 - size))
        } else {
            (self.0 >> (8 * (size - 3))).low_u32()
        };
        // keep the mantissa's sign bit clear
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        compact | (size << 24)
    }

    pub fn from_compact(bits: u32) -> Result<Self, CompactError> {
        let size = bits >> 24;
        let mut word = bits & 0x007f_ffff;
        let negative = word != 0 && (bits & 0x0080_0000) != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
        if negative {
            return Err(CompactError::Negative(bits));
        }
        if overflow {
            return Err(CompactError::Overflow(bits));
        }
        let value = if size <= 3 {
            word >>= 8 * (3 - size);
            U256::from(word)
        } else {
            U256::from(word) << (8 * (size - 3))
        };
        Ok(Target(value))
    }

    /// Whether a block hash meets this target.
    pub fn is_met_by(&self, hash: &Hash256) -> bool {
        U256::from_little_endian(hash.as_bytes()) <= self.0
    }

    pub fn to_hex(&self) -> String {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_compact() {
        assert_eq!(Target::max_shifted(20).to_compact(), 0x1e0f_ffff);
        assert_eq!(Target::max_shifted(8).to_compact(), 0x2000_ffff);
        // Bitcoin's own limit as a sanity anchor
        assert_eq!(Target::max_shifted(32).to_compact(), 0x1d00_ffff);
    }

    #[test]
    fn test_from_compact_truncates() {
        let limit = Target::max_shifted(20);
        let decoded = Target::from_compact(limit.to_compact()).unwrap();
        assert!(decoded <= limit);
        assert_eq!(decoded.to_compact(), limit.to_compact());
    }

    #[test]
    fn test_small_values() {
        let t = Target::from_compact(0x0112_3456).unwrap();
        assert_eq!(t.0, U256::from(0x12u32));
        let t = Target::from_compact(0x0312_3456).unwrap();
        assert_eq!(t.0, U256::from(0x12_3456u32));
        assert_eq!(Target(U256::from(0x12_3456u32)).to_compact(), 0x0312_3456);
        assert_eq!(Target(U256::zero()).to_compact(), 0);
    }

    #[test]
    fn test_rejects_negative_and_overflow() {
        assert_eq!(
            Target::from_compact(0x0480_0001),
            Err(CompactError::Negative(0x0480_0001))
        );
        assert_eq!(
            Target::from_compact(0xff12_3456),
            Err(CompactError::Overflow(0xff12_3456))
        );
    }

    #[test]
    fn test_is_met_by() {
        let easy = Target::max_shifted(0);
        let mut h = [0xffu8; 32];
        assert!(easy.is_met_by(&Hash256(h)));
        let hard = Target::max_shifted(20);
        assert!(!hard.is_met_by(&Hash256(h)));
        h[31] = 0x00;
        h[30] = 0x00;
        h[29] = 0x00;
        assert!(hard.is_met_by(&Hash256(h)));
    }

    #[test]
    fn test_hex_is_big_endian() {
        assert!(Target::max_shifted(20).to_hex().starts_with("00000fff"));
    }
}
