//! 256-bit unsigned counter used as the authorization floor.
//!
//! Stored big-endian so that byte-wise ordering equals numeric ordering and the
//! value can be hashed exactly as a 32-byte EVM word.

use core::fmt;

/// Unsigned 256-bit integer, big-endian.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counter([u8; 32]);

impl Counter {
    pub const LEN: usize = 32;
    pub const ZERO: Counter = Counter([0; 32]);
    pub const MAX: Counter = Counter([0xff; 32]);

    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Reads a big-endian word from the first 32 bytes of `data`.
    pub fn from_be_slice(data: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = data.get(..32)?.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Returns the value if it fits in a `u64`.
    pub fn to_u64(&self) -> Option<u64> {
        if self.0[..24].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&self.0[24..]);
        Some(u64::from_be_bytes(low))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn checked_add_u64(&self, rhs: u64) -> Option<Self> {
        let mut out = self.0;
        let mut carry = rhs as u128;
        for byte in out.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let sum = *byte as u128 + (carry & 0xff);
            *byte = sum as u8;
            carry = (carry >> 8) + (sum >> 8);
        }
        if carry != 0 {
            return None;
        }
        Some(Self(out))
    }
}

impl From<u64> for Counter {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(small) = self.to_u64() {
            return write!(f, "{}", small);
        }
        f.write_str("0x")?;
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_numeric() {
        assert!(Counter::from_u64(5) < Counter::from_u64(7));
        assert!(Counter::from_u64(u64::MAX) < Counter::from_u64(1).checked_add_u64(u64::MAX).unwrap());
        let mut high = [0u8; 32];
        high[0] = 1;
        assert!(Counter::from_be_bytes(high) > Counter::from_u64(u64::MAX));
    }

    #[test]
    fn add_carries_across_words() {
        let sum = Counter::from_u64(u64::MAX).checked_add_u64(1).unwrap();
        let mut expected = [0u8; 32];
        expected[23] = 1;
        assert_eq!(sum.to_be_bytes(), expected);
        assert_eq!(sum.to_u64(), None);
        assert!(Counter::MAX.checked_add_u64(1).is_none());
        assert_eq!(Counter::MAX.checked_add_u64(0), Some(Counter::MAX));
    }

    #[test]
    fn display_uses_decimal_when_small() {
        assert_eq!(Counter::from_u64(42).to_string(), "42");
        assert!(Counter::MAX.to_string().starts_with("0xffff"));
    }
}
