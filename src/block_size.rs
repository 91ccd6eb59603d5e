#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A block size expressed as a mantissa and exponent in the formula:
///
/// ```text
/// 2^exponent * (2 * mantissa + 1)
/// ```
///
/// Every positive integer factors uniquely as a power of two times an odd
/// number, so each representable size has exactly one `(mantissa, exponent)`
/// form. This makes the raw pair a compact, unambiguous two-byte encoding of
/// the size, and it is embedded verbatim in node frames when interleaving is
/// active.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockSize {
    /// Mantissa of the block size
    pub mantissa: u8,
    /// Exponent of the block size
    pub exponent: u8,
}

impl BlockSize {
    /// Creates a new block size with given mantissa and exponent
    #[inline]
    pub fn new(mantissa: u8, exponent: u8) -> BlockSize {
        BlockSize { mantissa, exponent }
    }

    /// Returns the block size as a total number of bytes
    ///
    /// Saturates at `u64::MAX` for representations wider than 64 bits, which
    /// keeps the function total over all mantissa/exponent pairs.
    pub fn value(self) -> u64 {
        let odd = (2 * u64::from(self.mantissa)) + 1;

        if u32::from(self.exponent) > odd.leading_zeros() {
            u64::MAX
        } else {
            odd << self.exponent
        }
    }

    /// Returns the unique block size representing `value` bytes; `None` if
    /// `value` is zero or its odd part does not fit in the mantissa
    pub fn for_value(value: u64) -> Option<BlockSize> {
        if value == 0 {
            return None;
        }

        let exponent = value.trailing_zeros();
        let mantissa = (value >> exponent) / 2;

        if mantissa > u64::from(u8::MAX) {
            return None;
        }

        Some(BlockSize::new(
            mantissa as u8,
            exponent as u8, // trailing_zeros of a non-zero u64 is at most 63
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value_boundaries() {
        assert_eq!(1, BlockSize::new(0, 0).value());
        assert_eq!(28, BlockSize::new(3, 2).value());
        assert_eq!(255, BlockSize::new(127, 0).value());
        assert_eq!(1 << 63, BlockSize::new(0, 63).value());
    }

    #[test]
    fn check_value_monotonic_in_exponent() {
        for exponent in 0..16 {
            assert!(BlockSize::new(5, exponent).value() < BlockSize::new(5, exponent + 1).value());
        }
    }

    #[test]
    fn check_value_saturation() {
        assert_eq!(u64::MAX, BlockSize::new(0, 64).value());
        assert_eq!(u64::MAX, BlockSize::new(1, 63).value());
        assert_eq!(u64::MAX, BlockSize::new(255, 255).value());
    }

    #[test]
    fn check_for_value() {
        assert_eq!(None, BlockSize::for_value(0));
        assert_eq!(Some(BlockSize::new(0, 0)), BlockSize::for_value(1));
        assert_eq!(Some(BlockSize::new(3, 2)), BlockSize::for_value(28));
        assert_eq!(Some(BlockSize::new(0, 10)), BlockSize::for_value(1024));
        assert_eq!(None, BlockSize::for_value(513)); // odd part 513 needs mantissa 256

        // Any value below 512 has an odd part that fits in the mantissa
        for value in 1..512 {
            assert_eq!(value, BlockSize::for_value(value).unwrap().value());
        }
    }
}
