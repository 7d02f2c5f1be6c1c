//! Compact-bits difficulty targets.
//!
//! Targets travel in the compact ("nBits") form: one exponent byte and a
//! 23-bit mantissa. Conversions here are the value-preserving subset the
//! parameter core needs; difficulty retargeting itself lives with block
//! validation.

use coin405_primitives::Hash256;
use num_bigint::BigUint;
use num_traits::Zero;

/// Decode a compact-form target. The sign bit is ignored; a zero mantissa
/// decodes to zero.
pub fn compact_to_target(bits: u32) -> BigUint {
    let size = (bits >> 24) as usize;
    let word = bits & 0x007f_ffff;

    if size <= 3 {
        BigUint::from(word >> (8 * (3 - size)))
    } else {
        BigUint::from(word) << (8 * (size - 3))
    }
}

/// Encode a target in canonical compact form. Lossy for targets with more
/// than 23 significant bits, like the original encoding.
pub fn target_to_compact(target: &BigUint) -> u32 {
    if target.is_zero() {
        return 0;
    }
    let bytes = target.to_bytes_be();
    let mut size = bytes.len();
    let mut word: u32 = 0;
    for &byte in bytes.iter().take(3) {
        word = (word << 8) | byte as u32;
    }
    if size < 3 {
        word <<= 8 * (3 - size);
    }
    // A set high bit would read back as negative; shift the mantissa down a
    // byte instead.
    if word & 0x0080_0000 != 0 {
        word >>= 8;
        size += 1;
    }
    ((size as u32) << 24) | word
}

/// Numeric value of a block hash, for target comparison.
pub fn hash_value(hash: &Hash256) -> BigUint {
    BigUint::from_bytes_be(&hash.to_be_bytes())
}

/// Whether the hash satisfies the proof-of-work target.
pub fn hash_meets_target(hash: &Hash256, target: &BigUint) -> bool {
    hash_value(hash) <= *target
}
