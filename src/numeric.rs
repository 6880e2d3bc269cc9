//! Big-endian numeric primitives shared by every fixed-width codec.
//!
//! Conversions between arbitrary-precision integers and the 32-byte
//! big-endian words the ABI uses on the wire, plus the `ceil32` rounding
//! rule that governs dynamic-value padding.

use num_bigint::{BigInt, BigUint, Sign};

use crate::error::AbiError;

pub const WORD_SIZE: usize = 32;

/// Rounds `n` up to the next multiple of 32.
#[inline]
pub fn ceil32(n: usize) -> usize {
    (n + WORD_SIZE - 1) / WORD_SIZE * WORD_SIZE
}

/// Encodes `value` as a 32-byte big-endian word, left-padded with zero
/// bytes, after checking it fits in an unsigned integer of `bits` width.
pub fn uint_to_word(value: &BigUint, bits: u16, type_string: &str) -> Result<[u8; 32], AbiError> {
    if value.bits() > bits as u64 {
        return Err(AbiError::ValueOutOfRange {
            type_string: type_string.to_string(),
        });
    }
    let raw = value.to_bytes_be();
    let mut word = [0u8; WORD_SIZE];
    let start = WORD_SIZE - raw.len();
    word[start..].copy_from_slice(&raw);
    Ok(word)
}

/// Decodes a 32-byte big-endian word as an unsigned integer of `bits`
/// width, rejecting any non-zero byte in the high `(32 - bits/8)` bytes.
pub fn uint_from_word(
    word: &[u8; 32],
    bits: u16,
    type_string: &str,
    offset: usize,
) -> Result<BigUint, AbiError> {
    let value_bytes = (bits / 8) as usize;
    let padding_len = WORD_SIZE - value_bytes;
    if word[..padding_len].iter().any(|&b| b != 0) {
        return Err(AbiError::NonEmptyPadding {
            type_string: type_string.to_string(),
            offset,
        });
    }
    Ok(BigUint::from_bytes_be(&word[padding_len..]))
}

/// Encodes `value` as a 32-byte two's-complement word, sign-extended on
/// the high side, after checking it fits in a signed integer of `bits`
/// width.
pub fn int_to_word(value: &BigInt, bits: u16, type_string: &str) -> Result<[u8; 32], AbiError> {
    let half = BigInt::from(1u8) << (bits as usize - 1);
    let low = -&half;
    let high = &half - BigInt::from(1u8);
    if value < &low || value > &high {
        return Err(AbiError::ValueOutOfRange {
            type_string: type_string.to_string(),
        });
    }

    let sign_byte = if value.sign() == Sign::Minus { 0xffu8 } else { 0x00u8 };
    let raw = value.to_signed_bytes_be();
    if raw.len() > WORD_SIZE {
        return Err(AbiError::ValueOutOfRange {
            type_string: type_string.to_string(),
        });
    }
    let mut word = [sign_byte; WORD_SIZE];
    let start = WORD_SIZE - raw.len();
    word[start..].copy_from_slice(&raw);
    Ok(word)
}

/// Decodes a 32-byte two's-complement word as a signed integer of `bits`
/// width. The high padding bytes must equal `0x00` for non-negative
/// values and `0xFF` for negative values.
pub fn int_from_word(
    word: &[u8; 32],
    bits: u16,
    type_string: &str,
    offset: usize,
) -> Result<BigInt, AbiError> {
    let value_bytes = (bits / 8) as usize;
    let padding_len = WORD_SIZE - value_bytes;
    let is_negative = word[padding_len] & 0x80 != 0;
    let expected_pad = if is_negative { 0xffu8 } else { 0x00u8 };
    if word[..padding_len].iter().any(|&b| b != expected_pad) {
        return Err(AbiError::NonEmptyPadding {
            type_string: type_string.to_string(),
            offset,
        });
    }
    Ok(BigInt::from_signed_bytes_be(&word[padding_len..]))
}
