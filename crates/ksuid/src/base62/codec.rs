//! Fixed-width base62 conversion between 20 binary bytes and 27 ASCII digits.
//!
//! Both directions run schoolbook long division over small fixed arrays on
//! the stack: encoding divides five 32-bit words by 62, decoding divides 27
//! base62 digits by 2^32. There is no heap allocation and the number of
//! passes is bounded by the output width.

use crate::{Error, Result};

/// Base62 digits in ascending value order. ASCII order of the digits matches
/// their numeric order, which is what keeps the text form sortable.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of base62 digits produced for 20 input bytes.
pub const ENCODED_LEN: usize = 27;

/// Number of bytes produced when decoding 27 base62 digits.
pub const DECODED_LEN: usize = 20;

const NO_VALUE: u8 = 255;
const WORDS: usize = DECODED_LEN / 4;

/// Lookup table for base62 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Encodes 20 bytes as 27 base62 digits, written into `dst`.
///
/// The input is read as five big-endian 32-bit words. Each pass divides the
/// whole word array by 62; the remainder is the next least-significant digit
/// and the quotient (with leading zero words dropped) feeds the next pass.
/// Positions left over once the quotient reaches zero are padded with `'0'`,
/// so the output is always exactly 27 characters.
pub fn encode_base62(src: &[u8; DECODED_LEN], dst: &mut [u8; ENCODED_LEN]) {
    const SRC_BASE: u64 = 1 << 32;
    const DST_BASE: u64 = 62;

    let mut parts = [0_u32; WORDS];
    for (word, chunk) in parts.iter_mut().zip(src.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let mut len = WORDS;
    let mut n = ENCODED_LEN;

    while len != 0 {
        let mut quotient = [0_u32; WORDS];
        let mut qlen = 0;
        let mut remainder = 0_u64;

        for &c in &parts[..len] {
            let value = u64::from(c) + remainder * SRC_BASE;
            let digit = value / DST_BASE;
            remainder = value % DST_BASE;

            if qlen != 0 || digit != 0 {
                // digit < 2^32 because remainder < 62
                quotient[qlen] = digit as u32;
                qlen += 1;
            }
        }

        // 62^27 > 2^160, so at most 27 passes ever run.
        n -= 1;
        dst[n] = ALPHABET[remainder as usize];
        parts = quotient;
        len = qlen;
    }

    dst[..n].fill(ALPHABET[0]);
}

/// Decodes 27 base62 digits into `dst`, right-aligned and zero-filled.
///
/// Each pass divides the digit array by 2^32 and writes the remainder as the
/// next least-significant big-endian word of `dst`.
///
/// # Errors
///
/// - [`Error::InvalidCharacter`] if `src` contains a byte outside
///   [`ALPHABET`].
/// - [`Error::ShortBuffer`] if the value has more significant words than fit
///   in `dst`. For a 20-byte `dst` this happens exactly when the value is
///   2^160 or larger.
pub fn decode_base62(src: &[u8; ENCODED_LEN], dst: &mut [u8]) -> Result<()> {
    const SRC_BASE: u64 = 62;
    const DST_BASE: u64 = 1 << 32;

    let mut parts = [0_u8; ENCODED_LEN];
    for (index, (digit, &byte)) in parts.iter_mut().zip(src).enumerate() {
        let value = LOOKUP[byte as usize];
        if value == NO_VALUE {
            return Err(Error::InvalidCharacter { byte, index });
        }
        *digit = value;
    }

    let mut len = ENCODED_LEN;
    let mut n = dst.len();

    while len != 0 {
        let mut quotient = [0_u8; ENCODED_LEN];
        let mut qlen = 0;
        let mut remainder = 0_u64;

        for &c in &parts[..len] {
            let value = u64::from(c) + remainder * SRC_BASE;
            let digit = value / DST_BASE;
            remainder = value % DST_BASE;

            if qlen != 0 || digit != 0 {
                // digit < 62 because remainder < 2^32
                quotient[qlen] = digit as u8;
                qlen += 1;
            }
        }

        if n < 4 {
            return Err(Error::ShortBuffer { need: 4 - n });
        }

        dst[n - 4..n].copy_from_slice(&(remainder as u32).to_be_bytes());
        n -= 4;
        parts = quotient;
        len = qlen;
    }

    dst[..n].fill(0);
    Ok(())
}
