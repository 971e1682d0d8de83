//! Sync-safe integer encoding.
//!
//! ID3v2 stores sizes as 28-bit integers spread over 4 bytes, using only the
//! low 7 bits of each byte (most-significant byte first). The high bit of
//! every encoded byte is zero, so an encoded size can never be mistaken for
//! an MPEG frame sync pattern.
//!
//! ```text
//! value:   0000 aaaa aaab bbbb bbcc cccc cddd dddd
//! encoded: 0aaaaaaa 0bbbbbbb 0ccccccc 0ddddddd
//! ```

use crate::{Error, Result};

/// Largest value a sync-safe integer can hold (2^28 - 1).
pub const SYNCSAFE_MAX: u32 = 0x0FFF_FFFF;

/// Decodes 4 sync-safe bytes into a 28-bit value.
///
/// The high bit of each byte is ignored, so corrupt input that sets it still
/// decodes to a value within range.
pub fn decode(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | u32::from(b & 0x7F))
}

/// Encodes a value as 4 sync-safe bytes.
///
/// # Errors
///
/// Returns [`Error::SizeOverflow`] if `value` exceeds [`SYNCSAFE_MAX`].
pub fn encode(value: u32) -> Result<[u8; 4]> {
    if value > SYNCSAFE_MAX {
        return Err(Error::SizeOverflow {
            size: u64::from(value),
            max: SYNCSAFE_MAX,
        });
    }
    Ok([
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ])
}

/// Checks that a byte count fits in a sync-safe integer and narrows it.
pub fn checked_size(size: usize) -> Result<u32> {
    match u32::try_from(size) {
        Ok(v) if v <= SYNCSAFE_MAX => Ok(v),
        _ => Err(Error::SizeOverflow {
            size: size as u64,
            max: SYNCSAFE_MAX,
        }),
    }
}
