//! Text encodings used inside frame bodies.
//!
//! Every text-bearing frame starts with an encoding byte selecting one of
//! four encodings. Decoding never fails: invalid sequences decode to
//! U+FFFD so a damaged string cannot make a tag unreadable. Encoding fails
//! only when a character cannot be represented (non-Latin-1 text under
//! [`TextEncoding::Latin1`]).

use std::fmt;

use crate::{Error, Result};

const BOM_LE: [u8; 2] = [0xFF, 0xFE];

/// Text encoding selected by a frame's encoding byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// ISO-8859-1, single byte per character.
    #[default]
    Latin1,
    /// UTF-16 with a byte order mark.
    Utf16,
    /// UTF-16 big-endian without a byte order mark (v2.4).
    Utf16Be,
    /// UTF-8 (v2.4).
    Utf8,
}

impl TextEncoding {
    /// Maps an encoding byte to an encoding.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Latin1),
            1 => Some(Self::Utf16),
            2 => Some(Self::Utf16Be),
            3 => Some(Self::Utf8),
            _ => None,
        }
    }

    /// Returns the encoding byte written in front of encoded text.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Latin1 => 0,
            Self::Utf16 => 1,
            Self::Utf16Be => 2,
            Self::Utf8 => 3,
        }
    }

    /// Encoding used for new frames of a tag with the given major version.
    ///
    /// UTF-8 only exists from v2.4 on; older tags get UTF-16 with a BOM.
    pub fn default_for_version(major_version: u8) -> Self {
        if major_version >= 4 {
            Self::Utf8
        } else {
            Self::Utf16
        }
    }

    /// Returns true for the two-byte-wide encodings.
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Utf16 | Self::Utf16Be)
    }

    /// Returns the string terminator: one zero byte, or two for UTF-16.
    pub fn terminator(self) -> &'static [u8] {
        if self.is_wide() { &[0, 0] } else { &[0] }
    }

    /// Encodes `text` without a terminator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrepresentableText`] if a character does not exist
    /// in the encoding.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| Error::UnrepresentableText {
                        encoding: self,
                        character: c,
                    })
                })
                .collect(),
            Self::Utf16 => {
                let mut out = Vec::with_capacity(2 + text.len() * 2);
                out.extend_from_slice(&BOM_LE);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                Ok(out)
            }
            Self::Utf16Be => Ok(text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect()),
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
        }
    }

    /// Decodes `bytes`, dropping trailing terminators.
    pub fn decode(self, bytes: &[u8]) -> String {
        let text: String = match self {
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                _ => decode_utf16(bytes, u16::from_le_bytes),
            },
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        };
        text.trim_end_matches('\0').to_string()
    }

    /// Splits `bytes` at the first terminator.
    ///
    /// Returns the bytes before the terminator and the bytes after it, or
    /// `None` if no terminator is present. For UTF-16 only terminators on
    /// an even offset count.
    pub fn split_terminated(self, bytes: &[u8]) -> Option<(&[u8], &[u8])> {
        let end = if self.is_wide() {
            bytes
                .chunks_exact(2)
                .position(|pair| pair == [0, 0])
                .map(|i| i * 2)?
        } else {
            bytes.iter().position(|&b| b == 0)?
        };
        let width = self.terminator().len();
        Some((&bytes[..end], &bytes[end + width..]))
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latin1 => write!(f, "ISO-8859-1"),
            Self::Utf16 => write!(f, "UTF-16"),
            Self::Utf16Be => write!(f, "UTF-16BE"),
            Self::Utf8 => write!(f, "UTF-8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_mapping() {
        for byte in 0..4u8 {
            assert_eq!(TextEncoding::from_byte(byte).unwrap().as_byte(), byte);
        }
        assert!(TextEncoding::from_byte(4).is_none());
    }

    #[test]
    fn test_latin1() {
        let bytes = TextEncoding::Latin1.encode("Café").unwrap();
        assert_eq!(bytes, b"Caf\xE9");
        assert_eq!(TextEncoding::Latin1.decode(&bytes), "Café");
    }

    #[test]
    fn test_latin1_rejects_wide_characters() {
        let err = TextEncoding::Latin1.encode("日本").unwrap_err();
        assert!(matches!(
            err,
            Error::UnrepresentableText {
                encoding: TextEncoding::Latin1,
                character: '日'
            }
        ));
    }

    #[test]
    fn test_utf16_writes_bom() {
        let bytes = TextEncoding::Utf16.encode("Hi").unwrap();
        assert_eq!(bytes, [0xFF, 0xFE, b'H', 0, b'i', 0]);
        assert_eq!(TextEncoding::Utf16.decode(&bytes), "Hi");
    }

    #[test]
    fn test_utf16_big_endian_bom() {
        let bytes = [0xFE, 0xFF, 0, b'H', 0, b'i'];
        assert_eq!(TextEncoding::Utf16.decode(&bytes), "Hi");
    }

    #[test]
    fn test_utf16be() {
        let bytes = TextEncoding::Utf16Be.encode("日本語").unwrap();
        assert_eq!(bytes.len(), 6);
        assert_eq!(TextEncoding::Utf16Be.decode(&bytes), "日本語");
    }

    #[test]
    fn test_decode_drops_trailing_terminators() {
        assert_eq!(TextEncoding::Latin1.decode(b"abc\0"), "abc");
        assert_eq!(TextEncoding::Utf8.decode(b"abc\0\0"), "abc");
        assert_eq!(
            TextEncoding::Utf16.decode(&[0xFF, 0xFE, b'a', 0, 0, 0]),
            "a"
        );
    }

    #[test]
    fn test_decode_invalid_is_lossy() {
        assert_eq!(TextEncoding::Utf8.decode(&[b'a', 0xFF]), "a\u{FFFD}");
        // Lone surrogate
        assert_eq!(TextEncoding::Utf16Be.decode(&[0xD8, 0x00]), "\u{FFFD}");
    }

    #[test]
    fn test_split_terminated_single_byte() {
        let (head, rest) = TextEncoding::Latin1.split_terminated(b"desc\0text").unwrap();
        assert_eq!(head, b"desc");
        assert_eq!(rest, b"text");
        assert!(TextEncoding::Utf8.split_terminated(b"no terminator").is_none());
    }

    #[test]
    fn test_split_terminated_utf16_aligned() {
        // "a" followed by U+0100 whose LE encoding contains 00 at an odd offset
        let bytes = [b'a', 0, 0, 1, 0, 0, b'x', 0];
        let (head, rest) = TextEncoding::Utf16Be.split_terminated(&bytes).unwrap();
        assert_eq!(head, &[b'a', 0, 0, 1]);
        assert_eq!(rest, &[b'x', 0]);
    }

    #[test]
    fn test_default_for_version() {
        assert_eq!(TextEncoding::default_for_version(4), TextEncoding::Utf8);
        assert_eq!(TextEncoding::default_for_version(3), TextEncoding::Utf16);
    }
}
