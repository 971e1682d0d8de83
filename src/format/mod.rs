//! ID3v2 format constants, definitions, and low-level codecs.
//!
//! This module contains the magic bytes, header sizes, well-known frame ids
//! and picture types defined by the ID3v2 format, together with the byte
//! stream and sync-safe integer codecs the rest of the crate is built on.

pub mod header;
pub mod stream;
pub mod syncsafe;

use crate::frame::FrameId;

/// The ID3v2 tag signature (magic bytes).
///
/// Every ID3v2 tag starts with these 3 bytes: `'I' 'D' '3'`.
pub const SIGNATURE: &[u8; 3] = b"ID3";

/// Size of the fixed tag header in bytes.
///
/// The tag header contains:
/// - 3 bytes: signature
/// - 1 byte: major version
/// - 1 byte: minor version (revision)
/// - 1 byte: flags
/// - 4 bytes: sync-safe tag size
pub const TAG_HEADER_SIZE: usize = 10;

/// Size of a frame header in bytes (4-byte id, 4-byte size, 2-byte flags).
pub const FRAME_HEADER_SIZE: usize = 10;

/// Major version written by [`Tag::new`](crate::Tag::new).
pub const DEFAULT_MAJOR_VERSION: u8 = 4;

/// First major version whose frame sizes are sync-safe.
pub const SYNCSAFE_FRAME_SIZE_VERSION: u8 = 4;

/// Oldest major version that can be serialized.
///
/// ID3v2.2 uses 3-character frame ids and 6-byte frame headers, which the
/// frame codec does not read or write.
pub const MIN_WRITABLE_VERSION: u8 = 3;

/// Default number of padding bytes the rewriter tops a tag up to.
pub const DEFAULT_PADDING_SIZE: usize = 2048;

/// Tag header flag bits.
pub mod flags {
    /// Unsynchronisation applied to the whole tag.
    pub const UNSYNCHRONISATION: u8 = 0x80;
    /// An extended header follows the tag header.
    pub const EXTENDED_HEADER: u8 = 0x40;
    /// Experimental indicator.
    pub const EXPERIMENTAL: u8 = 0x20;
    /// A footer is present (v2.4 only).
    pub const FOOTER: u8 = 0x10;
}

/// Well-known frame ids.
pub mod frame_id {
    use super::FrameId;

    /// Title/songname/content description.
    pub const TITLE: FrameId = FrameId::from_bytes(*b"TIT2");
    /// Lead performer(s)/soloist(s).
    pub const ARTIST: FrameId = FrameId::from_bytes(*b"TPE1");
    /// Album/movie/show title.
    pub const ALBUM: FrameId = FrameId::from_bytes(*b"TALB");
    /// Track number/position in set.
    pub const TRACK: FrameId = FrameId::from_bytes(*b"TRCK");
    /// Band/orchestra/accompaniment, used as album artist.
    pub const ALBUM_ARTIST: FrameId = FrameId::from_bytes(*b"TPE2");
    /// Content type.
    pub const GENRE: FrameId = FrameId::from_bytes(*b"TCON");
    /// Year of recording.
    pub const YEAR: FrameId = FrameId::from_bytes(*b"TYER");
    /// Part of a set.
    pub const DISC_NUMBER: FrameId = FrameId::from_bytes(*b"TPOS");
    /// Composer.
    pub const COMPOSER: FrameId = FrameId::from_bytes(*b"TCOM");
    /// Comments.
    pub const COMMENT: FrameId = FrameId::from_bytes(*b"COMM");
    /// Attached picture.
    pub const ATTACHED_PICTURE: FrameId = FrameId::from_bytes(*b"APIC");
    /// User defined text information. Carries a description, so it is not
    /// interpreted as a plain text frame.
    pub const USER_TEXT: FrameId = FrameId::from_bytes(*b"TXXX");
}
