//! ID3v2 tag header structures and parsing.

use std::fs::File;
use std::io::{Read, SeekFrom};
use std::path::Path;

use crate::{Error, Result};

use super::stream::ByteStream;
use super::{
    DEFAULT_MAJOR_VERSION, SIGNATURE, SYNCSAFE_FRAME_SIZE_VERSION, TAG_HEADER_SIZE, flags,
    syncsafe,
};

/// Length of the size field that opens an extended header.
const EXTENDED_HEADER_SIZE_FIELD: usize = 4;

/// The fixed 10-byte header at the start of an ID3v2 tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHeader {
    /// Tag signature, always `ID3`.
    pub identifier: [u8; 3],
    /// Major version (3 for ID3v2.3, 4 for ID3v2.4).
    pub major_version: u8,
    /// Minor version (revision).
    pub minor_version: u8,
    /// Header flags, see [`flags`](super::flags).
    pub flags: u8,
    /// Size of everything after this header: extended header, frames and
    /// padding.
    pub tag_size: u32,
    /// Total on-disk size of the extended header, 0 when absent.
    pub extended_header_size: u32,
}

impl Default for TagHeader {
    fn default() -> Self {
        Self::new(DEFAULT_MAJOR_VERSION)
    }
}

impl TagHeader {
    /// Creates an empty header for the given major version.
    pub fn new(major_version: u8) -> Self {
        Self {
            identifier: *SIGNATURE,
            major_version,
            minor_version: 0,
            flags: 0,
            tag_size: 0,
            extended_header_size: 0,
        }
    }

    /// Parses a tag header from the cursor position of `stream`.
    ///
    /// Returns `Ok(None)` if fewer than 10 bytes remain or the signature is
    /// not `ID3`; the absence of a tag is a normal outcome, not an error.
    ///
    /// On success the cursor sits right after the fixed header. If an
    /// extended header is present its total length is recorded in
    /// [`extended_header_size`](Self::extended_header_size) and left for the
    /// caller to skip.
    pub fn parse(stream: &mut ByteStream) -> Result<Option<Self>> {
        if stream.remaining() < TAG_HEADER_SIZE {
            return Ok(None);
        }
        let identifier: [u8; 3] = stream.read_array()?;
        if identifier != *SIGNATURE {
            return Ok(None);
        }

        let major_version = stream.read_u8()?;
        let minor_version = stream.read_u8()?;
        let flags = stream.read_u8()?;
        let tag_size = syncsafe::decode(stream.read_array()?);

        let mut header = Self {
            identifier,
            major_version,
            minor_version,
            flags,
            tag_size,
            extended_header_size: 0,
        };

        if header.has_extended_header() {
            header.extended_header_size = header.peek_extended_header_size(stream)?;
        }

        Ok(Some(header))
    }

    /// Reads the extended header's size field without consuming it.
    fn peek_extended_header_size(&self, stream: &mut ByteStream) -> Result<u32> {
        if stream.remaining() < EXTENDED_HEADER_SIZE_FIELD {
            log::debug!("extended header flag set but its size field is not available");
            return Ok(0);
        }
        let start = stream.position();
        let raw: [u8; 4] = stream.read_array()?;
        stream.seek(SeekFrom::Start(start as u64))?;

        // v2.4 counts the whole extended header; v2.3 excludes its size field
        let total = if self.major_version >= SYNCSAFE_FRAME_SIZE_VERSION {
            syncsafe::decode(raw)
        } else {
            u32::from_be_bytes(raw).saturating_add(EXTENDED_HEADER_SIZE_FIELD as u32)
        };

        if total > self.tag_size {
            log::warn!(
                "extended header size {} exceeds tag size {}, clamping",
                total,
                self.tag_size
            );
        }
        Ok(total.min(self.tag_size))
    }

    /// Reads only the tag header at the start of a file.
    ///
    /// Returns `Ok(None)` if the file is shorter than a header or does not
    /// start with an ID3v2 tag.
    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let file = File::open(path.as_ref()).map_err(Error::Io)?;
        let mut probe = Vec::with_capacity(TAG_HEADER_SIZE + EXTENDED_HEADER_SIZE_FIELD);
        file.take((TAG_HEADER_SIZE + EXTENDED_HEADER_SIZE_FIELD) as u64)
            .read_to_end(&mut probe)
            .map_err(Error::Io)?;
        Self::parse(&mut ByteStream::from_bytes(probe))
    }

    /// Returns true if the extended-header flag is set.
    pub fn has_extended_header(&self) -> bool {
        self.flags & flags::EXTENDED_HEADER != 0
    }

    /// Returns true if frame sizes in this tag are sync-safe.
    pub fn uses_syncsafe_frame_sizes(&self) -> bool {
        self.major_version >= SYNCSAFE_FRAME_SIZE_VERSION
    }

    /// Returns the on-disk size of the tag, header included.
    pub fn total_size(&self) -> u64 {
        u64::from(self.tag_size) + TAG_HEADER_SIZE as u64
    }

    /// Writes the header at the cursor position of `stream`.
    ///
    /// The extended-header and footer flags are cleared: neither structure
    /// is ever emitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeOverflow`] if `tag_size` does not fit in 28 bits,
    /// or a bounds error if the stream is too small.
    pub fn write_to(&self, stream: &mut ByteStream) -> Result<()> {
        let size = syncsafe::encode(self.tag_size)?;
        stream.write(&self.identifier)?;
        stream.write_u8(self.major_version)?;
        stream.write_u8(self.minor_version)?;
        stream.write_u8(self.flags & !(flags::EXTENDED_HEADER | flags::FOOTER))?;
        stream.write(&size)
    }

    /// Serializes the header into a 10-byte array.
    pub fn to_bytes(&self) -> Result<[u8; TAG_HEADER_SIZE]> {
        let mut stream = ByteStream::new(TAG_HEADER_SIZE);
        self.write_to(&mut stream)?;
        let mut out = [0u8; TAG_HEADER_SIZE];
        out.copy_from_slice(stream.written());
        Ok(out)
    }
}
