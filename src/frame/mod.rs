//! Frame codec: frame ids, headers, and variant bodies.
//!
//! A frame is a 10-byte header (4-byte id, 4-byte size, 2-byte flags)
//! followed by `size` body bytes. The size is sync-safe in ID3v2.4 and a
//! plain big-endian integer in earlier versions. Bodies are dispatched by
//! id into the closed [`FrameBody`] set.
//!
//! # Example
//!
//! ```rust
//! use id3tag::format::frame_id;
//! use id3tag::frame::{Frame, TextEncoding};
//!
//! let frame = Frame::text(frame_id::TITLE, TextEncoding::Latin1, "Creep")?;
//! assert_eq!(frame.size(), 10 + 6);
//!
//! let bytes = frame.to_bytes(4)?;
//! assert_eq!(&bytes[..4], b"TIT2");
//! # Ok::<(), id3tag::Error>(())
//! ```

mod body;
pub mod encoding;
mod list;

use std::fmt;
use std::str::FromStr;

use crate::format::stream::ByteStream;
use crate::format::{FRAME_HEADER_SIZE, SYNCSAFE_FRAME_SIZE_VERSION, frame_id, syncsafe};
use crate::{Error, Result};

pub use body::{CommentFrame, FrameBody, PictureFrame, PictureType, TextFrame};
pub use encoding::TextEncoding;
pub use list::FrameList;

/// A four-character frame identifier such as `TIT2`.
///
/// Every byte is an upper-case ASCII letter or a digit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId([u8; 4]);

impl FrameId {
    /// Creates a frame id, validating its characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrameId`] unless `id` is exactly four
    /// characters from `A-Z` and `0-9`.
    pub fn new(id: &str) -> Result<Self> {
        match <[u8; 4]>::try_from(id.as_bytes()) {
            Ok(bytes) if Self::is_valid(&bytes) => Ok(Self(bytes)),
            _ => Err(Error::InvalidFrameId(id.to_string())),
        }
    }

    /// Creates a frame id from raw bytes without validation.
    pub(crate) const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Returns true if `bytes` form a valid frame id.
    pub fn is_valid(bytes: &[u8; 4]) -> bool {
        bytes
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }

    /// Returns the raw id bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("")
    }

    /// Returns true for text information frames (`T***` except `TXXX`).
    pub fn is_text(&self) -> bool {
        self.0[0] == b'T' && *self != frame_id::USER_TEXT
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({})", self.as_str())
    }
}

impl FromStr for FrameId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for FrameId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// The 10-byte header in front of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Frame id.
    pub id: FrameId,
    /// Length of the body in bytes.
    pub size: u32,
    /// Status and format flags.
    pub flags: [u8; 2],
}

/// A single frame: header plus body.
///
/// The header size always matches the encoded length of the body, so the
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: FrameHeader,
    body: FrameBody,
}

impl Frame {
    /// Creates a frame with cleared flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameEncoding`] if the body cannot be encoded or
    /// does not belong under `id` (for example a text body under `COMM`).
    pub fn new(id: FrameId, body: FrameBody) -> Result<Self> {
        Self::with_flags(id, [0, 0], body)
    }

    /// Creates a frame with the given flags.
    ///
    /// Text and comment values may not end with a NUL character, and an
    /// [`PictureType::Undefined`] value in the defined range is stored as
    /// its named variant.
    pub fn with_flags(id: FrameId, flags: [u8; 2], mut body: FrameBody) -> Result<Self> {
        if !body.fits(id) {
            return Err(Error::frame_encoding(
                id,
                format!("a {} body cannot be stored in this frame", body.kind()),
            ));
        }
        body.check_values(id)?;
        body.normalize();
        let size = encoded_len(id, &body)?;
        Ok(Self {
            header: FrameHeader { id, size, flags },
            body,
        })
    }

    /// Creates a text information frame.
    pub fn text(id: FrameId, encoding: TextEncoding, text: impl Into<String>) -> Result<Self> {
        Self::new(id, FrameBody::Text(TextFrame::new(encoding, text)))
    }

    /// Creates a `COMM` frame.
    pub fn comment(comment: CommentFrame) -> Result<Self> {
        Self::new(frame_id::COMMENT, FrameBody::Comment(comment))
    }

    /// Creates an `APIC` frame.
    pub fn picture(picture: PictureFrame) -> Result<Self> {
        Self::new(frame_id::ATTACHED_PICTURE, FrameBody::Picture(picture))
    }

    /// Creates a frame carrying raw bytes.
    pub fn generic(id: FrameId, data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(id, FrameBody::Generic(data.into()))
    }

    /// Wraps a frame's raw body without interpreting it.
    pub(crate) fn unparsed(header: FrameHeader, body: Vec<u8>) -> Self {
        Self {
            header: FrameHeader {
                size: u32::try_from(body.len()).unwrap_or(u32::MAX),
                ..header
            },
            body: FrameBody::Generic(body),
        }
    }

    /// Returns the frame id.
    pub fn id(&self) -> FrameId {
        self.header.id
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the frame body.
    pub fn body(&self) -> &FrameBody {
        &self.body
    }

    /// Consumes the frame and returns its body.
    pub fn into_body(self) -> FrameBody {
        self.body
    }

    /// Returns the serialized size of the frame, header included.
    pub fn size(&self) -> usize {
        FRAME_HEADER_SIZE + self.header.size as usize
    }

    /// Returns the body if this is a text frame.
    pub fn as_text(&self) -> Option<&TextFrame> {
        match &self.body {
            FrameBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the body if this is a comment frame.
    pub fn as_comment(&self) -> Option<&CommentFrame> {
        match &self.body {
            FrameBody::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Returns the body if this is an attached picture frame.
    pub fn as_picture(&self) -> Option<&PictureFrame> {
        match &self.body {
            FrameBody::Picture(picture) => Some(picture),
            _ => None,
        }
    }

    /// Returns the raw body if this frame is not interpreted.
    pub fn as_generic(&self) -> Option<&[u8]> {
        match &self.body {
            FrameBody::Generic(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Parses one frame at the cursor position of `stream`.
    ///
    /// Returns `Ok(None)` when no further frame can be read: fewer than 10
    /// bytes remain, the id bytes are not a valid id (padding or corrupt
    /// data), or the declared size runs past the end of the stream. The
    /// caller stops its frame loop there and keeps what it has.
    pub fn parse(stream: &mut ByteStream, major_version: u8) -> Result<Option<Self>> {
        if stream.remaining() < FRAME_HEADER_SIZE {
            return Ok(None);
        }
        let start = stream.position();
        let id: [u8; 4] = stream.read_array()?;
        if !FrameId::is_valid(&id) {
            log::trace!("no frame id at offset {}", start);
            return Ok(None);
        }
        let id = FrameId(id);

        let raw_size: [u8; 4] = stream.read_array()?;
        let size = if major_version >= SYNCSAFE_FRAME_SIZE_VERSION {
            syncsafe::decode(raw_size)
        } else {
            u32::from_be_bytes(raw_size)
        };
        let flags: [u8; 2] = stream.read_array()?;

        if size as usize > stream.remaining() {
            log::warn!(
                "frame {} at offset {} declares {} bytes but only {} remain",
                id,
                start,
                size,
                stream.remaining()
            );
            return Ok(None);
        }
        let raw = stream.read(size as usize)?;

        // Any format flag (compression, encryption, grouping, unsynchronisation,
        // data length indicator) changes the body layout, so it is kept raw
        let body = if flags[1] != 0 {
            FrameBody::Generic(raw.to_vec())
        } else {
            FrameBody::parse(id, raw)
        };

        // Structured bodies are normalised, so the size follows the re-encoding
        let size = match &body {
            FrameBody::Generic(_) => size,
            structured => match encoded_len(id, structured) {
                Ok(len) => len,
                Err(e) => {
                    log::debug!("frame {} cannot be re-encoded ({}), keeping raw bytes", id, e);
                    return Ok(Some(Self {
                        header: FrameHeader { id, size, flags },
                        body: FrameBody::Generic(raw.to_vec()),
                    }));
                }
            },
        };

        Ok(Some(Self {
            header: FrameHeader { id, size, flags },
            body,
        }))
    }

    /// Writes the frame at the cursor position of `stream`.
    ///
    /// The body is re-encoded and the size recomputed from it.
    pub fn write_to(&self, stream: &mut ByteStream, major_version: u8) -> Result<()> {
        let body = self.body.encode()?;
        let size = syncsafe::checked_size(body.len())
            .map_err(|e| Error::frame_encoding(self.header.id, e.to_string()))?;
        let size_field = if major_version >= SYNCSAFE_FRAME_SIZE_VERSION {
            syncsafe::encode(size)?
        } else {
            size.to_be_bytes()
        };

        stream.write(self.header.id.as_bytes())?;
        stream.write(&size_field)?;
        stream.write(&self.header.flags)?;
        stream.write(&body)
    }

    /// Serializes the frame into a new buffer.
    pub fn to_bytes(&self, major_version: u8) -> Result<Vec<u8>> {
        let mut stream = ByteStream::new(self.size());
        self.write_to(&mut stream, major_version)?;
        Ok(stream.into_inner())
    }
}

/// Encodes `body` and returns its length as a frame size.
fn encoded_len(id: FrameId, body: &FrameBody) -> Result<u32> {
    let encoded = body.encode().map_err(|e| match e {
        Error::FrameEncoding { .. } => e,
        other => Error::frame_encoding(id, other.to_string()),
    })?;
    syncsafe::checked_size(encoded.len()).map_err(|e| Error::frame_encoding(id, e.to_string()))
}
