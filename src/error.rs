//! Error types for ID3v2 tag operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when parsing, building, serializing, or writing ID3v2 tags,
//! along with a convenient [`Result<T>`] type alias.
//!
//! Note that a missing tag is *not* an error: [`Tag::parse`] and
//! [`Tag::read_from_path`] return `Ok(None)` when the data carries no
//! `ID3` signature.
//!
//! # Using the `?` Operator
//!
//! ```rust,no_run
//! use id3tag::{Result, Tag};
//!
//! fn retitle(path: &str, title: &str) -> Result<()> {
//!     let mut tag = Tag::read_from_path(path)?.unwrap_or_default();
//!     tag.set_title(title)?;
//!     let result = tag.write_to_path(path)?;
//!     println!("{} audio bytes carried over", result.payload_bytes);
//!     Ok(())
//! }
//! ```
//!
//! # Matching on Errors
//!
//! ```rust,no_run
//! use id3tag::{Error, Tag};
//!
//! fn save(tag: &Tag, path: &str) {
//!     match tag.write_to_path(path) {
//!         Ok(_) => {}
//!         Err(Error::FrameEncoding { frame_id, reason }) => {
//!             eprintln!("cannot encode {}: {}", frame_id, reason);
//!         }
//!         Err(e) if e.destination_may_be_modified() => {
//!             eprintln!("{} may be incomplete: {}", path, e);
//!         }
//!         Err(e) => eprintln!("tag not written, file untouched: {}", e),
//!     }
//! }
//! ```
//!
//! [`Tag::parse`]: crate::Tag::parse
//! [`Tag::read_from_path`]: crate::Tag::read_from_path

use std::io;

use crate::frame::TextEncoding;

/// Helper struct for formatting OutOfBounds error messages.
struct OutOfBoundsDisplay {
    offset: u64,
    requested: usize,
    capacity: usize,
}

impl std::fmt::Display for OutOfBoundsDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stream access out of bounds: {} bytes at offset {} exceeds capacity {}",
            self.requested, self.offset, self.capacity
        )
    }
}

/// The main error type for ID3v2 tag operations.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | I/O | [`Io`][Self::Io], [`CommitFailed`][Self::CommitFailed] | File system operations |
/// | Bounds | [`OutOfBounds`][Self::OutOfBounds], [`InvalidSeek`][Self::InvalidSeek] | Stream overruns |
/// | Encoding | [`FrameEncoding`][Self::FrameEncoding], [`UnrepresentableText`][Self::UnrepresentableText], [`InvalidFrameId`][Self::InvalidFrameId], [`SizeOverflow`][Self::SizeOverflow], [`UnsupportedVersion`][Self::UnsupportedVersion] | Values the format cannot carry |
/// | Rewrite | [`StagingMismatch`][Self::StagingMismatch] | Scratch image failed validation |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    ///
    /// When returned from a rewrite, the destination file has not been
    /// modified: every step before the commit only reads it.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A read or write ran past the capacity of a [`ByteStream`].
    ///
    /// [`ByteStream`]: crate::format::stream::ByteStream
    #[error("{}", OutOfBoundsDisplay { offset: *offset, requested: *requested, capacity: *capacity })]
    OutOfBounds {
        /// Cursor position at the time of the access.
        offset: u64,
        /// Number of bytes requested.
        requested: usize,
        /// Capacity of the stream.
        capacity: usize,
    },

    /// A seek targeted a position outside `0..=capacity`.
    #[error("Invalid seek to position {target} (capacity {capacity})")]
    InvalidSeek {
        /// The position the seek resolved to.
        target: i128,
        /// Capacity of the stream.
        capacity: usize,
    },

    /// A frame id is not four characters from `A-Z` / `0-9`.
    #[error("Invalid frame id: {0:?}")]
    InvalidFrameId(String),

    /// A frame body could not be encoded.
    ///
    /// Serialization never drops data silently; any body the format cannot
    /// carry is reported here with the id of the offending frame.
    #[error("Cannot encode frame {frame_id}: {reason}")]
    FrameEncoding {
        /// Id of the frame that failed to encode.
        frame_id: String,
        /// A description of the failure.
        reason: String,
    },

    /// A string contains a character the chosen text encoding cannot represent.
    #[error("Character {character:?} cannot be represented in {encoding}")]
    UnrepresentableText {
        /// The requested encoding.
        encoding: TextEncoding,
        /// The first offending character.
        character: char,
    },

    /// A size does not fit the 28-bit sync-safe range.
    #[error("Size {size} exceeds the sync-safe maximum of {max}")]
    SizeOverflow {
        /// The size that was requested.
        size: u64,
        /// The largest representable size.
        max: u32,
    },

    /// The tag's major version cannot be serialized.
    ///
    /// ID3v2.2 tags are readable, but their frames are not interpreted and
    /// writing one back would lose them.
    #[error("Cannot write an ID3v2.{major} tag")]
    UnsupportedVersion {
        /// The tag's major version.
        major: u8,
    },

    /// The staged replacement image did not have the expected length.
    ///
    /// The destination file has not been touched.
    #[error("Staged file has {actual} bytes, expected {expected}")]
    StagingMismatch {
        /// Expected length of the staged image.
        expected: u64,
        /// Length actually staged.
        actual: u64,
    },

    /// Copying the staged image back into the destination failed.
    ///
    /// This is the only failure after which the destination may be left
    /// truncated or incomplete.
    #[error("Failed to commit rewritten tag to '{path}': {source}")]
    CommitFailed {
        /// The destination path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns true if this is a stream bounds violation.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. } | Error::InvalidSeek { .. })
    }

    /// Returns true if a value could not be represented in the tag format.
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            Error::FrameEncoding { .. }
                | Error::UnrepresentableText { .. }
                | Error::InvalidFrameId(_)
                | Error::SizeOverflow { .. }
                | Error::UnsupportedVersion { .. }
        )
    }

    /// Returns true if the destination file may have been partially rewritten.
    pub fn destination_may_be_modified(&self) -> bool {
        matches!(self, Error::CommitFailed { .. })
    }

    /// Returns the frame id associated with this error, if any.
    pub fn frame_id(&self) -> Option<&str> {
        match self {
            Error::FrameEncoding { frame_id, .. } => Some(frame_id.as_str()),
            Error::InvalidFrameId(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub(crate) fn frame_encoding(
        frame_id: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Error::FrameEncoding {
            frame_id: frame_id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_bounds(offset: usize, requested: usize, capacity: usize) -> Self {
        Error::OutOfBounds {
            offset: offset as u64,
            requested,
            capacity,
        }
    }
}

/// A specialized Result type for ID3v2 operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("I/O error"));
        assert!(!err.destination_may_be_modified());
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::out_of_bounds(8, 4, 10);
        assert_eq!(
            err.to_string(),
            "Stream access out of bounds: 4 bytes at offset 8 exceeds capacity 10"
        );
        assert!(err.is_bounds_error());
        assert!(!err.is_encoding_error());
    }

    #[test]
    fn test_frame_encoding() {
        let err = Error::frame_encoding("TIT2", "text is not Latin-1");
        assert_eq!(err.to_string(), "Cannot encode frame TIT2: text is not Latin-1");
        assert_eq!(err.frame_id(), Some("TIT2"));
        assert!(err.is_encoding_error());
    }

    #[test]
    fn test_unrepresentable_text() {
        let err = Error::UnrepresentableText {
            encoding: TextEncoding::Latin1,
            character: '日',
        };
        assert!(err.to_string().contains("ISO-8859-1"));
        assert!(err.is_encoding_error());
    }

    #[test]
    fn test_commit_failed_flags_destination() {
        let err = Error::CommitFailed {
            path: "song.mp3".into(),
            source: io::Error::other("disk full"),
        };
        assert!(err.destination_may_be_modified());
        assert!(err.to_string().contains("song.mp3"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unsupported_version() {
        let err = Error::UnsupportedVersion { major: 2 };
        assert_eq!(err.to_string(), "Cannot write an ID3v2.2 tag");
        assert!(err.is_encoding_error());
        assert!(!err.destination_may_be_modified());
    }

    #[test]
    fn test_size_overflow() {
        let err = Error::SizeOverflow {
            size: 0x1000_0000,
            max: 0x0FFF_FFFF,
        };
        assert!(err.to_string().contains("268435456"));
        assert!(err.is_encoding_error());
    }
}
