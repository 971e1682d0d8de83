//! Writing tags into files.
//!
//! An ID3v2 tag sits at the very start of a file, in front of the audio.
//! Replacing it therefore means rewriting the file: the new tag followed by
//! every byte that came after the old tag.
//!
//! # Example
//!
//! ```rust,no_run
//! use id3tag::{RewriteOptions, Tag, TagRewriter};
//!
//! let mut tag = Tag::read_from_path("song.mp3")?.unwrap_or_default();
//! tag.set_album("In Rainbows")?;
//!
//! let rewriter = TagRewriter::new(RewriteOptions::new().padding_budget(4096));
//! let result = rewriter.write(&tag, "song.mp3")?;
//!
//! println!(
//!     "tag grew from {} to {} bytes, {} audio bytes preserved",
//!     result.old_tag_size, result.new_tag_size, result.payload_bytes
//! );
//! # Ok::<(), id3tag::Error>(())
//! ```
//!
//! # Implementation Notes
//!
//! The rewriter works by:
//! 1. Probing the destination's current tag header to find where the audio
//!    starts
//! 2. Serializing the new tag, topped up with padding
//! 3. Staging the new tag and the audio in an anonymous temporary file and
//!    checking the staged length
//! 4. Truncating the destination and copying the staged image over it
//!
//! Every failure in steps 1 to 3 leaves the destination untouched. Step 4
//! is not atomic: if it fails the destination may be incomplete, which is
//! reported as [`Error::CommitFailed`](crate::Error::CommitFailed).

mod options;
mod rewriter;

pub use options::RewriteOptions;
pub use rewriter::{RewriteResult, TagRewriter, write_tag};
