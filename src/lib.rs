//! # id3tag
//!
//! A pure-Rust library for reading, editing and writing ID3v2 tags.
//!
//! ID3v2 tags live at the start of MP3 (and other) files and carry metadata
//! such as title, artist, comments and cover art. This crate parses the
//! ID3v2.3 and ID3v2.4 layouts into an editable [`Tag`], serializes it back,
//! and rewrites files in place while preserving the audio behind the tag.
//!
//! ## Quick Start
//!
//! ### Reading a Tag
//!
//! ```rust,no_run
//! use id3tag::{Result, Tag};
//!
//! fn main() -> Result<()> {
//!     match Tag::read_from_path("song.mp3")? {
//!         Some(tag) => {
//!             if let Some(title) = tag.title() {
//!                 println!("title: {}", title.text);
//!             }
//!             for frame in tag.frames() {
//!                 println!("{}: {} bytes", frame.id(), frame.size());
//!             }
//!         }
//!         None => println!("no ID3v2 tag"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Editing a Tag
//!
//! ```rust,no_run
//! use id3tag::{Result, Tag};
//!
//! fn main() -> Result<()> {
//!     let mut tag = Tag::read_from_path("song.mp3")?.unwrap_or_default();
//!
//!     tag.set_title("Everything in Its Right Place")?;
//!     tag.set_artist("Radiohead")?;
//!     tag.set_track("1/10")?;
//!     tag.set_comment("eng", "ripped from CD")?;
//!     tag.set_album_cover("image/jpeg", std::fs::read("cover.jpg")?)?;
//!
//!     let result = tag.write_to_path("song.mp3")?;
//!     println!("wrote {} byte tag", result.new_tag_size);
//!     Ok(())
//! }
//! ```
//!
//! ### Building Frames Directly
//!
//! ```rust
//! use id3tag::{CommentFrame, Frame, FrameId, Tag, TextEncoding};
//!
//! let mut tag = Tag::with_version(3);
//! tag.set_text_frame_with("TBPM".parse::<FrameId>()?, TextEncoding::Latin1, "120")?;
//! tag.add_comment_frame(CommentFrame::new("eng", TextEncoding::Utf16, "", "first")?)?;
//! tag.add_comment_frame(CommentFrame::new("eng", TextEncoding::Utf16, "", "second")?)?;
//! tag.add_frame(Frame::generic(FrameId::new("PRIV")?, b"owner\0data".to_vec())?);
//!
//! assert_eq!(tag.comments().len(), 2);
//! assert_eq!(tag.tag_size() as usize, tag.frames_size());
//! # Ok::<(), id3tag::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. A file or buffer without a tag is not an
//! error: [`Tag::parse`] and [`Tag::read_from_path`] return `Ok(None)`.
//! Damaged tags are read leniently; the frames before the damage are kept.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger. Truncated or damaged tags are reported at `warn`,
//! parse and rewrite summaries at `debug`.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod edit;
pub mod error;
pub mod format;
pub mod frame;
pub mod tag;

pub use edit::{RewriteOptions, RewriteResult, TagRewriter, write_tag};
pub use error::{Error, Result};
pub use format::header::TagHeader;
pub use format::stream::ByteStream;
pub use format::{DEFAULT_PADDING_SIZE, frame_id};
pub use frame::{
    CommentFrame, Frame, FrameBody, FrameHeader, FrameId, FrameList, PictureFrame, PictureType,
    TextEncoding, TextFrame,
};
pub use tag::Tag;
