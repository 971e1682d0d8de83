//! The in-memory tag: header, ordered frames and trailing padding.
//!
//! A [`Tag`] keeps its declared size consistent with its content at all
//! times: `tag_size == frames_size() + padding_size()` after parsing and
//! after every mutation, so [`Tag::to_bytes`] can lay the tag out without
//! re-measuring.
//!
//! # Example
//!
//! ```rust
//! use id3tag::Tag;
//!
//! let mut tag = Tag::new();
//! tag.set_title("Paranoid Android")?;
//! tag.set_artist("Radiohead")?;
//! tag.set_comment("eng", "album version")?;
//!
//! let bytes = tag.to_bytes()?;
//! let parsed = Tag::parse(&bytes)?.expect("tag present");
//! assert_eq!(parsed.title().map(|t| t.text.as_str()), Some("Paranoid Android"));
//! assert_eq!(parsed.frames().len(), 3);
//! # Ok::<(), id3tag::Error>(())
//! ```

use std::fs::File;
use std::io::{Read, SeekFrom};
use std::path::Path;

use crate::edit::{RewriteOptions, RewriteResult, TagRewriter};
use crate::format::header::TagHeader;
use crate::format::stream::ByteStream;
use crate::format::{
    DEFAULT_MAJOR_VERSION, FRAME_HEADER_SIZE, MIN_WRITABLE_VERSION, TAG_HEADER_SIZE, flags,
    frame_id, syncsafe,
};
use crate::frame::{
    CommentFrame, Frame, FrameId, FrameList, PictureFrame, PictureType, TextEncoding, TextFrame,
};
use crate::{Error, Result};

/// An ID3v2 tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    header: TagHeader,
    frames: FrameList,
    padding_size: usize,
}

impl Default for Tag {
    fn default() -> Self {
        Self::new()
    }
}

impl Tag {
    /// Creates an empty ID3v2.4.0 tag.
    pub fn new() -> Self {
        Self::with_version(DEFAULT_MAJOR_VERSION)
    }

    /// Creates an empty tag with the given major version.
    ///
    /// Frame sizes are written sync-safe from version 4 on and as plain
    /// big-endian integers below it.
    pub fn with_version(major_version: u8) -> Self {
        Self {
            header: TagHeader::new(major_version),
            frames: FrameList::new(),
            padding_size: 0,
        }
    }

    /// Parses a tag from the start of `bytes`.
    ///
    /// Returns `Ok(None)` if `bytes` does not start with an `ID3` header.
    ///
    /// Parsing is lenient: the frame loop stops at the first position that
    /// does not hold a complete frame and everything from there to the end
    /// of the tag is treated as padding. Input shorter than the declared
    /// tag is accepted the same way. The extended header, if any, is
    /// skipped and counted as padding.
    ///
    /// ID3v2.2 tags are recognised but their 3-character frames are not
    /// read, so their frame region usually ends up as padding. Such a tag
    /// cannot be serialized again: [`to_bytes`](Self::to_bytes) returns
    /// [`Error::UnsupportedVersion`] rather than replace the frames with
    /// zeros.
    ///
    /// Structured bodies are re-encoded on parse and may grow. A frame
    /// whose re-encoding would push the tag past the sync-safe size limit
    /// is kept as raw bytes instead.
    pub fn parse(bytes: &[u8]) -> Result<Option<Self>> {
        let probe = &bytes[..bytes.len().min(TAG_HEADER_SIZE + 4)];
        let Some(mut header) = TagHeader::parse(&mut ByteStream::from_bytes(probe))? else {
            return Ok(None);
        };

        if header.flags & flags::UNSYNCHRONISATION != 0 {
            log::debug!("tag-level unsynchronisation is set, frames are read as stored");
        }

        let declared = usize::try_from(header.total_size()).unwrap_or(usize::MAX);
        let end = declared.min(bytes.len());
        if end < declared {
            log::warn!(
                "tag declares {} bytes but only {} are available",
                declared,
                bytes.len()
            );
        }

        let frames_start = (TAG_HEADER_SIZE + header.extended_header_size as usize).min(end);
        let (frames, frames_end) = read_frames(
            &bytes[..end],
            frames_start,
            header.major_version,
            syncsafe::SYNCSAFE_MAX as usize,
        )?;
        if bytes[frames_end..end].iter().any(|&b| b != 0) {
            log::warn!(
                "stopped after {} frames, {} trailing bytes are not padding",
                frames.len(),
                end - frames_end
            );
        }

        // Skipped extended header bytes count as padding
        let padding_size = (end - frames_end) + (frames_start - TAG_HEADER_SIZE);
        header.tag_size = syncsafe::checked_size(frames.total_size() + padding_size)?;

        log::debug!(
            "parsed ID3v2.{}.{} tag: {} frames, {} bytes of padding",
            header.major_version,
            header.minor_version,
            frames.len(),
            padding_size
        );

        Ok(Some(Self {
            header,
            frames,
            padding_size,
        }))
    }

    /// Reads the tag at the start of the file at `path`.
    ///
    /// Only the tag's extent is read, never the audio behind it. Returns
    /// `Ok(None)` if the file has no tag.
    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let Some(header) = TagHeader::read_from_path(path)? else {
            return Ok(None);
        };

        let file = File::open(path)?;
        let mut data = Vec::new();
        file.take(header.total_size()).read_to_end(&mut data)?;
        Self::parse(&data)
    }

    /// Serializes the tag: header, frames in order, then zeroed padding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with_padding(0)
    }

    /// Serializes the tag with `extra` zero bytes of padding on top of the
    /// tag's own padding. The header declares the enlarged size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeOverflow`] if the result does not fit a
    /// sync-safe size, [`Error::UnsupportedVersion`] for a tag older than
    /// ID3v2.3, or the first frame encoding error.
    pub fn to_bytes_with_padding(&self, extra: usize) -> Result<Vec<u8>> {
        if self.header.major_version < MIN_WRITABLE_VERSION {
            return Err(Error::UnsupportedVersion {
                major: self.header.major_version,
            });
        }
        let declared = (self.header.tag_size as usize).saturating_add(extra);
        let mut header = self.header.clone();
        header.tag_size = syncsafe::checked_size(declared)?;

        let mut stream = ByteStream::new(TAG_HEADER_SIZE + declared);
        header.write_to(&mut stream)?;
        for frame in &self.frames {
            frame.write_to(&mut stream, header.major_version)?;
        }
        Ok(stream.into_inner())
    }

    /// Writes the tag in front of the audio in the file at `path` with the
    /// default [`RewriteOptions`].
    ///
    /// See [`TagRewriter`] for the procedure and its failure guarantees.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<RewriteResult> {
        TagRewriter::new(RewriteOptions::default()).write(self, path)
    }

    /// Returns the tag header.
    pub fn header(&self) -> &TagHeader {
        &self.header
    }

    /// Returns the major version.
    pub fn major_version(&self) -> u8 {
        self.header.major_version
    }

    /// Returns the declared tag size: frames plus padding, header excluded.
    pub fn tag_size(&self) -> u32 {
        self.header.tag_size
    }

    /// Returns the frames in order.
    pub fn frames(&self) -> &FrameList {
        &self.frames
    }

    /// Returns the number of padding bytes behind the last frame.
    pub fn padding_size(&self) -> usize {
        self.padding_size
    }

    /// Returns the summed size of all frames, headers included.
    pub fn frames_size(&self) -> usize {
        self.frames.total_size()
    }

    /// Encoding used by the setters that do not take one.
    pub fn default_encoding(&self) -> TextEncoding {
        TextEncoding::default_for_version(self.header.major_version)
    }

    // Lookup

    /// Returns the first frame with the given id.
    pub fn get_frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get_first(id)
    }

    /// Returns every frame with the given id, in order.
    pub fn get_frames(&self, id: FrameId) -> Vec<&Frame> {
        self.frames.get_all(id)
    }

    fn text(&self, id: FrameId) -> Option<&TextFrame> {
        self.get_frame(id).and_then(Frame::as_text)
    }

    /// Title (`TIT2`).
    pub fn title(&self) -> Option<&TextFrame> {
        self.text(frame_id::TITLE)
    }

    /// Lead artist (`TPE1`).
    pub fn artist(&self) -> Option<&TextFrame> {
        self.text(frame_id::ARTIST)
    }

    /// Album (`TALB`).
    pub fn album(&self) -> Option<&TextFrame> {
        self.text(frame_id::ALBUM)
    }

    /// Track number (`TRCK`).
    pub fn track(&self) -> Option<&TextFrame> {
        self.text(frame_id::TRACK)
    }

    /// Album artist (`TPE2`).
    pub fn album_artist(&self) -> Option<&TextFrame> {
        self.text(frame_id::ALBUM_ARTIST)
    }

    /// Genre (`TCON`).
    pub fn genre(&self) -> Option<&TextFrame> {
        self.text(frame_id::GENRE)
    }

    /// Year (`TYER`).
    pub fn year(&self) -> Option<&TextFrame> {
        self.text(frame_id::YEAR)
    }

    /// Disc number (`TPOS`).
    pub fn disc_number(&self) -> Option<&TextFrame> {
        self.text(frame_id::DISC_NUMBER)
    }

    /// Composer (`TCOM`).
    pub fn composer(&self) -> Option<&TextFrame> {
        self.text(frame_id::COMPOSER)
    }

    /// First comment.
    pub fn comment(&self) -> Option<&CommentFrame> {
        self.get_frame(frame_id::COMMENT).and_then(Frame::as_comment)
    }

    /// All comments, in order.
    pub fn comments(&self) -> Vec<&CommentFrame> {
        self.frames
            .iter()
            .filter(|f| f.id() == frame_id::COMMENT)
            .filter_map(Frame::as_comment)
            .collect()
    }

    /// First attached picture.
    pub fn album_cover(&self) -> Option<&PictureFrame> {
        self.get_frame(frame_id::ATTACHED_PICTURE).and_then(Frame::as_picture)
    }

    /// All attached pictures, in order.
    pub fn pictures(&self) -> Vec<&PictureFrame> {
        self.frames
            .iter()
            .filter(|f| f.id() == frame_id::ATTACHED_PICTURE)
            .filter_map(Frame::as_picture)
            .collect()
    }

    // Mutation

    /// Replaces the first frame with the same id, or appends `frame` if
    /// there is none.
    pub fn set_frame(&mut self, frame: Frame) {
        let added = frame.size();
        let replaced = match self.frames.position(frame.id()) {
            Some(index) => self.frames.replace(index, frame),
            None => {
                self.frames.add(frame);
                None
            }
        };
        let removed = replaced.map_or(0, |old| {
            log::trace!("replaced {} ({} -> {} bytes)", old.id(), old.size(), added);
            old.size()
        });
        self.resize(removed, added);
    }

    /// Appends `frame`, keeping any existing frames with the same id.
    pub fn add_frame(&mut self, frame: Frame) {
        let added = frame.size();
        self.frames.add(frame);
        self.resize(0, added);
    }

    fn resize(&mut self, removed: usize, added: usize) {
        let size = (u64::from(self.header.tag_size) + added as u64).saturating_sub(removed as u64);
        self.header.tag_size = u32::try_from(size).unwrap_or(u32::MAX);
    }

    /// Sets a text frame using the tag's default encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameEncoding`](crate::Error::FrameEncoding) if `id`
    /// is not a text information id.
    pub fn set_text_frame(&mut self, id: FrameId, text: impl Into<String>) -> Result<()> {
        self.set_text_frame_with(id, self.default_encoding(), text)
    }

    /// Sets a text frame with an explicit encoding.
    pub fn set_text_frame_with(
        &mut self,
        id: FrameId,
        encoding: TextEncoding,
        text: impl Into<String>,
    ) -> Result<()> {
        let frame = Frame::text(id, encoding, text)?;
        self.set_frame(frame);
        Ok(())
    }

    /// Replaces the first comment, or appends one.
    pub fn set_comment_frame(&mut self, comment: CommentFrame) -> Result<()> {
        let frame = Frame::comment(comment)?;
        self.set_frame(frame);
        Ok(())
    }

    /// Appends a comment.
    pub fn add_comment_frame(&mut self, comment: CommentFrame) -> Result<()> {
        let frame = Frame::comment(comment)?;
        self.add_frame(frame);
        Ok(())
    }

    /// Replaces the first attached picture, or appends one.
    pub fn set_picture_frame(&mut self, picture: PictureFrame) -> Result<()> {
        let frame = Frame::picture(picture)?;
        self.set_frame(frame);
        Ok(())
    }

    /// Appends an attached picture.
    pub fn add_picture_frame(&mut self, picture: PictureFrame) -> Result<()> {
        let frame = Frame::picture(picture)?;
        self.add_frame(frame);
        Ok(())
    }

    /// Sets the title (`TIT2`).
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::TITLE, title)
    }

    /// Sets the lead artist (`TPE1`).
    pub fn set_artist(&mut self, artist: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::ARTIST, artist)
    }

    /// Sets the album (`TALB`).
    pub fn set_album(&mut self, album: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::ALBUM, album)
    }

    /// Sets the track number (`TRCK`), e.g. `"3"` or `"3/12"`.
    pub fn set_track(&mut self, track: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::TRACK, track)
    }

    /// Sets the album artist (`TPE2`).
    pub fn set_album_artist(&mut self, album_artist: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::ALBUM_ARTIST, album_artist)
    }

    /// Sets the genre (`TCON`).
    pub fn set_genre(&mut self, genre: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::GENRE, genre)
    }

    /// Sets the year (`TYER`).
    pub fn set_year(&mut self, year: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::YEAR, year)
    }

    /// Sets the disc number (`TPOS`).
    pub fn set_disc_number(&mut self, disc_number: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::DISC_NUMBER, disc_number)
    }

    /// Sets the composer (`TCOM`).
    pub fn set_composer(&mut self, composer: impl Into<String>) -> Result<()> {
        self.set_text_frame(frame_id::COMPOSER, composer)
    }

    /// Replaces the first comment with one that has an empty description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameEncoding`](crate::Error::FrameEncoding) if
    /// `language` is not a three-letter code.
    pub fn set_comment(&mut self, language: &str, text: impl Into<String>) -> Result<()> {
        let comment = CommentFrame::new(language, self.default_encoding(), "", text)?;
        self.set_comment_frame(comment)
    }

    /// Replaces the first attached picture with a front cover.
    pub fn set_album_cover(
        &mut self,
        mime_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Result<()> {
        let picture = PictureFrame::new(
            self.default_encoding(),
            mime_type,
            PictureType::FrontCover,
            "",
            data,
        );
        self.set_picture_frame(picture)
    }
}

/// Reads frames from `bytes[start..]` until no further frame can be read.
///
/// Returns the frames and the offset just past the last one. A frame whose
/// normalised size would make frames plus the remaining raw bytes exceed
/// `limit` is kept with its raw body instead.
fn read_frames(
    bytes: &[u8],
    start: usize,
    major_version: u8,
    limit: usize,
) -> Result<(FrameList, usize)> {
    let mut stream = ByteStream::from_bytes(bytes);
    stream.seek(SeekFrom::Start(start as u64))?;
    // Extended header bytes count against the limit as padding
    let skipped = start.saturating_sub(TAG_HEADER_SIZE);

    let mut frames = FrameList::new();
    let mut frames_end = start;
    while let Some(frame) = Frame::parse(&mut stream, major_version)? {
        let position = stream.position();
        let projected = frames.total_size() + frame.size() + (bytes.len() - position) + skipped;
        if projected > limit {
            log::warn!(
                "frame {} grows past the size limit when normalised, keeping raw bytes",
                frame.id()
            );
            let body = bytes[frames_end + FRAME_HEADER_SIZE..position].to_vec();
            frames.add(Frame::unparsed(*frame.header(), body));
        } else {
            frames.add(frame);
        }
        frames_end = position;
    }
    Ok((frames, frames_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameBody;

    fn raw_tag(major: u8, flags: u8, size: u32, body: &[u8]) -> Vec<u8> {
        let mut data = b"ID3".to_vec();
        data.extend_from_slice(&[major, 0, flags]);
        data.extend_from_slice(&syncsafe::encode(size).unwrap());
        data.extend_from_slice(body);
        data
    }

    fn raw_text_frame_v3(id: &[u8; 4], text: &[u8]) -> Vec<u8> {
        let mut data = id.to_vec();
        data.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
        data.extend_from_slice(&[0, 0, 0]);
        data.extend_from_slice(text);
        data
    }

    fn assert_size_invariant(tag: &Tag) {
        assert_eq!(
            tag.tag_size() as usize,
            tag.frames_size() + tag.padding_size()
        );
    }

    #[test]
    fn test_new_tag_is_empty_v24() {
        let tag = Tag::new();
        assert_eq!(tag.major_version(), 4);
        assert_eq!(tag.tag_size(), 0);
        assert!(tag.frames().is_empty());
        assert_eq!(tag.to_bytes().unwrap(), b"ID3\x04\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn test_set_artist_on_empty_tag() {
        let mut tag = Tag::new();
        tag.set_artist("Radiohead").unwrap();

        assert_eq!(tag.frames().len(), 1);
        let frame = tag.get_frame(frame_id::ARTIST).unwrap();
        assert_eq!(frame.as_text().unwrap().text, "Radiohead");
        assert_eq!(frame.as_text().unwrap().encoding, TextEncoding::Utf8);
        assert_eq!(tag.tag_size() as usize, frame.size());
        assert_eq!(tag.tag_size(), 20);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut tag = Tag::new();
        tag.set_title("Creep").unwrap();
        tag.set_artist("Radiohead").unwrap();
        tag.set_title("Karma Police").unwrap();

        assert_eq!(tag.frames().len(), 2);
        assert_eq!(tag.frames().get(0).unwrap().id(), frame_id::TITLE);
        assert_eq!(tag.title().unwrap().text, "Karma Police");
        assert_eq!(tag.tag_size(), (10 + 13) + (10 + 10));
        assert_size_invariant(&tag);

        tag.set_title("X").unwrap();
        assert_eq!(tag.tag_size(), (10 + 2) + (10 + 10));
        assert_size_invariant(&tag);
    }

    #[test]
    fn test_add_comments_keep_order() {
        let mut tag = Tag::new();
        let first = CommentFrame::new("eng", TextEncoding::Latin1, "a", "one").unwrap();
        let second = CommentFrame::new("deu", TextEncoding::Utf8, "b", "zwei").unwrap();
        tag.add_comment_frame(first).unwrap();
        tag.add_comment_frame(second).unwrap();

        let comments = tag.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "one");
        assert_eq!(comments[1].language(), "deu");
        assert_eq!(tag.comment().unwrap().text, "one");
        assert_size_invariant(&tag);
    }

    #[test]
    fn test_set_comment_replaces_first() {
        let mut tag = Tag::new();
        tag.add_comment_frame(CommentFrame::new("eng", TextEncoding::Utf8, "x", "old").unwrap())
            .unwrap();
        tag.add_comment_frame(CommentFrame::new("eng", TextEncoding::Utf8, "y", "kept").unwrap())
            .unwrap();
        tag.set_comment("fra", "nouveau").unwrap();

        let comments = tag.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "nouveau");
        assert_eq!(comments[0].description, "");
        assert_eq!(comments[1].text, "kept");
        assert_size_invariant(&tag);
    }

    #[test]
    fn test_set_comment_rejects_bad_language() {
        let mut tag = Tag::new();
        assert!(tag.set_comment("english", "x").is_err());
        assert!(tag.frames().is_empty());
        assert_eq!(tag.tag_size(), 0);
    }

    #[test]
    fn test_set_album_cover() {
        let mut tag = Tag::new();
        tag.set_album_cover("image/png", vec![0x89, b'P', b'N', b'G']).unwrap();
        tag.set_album_cover("image/jpeg", vec![0xFF, 0xD8]).unwrap();

        assert_eq!(tag.pictures().len(), 1);
        let cover = tag.album_cover().unwrap();
        assert_eq!(cover.mime_type, "image/jpeg");
        assert_eq!(cover.picture_type, PictureType::FrontCover);
        assert_eq!(cover.data, [0xFF, 0xD8]);
        assert_size_invariant(&tag);
    }

    #[test]
    fn test_set_text_frame_rejects_non_text_id() {
        let mut tag = Tag::new();
        let err = tag.set_text_frame(frame_id::COMMENT, "x").unwrap_err();
        assert!(matches!(err, Error::FrameEncoding { .. }));
        assert_eq!(tag.tag_size(), 0);
    }

    #[test]
    fn test_v23_defaults_to_utf16() {
        let mut tag = Tag::with_version(3);
        tag.set_album("OK Computer").unwrap();
        assert_eq!(tag.album().unwrap().encoding, TextEncoding::Utf16);
    }

    #[test]
    fn test_round_trip() {
        let mut tag = Tag::with_version(3);
        tag.set_title("Lucky").unwrap();
        tag.set_track("11/12").unwrap();
        tag.set_text_frame_with(frame_id::YEAR, TextEncoding::Latin1, "1997").unwrap();
        tag.add_frame(
            Frame::generic(FrameId::new("PRIV").unwrap(), b"owner\0data".to_vec()).unwrap(),
        );

        let bytes = tag.to_bytes().unwrap();
        assert_eq!(bytes.len(), 10 + tag.tag_size() as usize);

        let parsed = Tag::parse(&bytes).unwrap().unwrap();
        assert_eq!(parsed, tag);
    }

    #[test]
    fn test_to_bytes_with_padding() {
        let mut tag = Tag::new();
        tag.set_genre("Rock").unwrap();
        let bytes = tag.to_bytes_with_padding(100).unwrap();

        assert_eq!(bytes.len(), 10 + tag.tag_size() as usize + 100);
        assert!(bytes[10 + tag.frames_size()..].iter().all(|&b| b == 0));

        let parsed = Tag::parse(&bytes).unwrap().unwrap();
        assert_eq!(parsed.padding_size(), 100);
        assert_eq!(parsed.genre().unwrap().text, "Rock");
        assert_size_invariant(&parsed);
    }

    #[test]
    fn test_parse_absent() {
        assert!(Tag::parse(b"").unwrap().is_none());
        assert!(Tag::parse(b"\xFF\xFB\x90\x00 audio data").unwrap().is_none());
    }

    #[test]
    fn test_parse_zero_size_tag() {
        let tag = Tag::parse(&raw_tag(4, 0, 0, b"audio")).unwrap().unwrap();
        assert!(tag.frames().is_empty());
        assert_eq!(tag.padding_size(), 0);
        assert_eq!(tag.tag_size(), 0);
    }

    #[test]
    fn test_parse_stops_at_padding() {
        let mut body = raw_text_frame_v3(b"TIT2", b"Airbag");
        body.extend_from_slice(&[0u8; 30]);
        let size = body.len() as u32;
        let mut data = raw_tag(3, 0, size, &body);
        data.extend_from_slice(b"audio");

        let tag = Tag::parse(&data).unwrap().unwrap();
        assert_eq!(tag.frames().len(), 1);
        assert_eq!(tag.title().unwrap().text, "Airbag");
        assert_eq!(tag.padding_size(), 30);
        assert_eq!(tag.tag_size(), size);
    }

    #[test]
    fn test_parse_truncated_frame_keeps_earlier_frames() {
        let mut body = raw_text_frame_v3(b"TIT2", b"Airbag");
        let mut broken = raw_text_frame_v3(b"TPE1", b"Radiohead");
        broken.truncate(14);
        body.extend_from_slice(&broken);
        let data = raw_tag(3, 0, body.len() as u32, &body);

        let tag = Tag::parse(&data).unwrap().unwrap();
        assert_eq!(tag.frames().len(), 1);
        assert_eq!(tag.padding_size(), 14);
        assert_size_invariant(&tag);
    }

    #[test]
    fn test_parse_input_shorter_than_declared() {
        let body = raw_text_frame_v3(b"TIT2", b"Airbag");
        let data = raw_tag(3, 0, 500, &body);

        let tag = Tag::parse(&data).unwrap().unwrap();
        assert_eq!(tag.frames().len(), 1);
        assert_eq!(tag.padding_size(), 0);
        assert_eq!(tag.tag_size() as usize, body.len());
    }

    #[test]
    fn test_parse_skips_extended_header() {
        let mut body = vec![0, 0, 0, 6, 0, 0, 0, 0, 0, 0];
        body.extend_from_slice(&raw_text_frame_v3(b"TALB", b"OK"));
        let data = raw_tag(3, flags::EXTENDED_HEADER, body.len() as u32, &body);

        let tag = Tag::parse(&data).unwrap().unwrap();
        assert_eq!(tag.album().unwrap().text, "OK");
        assert_eq!(tag.padding_size(), 10);
        assert_size_invariant(&tag);

        let bytes = tag.to_bytes().unwrap();
        assert_eq!(bytes[5] & flags::EXTENDED_HEADER, 0);
        let reparsed = Tag::parse(&bytes).unwrap().unwrap();
        assert_eq!(reparsed.album().unwrap().text, "OK");
    }

    #[test]
    fn test_parse_normalises_text_size() {
        // Latin-1 text with a trailing terminator shrinks on re-encoding
        let body = raw_text_frame_v3(b"TIT2", b"Airbag\0");
        let data = raw_tag(3, 0, body.len() as u32, &body);

        let tag = Tag::parse(&data).unwrap().unwrap();
        assert_eq!(tag.frames_size(), 10 + 7);
        assert_eq!(tag.tag_size(), 10 + 7);
        let bytes = tag.to_bytes().unwrap();
        assert_eq!(Tag::parse(&bytes).unwrap().unwrap(), tag);
    }

    #[test]
    fn test_unknown_frames_survive() {
        let mut body = Vec::new();
        body.extend_from_slice(b"PRIV");
        body.extend_from_slice(&4u32.to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(&[1, 2, 3, 4]);
        let data = raw_tag(3, 0, body.len() as u32, &body);

        let tag = Tag::parse(&data).unwrap().unwrap();
        let frame = tag.frames().get(0).unwrap();
        assert_eq!(frame.body(), &FrameBody::Generic(vec![1, 2, 3, 4]));
        assert_eq!(tag.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_read_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("song.mp3");

        let mut tag = Tag::new();
        tag.set_title("Exit Music").unwrap();
        let mut data = tag.to_bytes_with_padding(16).unwrap();
        data.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        std::fs::write(&path, &data).unwrap();

        let read = Tag::read_from_path(&path).unwrap().unwrap();
        assert_eq!(read.title().unwrap().text, "Exit Music");
        assert_eq!(read.padding_size(), 16);

        let plain = dir.path().join("plain.mp3");
        std::fs::write(&plain, [0xFF, 0xFB, 0x90, 0x00]).unwrap();
        assert!(Tag::read_from_path(&plain).unwrap().is_none());
    }

    #[test]
    fn test_frame_growing_past_limit_stays_raw() {
        // UTF-16 without a BOM gains two bytes when normalised
        let body = [0x01, b'a', 0x00];
        let mut frame = b"TIT2".to_vec();
        frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
        frame.extend_from_slice(&[0, 0]);
        frame.extend_from_slice(&body);
        let data = raw_tag(3, 0, frame.len() as u32, &frame);

        let (frames, end) = read_frames(&data, TAG_HEADER_SIZE, 3, frame.len()).unwrap();
        assert_eq!(end, data.len());
        let kept = frames.get(0).unwrap();
        assert_eq!(kept.as_generic(), Some(&body[..]));
        assert_eq!(kept.size(), frame.len());
        assert_eq!(kept.to_bytes(3).unwrap(), frame);

        let (frames, _) = read_frames(&data, TAG_HEADER_SIZE, 3, frame.len() + 2).unwrap();
        assert_eq!(frames.get(0).unwrap().as_text().unwrap().text, "a");
        assert_eq!(frames.total_size(), frame.len() + 2);
    }

    #[test]
    fn test_v22_tag_reads_but_does_not_write() {
        let mut body = b"TT2\x00\x00\x04\x00abc".to_vec();
        body.resize(32, 0);
        let tag = Tag::parse(&raw_tag(2, 0, 32, &body)).unwrap().unwrap();
        assert_eq!(tag.major_version(), 2);
        assert!(tag.frames().is_empty());
        assert_size_invariant(&tag);

        let err = tag.to_bytes().unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { major: 2 }));
        assert!(Tag::with_version(2).to_bytes_with_padding(16).is_err());
    }

    #[test]
    fn test_set_title_with_trailing_nul_rejected() {
        let mut tag = Tag::new();
        tag.set_title("abc").unwrap();
        let before = tag.clone();

        let err = tag.set_title("abc\0").unwrap_err();
        assert_eq!(err.frame_id(), Some("TIT2"));
        assert_eq!(tag, before);
        assert!(tag.set_comment("eng", "done\0").is_err());
        assert_eq!(tag, before);
    }
}
