//! Frame body variants and their codecs.

use crate::format::frame_id;
use crate::{Error, Result};

use super::FrameId;
use super::encoding::TextEncoding;

/// The body of a frame.
///
/// The set of variants is closed: frame ids the crate does not interpret
/// structurally are carried as [`FrameBody::Generic`] and written back
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBody {
    /// A text information frame (`T***` except `TXXX`).
    Text(TextFrame),
    /// A comment frame (`COMM`).
    Comment(CommentFrame),
    /// An attached picture frame (`APIC`).
    Picture(PictureFrame),
    /// Raw, uninterpreted bytes.
    Generic(Vec<u8>),
}

impl FrameBody {
    /// Interprets raw body bytes according to the frame id.
    ///
    /// Bytes that do not form a valid body of the expected kind are kept as
    /// [`FrameBody::Generic`].
    pub fn parse(id: FrameId, bytes: &[u8]) -> Self {
        let parsed = if id.is_text() {
            TextFrame::parse(bytes).map(Self::Text)
        } else if id == frame_id::COMMENT {
            CommentFrame::parse(bytes).map(Self::Comment)
        } else if id == frame_id::ATTACHED_PICTURE {
            PictureFrame::parse(bytes).map(Self::Picture)
        } else {
            None
        };
        parsed.unwrap_or_else(|| {
            if id.is_text() || id == frame_id::COMMENT || id == frame_id::ATTACHED_PICTURE {
                log::debug!("frame {} has a malformed body, keeping raw bytes", id);
            }
            Self::Generic(bytes.to_vec())
        })
    }

    /// Encodes the body.
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Self::Text(text) => text.encode(),
            Self::Comment(comment) => comment.encode(),
            Self::Picture(picture) => picture.encode(),
            Self::Generic(bytes) => Ok(bytes.clone()),
        }
    }

    /// Returns true if a frame with `id` may carry this body.
    pub(crate) fn fits(&self, id: FrameId) -> bool {
        match self {
            Self::Text(_) => id.is_text(),
            Self::Comment(_) => id == frame_id::COMMENT,
            Self::Picture(_) => id == frame_id::ATTACHED_PICTURE,
            Self::Generic(_) => true,
        }
    }

    /// Rejects values that would not come back unchanged from a parse of
    /// the encoded body.
    pub(crate) fn check_values(&self, id: FrameId) -> Result<()> {
        match self {
            Self::Text(text) => check_value(id, &text.text),
            Self::Comment(comment) => check_value(id, &comment.text),
            Self::Picture(_) | Self::Generic(_) => Ok(()),
        }
    }

    /// Maps an out-of-range picture type holding a defined value to its
    /// named variant.
    pub(crate) fn normalize(&mut self) {
        if let Self::Picture(picture) = self {
            picture.picture_type = picture.picture_type.normalized();
        }
    }

    /// Short name of the variant, for messages.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Comment(_) => "comment",
            Self::Picture(_) => "attached picture",
            Self::Generic(_) => "generic",
        }
    }
}

/// Body of a text information frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    /// Encoding of the text.
    pub encoding: TextEncoding,
    /// The text value.
    pub text: String,
}

impl TextFrame {
    /// Creates a text body.
    pub fn new(encoding: TextEncoding, text: impl Into<String>) -> Self {
        Self {
            encoding,
            text: text.into(),
        }
    }

    fn parse(bytes: &[u8]) -> Option<Self> {
        let (&encoding, text) = bytes.split_first()?;
        let encoding = TextEncoding::from_byte(encoding)?;
        Some(Self {
            encoding,
            text: encoding.decode(text),
        })
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = vec![self.encoding.as_byte()];
        out.extend(self.encoding.encode(&self.text)?);
        Ok(out)
    }
}

/// Body of a comment frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFrame {
    /// ISO-639-2 language code, e.g. `*b"eng"`.
    pub language: [u8; 3],
    /// Encoding of the description and the text.
    pub encoding: TextEncoding,
    /// Short content description.
    pub description: String,
    /// The comment text.
    pub text: String,
}

impl CommentFrame {
    /// Creates a comment body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameEncoding`] if `language` is not three ASCII
    /// characters.
    pub fn new(
        language: &str,
        encoding: TextEncoding,
        description: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            language: parse_language(language)?,
            encoding,
            description: description.into(),
            text: text.into(),
        })
    }

    /// Returns the language code as a string.
    pub fn language(&self) -> &str {
        std::str::from_utf8(&self.language).unwrap_or("")
    }

    fn parse(bytes: &[u8]) -> Option<Self> {
        let (&encoding, rest) = bytes.split_first()?;
        let encoding = TextEncoding::from_byte(encoding)?;
        let language: [u8; 3] = rest.get(..3)?.try_into().ok()?;
        let (description, text) = encoding.split_terminated(&rest[3..])?;
        Some(Self {
            language,
            encoding,
            description: encoding.decode(description),
            text: encoding.decode(text),
        })
    }

    fn encode(&self) -> Result<Vec<u8>> {
        if !self.language.is_ascii() {
            return Err(Error::frame_encoding(
                frame_id::COMMENT,
                "language code is not ASCII",
            ));
        }
        check_description(frame_id::COMMENT, &self.description)?;

        let mut out = vec![self.encoding.as_byte()];
        out.extend_from_slice(&self.language);
        out.extend(self.encoding.encode(&self.description)?);
        out.extend_from_slice(self.encoding.terminator());
        out.extend(self.encoding.encode(&self.text)?);
        Ok(out)
    }
}

/// Body of an attached picture frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFrame {
    /// Encoding of the description.
    pub encoding: TextEncoding,
    /// MIME type of the image, e.g. `image/jpeg`. Always stored as Latin-1.
    pub mime_type: String,
    /// What the picture shows.
    pub picture_type: PictureType,
    /// Short description.
    pub description: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl PictureFrame {
    /// Creates a picture body.
    pub fn new(
        encoding: TextEncoding,
        mime_type: impl Into<String>,
        picture_type: PictureType,
        description: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            encoding,
            mime_type: mime_type.into(),
            picture_type: picture_type.normalized(),
            description: description.into(),
            data: data.into(),
        }
    }

    fn parse(bytes: &[u8]) -> Option<Self> {
        let (&encoding, rest) = bytes.split_first()?;
        let encoding = TextEncoding::from_byte(encoding)?;
        let (mime_type, rest) = TextEncoding::Latin1.split_terminated(rest)?;
        let (&picture_type, rest) = rest.split_first()?;
        let (description, data) = encoding.split_terminated(rest)?;
        Some(Self {
            encoding,
            mime_type: TextEncoding::Latin1.decode(mime_type),
            picture_type: PictureType::from(picture_type),
            description: encoding.decode(description),
            data: data.to_vec(),
        })
    }

    fn encode(&self) -> Result<Vec<u8>> {
        if !self.mime_type.is_ascii() || self.mime_type.contains('\0') {
            return Err(Error::frame_encoding(
                frame_id::ATTACHED_PICTURE,
                format!("invalid MIME type {:?}", self.mime_type),
            ));
        }
        check_description(frame_id::ATTACHED_PICTURE, &self.description)?;

        let mut out = vec![self.encoding.as_byte()];
        out.extend_from_slice(self.mime_type.as_bytes());
        out.push(0);
        out.push(self.picture_type.into());
        out.extend(self.encoding.encode(&self.description)?);
        out.extend_from_slice(self.encoding.terminator());
        out.extend_from_slice(&self.data);
        Ok(out)
    }
}

/// Picture type of an attached picture frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PictureType {
    /// Other.
    Other,
    /// 32x32 pixels file icon (PNG only).
    FileIcon,
    /// Other file icon.
    OtherFileIcon,
    /// Cover (front).
    FrontCover,
    /// Cover (back).
    BackCover,
    /// Leaflet page.
    Leaflet,
    /// Media (e.g. label side of CD).
    Media,
    /// Lead artist/lead performer/soloist.
    LeadArtist,
    /// Artist/performer.
    Artist,
    /// Conductor.
    Conductor,
    /// Band/Orchestra.
    Band,
    /// Composer.
    Composer,
    /// Lyricist/text writer.
    Lyricist,
    /// Recording location.
    RecordingLocation,
    /// During recording.
    DuringRecording,
    /// During performance.
    DuringPerformance,
    /// Movie/video screen capture.
    ScreenCapture,
    /// A bright coloured fish.
    BrightFish,
    /// Illustration.
    Illustration,
    /// Band/artist logotype.
    BandLogo,
    /// Publisher/Studio logotype.
    PublisherLogo,
    /// A value outside the defined range, kept as-is.
    Undefined(u8),
}

const PICTURE_TYPES: [PictureType; 21] = [
    PictureType::Other,
    PictureType::FileIcon,
    PictureType::OtherFileIcon,
    PictureType::FrontCover,
    PictureType::BackCover,
    PictureType::Leaflet,
    PictureType::Media,
    PictureType::LeadArtist,
    PictureType::Artist,
    PictureType::Conductor,
    PictureType::Band,
    PictureType::Composer,
    PictureType::Lyricist,
    PictureType::RecordingLocation,
    PictureType::DuringRecording,
    PictureType::DuringPerformance,
    PictureType::ScreenCapture,
    PictureType::BrightFish,
    PictureType::Illustration,
    PictureType::BandLogo,
    PictureType::PublisherLogo,
];

impl PictureType {
    /// Returns the named variant for an [`Undefined`](Self::Undefined)
    /// value inside the defined range, or `self` otherwise.
    pub fn normalized(self) -> Self {
        Self::from(u8::from(self))
    }
}

impl From<u8> for PictureType {
    fn from(value: u8) -> Self {
        PICTURE_TYPES
            .get(usize::from(value))
            .copied()
            .unwrap_or(PictureType::Undefined(value))
    }
}

impl From<PictureType> for u8 {
    fn from(value: PictureType) -> Self {
        match value {
            PictureType::Undefined(raw) => raw,
            known => PICTURE_TYPES
                .iter()
                .position(|&t| t == known)
                .map_or(0, |i| i as u8),
        }
    }
}

fn parse_language(language: &str) -> Result<[u8; 3]> {
    match language.as_bytes() {
        &[a, b, c] if language.is_ascii() => Ok([a, b, c]),
        _ => Err(Error::frame_encoding(
            frame_id::COMMENT,
            format!("language code {:?} is not three ASCII characters", language),
        )),
    }
}

fn check_description(id: FrameId, description: &str) -> Result<()> {
    if description.contains('\0') {
        return Err(Error::frame_encoding(id, "description contains a NUL character"));
    }
    Ok(())
}

fn check_value(id: FrameId, value: &str) -> Result<()> {
    // Trailing terminators are dropped on decode
    if value.ends_with('\0') {
        return Err(Error::frame_encoding(id, "value ends with a NUL character"));
    }
    Ok(())
}
