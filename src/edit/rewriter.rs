//! Tag rewriter for replacing the tag at the start of a file.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use crate::format::header::TagHeader;
use crate::{Error, Result, Tag};

use super::options::RewriteOptions;

/// Result of a rewrite.
#[must_use = "rewrite result should be checked to verify the file holds the expected tag"]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteResult {
    /// On-disk size of the tag that was replaced, header included; 0 if the
    /// file had no tag.
    pub old_tag_size: u64,
    /// On-disk size of the tag now at the start of the file, header and
    /// padding included.
    pub new_tag_size: u64,
    /// Padding added on top of the tag's own padding.
    pub padding_added: u64,
    /// Bytes after the old tag that were carried over.
    pub payload_bytes: u64,
}

impl RewriteResult {
    /// Returns the size of the rewritten file.
    pub fn total_bytes(&self) -> u64 {
        self.new_tag_size + self.payload_bytes
    }

    /// Returns how many bytes the file grew (negative if it shrank).
    pub fn size_delta(&self) -> i64 {
        self.new_tag_size as i64 - self.old_tag_size as i64
    }
}

/// Writes tags into existing files.
///
/// See the [module documentation](super) for the procedure and its failure
/// guarantees.
#[derive(Debug, Clone, Default)]
pub struct TagRewriter {
    options: RewriteOptions,
}

impl TagRewriter {
    /// Creates a rewriter with the given options.
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    /// Returns the rewriter's options.
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Replaces the tag at the start of `dest` with `tag`.
    ///
    /// A file without a tag gets one prepended. Everything after the old
    /// tag's declared extent is carried over unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if `dest` cannot be opened or read, or the scratch
    ///   file cannot be written; `dest` is untouched.
    /// - Encoding errors from [`Tag::to_bytes_with_padding`]; `dest` is
    ///   untouched.
    /// - [`Error::StagingMismatch`] if the staged image has an unexpected
    ///   length; `dest` is untouched.
    /// - [`Error::CommitFailed`] if copying the staged image over `dest`
    ///   fails; `dest` may be incomplete.
    pub fn write(&self, tag: &Tag, dest: impl AsRef<Path>) -> Result<RewriteResult> {
        let dest = dest.as_ref();

        let old_tag_size = TagHeader::read_from_path(dest)?
            .map(|header| header.total_size())
            .unwrap_or(0);

        let extra = self.options.extra_padding(tag.padding_size());
        let image = tag.to_bytes_with_padding(extra)?;

        let mut file = OpenOptions::new().read(true).write(true).open(dest)?;
        let file_len = file.metadata()?.len();
        // A tag declared past the end of the file leaves nothing to carry
        let payload_len = file_len.saturating_sub(old_tag_size);

        let mut scratch = tempfile::tempfile()?;
        scratch.write_all(&image)?;
        let payload_bytes = if payload_len > 0 {
            file.seek(SeekFrom::Start(old_tag_size))?;
            io::copy(&mut file, &mut scratch)?
        } else {
            0
        };

        let expected = image.len() as u64 + payload_len;
        let staged = scratch.seek(SeekFrom::End(0))?;
        if payload_bytes != payload_len || staged != expected {
            return Err(Error::StagingMismatch {
                expected,
                actual: staged,
            });
        }

        log::debug!(
            "staged {} byte tag and {} payload bytes for {}",
            image.len(),
            payload_bytes,
            dest.display()
        );

        self.commit(&mut scratch, &mut file)
            .map_err(|source| Error::CommitFailed {
                path: dest.display().to_string(),
                source,
            })?;

        Ok(RewriteResult {
            old_tag_size,
            new_tag_size: image.len() as u64,
            padding_added: extra as u64,
            payload_bytes,
        })
    }

    /// Copies the staged image over the destination.
    fn commit(&self, scratch: &mut File, file: &mut File) -> io::Result<()> {
        scratch.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        io::copy(scratch, file)?;
        file.flush()?;
        if self.options.sync {
            file.sync_all()?;
        }
        Ok(())
    }
}

/// Writes `tag` into `dest`, or does nothing if there is no tag.
///
/// Returns `Ok(None)` without touching `dest` when `tag` is `None`.
pub fn write_tag(
    tag: Option<&Tag>,
    dest: impl AsRef<Path>,
    options: &RewriteOptions,
) -> Result<Option<RewriteResult>> {
    match tag {
        Some(tag) => TagRewriter::new(options.clone()).write(tag, dest).map(Some),
        None => {
            log::debug!("no tag to write to {}", dest.as_ref().display());
            Ok(None)
        }
    }
}
