//! Configuration for file rewrites.

use crate::format::DEFAULT_PADDING_SIZE;

/// Options controlling how [`TagRewriter`](super::TagRewriter) writes a tag
/// into a file.
///
/// # Example
///
/// ```rust
/// use id3tag::RewriteOptions;
///
/// let options = RewriteOptions::new().padding_budget(512).sync(false);
/// assert_eq!(options.padding_budget, 512);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Padding the written tag is topped up to, in bytes.
    ///
    /// A tag that already carries this much padding (or more) is written
    /// with its own padding only.
    pub padding_budget: usize,
    /// Whether to fsync the destination after the commit.
    pub sync: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            padding_budget: DEFAULT_PADDING_SIZE,
            sync: true,
        }
    }
}

impl RewriteOptions {
    /// Creates options with defaults (2048 bytes of padding, sync enabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the padding budget.
    pub fn padding_budget(mut self, bytes: usize) -> Self {
        self.padding_budget = bytes;
        self
    }

    /// Writes only the padding the tag already has.
    pub fn no_padding(self) -> Self {
        self.padding_budget(0)
    }

    /// Enables or disables the fsync after the commit.
    pub fn sync(mut self, enabled: bool) -> Self {
        self.sync = enabled;
        self
    }

    /// Returns the padding to add to a tag that has `padding_size` bytes.
    pub(crate) fn extra_padding(&self, padding_size: usize) -> usize {
        self.padding_budget.saturating_sub(padding_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RewriteOptions::default();
        assert_eq!(options.padding_budget, 2048);
        assert!(options.sync);
        assert_eq!(options, RewriteOptions::new());
    }

    #[test]
    fn test_builder() {
        let options = RewriteOptions::new().padding_budget(100).sync(false);
        assert_eq!(options.padding_budget, 100);
        assert!(!options.sync);
        assert_eq!(RewriteOptions::new().no_padding().padding_budget, 0);
    }

    #[test]
    fn test_extra_padding_is_clamped() {
        let options = RewriteOptions::new().padding_budget(100);
        assert_eq!(options.extra_padding(0), 100);
        assert_eq!(options.extra_padding(40), 60);
        assert_eq!(options.extra_padding(100), 0);
        assert_eq!(options.extra_padding(5000), 0);
    }
}
