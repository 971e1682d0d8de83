//! Ordered frame container.

use super::{Frame, FrameId};

/// Frames of a tag in insertion order.
///
/// Duplicate ids are allowed (several comments or pictures are valid).
/// Lookups are linear scans in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameList {
    frames: Vec<Frame>,
}

impl FrameList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame at the tail.
    pub fn add(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Returns the first frame with the given id.
    pub fn get_first(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id() == id)
    }

    /// Returns the index of the first frame with the given id.
    pub fn position(&self, id: FrameId) -> Option<usize> {
        self.frames.iter().position(|f| f.id() == id)
    }

    /// Returns every frame with the given id, in list order.
    pub fn get_all(&self, id: FrameId) -> Vec<&Frame> {
        self.frames.iter().filter(|f| f.id() == id).collect()
    }

    /// Returns the frame at `index`.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Puts `frame` at `index` and returns the frame it displaced.
    ///
    /// The order of every other frame is unchanged. Returns `None`, leaving
    /// the list as it was, if `index` is out of range.
    pub fn replace(&mut self, index: usize, frame: Frame) -> Option<Frame> {
        self.frames
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, frame))
    }

    /// Drops every frame.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Returns the number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the list holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the summed serialized size of all frames.
    pub fn total_size(&self) -> usize {
        self.frames.iter().map(Frame::size).sum()
    }

    /// Iterates over the frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a FrameList {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl IntoIterator for FrameList {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl FromIterator<Frame> for FrameList {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
