// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;

/// One open container.
///
/// The frame stack holds exactly one of these per open `{` or `[`; nothing
/// else about the container is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frame {
    #[default]
    Array,
    Object,
}

/// Fixed-capacity stack of [`Frame`]s over caller-supplied storage.
///
/// Capacity is the length of the storage slice. Pushes are bounds checked and
/// fail instead of growing; the only way to get more room is to hand in a
/// larger storage through [`FrameStack::grow_into`].
///
/// Example:
/// ```rust
/// # use stackjson::{Frame, FrameStack};
/// let mut stack = FrameStack::new([Frame::default(); 2]);
/// stack.push(Frame::Object).unwrap();
/// stack.push(Frame::Array).unwrap();
/// assert!(stack.push(Frame::Array).is_err());
/// assert_eq!(stack.pop(), Some(Frame::Array));
/// ```
#[derive(Debug)]
pub struct FrameStack<S> {
    storage: S,
    depth: usize,
}

impl<S: AsRef<[Frame]> + AsMut<[Frame]>> FrameStack<S> {
    pub fn new(storage: S) -> Self {
        Self { storage, depth: 0 }
    }

    /// Number of frames the storage can hold.
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().len()
    }

    /// Number of frames currently pushed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    pub fn is_full(&self) -> bool {
        self.depth >= self.capacity()
    }

    pub fn push(&mut self, frame: Frame) -> Result<(), ParseError> {
        let depth = self.depth;
        match self.storage.as_mut().get_mut(depth) {
            Some(slot) => {
                *slot = frame;
                self.depth = depth + 1;
                Ok(())
            }
            None => Err(ParseError::StackOverflow { depth }),
        }
    }

    pub fn pop(&mut self) -> Option<Frame> {
        let top = self.depth.checked_sub(1)?;
        let frame = self.storage.as_ref().get(top).copied()?;
        self.depth = top;
        Some(frame)
    }

    /// Returns the innermost open container without removing it.
    pub fn top(&self) -> Option<Frame> {
        let top = self.depth.checked_sub(1)?;
        self.storage.as_ref().get(top).copied()
    }

    /// Moves the live frames into `storage` and continues on it.
    ///
    /// The replacement must hold more frames than the current depth, otherwise
    /// the stack is left untouched and `StackOverflow` is returned.
    pub fn grow_into(&mut self, mut storage: S) -> Result<(), ParseError> {
        let depth = self.depth;
        let (Some(dst), Some(src)) = (
            storage.as_mut().get_mut(..=depth),
            self.storage.as_ref().get(..depth),
        ) else {
            return Err(ParseError::StackOverflow { depth });
        };
        if let Some(dst) = dst.get_mut(..depth) {
            dst.copy_from_slice(src);
        }
        self.storage = storage;
        Ok(())
    }

    /// Replaces the storage with a fresh region and drops every frame.
    pub fn replace(&mut self, storage: S) {
        self.storage = storage;
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = FrameStack::new([Frame::default(); 3]);
        assert!(stack.is_empty());
        stack.push(Frame::Object).unwrap();
        stack.push(Frame::Array).unwrap();
        stack.push(Frame::Object).unwrap();
        assert!(stack.is_full());
        assert_eq!(stack.top(), Some(Frame::Object));
        assert_eq!(stack.pop(), Some(Frame::Object));
        assert_eq!(stack.pop(), Some(Frame::Array));
        assert_eq!(stack.pop(), Some(Frame::Object));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.top(), None);
    }

    #[test]
    fn test_push_past_capacity_fails() {
        let mut stack = FrameStack::new([Frame::default(); 2]);
        stack.push(Frame::Array).unwrap();
        stack.push(Frame::Array).unwrap();
        assert_eq!(
            stack.push(Frame::Object),
            Err(ParseError::StackOverflow { depth: 2 })
        );
        // A failed push leaves the stack as it was
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top(), Some(Frame::Array));
    }

    #[test]
    fn test_zero_capacity() {
        let mut stack = FrameStack::new([Frame::default(); 0]);
        assert!(stack.is_full());
        assert_eq!(
            stack.push(Frame::Array),
            Err(ParseError::StackOverflow { depth: 0 })
        );
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_borrowed_storage() {
        let mut region = [Frame::default(); 4];
        let mut stack = FrameStack::new(&mut region[..]);
        assert_eq!(stack.capacity(), 4);
        stack.push(Frame::Object).unwrap();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_grow_into_copies_frames() {
        let mut stack = FrameStack::new(std::vec![Frame::default(); 2]);
        stack.push(Frame::Object).unwrap();
        stack.push(Frame::Array).unwrap();
        stack.grow_into(std::vec![Frame::default(); 4]).unwrap();
        assert_eq!(stack.capacity(), 4);
        stack.push(Frame::Object).unwrap();
        assert_eq!(stack.pop(), Some(Frame::Object));
        assert_eq!(stack.pop(), Some(Frame::Array));
        assert_eq!(stack.pop(), Some(Frame::Object));
    }

    #[test]
    fn test_grow_into_rejects_smaller_storage() {
        let mut stack = FrameStack::new(std::vec![Frame::default(); 2]);
        stack.push(Frame::Object).unwrap();
        stack.push(Frame::Object).unwrap();
        assert_eq!(
            stack.grow_into(std::vec![Frame::default(); 2]),
            Err(ParseError::StackOverflow { depth: 2 })
        );
        assert_eq!(stack.capacity(), 2);
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_queries_through_shared_reference() {
        let mut stack = FrameStack::new([Frame::default(); 2]);
        stack.push(Frame::Object).unwrap();
        let view = &stack;
        assert_eq!(view.capacity(), 2);
        assert!(!view.is_full());
        assert_eq!(view.top(), Some(Frame::Object));
    }

    #[test]
    fn test_replace_drops_frames() {
        let mut stack = FrameStack::new([Frame::default(); 2]);
        stack.push(Frame::Array).unwrap();
        stack.push(Frame::Array).unwrap();
        stack.replace([Frame::default(); 2]);
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);
        stack.push(Frame::Object).unwrap();
    }
}
