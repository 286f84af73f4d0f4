#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! A fixed-capacity FIFO buffer that evicts exactly one element, the oldest,
//! whenever a push would exceed its capacity.
//!
//! [`RingBuffer`] is the storage primitive behind the rolling windows of the
//! monitoring engine. Elements are kept oldest-first; [`push`](RingBuffer::push)
//! appends at the tail and hands back the element evicted from the head, so
//! callers can observe eviction order. [`tail`](RingBuffer::tail) exposes the
//! most recent `n` elements without copying.
//!
//! # Complexity
//! - `push`, `pop`, `get`, `len`, `is_empty`, `is_full` and `capacity` are
//!   **O(1)**; `tail` is **O(1)** to create and **O(n)** to walk.
//!
//! # Thread Safety
//! - No interior mutability. `RingBuffer<T>` is `Send`/`Sync` when `T` is;
//!   concurrent writers must wrap it in a lock.

use std::collections::VecDeque;

/// A fixed-capacity buffer storing elements in first-in-first-out order.
///
/// # Examples
///
/// ```rust
/// use textops_common::collections::RingBuffer;
///
/// let mut buffer = RingBuffer::new(3);
/// assert_eq!(buffer.push(1), None);
/// assert_eq!(buffer.push(2), None);
/// assert_eq!(buffer.push(3), None);
/// assert_eq!(buffer.push(4), Some(1)); // evicts the oldest item
///
/// assert_eq!(buffer.to_vec(), vec![2, 3, 4]);
/// assert_eq!(buffer.tail(2).copied().collect::<Vec<_>>(), vec![3, 4]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingBuffer<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a new buffer with the provided capacity.
    ///
    /// A capacity of zero is clamped to `1`.
    #[inline]
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { buf: VecDeque::with_capacity(capacity), capacity }
    }

    /// Creates a buffer holding the first `capacity` items of `items`.
    ///
    /// Items past the capacity are dropped, not rotated in: the result is a
    /// prefix of the input, not its suffix.
    #[must_use]
    pub fn from_prefix<I>(capacity: usize, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut buffer = Self::new(capacity);
        let cap = buffer.capacity;
        buffer.buf.extend(items.into_iter().take(cap));
        buffer
    }

    /// Appends an item, evicting and returning the oldest one when the buffer
    /// was already full.
    #[inline]
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() { self.buf.pop_front() } else { None };
        self.buf.push_back(item);
        evicted
    }

    /// Removes and returns the oldest item in the buffer.
    #[inline]
    #[must_use]
    pub fn pop(&mut self) -> Option<T> {
        self.buf.pop_front()
    }

    /// Returns the value at `idx`, counting from the oldest element.
    #[inline]
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.buf.get(idx)
    }

    /// Returns the most recently pushed element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.buf.back()
    }

    /// Returns the number of items currently stored.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` when the buffer has no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns `true` when the next push will evict.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Returns the maximum number of items the buffer can hold.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all elements, leaving the capacity unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Returns an iterator visiting elements from oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.buf.iter()
    }

    /// Returns an iterator over the most recent `min(n, len)` elements,
    /// oldest-first.
    #[inline]
    pub fn tail(&self, n: usize) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        let skip = self.len().saturating_sub(n);
        self.buf.range(skip..)
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copies the contents into a `Vec`, oldest-first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.buf.iter().cloned().collect()
    }
}

impl<T> Default for RingBuffer<T> {
    /// Creates a single-slot buffer.
    #[inline]
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    /// Pushes every item in order, evicting one element per overflowing push.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}
