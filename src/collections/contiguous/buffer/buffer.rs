use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use log::trace;

use super::raw::RawBuf;
use crate::collections::{CapacityOverflow, ReserveError};

/// The starting capacity used by [`Buffer::new`].
pub const DEFAULT_START_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

/// A growable contiguous sequence of `T`, addressable like a flat array.
///
/// Unlike [`Vec`], every Buffer has a starting capacity which it allocates up front and never
/// shrinks below. The capacity doubles whenever an insertion finds the Buffer full, and halves
/// whenever a removal happens at exactly half occupancy, while the capacity is still above the
/// starting capacity. Removing one element right after a growth therefore never triggers a shrink.
///
/// Insertion and removal come in two flavors:
/// - `_ordered` methods shift the following elements, preserving relative order.
/// - `_unordered` methods swap with the tail in `O(1)`, destroying relative order.
///
/// Indices passed to either flavor are clamped into range rather than causing a panic.
///
/// An allocation failure while resizing is fatal: [`std::alloc::handle_alloc_error`] is called
/// and the process doesn't continue with a half-moved Buffer. Use [`Buffer::try_with_start_cap`]
/// to handle failure of the initial allocation.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Buffer.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being inserted in bulk.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`* |
/// | `pop` | `O(1)`* |
/// | `insert_ordered` | `O(n-i)` |
/// | `remove_ordered` | `O(n-i)` |
/// | `insert_unordered` | `O(1)`* |
/// | `remove_unordered` | `O(1)`* |
/// | `insert_array` | `O(m(n-i))` |
/// | `push_array` | `O(m)`* |
///
/// \* Amortized. A call that resizes the Buffer takes `O(n)`.
pub struct Buffer<T> {
    pub(crate) raw: RawBuf<T>,
    pub(crate) len: usize,
    pub(crate) start_cap: usize,
}

impl<T> Buffer<T> {
    /// Creates a new, empty Buffer with a starting capacity of [`DEFAULT_START_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let buf: Buffer<u32> = Buffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.cap(), 8);
    /// ```
    pub fn new() -> Buffer<T> {
        Buffer::with_start_cap(DEFAULT_START_CAP)
    }

    /// Creates a new, empty Buffer which allocates `start_cap` elements immediately and never
    /// shrinks below that capacity.
    ///
    /// # Panics
    /// Panics if `start_cap` is 0, or if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::with_start_cap(2);
    /// buf.push_array([1, 2, 3]);
    /// assert_eq!(buf.cap(), 4);
    /// ```
    pub fn with_start_cap(start_cap: usize) -> Buffer<T> {
        assert!(start_cap > 0, "Buffer can't have a starting capacity of 0!");

        Buffer {
            raw: RawBuf::with_cap(start_cap),
            len: 0,
            start_cap,
        }
    }

    /// Creates a new, empty Buffer like [`Buffer::with_start_cap`], reporting allocation failure
    /// instead of aborting.
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if the memory layout size would exceed [`isize::MAX`] or the
    /// allocator can't provide the memory.
    ///
    /// # Panics
    /// Panics if `start_cap` is 0.
    pub fn try_with_start_cap(start_cap: usize) -> Result<Buffer<T>, ReserveError> {
        assert!(start_cap > 0, "Buffer can't have a starting capacity of 0!");

        Ok(Buffer {
            raw: RawBuf::try_with_cap(start_cap)?,
            len: 0,
            start_cap,
        })
    }

    /// Returns the number of elements in the Buffer.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Buffer contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the Buffer can hold before it has to grow.
    pub const fn cap(&self) -> usize {
        self.raw.cap
    }

    /// Returns the capacity the Buffer started with, which is also its minimum capacity.
    pub const fn start_cap(&self) -> usize {
        self.start_cap
    }

    /// Inserts `value` at `index`, shifting all following elements back by one. An `index` past
    /// the end is clamped to `len`, making this an append.
    ///
    /// # Panics
    /// Panics if growing the Buffer would overflow its capacity.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from_iter([4, 3]);
    /// buf.insert_ordered(0, 1);
    /// assert_eq!(&*buf, &[1, 4, 3]);
    /// buf.insert_ordered(100, 5);
    /// assert_eq!(&*buf, &[1, 4, 3, 5]);
    /// ```
    pub fn insert_ordered(&mut self, index: usize, value: T) {
        let index = cmp::min(index, self.len);
        self.grow_if_full();

        // SAFETY: The Buffer has room for at least one more element, so both the shifted range
        // [index + 1, len + 1) and the write at index are in bounds.
        unsafe {
            let slot = self.raw.ptr.as_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(value);
        }
        self.len += 1;
    }

    /// Removes and returns the element at `index`, shifting all following elements forward by one.
    /// An `index` past the end is clamped to the last element. Returns None only if the Buffer is
    /// empty.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from_iter([2, 4, 3, 1]);
    /// assert_eq!(buf.remove_ordered(0), Some(2));
    /// assert_eq!(&*buf, &[4, 3, 1]);
    /// ```
    pub fn remove_ordered(&mut self, index: usize) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let index = cmp::min(index, self.len - 1);

        // SAFETY: index < len, so the read is of an initialized value. The copy moves the
        // initialized range (index, len) forward by one, overwriting the value just read.
        let value = unsafe {
            let slot = self.raw.ptr.as_ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            value
        };
        self.len -= 1;
        self.shrink_if_sparse();

        Some(value)
    }

    /// Inserts `value` at `index` in `O(1)`, by moving the element previously at `index` to the end
    /// of the Buffer. An `index` past the end is clamped to `len`, making this an append.
    ///
    /// # Panics
    /// Panics if growing the Buffer would overflow its capacity.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from_iter([1, 4, 3]);
    /// buf.insert_unordered(0, 2);
    /// assert_eq!(&*buf, &[2, 4, 3, 1]);
    /// ```
    pub fn insert_unordered(&mut self, index: usize, value: T) {
        let index = cmp::min(index, self.len);
        self.grow_if_full();

        // SAFETY: The Buffer has room for at least one more element, so len is in bounds. When
        // index < len, the slots at index and len are distinct.
        unsafe {
            let base = self.raw.ptr.as_ptr();
            if index != self.len {
                ptr::copy_nonoverlapping(base.add(index), base.add(self.len), 1);
            }
            base.add(index).write(value);
        }
        self.len += 1;
    }

    /// Removes and returns the element at `index` in `O(1)`, by moving the last element into its
    /// place. An `index` past the end is clamped to the last element. Returns None only if the
    /// Buffer is empty.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from_iter([4, 3, 1]);
    /// assert_eq!(buf.remove_unordered(0), Some(4));
    /// assert_eq!(&*buf, &[1, 3]);
    /// ```
    pub fn remove_unordered(&mut self, index: usize) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let index = cmp::min(index, self.len - 1);
        let last = self.len - 1;

        // SAFETY: index and last are both < len and therefore initialized. The value at last is
        // moved into the slot that was just read from, leaving last logically uninitialized.
        let value = unsafe {
            let base = self.raw.ptr.as_ptr();
            let value = base.add(index).read();
            if index != last {
                ptr::copy_nonoverlapping(base.add(last), base.add(index), 1);
            }
            value
        };
        self.len -= 1;
        self.shrink_if_sparse();

        Some(value)
    }

    /// Inserts every item of `values` starting at `index`, in iteration order. This is equivalent
    /// to calling [`insert_ordered`](Buffer::insert_ordered) with `index`, `index + 1`, ...
    ///
    /// # Panics
    /// Panics if growing the Buffer would overflow its capacity.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from_iter([1]);
    /// buf.insert_array(0, [2, 3]);
    /// assert_eq!(&*buf, &[2, 3, 1]);
    /// ```
    pub fn insert_array<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) {
        let index = cmp::min(index, self.len);
        for (offset, value) in values.into_iter().enumerate() {
            self.insert_ordered(index + offset, value);
        }
    }

    /// Pushes every item of `values` onto the end of the Buffer, in iteration order.
    ///
    /// # Panics
    /// Panics if growing the Buffer would overflow its capacity.
    pub fn push_array<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.push(value);
        }
    }

    /// Pushes `value` onto the end of the Buffer. Identical to
    /// [`insert_unordered`](Buffer::insert_unordered) at `len`.
    ///
    /// # Panics
    /// Panics if growing the Buffer would overflow its capacity.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::new();
    /// for i in 0..10 {
    ///     buf.push(i);
    /// }
    /// assert_eq!(&*buf, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// assert_eq!(buf.cap(), 16);
    /// ```
    pub fn push(&mut self, value: T) {
        self.insert_unordered(self.len, value);
    }

    /// Removes and returns the last element, or None if the Buffer is empty. Identical to
    /// [`remove_unordered`](Buffer::remove_unordered) at `len - 1`.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from_iter(0..3);
    /// assert_eq!(buf.pop(), Some(2));
    /// assert_eq!(buf.pop(), Some(1));
    /// assert_eq!(buf.pop(), Some(0));
    /// assert_eq!(buf.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.remove_unordered(self.len - 1)
        }
    }

    /// Drops every element and returns the Buffer to its starting capacity.
    pub fn clear(&mut self) {
        let len = self.len;
        // Set len first so that a panicking Drop can't cause a double drop.
        self.len = 0;

        // SAFETY: [0, len) were initialized and are no longer considered part of the Buffer.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.raw.ptr.as_ptr(), len));
        }

        if self.cap() != self.start_cap {
            trace!("Buffer shrinking from {} to {} on clear", self.cap(), self.start_cap);
            self.raw.realloc(self.start_cap);
        }
    }
}

impl<T> Buffer<T> {
    /// Doubles the capacity if there is no room for another element.
    pub(crate) fn grow_if_full(&mut self) {
        if self.len == self.cap() {
            let new_cap = match self.cap().checked_mul(GROWTH_FACTOR) {
                Some(new_cap) => new_cap,
                None => panic!("{}", CapacityOverflow),
            };
            trace!("Buffer growing from {} to {}", self.cap(), new_cap);
            self.raw.realloc(new_cap);
        }
    }

    /// Halves the capacity after a removal that happened at exactly half occupancy, unless the
    /// Buffer is already at its starting capacity.
    pub(crate) fn shrink_if_sparse(&mut self) {
        if self.len < self.cap() / GROWTH_FACTOR && self.cap() > self.start_cap {
            let new_cap = cmp::max(self.cap() / GROWTH_FACTOR, self.start_cap);
            trace!("Buffer shrinking from {} to {}", self.cap(), new_cap);
            self.raw.realloc(new_cap);
        }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are initialized and are dropped exactly once here. RawBuf handles the
        // deallocation afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.raw.ptr.as_ptr(), self.len));
        }
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: ptr is non-null and aligned (dangling only when there is nothing to read), and
        // [0, len) are initialized.
        unsafe { slice::from_raw_parts(self.raw.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for Buffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, with uniqueness guaranteed by &mut self.
        unsafe { slice::from_raw_parts_mut(self.raw.ptr.as_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for Buffer<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Buffer<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Buffer<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Buffer<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Buffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_array(iter);
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = Buffer::new();
        buf.push_array(iter);
        buf
    }
}

impl<T: Clone> From<&[T]> for Buffer<T> {
    fn from(value: &[T]) -> Self {
        value.iter().cloned().collect()
    }
}

impl<T: Clone> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        let mut buf = Buffer::with_start_cap(self.start_cap);
        buf.raw.realloc(self.cap());
        buf.push_array(self.iter().cloned());
        buf
    }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Buffer<T> {}

impl<T: Hash> Hash for Buffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("start_cap", &self.start_cap)
            .finish()
    }
}

impl<T: Debug> Display for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY: Buffers own their values through a unique pointer, so sending a Buffer is sending its
// values.
unsafe impl<T: Send> Send for Buffer<T> {}
// SAFETY: Buffer's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs.
unsafe impl<T: Sync> Sync for Buffer<T> {}
