use std::iter::FusedIterator;
use std::mem;
use std::ptr;
use std::slice;

use super::Buffer;
use super::raw::RawBuf;

impl<T> IntoIterator for Buffer<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let end = self.len;
        // SAFETY: self is forgotten straight after, so ownership of the allocation and of the
        // initialized values [0, len) moves into the iterator without a double free.
        let raw = unsafe { ptr::read(&self.raw) };
        mem::forget(self);

        IntoIter {
            raw,
            start: 0,
            end,
        }
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Buffer<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owned iterator over the elements of a [`Buffer`]. See [`Buffer::into_iter`].
///
/// Elements that haven't been yielded yet are dropped along with the iterator.
pub struct IntoIter<T> {
    pub(crate) raw: RawBuf<T>,
    // Values in [start, end) are initialized and not yet yielded.
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start is in [start, end), so the value is initialized and won't be read
            // again after start is incremented.
            let value = unsafe { self.raw.ptr.add(self.start).read() };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.start;
        (left, Some(left))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: end has just been decremented into [start, end), so the value is
            // initialized and is now outside of the range that gets dropped.
            Some(unsafe { self.raw.ptr.add(self.end).read() })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: [start, end) are the remaining initialized values. RawBuf deallocates after.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.raw.ptr.add(self.start).as_ptr(),
                self.end - self.start,
            ));
        }
    }
}
