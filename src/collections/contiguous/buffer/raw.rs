use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::collections::{AllocError, CapacityOverflow, ReserveError};

/// Owned, uninitialized storage for `cap` values of `T`. RawBuf never reads, writes or drops its
/// contents, it only manages the allocation. Tracking which slots are initialized is left to the
/// owner.
///
/// Zero-sized types never allocate: the pointer stays dangling and `cap` is purely logical.
pub(crate) struct RawBuf<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawBuf<T> {
    pub(crate) const fn dangling() -> RawBuf<T> {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates storage for exactly `cap` values.
    ///
    /// # Errors
    /// Returns an error if the layout for `cap` values would exceed [`isize::MAX`] bytes, or if the
    /// allocator fails.
    pub(crate) fn try_with_cap(cap: usize) -> Result<RawBuf<T>, ReserveError> {
        let mut raw = RawBuf::dangling();
        raw.try_realloc(cap)?;
        Ok(raw)
    }

    /// Allocates storage for exactly `cap` values.
    ///
    /// # Panics
    /// Panics on capacity overflow. Allocation failure is handled by
    /// [`alloc::handle_alloc_error`].
    pub(crate) fn with_cap(cap: usize) -> RawBuf<T> {
        let mut raw = RawBuf::dangling();
        raw.realloc(cap);
        raw
    }

    /// Changes the capacity to exactly `new_cap`. Values in `[0, min(cap, new_cap))` are moved
    /// along with the allocation. On error, the existing allocation is left untouched.
    ///
    /// # Errors
    /// Returns an error if the new layout would exceed [`isize::MAX`] bytes, or if the allocator
    /// fails.
    pub(crate) fn try_realloc(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        if size_of::<T>() == 0 || new_cap == self.cap {
            self.cap = new_cap;
            return Ok(());
        }

        let new_layout = Layout::array::<T>(new_cap).map_err(|_| CapacityOverflow)?;

        let raw_ptr: *mut T = match (self.cap, new_cap) {
            (0, _) => {
                // SAFETY: new_cap is non-zero and T isn't zero-sized, so the layout has non-zero
                // size.
                unsafe { alloc::alloc(new_layout).cast() }
            },
            (_, 0) => {
                // SAFETY: ptr was allocated by the global allocator with the current layout.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.layout()) }
                self.ptr = NonNull::dangling();
                self.cap = 0;
                return Ok(());
            },
            (_, _) => {
                // SAFETY: ptr was allocated by the global allocator with the current layout, and
                // the new size is non-zero and was validated by Layout::array.
                unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), self.layout(), new_layout.size())
                        .cast()
                }
            },
        };

        // A null pointer from realloc leaves the old block allocated, so self stays valid.
        self.ptr = NonNull::new(raw_ptr).ok_or(AllocError { layout: new_layout })?;
        self.cap = new_cap;
        Ok(())
    }

    /// Changes the capacity to exactly `new_cap`, see [`RawBuf::try_realloc`].
    ///
    /// # Panics
    /// Panics on capacity overflow. Allocation failure is handled by
    /// [`alloc::handle_alloc_error`], which doesn't return.
    pub(crate) fn realloc(&mut self, new_cap: usize) {
        match self.try_realloc(new_cap) {
            Ok(()) => (),
            Err(ReserveError::CapacityOverflow(error)) => panic!("{}", error),
            Err(ReserveError::Alloc(error)) => alloc::handle_alloc_error(error.layout),
        }
    }

    /// The layout of the current allocation. Only meaningful when `cap > 0` and T isn't zero-sized.
    fn layout(&self) -> Layout {
        // SAFETY: The current capacity already passed Layout::array when it was allocated, so the
        // size is a multiple of the alignment and doesn't exceed isize::MAX.
        unsafe { Layout::from_size_align_unchecked(size_of::<T>() * self.cap, align_of::<T>()) }
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if size_of::<T>() != 0 && self.cap != 0 {
            // SAFETY: ptr was allocated by the global allocator with the current layout. The owner
            // has already dropped any initialized values.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.layout()) }
        }
    }
}
