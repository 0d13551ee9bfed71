use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From};

/// The requested capacity can't be represented by a memory layout, because its size in bytes
/// would exceed [`isize::MAX`].
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("capacity overflow")]
pub struct CapacityOverflow;

/// The global allocator failed to provide memory for the contained layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    pub layout: Layout,
}

impl Display for AllocError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "memory allocation of {} bytes failed", self.layout.size())
    }
}

impl Error for AllocError {}

/// An error produced when a collection can't change its capacity.
#[derive(Debug, Display, Error, From, Clone, Copy, PartialEq, Eq)]
pub enum ReserveError {
    CapacityOverflow(CapacityOverflow),
    Alloc(AllocError),
}
