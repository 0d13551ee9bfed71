//! Contiguous collection types. Namely [`Buffer`], a sequence which grows and shrinks with the
//! number of elements it holds.
#![warn(missing_docs)]

pub mod buffer;

#[doc(inline)]
pub use buffer::Buffer;
