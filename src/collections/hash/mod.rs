//! Hash-based collection types: [`Table`], an open-addressing map, and [`Fnv1a`], a small
//! byte-oriented hasher that can be plugged into it.

pub mod fnv;
pub mod table;

#[doc(inline)]
pub use fnv::{BuildFnv1a, Fnv1a};
#[doc(inline)]
pub use table::Table;
