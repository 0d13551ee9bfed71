//! Generic collection types.
//!
//! # Purpose
//! Two containers live here: [`Buffer`](contiguous::Buffer), a growable contiguous sequence, and
//! [`Table`](hash::Table), an open-addressing hash table. The table keeps its slots in a Buffer,
//! but neither type's capacity policy depends on the other.
//!
//! # Method
//! Buffer implements [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which gives flat
//! array addressing and the whole slice API for free. Any borrow taken that way must end before
//! the next mutating call, because growing or shrinking relocates the storage. The borrow checker
//! enforces this.

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;

mod error;

pub use error::*;
