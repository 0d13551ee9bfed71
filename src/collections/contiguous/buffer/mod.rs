//! A module containing [`Buffer`] and associated types.
//!
//! The only other public type is [`IntoIter`] for owned iteration. [`Iter`](std::slice::Iter) and
//! [`IterMut`](std::slice::IterMut) from [`std::slice`] are used for borrowed iteration.
//!
//! [`Buffer`] is also re-exported under the parent module.

mod buffer;
mod iter;
pub(crate) mod raw;
mod tests;

pub use buffer::*;
pub use iter::*;
