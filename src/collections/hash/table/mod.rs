//! A module containing [`Table`] and associated types.
//!
//! Currently, the only other included types are for iteration, providing owned and borrowed
//! iteration over entries, keys or values in a table.
//!
//! As a note, there is no mutable iterator over keys because mutating the keys of a Table in place
//! would cause a logic error.
//!
//! [`Table`] is also re-exported under the parent module.

mod iter;
mod table;

pub use iter::*;
pub use table::*;
