#![warn(missing_docs)]

#[cfg(test)]
pub mod alloc;
#[cfg(feature = "hash")]
pub mod fmt;
#[cfg(test)]
pub mod hash;
pub mod panic;
#[cfg(feature = "hash")]
pub mod result;
