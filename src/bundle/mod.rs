//! Merging a C header and its implementation file into a single-header library.
//!
//! The bundled header declares the interface as usual. The implementation is included only in the
//! one translation unit that defines the chosen macro before including the header.
#![warn(missing_docs)]

mod bundle;
mod tests;

pub use bundle::*;
