//! Whole-file helpers over thin `libc` syscall wrappers.
//!
//! Every function here opens its own file descriptor, finishes its work and closes it again. There
//! is no handle to keep around: reading gives back the entire contents as a
//! [`Buffer`](crate::collections::contiguous::Buffer) and writing takes a complete byte slice.
//!
//! Errors are strongly typed. Each operation returns a union of the small error structs in this
//! module, so callers can match on exactly what went wrong. Errors that indicate a bug rather than
//! a condition of the environment, such as a corrupted file descriptor, panic instead.
#![cfg(target_os = "linux")]

mod error;
mod fd;
mod file;
mod panic;
mod syscall;

pub use error::*;
pub use file::*;

pub(crate) use fd::*;
