//! Small building blocks for programs that want to own their data structures: a growable buffer,
//! an open-addressing hash table, whole-file helpers and a tool for bundling C headers.
//!
//! # Collections
//! [`Buffer`](collections::contiguous::Buffer) is a contiguous growable array with two flavors of
//! insertion and removal, ordered and unordered, and a capacity policy that never drops below the
//! starting capacity it was created with.
//!
//! [`Table`](collections::hash::Table) is a map using linear probing over a flat array of slots.
//! Removed entries become tombstones, so lookups keep probing past them to entries that collided
//! with the removed one. The Table stores its slots in a Buffer.
//!
//! # Error Handling
//! Most operations can't fail in a way a caller could sensibly recover from, so they panic on
//! capacity overflow and abort on allocation failure. Where errors are returned, they are strongly
//! typed: structs (often ZSTs) implementing [`Error`](std::error::Error), combined into enums for
//! each operation so the possible failures are visible in the signature.
//!
//! # Dependencies
//! The [`fs`] module relies on `libc` for its thin syscall wrappers. Everything logs through the
//! `log` facade, which is silent unless the application installs a logger. This crate also depends
//! on some derive macros because they remove the need for some very repetitive programming.
//!
//! # Features
//! - `contiguous`: [`Buffer`](collections::contiguous::Buffer).
//! - `hash`: [`Table`](collections::hash::Table) and the [`Fnv1a`](collections::hash::Fnv1a)
//!   hasher.
//! - `fs`: Whole-file helpers, Linux only.
//! - `cli`: The `bricks` header bundling binary.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;
#[cfg(feature = "fs")]
pub mod fs;
#[cfg(feature = "contiguous")]
pub mod bundle;

pub(crate) mod util;
