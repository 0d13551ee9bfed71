use derive_more::{Display, Error, From};
use libc::c_int;

/// The file couldn't be opened or created. Holds the OS error code reported by `open`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("unable to open or create file (os error {_0})")]
pub struct UnableToOpenError(#[error(not(source))] pub c_int);

/// Memory for the file's contents couldn't be allocated.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("out of memory")]
pub struct OOMError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("error during I/O")]
pub struct IOError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("available storage space exhausted")]
pub struct StorageExhaustedError;

/// The file couldn't be removed. Holds the OS error code reported by `unlink`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("unable to remove file (os error {_0})")]
pub struct RemoveFailedError(#[error(not(source))] pub c_int);

/// An error returned by [`read`](super::read).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, From, Error)]
pub enum ReadError {
    UnableToOpen(UnableToOpenError),
    OOM(OOMError),
    IO(IOError),
}

/// An error returned by [`write`](super::write) or [`append`](super::append).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, From, Error)]
pub enum WriteError {
    UnableToOpen(UnableToOpenError),
    IO(IOError),
    StorageExhausted(StorageExhaustedError),
}
