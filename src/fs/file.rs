use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use libc::{c_int, mode_t};
use log::debug;

use crate::collections::contiguous::Buffer;
use crate::fs::error::*;
use crate::fs::syscall;
use crate::fs::Fd;

/// Permission bits requested for newly created files, before the process umask is applied.
pub const DEFAULT_FILE_MODE: mode_t = 0o666;

const CHUNK_SIZE: usize = 8 * 1024;

/// How bytes are transferred to and from a file.
///
/// Unix doesn't distinguish text from binary files, so both modes transfer bytes verbatim. The
/// mode is still recorded in the logs, making it clear what a caller intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferMode {
    #[default]
    Text,
    Binary,
}

/// Reads the entire contents of the file at `path`.
///
/// The returned Buffer is sized from the file's reported length up front, so reading a regular
/// file only allocates once. Files that report no length, such as pipes, are still read to the
/// end.
///
/// # Errors
/// - [`UnableToOpenError`]: The file doesn't exist, isn't readable or `path` contains a nul byte.
/// - [`OOMError`]: A Buffer big enough for the file couldn't be allocated.
/// - [`IOError`]: Reading failed part way, or `path` names a directory.
///
/// # Examples
/// ```
/// # use bricks::fs::{self, ReadError};
/// let missing = fs::read("/this/path/does/not/exist");
/// assert!(matches!(missing, Err(ReadError::UnableToOpen(_))));
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> Result<Buffer<u8>, ReadError> {
    let path = path.as_ref();
    debug!("reading {}", path.display());

    let fd = Fd::open(&c_path(path)?, libc::O_RDONLY, 0)?;
    let size = fd.size()?;
    let mut contents = Buffer::try_with_start_cap(size.max(1)).map_err(|_| OOMError)?;

    let mut chunk = [0_u8; CHUNK_SIZE];
    loop {
        match fd.read(&mut chunk)? {
            0 => break,
            count => contents.push_array(chunk[..count].iter().copied()),
        }
    }

    debug!("read {} bytes from {}", contents.len(), path.display());
    Ok(contents)
}

/// Writes `bytes` to the file at `path`, creating it if it's missing and truncating it otherwise.
///
/// # Errors
/// - [`UnableToOpenError`]: The file couldn't be opened or created for writing.
/// - [`StorageExhaustedError`]: The device or quota ran out of space.
/// - [`IOError`]: Writing or closing the file failed.
pub fn write<P: AsRef<Path>>(path: P, bytes: &[u8], mode: TransferMode) -> Result<(), WriteError> {
    let path = path.as_ref();
    debug!("writing {} bytes to {} as {mode:?}", bytes.len(), path.display());
    transfer(path, bytes, libc::O_TRUNC)
}

/// Writes `bytes` to the end of the file at `path`, creating it if it's missing.
///
/// # Errors
/// See [`write`].
pub fn append<P: AsRef<Path>>(path: P, bytes: &[u8], mode: TransferMode) -> Result<(), WriteError> {
    let path = path.as_ref();
    debug!("appending {} bytes to {} as {mode:?}", bytes.len(), path.display());
    transfer(path, bytes, libc::O_APPEND)
}

fn transfer(path: &Path, bytes: &[u8], flags: c_int) -> Result<(), WriteError> {
    let fd = Fd::open(
        &c_path(path)?,
        libc::O_WRONLY | libc::O_CREAT | flags,
        DEFAULT_FILE_MODE,
    )?;
    fd.write_all(bytes)?;
    fd.close()
}

/// Creates an empty file at `path`, truncating any existing file.
///
/// # Errors
/// Returns [`UnableToOpenError`] if the file can't be created.
pub fn create<P: AsRef<Path>>(path: P) -> Result<(), UnableToOpenError> {
    let path = path.as_ref();
    debug!("creating {}", path.display());
    Fd::open(
        &c_path(path)?,
        libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
        DEFAULT_FILE_MODE,
    )?;
    Ok(())
}

/// Removes the file at `path`.
///
/// # Errors
/// Returns [`RemoveFailedError`] if the file doesn't exist or can't be unlinked.
pub fn remove<P: AsRef<Path>>(path: P) -> Result<(), RemoveFailedError> {
    let path = path.as_ref();
    debug!("removing {}", path.display());
    let c_path = c_path(path).map_err(|UnableToOpenError(e)| RemoveFailedError(e))?;
    // SAFETY: c_path is a valid nul-terminated string which outlives the call.
    if unsafe { libc::unlink(c_path.as_ptr()) } == -1 {
        Err(RemoveFailedError(syscall::err_no()))?
    }
    Ok(())
}

/// Returns true if something exists at `path`. Broken symlinks don't count as existing.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    let Ok(c_path) = c_path(path.as_ref()) else {
        return false;
    };
    // SAFETY: c_path is a valid nul-terminated string which outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::F_OK) == 0 }
}

fn c_path(path: &Path) -> Result<CString, UnableToOpenError> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| UnableToOpenError(libc::EINVAL))
}
