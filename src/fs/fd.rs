use std::ffi::CStr;
use std::mem::{self, MaybeUninit};

use libc::{c_int, c_uint, mode_t};
use log::warn;

use crate::fs::error::{IOError, OOMError, ReadError, StorageExhaustedError, UnableToOpenError, WriteError};
use crate::fs::panic::{BadFdPanic, Panic, UnexpectedErrorPanic};
use crate::fs::syscall;

/// An owned file descriptor, closed when dropped.
#[derive(Debug)]
pub(crate) struct Fd(pub c_int);

impl Fd {
    pub fn open(path: &CStr, flags: c_int, mode: mode_t) -> Result<Fd, UnableToOpenError> {
        loop {
            // SAFETY: path is a valid nul-terminated string which outlives the call.
            let fd = unsafe { libc::open(path.as_ptr(), flags | libc::O_CLOEXEC, mode as c_uint) };
            if fd != -1 {
                return Ok(Fd(fd));
            }
            match syscall::err_no() {
                libc::EINTR => warn!("open interrupted by signal, retrying"),
                e => Err(UnableToOpenError(e))?,
            }
        }
    }

    /// Returns the size reported by `fstat`. Some files (pipes, procfs entries) report zero, so
    /// this is only a hint for sizing reads.
    pub fn size(&self) -> Result<usize, ReadError> {
        let mut raw_meta: MaybeUninit<libc::stat> = MaybeUninit::uninit();
        // SAFETY: raw_meta is valid for writes of a stat struct.
        if unsafe { libc::fstat(self.0, raw_meta.as_mut_ptr()) } == -1 {
            match syscall::err_no() {
                libc::EBADF => BadFdPanic.panic(),
                libc::ENOMEM => Err(OOMError)?,
                libc::EIO | libc::EOVERFLOW => Err(IOError)?,
                e => UnexpectedErrorPanic(e).panic(),
            }
        }
        // SAFETY: fstat either initializes raw_meta or returns an error and diverges.
        let raw = unsafe { raw_meta.assume_init() };
        Ok(usize::try_from(raw.st_size).unwrap_or(0))
    }

    /// Reads into `buf`, returning the number of bytes read. Zero means end of file.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, IOError> {
        loop {
            // SAFETY: buf is valid for writes of buf.len() bytes.
            let count = unsafe { libc::read(self.0, buf.as_mut_ptr().cast(), buf.len()) };
            if let Ok(count) = usize::try_from(count) {
                return Ok(count);
            }
            match syscall::err_no() {
                libc::EINTR => warn!("read interrupted by signal, retrying"),
                libc::EBADF => BadFdPanic.panic(),
                libc::EIO | libc::EISDIR | libc::EINVAL | libc::EAGAIN => Err(IOError)?,
                e => UnexpectedErrorPanic(e).panic(),
            }
        }
    }

    pub fn write_all(&self, mut bytes: &[u8]) -> Result<(), WriteError> {
        while !bytes.is_empty() {
            // SAFETY: bytes is valid for reads of bytes.len() bytes.
            let count = unsafe { libc::write(self.0, bytes.as_ptr().cast(), bytes.len()) };
            match usize::try_from(count) {
                Ok(0) => Err(IOError)?,
                Ok(count) => bytes = &bytes[count..],
                Err(_) => match syscall::err_no() {
                    libc::EINTR => warn!("write interrupted by signal, retrying"),
                    libc::EBADF => BadFdPanic.panic(),
                    libc::ENOSPC | libc::EDQUOT | libc::EFBIG => Err(StorageExhaustedError)?,
                    libc::EIO | libc::EPIPE | libc::EINVAL | libc::EAGAIN => Err(IOError)?,
                    e => UnexpectedErrorPanic(e).panic(),
                },
            }
        }
        Ok(())
    }

    /// Closes the file descriptor, reporting errors that would otherwise be lost on drop. Delayed
    /// write errors often only surface here.
    pub fn close(self) -> Result<(), WriteError> {
        let fd = self.0;
        mem::forget(self);
        // SAFETY: self has been forgotten, so fd isn't closed a second time.
        if unsafe { libc::close(fd) } == -1 {
            match syscall::err_no() {
                libc::EBADF => BadFdPanic.panic(),
                // Linux releases the descriptor even when interrupted.
                libc::EINTR => warn!("close interrupted by signal"),
                libc::EIO => Err(IOError)?,
                libc::ENOSPC | libc::EDQUOT => Err(StorageExhaustedError)?,
                e => UnexpectedErrorPanic(e).panic(),
            }
        }
        Ok(())
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // SAFETY: After this, the file descriptor is invalidated but we are dropping self so it
        // doesn't matter.
        if unsafe { libc::close(self.0) } == -1 {
            warn!("error while dropping file descriptor {}: {}", self.0, match syscall::err_no() {
                libc::EBADF => BadFdPanic.to_string(),
                libc::EIO => IOError.to_string(),
                libc::ENOSPC | libc::EDQUOT => StorageExhaustedError.to_string(),
                e => UnexpectedErrorPanic(e).to_string(),
            });
        }
    }
}
