//! Best-effort process memory locking.
//!
//! Locks the whole address space so secret material fetched from the
//! store is never paged to swap. Uses `mlockall` on Unix; platforms
//! without the facility report an unsupported error and the caller
//! degrades to a warning.

/// Lock current and future pages of the process address space.
///
/// Typically requires elevated privileges or a raised `RLIMIT_MEMLOCK`.
#[cfg(unix)]
pub fn lock_process_memory() -> std::io::Result<()> {
    // safety: mlockall takes no pointers and only affects this process.
    let res = unsafe { libc::mlockall(libc::MCL_CURRENT | libc::MCL_FUTURE) };
    if res != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn lock_process_memory() -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "memory locking is not supported on this platform",
    ))
}
