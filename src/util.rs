use std::{io, os::fd::RawFd, time::Duration};

/// Uses `poll(2)` to wait until at least one of `fds` is readable, or `timeout` elapses.
///
/// Returns the readable descriptors, in the order given. A `None` timeout blocks indefinitely. A
/// wait interrupted by a signal returns no descriptors.
pub fn poll_readable(fds: &[RawFd], timeout: Option<Duration>) -> io::Result<Vec<RawFd>> {
    let mut polls: Vec<_> = fds
        .iter()
        .map(|&fd| libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        })
        .collect();
    let timeout = match timeout {
        Some(t) => t.as_millis().try_into().unwrap_or(libc::c_int::MAX),
        None => -1,
    };

    let ret = unsafe { libc::poll(polls.as_mut_ptr(), polls.len() as libc::nfds_t, timeout) };
    if ret == -1 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(Vec::new());
        }
        return Err(err);
    }

    // `POLLHUP` and `POLLERR` are reported as readable too: the following read surfaces the error
    // (eg. `ENODEV` for an unplugged device).
    Ok(polls
        .iter()
        .filter(|p| p.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0)
        .map(|p| p.fd)
        .collect())
}
