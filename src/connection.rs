//! Open event sources and the registry that tracks them.

use std::{
    fmt, io,
    os::fd::RawFd,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{error::RegisterError, probe::Capabilities, util::poll_readable};

/// Something input records can be read from.
///
/// Implemented by [`Device`][crate::Device]; the dispatcher reads exactly one record per call.
pub trait EventSource: fmt::Debug {
    /// Reads up to `buf.len()` bytes without blocking.
    fn read_raw(&self, buf: &mut [u8]) -> io::Result<usize>;
}

/// An opened device that can be probed and turned into a [`Connection`].
pub trait InputDevice: Capabilities + EventSource + 'static {
    /// The descriptor the outer poll loop waits on.
    fn fd(&self) -> RawFd;

    fn path(&self) -> &Path;

    /// Queries the device name.
    fn name(&self) -> io::Result<String>;
}

/// An admitted input device.
#[derive(Debug)]
pub struct Connection {
    fd: RawFd,
    path: PathBuf,
    name: String,
    /// Set once a scancode has been seen on this connection.
    pub keyboard: bool,
    source: Box<dyn EventSource>,
}

impl Connection {
    /// Creates a connection reading from `source`, which is registered under `fd`.
    pub fn new(fd: RawFd, path: PathBuf, name: String, source: Box<dyn EventSource>) -> Self {
        Self {
            fd,
            path,
            name,
            keyboard: false,
            source,
        }
    }

    /// Creates a connection for an opened device, named `name`.
    pub fn from_device<D: InputDevice>(device: D, name: String) -> Self {
        let fd = device.fd();
        let path = device.path().to_path_buf();
        Self::new(fd, path, name, Box::new(device))
    }

    #[inline]
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The device name reported by the kernel, or `"Unknown"`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn read_raw(&self, buf: &mut [u8]) -> io::Result<usize> {
        self.source.read_raw(buf)
    }
}

/// The set of open connections.
pub trait ConnectionRegistry {
    fn find_by_fd(&mut self, fd: RawFd) -> Option<&mut Connection>;

    fn find_by_path(&self, path: &Path) -> Option<&Connection>;

    /// Adds `conn`. On failure the connection is dropped, closing its descriptor.
    fn register(&mut self, conn: Connection) -> Result<(), RegisterError>;

    /// Removes and returns the connection registered under `fd`.
    fn deregister(&mut self, fd: RawFd) -> Option<Connection>;
}

/// Maximum number of connections a [`ConnectionList`] holds.
pub const MAX_CONNECTIONS: usize = 20;

/// A bounded [`ConnectionRegistry`] backed by a `Vec`.
#[derive(Debug)]
pub struct ConnectionList {
    conns: Vec<Connection>,
    limit: usize,
}

impl Default for ConnectionList {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionList {
    pub fn new() -> Self {
        Self::with_limit(MAX_CONNECTIONS)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            conns: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.conns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }

    /// Returns the registered descriptors, for building a poll set.
    pub fn fds(&self) -> impl Iterator<Item = RawFd> + '_ {
        self.conns.iter().map(|c| c.fd)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.conns.iter()
    }

    /// Blocks until some registered descriptors are readable, or `timeout` elapses.
    ///
    /// Returns the readable descriptors, which can then be passed to
    /// [`Dispatcher::process`][crate::Dispatcher::process]. Returns an empty list on timeout or
    /// when interrupted by a signal.
    pub fn wait_readable(&self, timeout: Option<Duration>) -> io::Result<Vec<RawFd>> {
        let fds: Vec<_> = self.fds().collect();
        poll_readable(&fds, timeout)
    }
}

impl ConnectionRegistry for ConnectionList {
    fn find_by_fd(&mut self, fd: RawFd) -> Option<&mut Connection> {
        self.conns.iter_mut().find(|c| c.fd == fd)
    }

    fn find_by_path(&self, path: &Path) -> Option<&Connection> {
        self.conns.iter().find(|c| c.path == path)
    }

    fn register(&mut self, conn: Connection) -> Result<(), RegisterError> {
        if self.conns.len() >= self.limit {
            return Err(RegisterError::Full { limit: self.limit });
        }
        if self.conns.iter().any(|c| c.fd == conn.fd) {
            return Err(RegisterError::Duplicate { fd: conn.fd });
        }
        self.conns.push(conn);
        Ok(())
    }

    fn deregister(&mut self, fd: RawFd) -> Option<Connection> {
        let pos = self.conns.iter().position(|c| c.fd == fd)?;
        Some(self.conns.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use crate::test::{FakeSource, fake_connection};

    use super::*;

    #[test]
    fn register_and_find() {
        let mut list = ConnectionList::new();
        list.register(fake_connection(3, "/dev/input/event3", FakeSource::default()))
            .unwrap();
        list.register(fake_connection(4, "/dev/input/event4", FakeSource::default()))
            .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.fds().collect::<Vec<_>>(), [3, 4]);
        assert!(list.find_by_path(Path::new("/dev/input/event4")).is_some());
        assert!(list.find_by_path(Path::new("/dev/input/event5")).is_none());

        let conn = list.find_by_fd(3).unwrap();
        assert!(!conn.keyboard);
        assert_eq!(conn.name(), "Fake Device");
        conn.keyboard = true;
        assert!(list.find_by_fd(3).unwrap().keyboard);
    }

    #[test]
    fn deregister() {
        let mut list = ConnectionList::new();
        list.register(fake_connection(3, "/dev/input/event3", FakeSource::default()))
            .unwrap();
        let conn = list.deregister(3).unwrap();
        assert_eq!(conn.path(), Path::new("/dev/input/event3"));
        assert!(list.is_empty());
        assert!(list.deregister(3).is_none());
    }

    #[test]
    fn limit() {
        let mut list = ConnectionList::with_limit(1);
        list.register(fake_connection(3, "/dev/input/event3", FakeSource::default()))
            .unwrap();
        let err = list
            .register(fake_connection(4, "/dev/input/event4", FakeSource::default()))
            .unwrap_err();
        assert_eq!(err, RegisterError::Full { limit: 1 });
    }

    #[test]
    fn duplicate_fd() {
        let mut list = ConnectionList::new();
        list.register(fake_connection(3, "/dev/input/event3", FakeSource::default()))
            .unwrap();
        let err = list
            .register(fake_connection(3, "/dev/input/event9", FakeSource::default()))
            .unwrap_err();
        assert_eq!(err, RegisterError::Duplicate { fd: 3 });
    }
}
