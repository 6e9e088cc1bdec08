use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    fs,
    hash::{BuildHasher, Hasher, RandomState},
    io,
    os::fd::RawFd,
    path::{Path, PathBuf},
};

use crate::{
    bits::BitSet,
    connection::{Connection, EventSource, InputDevice},
    event::{Code, EventType, InputEvent, RECORD_SIZE},
    probe::Capabilities,
};

/// A device with a fixed set of capabilities.
#[derive(Debug, Default)]
pub struct FakeCaps {
    types: BitSet<EventType>,
    codes: HashMap<EventType, BitSet<Code>>,
    root_fails: bool,
    failing: BitSet<EventType>,
}

impl FakeCaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, ty: EventType, code: u16) -> Self {
        self.types.insert(ty);
        self.codes.entry(ty).or_default().insert(Code::from_raw(code));
        self
    }

    pub fn failing_root(mut self) -> Self {
        self.root_fails = true;
        self
    }

    pub fn failing_type(mut self, ty: EventType) -> Self {
        self.failing.insert(ty);
        self
    }
}

impl Capabilities for FakeCaps {
    fn supported_events(&self) -> io::Result<BitSet<EventType>> {
        if self.root_fails {
            return Err(io::Error::from_raw_os_error(libc::ENOTTY));
        }
        Ok(self.types)
    }

    fn supported_codes(&self, ty: EventType) -> io::Result<BitSet<Code>> {
        if self.failing.contains(ty) {
            return Err(io::Error::from_raw_os_error(libc::EINVAL));
        }
        Ok(self.codes.get(&ty).copied().unwrap_or_default())
    }
}

/// The outcome of one scripted read.
#[derive(Debug, Clone, Copy)]
pub enum FakeRead {
    Event(InputEvent),
    /// A read returning only the first `n` bytes of a record.
    Short(usize),
    Eof,
    Errno(i32),
}

/// An event source replaying scripted reads. Reads past the script fail with `EAGAIN`.
#[derive(Debug, Default)]
pub struct FakeSource {
    reads: RefCell<VecDeque<FakeRead>>,
}

impl FakeSource {
    pub fn new(reads: impl IntoIterator<Item = FakeRead>) -> Self {
        Self {
            reads: RefCell::new(reads.into_iter().collect()),
        }
    }

    pub fn events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self::new(events.into_iter().map(FakeRead::Event))
    }
}

impl EventSource for FakeSource {
    fn read_raw(&self, buf: &mut [u8]) -> io::Result<usize> {
        assert_eq!(buf.len(), RECORD_SIZE);
        match self.reads.borrow_mut().pop_front() {
            Some(FakeRead::Event(ev)) => {
                buf.copy_from_slice(ev.as_bytes());
                Ok(RECORD_SIZE)
            }
            Some(FakeRead::Short(n)) => Ok(n),
            Some(FakeRead::Eof) => Ok(0),
            Some(FakeRead::Errno(errno)) => Err(io::Error::from_raw_os_error(errno)),
            None => Err(io::Error::from_raw_os_error(libc::EAGAIN)),
        }
    }
}

/// An opened device with fixed capabilities. Reads replay a [`FakeSource`].
#[derive(Debug)]
pub struct FakeDevice {
    fd: RawFd,
    path: PathBuf,
    name: Option<String>,
    caps: FakeCaps,
    source: FakeSource,
}

impl FakeDevice {
    /// Creates a device whose name query fails.
    pub fn new(fd: RawFd, path: &Path, caps: FakeCaps) -> Self {
        Self {
            fd,
            path: path.to_path_buf(),
            name: None,
            caps,
            source: FakeSource::default(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

impl Capabilities for FakeDevice {
    fn supported_events(&self) -> io::Result<BitSet<EventType>> {
        self.caps.supported_events()
    }

    fn supported_codes(&self, ty: EventType) -> io::Result<BitSet<Code>> {
        self.caps.supported_codes(ty)
    }
}

impl EventSource for FakeDevice {
    fn read_raw(&self, buf: &mut [u8]) -> io::Result<usize> {
        self.source.read_raw(buf)
    }
}

impl InputDevice for FakeDevice {
    fn fd(&self) -> RawFd {
        self.fd
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn name(&self) -> io::Result<String> {
        self.name
            .clone()
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENOTTY))
    }
}

pub fn fake_connection(fd: RawFd, path: &str, source: FakeSource) -> Connection {
    Connection::new(fd, PathBuf::from(path), "Fake Device".into(), Box::new(source))
}

/// A uniquely named directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new() -> io::Result<Self> {
        let hash = RandomState::new().build_hasher().finish();
        let path = std::env::temp_dir().join(format!("inputlayer-test-{hash:016x}"));
        fs::create_dir(&path)?;
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn touch(&self, name: &str) -> io::Result<PathBuf> {
        let path = self.0.join(name);
        fs::write(&path, b"")?;
        Ok(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.0) {
            log::warn!("failed to remove '{}': {e}", self.0.display());
        }
    }
}
