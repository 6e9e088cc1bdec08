use std::{
    error::Error,
    ffi::{c_char, c_int, c_void},
    fmt,
    fs::File,
    io::{self, Read as _},
    os::{
        fd::{AsFd, AsRawFd, BorrowedFd, IntoRawFd, RawFd},
        unix::fs::OpenOptionsExt as _,
    },
    path::{Path, PathBuf},
};

use uoctl::Ioctl;

use crate::{
    bits::{BitSet, BitValue, Word},
    connection::{EventSource, InputDevice},
    event::{Code, EventType},
    probe::Capabilities,
    raw::input::{EVIOCGBIT, EVIOCGNAME},
};

/// A handle to an open *event device*.
///
/// The handle is opened read-only and non-blocking; reads are only attempted once an outer poll
/// loop reports the descriptor as readable. The descriptor is closed when the [`Device`] is
/// dropped.
#[derive(Debug)]
pub struct Device {
    file: File,
    path: PathBuf,
}

impl AsFd for Device {
    #[inline]
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl AsRawFd for Device {
    #[inline]
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl IntoRawFd for Device {
    #[inline]
    fn into_raw_fd(self) -> RawFd {
        self.file.into_raw_fd()
    }
}

impl Device {
    /// Opens an input device file.
    ///
    /// The descriptor is non-blocking and close-on-exec, so that commands run by the event handler
    /// do not inherit it.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::options()
            .read(true)
            .custom_flags(libc::O_NONBLOCK | libc::O_CLOEXEC)
            .open(path)
            .map_err(|e| {
                io::Error::new(e.kind(), format!("failed to open '{}': {e}", path.display()))
            })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Returns the path this [`Device`] was opened from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Executes `ioctl` and adds context to the error.
    unsafe fn ioctl<T>(&self, name: &'static str, ioctl: Ioctl<T>, arg: T) -> io::Result<c_int> {
        match unsafe { ioctl.ioctl(self, arg) } {
            Ok(ok) => Ok(ok),
            Err(e) => {
                #[derive(Debug)]
                struct WrappedError {
                    cause: io::Error,
                    msg: String,
                }

                impl fmt::Display for WrappedError {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str(&self.msg)
                    }
                }
                impl Error for WrappedError {
                    fn source(&self) -> Option<&(dyn Error + 'static)> {
                        Some(&self.cause)
                    }
                }

                let msg = format!(
                    "ioctl {name} failed for device {} ({:?})",
                    self.path().display(),
                    e.kind()
                );
                Err(io::Error::new(e.kind(), WrappedError { cause: e, msg }))
            }
        }
    }

    unsafe fn fetch_string(
        &self,
        ioctl_name: &'static str,
        ioctl: fn(usize) -> Ioctl<*mut c_char>,
    ) -> io::Result<String> {
        // The ioctl returns the number of bytes copied, which is the buffer length if the string
        // was cut off. Grow the buffer until it isn't.
        const INITIAL_LEN: usize = 64;
        let mut buf = vec![0_u8; INITIAL_LEN];
        let len = loop {
            let len = unsafe {
                self.ioctl(
                    ioctl_name,
                    ioctl(buf.len()),
                    buf.as_mut_ptr() as *mut c_char,
                )?
            };
            if len as usize == buf.len() {
                buf.resize(buf.len() * 2, 0);
            } else {
                break len;
            }
        };

        // `len` includes the trailing 0 byte
        buf.truncate(len.saturating_sub(1) as usize);

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    unsafe fn fetch_bits<V: BitValue>(
        &self,
        ioctl_name: &'static str,
        ioctl: impl FnOnce(usize) -> Ioctl<*mut c_void>,
    ) -> io::Result<BitSet<V>> {
        let mut set = BitSet::<V>::new();
        let words = set.words_mut();
        unsafe {
            self.ioctl(
                ioctl_name,
                ioctl(words.len() * size_of::<Word>()),
                words.as_mut_ptr().cast(),
            )?;
        }
        Ok(set)
    }

    /// Fetches the device name.
    #[doc(alias = "EVIOCGNAME")]
    pub fn name(&self) -> io::Result<String> {
        unsafe { self.fetch_string("EVIOCGNAME", EVIOCGNAME) }
    }

    /// Returns the set of supported [`EventType`]s (the root capability bitmap).
    #[doc(alias = "EVIOCGBIT")]
    pub fn supported_events(&self) -> io::Result<BitSet<EventType>> {
        unsafe { self.fetch_bits("EVIOCGBIT", |len| EVIOCGBIT(0, len)) }
    }

    /// Returns the set of codes the device can report for event type `ty`.
    pub fn supported_codes(&self, ty: EventType) -> io::Result<BitSet<Code>> {
        if ty > <EventType as BitValue>::MAX {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("event type {ty:?} has no capability bitmap"),
            ));
        }
        let ev = ty.raw() as u8;
        unsafe { self.fetch_bits("EVIOCGBIT", |len| EVIOCGBIT(ev, len)) }
    }
}

impl Capabilities for Device {
    fn supported_events(&self) -> io::Result<BitSet<EventType>> {
        Device::supported_events(self)
    }

    fn supported_codes(&self, ty: EventType) -> io::Result<BitSet<Code>> {
        Device::supported_codes(self, ty)
    }
}

impl InputDevice for Device {
    fn fd(&self) -> RawFd {
        self.as_raw_fd()
    }

    fn path(&self) -> &Path {
        Device::path(self)
    }

    fn name(&self) -> io::Result<String> {
        Device::name(self)
    }
}

impl EventSource for Device {
    fn read_raw(&self, buf: &mut [u8]) -> io::Result<usize> {
        (&self.file).read(buf)
    }
}
