//! Reading input records and turning them into event names.

use std::{fmt, io, os::fd::RawFd};

use crate::{
    config::Config,
    connection::ConnectionRegistry,
    error::Fatal,
    event::{EventType, InputEvent, RECORD_SIZE},
    mute::{MuteFilter, MuteOutcome},
    table::Catalog,
};

/// Capacity of an event name, including a terminator.
///
/// The keyboard suffix is only appended if the tagged name still fits.
pub const NAME_CAPACITY: usize = 100;

/// Appended to event names coming from a connection that has reported scancodes.
pub const KEYBOARD_SUFFIX: &str = " K";

/// Receives the names of classified events.
pub trait EventHandler {
    fn handle(&mut self, event: &str);
}

impl<F: FnMut(&str)> EventHandler for F {
    fn handle(&mut self, event: &str) {
        self(event)
    }
}

/// Reports whether event processing is currently suspended (eg. by a lock file).
pub trait LockCheck {
    fn is_locked(&self) -> bool;
}

impl<F: Fn() -> bool> LockCheck for F {
    fn is_locked(&self) -> bool {
        self()
    }
}

/// Reads records from registered connections, classifies them, and forwards the results to an
/// [`EventHandler`].
///
/// One [`Dispatcher`] serves all connections: the mute filter and the read error counter are
/// shared between devices.
pub struct Dispatcher<'c, H, L> {
    catalog: &'c Catalog,
    mute: Option<MuteFilter>,
    errors: u32,
    max_errors: u32,
    log_events: bool,
    handler: H,
    lock: L,
}

impl<H, L> fmt::Debug for Dispatcher<'_, H, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("catalog", &format_args!("<{} rows>", self.catalog.len()))
            .field("mute", &self.mute)
            .field("errors", &self.errors)
            .field("max_errors", &self.max_errors)
            .field("log_events", &self.log_events)
            .finish_non_exhaustive()
    }
}

impl<'c, H: EventHandler, L: LockCheck> Dispatcher<'c, H, L> {
    pub fn new(config: &Config, catalog: &'c Catalog, handler: H, lock: L) -> Self {
        Self {
            catalog,
            mute: config.mute_filter().then(MuteFilter::new),
            errors: 0,
            max_errors: config.max_errors(),
            log_events: config.event_logging(),
            handler,
            lock,
        }
    }

    /// Returns the number of read errors seen so far.
    ///
    /// The count is never reset.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Reads and handles one record from the connection registered under `fd`.
    ///
    /// Meant to be called when `fd` is reported readable. A removed device is deregistered;
    /// malformed reads and records that don't classify are dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`Fatal`] error when the connection reaches end-of-file, or when the read error
    /// budget is exhausted. The caller should shut down.
    pub fn process<R: ConnectionRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        fd: RawFd,
    ) -> Result<(), Fatal> {
        let Some(conn) = registry.find_by_fd(fd) else {
            log::warn!("no input layer connection registered for fd {fd}");
            return Ok(());
        };

        let mut event = InputEvent::zeroed();
        let res = loop {
            match conn.read_raw(event.as_bytes_mut()) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                res => break res,
            }
        };

        match res {
            Ok(0) => {
                log::warn!("input layer connection {} closed", conn.path().display());
                return Err(Fatal::SourceClosed {
                    path: conn.path().to_path_buf(),
                });
            }
            Ok(RECORD_SIZE) => {}
            Ok(len) => {
                log::warn!("input layer unexpected length {len}, expected {RECORD_SIZE}");
                return Ok(());
            }
            Err(e) if e.raw_os_error() == Some(libc::ENODEV) => {
                log::warn!(
                    "input layer {} ({}) disconnected, fd {fd}",
                    conn.path().display(),
                    conn.name(),
                );
                registry.deregister(fd);
                return Ok(());
            }
            Err(e) => {
                self.errors = self.errors.saturating_add(1);
                if self.errors > self.max_errors {
                    log::error!("too many errors reading input layer, giving up");
                    return Err(Fatal::TooManyErrors {
                        count: self.errors,
                        last: e,
                    });
                }
                log::error!(
                    "input layer read error on {}: {e} ({} of {} tolerated)",
                    conn.path().display(),
                    self.errors,
                    self.max_errors,
                );
                return Ok(());
            }
        }

        let triple = event.triple();
        if triple.ty == EventType::SYN {
            log::trace!("Input Layer: Sync");
        } else {
            log::trace!(
                "Input Layer: Type: {}  Code: {}  Value: {}",
                triple.ty.raw(),
                triple.code,
                triple.value,
            );
        }

        if triple.is_scancode() {
            conn.keyboard = true;
        }
        let keyboard = conn.keyboard;

        let name = match &mut self.mute {
            Some(mute) => match mute.filter(triple) {
                Some(MuteOutcome::Emit(name)) => Some(name),
                Some(MuteOutcome::Suppress) => return Ok(()),
                None => self.catalog.lookup(triple),
            },
            None => self.catalog.lookup(triple),
        };
        let Some(name) = name else {
            return Ok(());
        };

        let mut name = String::from(name);
        if keyboard && name.len() < NAME_CAPACITY - KEYBOARD_SUFFIX.len() {
            name.push_str(KEYBOARD_SUFFIX);
        }

        if self.lock.is_locked() {
            if self.log_events {
                log::info!("lockfile present, not processing input layer event \"{name}\"");
            }
            return Ok(());
        }

        if self.log_events {
            log::info!("received input layer event \"{name}\"");
        }
        self.handler.handle(&name);
        if self.log_events {
            log::info!("completed input layer event \"{name}\"");
        }
        Ok(())
    }
}
