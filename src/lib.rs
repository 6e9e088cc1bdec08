#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations)]

#[macro_use]
mod macros;

#[cfg(test)]
mod test;

mod admission;
pub mod bits;
mod config;
mod connection;
mod device;
mod dispatch;
mod error;
pub mod event;
mod mute;
mod pattern;
mod probe;
mod raw;
mod table;
mod util;

pub use admission::{
    Admission, AdmissionReport, admit_all, admit_all_with, admit_one, admit_one_with,
};
pub use config::{Config, DEFAULT_MAX_ERRORS};
pub use connection::{
    Connection, ConnectionList, ConnectionRegistry, EventSource, InputDevice, MAX_CONNECTIONS,
};
pub use device::Device;
pub use dispatch::{Dispatcher, EventHandler, KEYBOARD_SUFFIX, LockCheck, NAME_CAPACITY};
pub use error::{Fatal, RegisterError};
pub use mute::{MUTE_PRESSED, MUTE_RELEASED, MuteFilter, MuteOutcome};
pub use pattern::{DEFAULT_PATTERN, DevicePattern};
pub use probe::{Capabilities, probe};
pub use table::{Catalog, TranslationEntry};
