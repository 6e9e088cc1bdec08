//! `linux/input.h`

use std::ffi::{c_char, c_void};

use libc::timeval;
use uoctl::{_IOC, _IOC_READ, Ioctl};

/// One record as read from an `evdev` file descriptor.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct input_event {
    pub time: timeval,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

/// Get device name.
pub const fn EVIOCGNAME(len: usize) -> Ioctl<*mut c_char> {
    _IOC(_IOC_READ, b'E', 0x06, len)
}

/// Get the capability bitmap of event type `ev`, or the supported event types if `ev` is 0.
pub const fn EVIOCGBIT(ev: u8, len: usize) -> Ioctl<*mut c_void> {
    _IOC(_IOC_READ, b'E', 0x20 + ev, len)
}
