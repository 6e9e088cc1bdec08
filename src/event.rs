//! Input records and their classification key.
//!
//! Every read from an input device yields one [`InputEvent`], the kernel's `struct input_event`.
//! Classification only looks at its [`EventTriple`]: the event type, the event code and the
//! value. The timestamp is carried along but never inspected.

pub(crate) mod codes;

use std::{fmt, slice};

use crate::raw::input::input_event;

pub use codes::{Code, EventType, Key, Misc, Switch};

/// Size in bytes of one input record, as the kernel delivers it.
pub const RECORD_SIZE: usize = size_of::<InputEvent>();

/// An input record read from an *evdev* file descriptor.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct InputEvent(input_event);

impl InputEvent {
    /// Creates an [`InputEvent`] from raw values, with a zero timestamp.
    #[inline]
    pub const fn new(ty: EventType, raw_code: u16, raw_value: i32) -> Self {
        Self(input_event {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_: ty.0,
            code: raw_code,
            value: raw_value,
        })
    }

    /// Creates an [`InputEvent`] with all fields zeroed out, to be filled by a read.
    #[inline]
    pub const fn zeroed() -> Self {
        Self::new(EventType::SYN, 0, 0)
    }

    #[inline]
    pub fn event_type(&self) -> EventType {
        EventType(self.0.type_)
    }

    #[inline]
    pub fn raw_code(&self) -> u16 {
        self.0.code
    }

    #[inline]
    pub fn raw_value(&self) -> i32 {
        self.0.value
    }

    /// Returns the classification key of this record.
    #[inline]
    pub fn triple(&self) -> EventTriple {
        EventTriple::new(self.event_type(), self.raw_code(), self.raw_value())
    }

    /// Returns the in-memory representation of the record, as the kernel would deliver it.
    pub fn as_bytes(&self) -> &[u8] {
        // Safety: `input_event` has no padding (tested in `raw::input`), so every byte is
        // initialized.
        unsafe { slice::from_raw_parts((&raw const self.0).cast::<u8>(), RECORD_SIZE) }
    }

    /// Returns the record as a mutable byte buffer for `read(2)` to fill in.
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        // Safety: as above; additionally every bit pattern is a valid `input_event`.
        unsafe { slice::from_raw_parts_mut((&raw mut self.0).cast::<u8>(), RECORD_SIZE) }
    }
}

impl fmt::Debug for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputEvent")
            .field("type", &self.event_type())
            .field("code", &self.raw_code())
            .field("value", &self.raw_value())
            .finish()
    }
}

/// The `(type, code, value)` key used to classify an input record.
///
/// Ordering is lexicographic over the three fields, in that order. The catalog relies on this to
/// binary-search by the full triple and by its `(type, code)` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventTriple {
    pub ty: EventType,
    pub code: u16,
    pub value: i32,
}

impl EventTriple {
    #[inline]
    pub const fn new(ty: EventType, code: u16, value: i32) -> Self {
        Self { ty, code, value }
    }

    /// Whether this is a scancode report (`EV_MSC`/`MSC_SCAN`), which only keyboards send.
    #[inline]
    pub fn is_scancode(&self) -> bool {
        self.ty == EventType::MSC && self.code == Misc::SCAN.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_roundtrip() {
        let event = InputEvent::new(EventType::KEY, Key::KEY_POWER.raw(), 1);
        let mut copy = InputEvent::zeroed();
        copy.as_bytes_mut().copy_from_slice(event.as_bytes());
        assert_eq!(copy.triple(), EventTriple::new(EventType::KEY, 116, 1));
    }

    #[test]
    fn triple_order() {
        let a = EventTriple::new(EventType::KEY, 114, 2);
        let b = EventTriple::new(EventType::KEY, 115, 1);
        let c = EventTriple::new(EventType::SW, 0, 0);
        assert!(a < b);
        assert!(b < c);
        assert!(EventTriple::new(EventType::KEY, 114, 1) < a);
    }

    #[test]
    fn scancode() {
        assert!(EventTriple::new(EventType::MSC, 4, 30).is_scancode());
        assert!(!EventTriple::new(EventType::MSC, 5, 30).is_scancode());
        assert!(!EventTriple::new(EventType::KEY, 4, 1).is_scancode());
    }
}
