//! Event types and the event codes the built-in catalog refers to.
//!
//! Values are taken from `linux/input-event-codes.h`. Only the subset this crate classifies is
//! named; any other raw value can still be represented via `from_raw`.

use std::fmt;

ffi_enum! {
    /// Types of [`InputEvent`][crate::event::InputEvent]s.
    pub enum EventType: u16 {
        /// Synchronization event.
        SYN = 0x00,
        /// A key press, release, or repeat.
        KEY = 0x01,
        /// A relative axis movement.
        REL = 0x02,
        /// An absolute axis change.
        ABS = 0x03,
        /// A miscellaneous event, such as a scancode report.
        MSC = 0x04,
        /// A switch changed state.
        SW  = 0x05,
        LED = 0x11,
        SND = 0x12,
        REP = 0x14,
        FF  = 0x15,
        PWR = 0x16,
        FF_STATUS = 0x17,
    }
}
impl EventType {
    const MAX: Self = Self(0x1f);
}
bitvalue!(EventType);

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "EV_{name}"),
            None => write!(f, "EventType({:#x})", self.0),
        }
    }
}

impl EventType {
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }
}

/// A raw event code of any [`EventType`].
///
/// Used as the element type of the per-type capability bitmaps. Its range covers the largest code
/// space (`KEY_MAX`), so a single bitmap type can hold the codes of every event type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Code(pub(crate) u16);

impl Code {
    pub const MAX: Self = Self(Key::MAX.0);

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }
}
bitvalue!(Code);

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

ffi_enum! {
    /// An *evdev* key or button identifier; the code of `EV_KEY` events.
    ///
    /// Some constants alias each other (for example [`Key::KEY_SCREENLOCK`] and
    /// [`Key::KEY_COFFEE`]) and compare equal.
    pub enum Key: u16 {
        KEY_RESERVED     = 0,
        KEY_KPENTER      = 96,
        KEY_UP           = 103,
        KEY_LEFT         = 105,
        KEY_RIGHT        = 106,
        KEY_DOWN         = 108,
        KEY_MUTE         = 113,
        KEY_VOLUMEDOWN   = 114,
        KEY_VOLUMEUP     = 115,
        KEY_POWER        = 116,
        KEY_COPY         = 133,
        KEY_MENU         = 139,
        KEY_SLEEP        = 142,
        KEY_PROG1        = 148,
        KEY_COFFEE       = 152,
        KEY_SCREENLOCK   = Self::KEY_COFFEE.0,
        KEY_BACK         = 158,
        KEY_EJECTCD      = 161,
        KEY_EJECTCLOSECD = 162,
        KEY_NEXTSONG     = 163,
        KEY_PLAYPAUSE    = 164,
        KEY_PREVIOUSSONG = 165,
        KEY_STOPCD       = 166,
        KEY_REWIND       = 168,
        KEY_HOMEPAGE     = 172,
        KEY_F20          = 190,
        KEY_F24          = 194,
        KEY_PLAYCD       = 200,
        KEY_PAUSECD      = 201,
        KEY_SUSPEND      = 205,
        KEY_FASTFORWARD  = 208,
        KEY_BRIGHTNESSDOWN = 224,
        KEY_BRIGHTNESSUP = 225,
        KEY_SWITCHVIDEOMODE = 227,
        KEY_KBDILLUMTOGGLE = 228,
        KEY_KBDILLUMDOWN = 229,
        KEY_KBDILLUMUP   = 230,
        KEY_BATTERY      = 236,
        KEY_WLAN         = 238,
        KEY_VIDEO_NEXT   = 241,
        KEY_VIDEO_PREV   = 242,
        KEY_BRIGHTNESS_CYCLE = 243,
        KEY_BRIGHTNESS_AUTO = 244,
        KEY_BRIGHTNESS_ZERO = Self::KEY_BRIGHTNESS_AUTO.0,
        KEY_DISPLAY_OFF  = 245,
        KEY_MICMUTE      = 248,
        KEY_VENDOR       = 0x168,
        KEY_FULL_SCREEN  = 0x174,
        KEY_ZOOM         = Self::KEY_FULL_SCREEN.0,
        KEY_RESTART      = 0x198,
        KEY_FN_F1        = 0x1d2,
        KEY_FN_F2        = 0x1d3,
        KEY_FN_F6        = 0x1d7,
        KEY_FN_F9        = 0x1da,
        KEY_FN_F10       = 0x1db,
        KEY_FN_F11       = 0x1dc,
    }
}

impl Key {
    const MAX: Self = Self(0x2ff);

    #[inline]
    pub const fn from_raw(code: u16) -> Self {
        Self(code)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Key({:#x})", self.0),
        }
    }
}

ffi_enum! {
    /// `SW_*`: A binary switch; the code of `EV_SW` events.
    pub enum Switch: u16 {
        LID                  = 0x00,
        TABLET_MODE          = 0x01,
        HEADPHONE_INSERT     = 0x02,
        MICROPHONE_INSERT    = 0x04,
        LINEOUT_INSERT       = 0x06,
        VIDEOOUT_INSERT      = 0x08,
        LINEIN_INSERT        = 0x0d,
    }
}

impl Switch {
    #[inline]
    pub const fn from_raw(code: u16) -> Self {
        Self(code)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "SW_{name}"),
            None => write!(f, "Switch({:#x})", self.0),
        }
    }
}

ffi_enum! {
    /// `MSC_*`: A miscellaneous event code; the code of `EV_MSC` events.
    pub enum Misc: u16 {
        SERIAL    = 0x00,
        PULSELED  = 0x01,
        GESTURE   = 0x02,
        RAW       = 0x03,
        /// Scancode of the following key event. Only keyboards report these.
        SCAN      = 0x04,
        TIMESTAMP = 0x05,
    }
}

impl Misc {
    #[inline]
    pub const fn from_raw(code: u16) -> Self {
        Self(code)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Misc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "MSC_{name}"),
            None => write!(f, "Misc({:#x})", self.0),
        }
    }
}
