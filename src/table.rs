//! The event translation table.
//!
//! Maps `(type, code, value)` triples to the event strings handed to the event handler. The
//! strings carry the two trailing hex numbers (eg. `00000080 00000000`) that Xorg's ACPI event
//! parser expects.
//!
//! The table is authored in a human-friendly order and sorted once by [`Catalog::build`]. Lookups
//! are binary searches, either over the whole triple ([`Catalog::lookup`]) or only over its
//! `(type, code)` prefix ([`Catalog::has_interest`]).

use std::{cmp::Ordering, sync::OnceLock};

use crate::event::{EventTriple, EventType, Key, Switch};

/// One row of the [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationEntry {
    pub triple: EventTriple,
    pub name: &'static str,
}

impl TranslationEntry {
    pub const fn new(ty: EventType, code: u16, value: i32, name: &'static str) -> Self {
        Self {
            triple: EventTriple::new(ty, code, value),
            name,
        }
    }
}

fn key(code: Key, value: i32, name: &'static str) -> TranslationEntry {
    TranslationEntry::new(EventType::KEY, code.raw(), value, name)
}

fn sw(code: Switch, value: i32, name: &'static str) -> TranslationEntry {
    TranslationEntry::new(EventType::SW, code.raw(), value, name)
}

/// The built-in events, in authoring order. Use `evtest` to find new events to add.
fn builtin() -> Vec<TranslationEntry> {
    vec![
        // Common events
        key(Key::KEY_POWER, 1, "button/power PBTN 00000080 00000000"),
        key(Key::KEY_SUSPEND, 1, "button/suspend SUSP 00000080 00000000"),
        key(Key::KEY_SLEEP, 1, "button/sleep SBTN 00000080 00000000"),
        sw(Switch::LID, 1, "button/lid LID close"),
        sw(Switch::LID, 0, "button/lid LID open"),
        sw(Switch::TABLET_MODE, 0, "video/tabletmode TBLT 0000008A 00000000"),
        sw(Switch::TABLET_MODE, 1, "video/tabletmode TBLT 0000008A 00000001"),
        // Video
        key(Key::KEY_ZOOM, 1, "button/zoom ZOOM 00000080 00000000"),
        key(Key::KEY_BRIGHTNESSDOWN, 1, "video/brightnessdown BRTDN 00000087 00000000"),
        key(Key::KEY_BRIGHTNESSUP, 1, "video/brightnessup BRTUP 00000086 00000000"),
        key(Key::KEY_VIDEO_NEXT, 1, "video/next NEXT 00000083 00000000"),
        key(Key::KEY_VIDEO_PREV, 1, "video/prev PREV 00000084 00000000"),
        key(Key::KEY_BRIGHTNESS_CYCLE, 1, "video/brightnesscycle BCYC 00000085 00000000"),
        key(Key::KEY_BRIGHTNESS_ZERO, 1, "video/brightnesszero BZRO 00000088 00000000"),
        key(Key::KEY_DISPLAY_OFF, 1, "video/displayoff DOFF 00000089 00000000"),
        key(Key::KEY_SWITCHVIDEOMODE, 1, "video/switchmode VMOD 00000080 00000000"),
        // Audio
        key(Key::KEY_VOLUMEDOWN, 1, "button/volumedown VOLDN 00000080 00000000"),
        key(Key::KEY_VOLUMEDOWN, 2, "button/volumedown VOLDN 00000080 00000000"),
        key(Key::KEY_VOLUMEUP, 1, "button/volumeup VOLUP 00000080 00000000"),
        key(Key::KEY_VOLUMEUP, 2, "button/volumeup VOLUP 00000080 00000000"),
        key(Key::KEY_MUTE, 1, "button/mute MUTE 00000080 00000000"),
        key(Key::KEY_MICMUTE, 1, "button/micmute MICMUTE 00000080 00000000"),
        key(Key::KEY_NEXTSONG, 1, "cd/next CDNEXT 00000080 00000000"),
        key(Key::KEY_PREVIOUSSONG, 1, "cd/prev CDPREV 00000080 00000000"),
        key(Key::KEY_PLAYPAUSE, 1, "cd/play CDPLAY 00000080 00000000"),
        key(Key::KEY_PLAYCD, 1, "cd/play2 CDPLAY2 00000080 00000000"),
        key(Key::KEY_PAUSECD, 1, "cd/pause CDPAUSE 00000080 00000000"),
        key(Key::KEY_STOPCD, 1, "cd/stop CDSTOP 00000080 00000000"),
        key(Key::KEY_EJECTCD, 1, "cd/eject CDEJECT 00000080 00000000"),
        key(Key::KEY_EJECTCLOSECD, 1, "cd/ejectclose CDEJECTCLOSE 00000080 00000000"),
        key(Key::KEY_FASTFORWARD, 1, "button/ff FF 00000080 00000000"),
        key(Key::KEY_REWIND, 1, "button/rew REW 00000080 00000000"),
        // Jacks
        sw(Switch::HEADPHONE_INSERT, 0, "jack/headphone HEADPHONE unplug"),
        sw(Switch::HEADPHONE_INSERT, 1, "jack/headphone HEADPHONE plug"),
        sw(Switch::MICROPHONE_INSERT, 0, "jack/microphone MICROPHONE unplug"),
        sw(Switch::MICROPHONE_INSERT, 1, "jack/microphone MICROPHONE plug"),
        sw(Switch::LINEOUT_INSERT, 0, "jack/lineout LINEOUT unplug"),
        sw(Switch::LINEOUT_INSERT, 1, "jack/lineout LINEOUT plug"),
        sw(Switch::VIDEOOUT_INSERT, 0, "jack/videoout VIDEOOUT unplug"),
        sw(Switch::VIDEOOUT_INSERT, 1, "jack/videoout VIDEOOUT plug"),
        sw(Switch::LINEIN_INSERT, 0, "jack/linein LINEIN unplug"),
        sw(Switch::LINEIN_INSERT, 1, "jack/linein LINEIN plug"),
        // Miscellaneous
        key(Key::KEY_PROG1, 1, "button/prog1 PROG1 00000080 00000000"),
        key(Key::KEY_VENDOR, 1, "button/vendor VNDR 00000080 00000000"),
        key(Key::KEY_BATTERY, 1, "button/battery BAT 00000080 00000000"),
        // KEY_COFFEE shares this code and would be a duplicate row.
        key(Key::KEY_SCREENLOCK, 1, "button/screenlock SCRNLCK 00000080 00000000"),
        key(Key::KEY_WLAN, 1, "button/wlan WLAN 00000080 00000000"),
        key(Key::KEY_FN_F1, 1, "button/fnf1 FNF1 00000080 00000000"),
        key(Key::KEY_FN_F2, 1, "button/fnf2 FNF2 00000080 00000000"),
        key(Key::KEY_FN_F6, 1, "button/fnf6 FNF6 00000080 00000000"),
        key(Key::KEY_FN_F9, 1, "button/fnf9 FNF9 00000080 00000000"),
        key(Key::KEY_FN_F10, 1, "button/fnf10 FF10 00000080 00000000"),
        key(Key::KEY_FN_F11, 1, "button/fnf11 FF11 00000080 00000000"),
        key(Key::KEY_F20, 1, "button/f20 F20 00000080 00000000"),
        key(Key::KEY_F24, 1, "button/f24 F24 00000080 00000000"),
        key(Key::KEY_KBDILLUMTOGGLE, 1, "button/kbdillumtoggle KBILLUM 00000080 00000000"),
        key(Key::KEY_KBDILLUMUP, 1, "button/kbdillumup KBILLUMUP 00000080 00000000"),
        key(Key::KEY_KBDILLUMDOWN, 1, "button/kbdillumdown KBILLUMDOWN 00000080 00000000"),
        key(Key::KEY_COPY, 1, "button/copy COPY 00000080 00000000"),
        key(Key::KEY_RESTART, 1, "button/restart RSTR 00000080 00000000"),
        key(Key::KEY_KPENTER, 1, "button/kpenter KPENTER 00000080 00000000"),
        key(Key::KEY_UP, 1, "button/up UP 00000080 00000000"),
        key(Key::KEY_LEFT, 1, "button/left LEFT 00000080 00000000"),
        key(Key::KEY_RIGHT, 1, "button/right RIGHT 00000080 00000000"),
        key(Key::KEY_DOWN, 1, "button/down DOWN 00000080 00000000"),
        key(Key::KEY_MENU, 1, "button/menu MENU 00000080 00000000"),
        key(Key::KEY_BACK, 1, "button/back BACK 00000080 00000000"),
        key(Key::KEY_HOMEPAGE, 1, "button/homepage HOMEPAGE 00000080 00000000"),
    ]
}

/// The sorted translation table.
///
/// Entries are kept in ascending `(type, code, value)` order. A catalog is immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<TranslationEntry>,
}

static GLOBAL: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Builds the catalog of built-in events.
    pub fn build() -> Self {
        Self::from_entries(builtin())
    }

    /// Returns the process-wide built-in catalog, building it on first use.
    pub fn global() -> &'static Catalog {
        GLOBAL.get_or_init(|| {
            let catalog = Self::build();
            catalog.dump();
            catalog
        })
    }

    /// Builds a catalog from arbitrary rows.
    ///
    /// Rows sharing a full triple are an authoring mistake; lookups of such a triple may return
    /// either name.
    pub fn from_entries(entries: impl IntoIterator<Item = TranslationEntry>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.triple.cmp(&b.triple));
        debug_assert!(
            entries.windows(2).all(|w| w[0].triple != w[1].triple),
            "duplicate rows in event table"
        );
        Self { entries }
    }

    /// Returns the rows in sorted order.
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the event name for `triple`, if it is in the table.
    pub fn lookup(&self, triple: EventTriple) -> Option<&'static str> {
        self.entries
            .binary_search_by(|entry| entry.triple.cmp(&triple))
            .ok()
            .map(|i| self.entries[i].name)
    }

    /// Returns whether any row has this event type and code, whatever its value.
    ///
    /// Used to decide whether a device is worth listening to.
    pub fn has_interest(&self, ty: EventType, code: u16) -> bool {
        self.entries
            .binary_search_by(|entry| cmp_prefix(&entry.triple, ty, code))
            .is_ok()
    }

    /// Logs every row at trace level.
    pub fn dump(&self) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        log::trace!("dumping event table ({} rows)...", self.entries.len());
        for entry in &self.entries {
            log::trace!(
                "  event table: type: {}  code: {}  value: {}  str: {}",
                entry.triple.ty.raw(),
                entry.triple.code,
                entry.triple.value,
                entry.name,
            );
        }
    }
}

fn cmp_prefix(triple: &EventTriple, ty: EventType, code: u16) -> Ordering {
    (triple.ty, triple.code).cmp(&(ty, code))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn sorted() {
        let catalog = Catalog::build();
        assert!(!catalog.is_empty());
        assert!(
            catalog
                .entries()
                .windows(2)
                .all(|w| w[0].triple <= w[1].triple)
        );
    }

    #[test]
    fn no_duplicate_triples() {
        let catalog = Catalog::build();
        let unique: BTreeSet<_> = catalog.entries().iter().map(|e| e.triple).collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn rebuild_is_identical() {
        assert_eq!(Catalog::build().entries(), Catalog::global().entries());
    }

    #[test]
    fn lookup_every_row() {
        let catalog = Catalog::build();
        for entry in catalog.entries() {
            assert_eq!(catalog.lookup(entry.triple), Some(entry.name), "{entry:?}");
        }
    }

    #[test]
    fn lookup_absent() {
        let catalog = Catalog::build();
        assert_eq!(catalog.lookup(EventTriple::new(EventType::REL, 999, 0)), None);
        // Known code, unknown value.
        assert_eq!(
            catalog.lookup(EventTriple::new(EventType::KEY, Key::KEY_POWER.raw(), 0)),
            None
        );
        assert_eq!(catalog.lookup(EventTriple::new(EventType::SYN, 0, 0)), None);
    }

    #[test]
    fn power_button() {
        let catalog = Catalog::build();
        assert_eq!(
            catalog.lookup(EventTriple::new(EventType::KEY, Key::KEY_POWER.raw(), 1)),
            Some("button/power PBTN 00000080 00000000")
        );
    }

    #[test]
    fn lookup_values() {
        let catalog = Catalog::build();
        let lid = |value| catalog.lookup(EventTriple::new(EventType::SW, Switch::LID.raw(), value));
        assert_eq!(lid(0), Some("button/lid LID open"));
        assert_eq!(lid(1), Some("button/lid LID close"));
        assert_eq!(lid(2), None);
    }

    #[test]
    fn interest_matches_rows() {
        let catalog = Catalog::build();
        let pairs: BTreeSet<_> = catalog
            .entries()
            .iter()
            .map(|e| (e.triple.ty, e.triple.code))
            .collect();

        for ty in [EventType::SYN, EventType::KEY, EventType::MSC, EventType::SW] {
            for code in 0..=0x2ff {
                assert_eq!(
                    catalog.has_interest(ty, code),
                    pairs.contains(&(ty, code)),
                    "{ty:?} {code}"
                );
            }
        }
    }

    #[test]
    fn interest_with_value_variants() {
        // Volume keys are listed for both press and repeat.
        let catalog = Catalog::build();
        assert!(catalog.has_interest(EventType::KEY, Key::KEY_VOLUMEDOWN.raw()));
        assert!(catalog.has_interest(EventType::SW, Switch::LID.raw()));
        assert!(!catalog.has_interest(EventType::KEY, Key::KEY_RESERVED.raw()));

        let only_repeat = Catalog::from_entries([TranslationEntry::new(
            EventType::KEY,
            Key::KEY_VOLUMEUP.raw(),
            2,
            "vol",
        )]);
        assert!(only_repeat.has_interest(EventType::KEY, Key::KEY_VOLUMEUP.raw()));
    }

    #[test]
    fn from_entries_sorts() {
        let catalog = Catalog::from_entries([
            TranslationEntry::new(EventType::SW, 0, 0, "c"),
            TranslationEntry::new(EventType::KEY, 103, 1, "b"),
            TranslationEntry::new(EventType::KEY, 103, 0, "a"),
        ]);
        let names: Vec<_> = catalog.entries().iter().map(|e| e.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        let empty = Catalog::from_entries(Vec::new());
        assert!(empty.is_empty());
        assert!(!empty.has_interest(EventType::KEY, 103));
    }
}
