//! Special handling for the mute key.
//!
//! Some laptops (notably ThinkPads) report the toggling mute key as a press, a burst of
//! auto-repeats, and a release. Forwarding all of that would toggle the mute state many times per
//! physical press. [`MuteFilter`] collapses the burst so that only the parity of the repeat count
//! decides whether a release is reported.

use crate::event::{EventTriple, EventType, Key};

pub const MUTE_PRESSED: &str = "button/mute MUTE (key pressed)";
pub const MUTE_RELEASED: &str = "button/mute MUTE (key released)";

/// What the [`MuteFilter`] decided about a mute key record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteOutcome {
    /// Forward this event name.
    Emit(&'static str),
    /// Drop the record; do not consult the catalog either.
    Suppress,
}

/// Press/repeat/release collapsing for `KEY_MUTE`.
///
/// The state is a single repeat counter: there is one mute control per system, so one filter is
/// shared by all devices.
#[derive(Debug, Default)]
pub struct MuteFilter {
    repeat_count: usize,
}

impl MuteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `triple`.
    ///
    /// Returns [`None`] for anything the filter does not handle: records of other keys, and mute
    /// key values other than press (1), repeat (2) and release (0).
    pub fn filter(&mut self, triple: EventTriple) -> Option<MuteOutcome> {
        if triple.ty != EventType::KEY || triple.code != Key::KEY_MUTE.raw() {
            return None;
        }
        match triple.value {
            1 => {
                self.repeat_count = 1;
                Some(MuteOutcome::Emit(MUTE_PRESSED))
            }
            2 => {
                self.repeat_count += 1;
                Some(MuteOutcome::Suppress)
            }
            0 if self.repeat_count % 2 == 0 => Some(MuteOutcome::Emit(MUTE_RELEASED)),
            0 => Some(MuteOutcome::Suppress),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mute(value: i32) -> EventTriple {
        EventTriple::new(EventType::KEY, Key::KEY_MUTE.raw(), value)
    }

    /// Feeds press, `repeats` auto-repeats and a release; returns everything emitted.
    fn sequence(filter: &mut MuteFilter, repeats: usize) -> Vec<&'static str> {
        let mut out = Vec::new();
        let values = [1].into_iter().chain((0..repeats).map(|_| 2)).chain([0]);
        for value in values {
            if let Some(MuteOutcome::Emit(name)) = filter.filter(mute(value)) {
                out.push(name);
            }
        }
        out
    }

    #[test]
    fn other_keys_pass_through() {
        let mut filter = MuteFilter::new();
        assert_eq!(
            filter.filter(EventTriple::new(EventType::KEY, Key::KEY_VOLUMEUP.raw(), 1)),
            None
        );
        assert_eq!(
            filter.filter(EventTriple::new(EventType::SW, Key::KEY_MUTE.raw(), 1)),
            None
        );
        assert_eq!(filter.filter(mute(3)), None);
    }

    #[test]
    fn press_resets() {
        let mut filter = MuteFilter::new();
        assert_eq!(filter.filter(mute(1)), Some(MuteOutcome::Emit(MUTE_PRESSED)));
        assert_eq!(filter.filter(mute(2)), Some(MuteOutcome::Suppress));
        // A new press discards the pending repeat, so the release is suppressed again.
        assert_eq!(filter.filter(mute(1)), Some(MuteOutcome::Emit(MUTE_PRESSED)));
        assert_eq!(filter.filter(mute(0)), Some(MuteOutcome::Suppress));
    }

    #[test]
    fn release_parity() {
        let mut filter = MuteFilter::new();
        for repeats in 0..8 {
            let emitted = sequence(&mut filter, repeats);
            let releases = emitted.iter().filter(|&&n| n == MUTE_RELEASED).count();
            assert_eq!(emitted.first(), Some(&MUTE_PRESSED));
            assert_eq!(releases, repeats % 2, "repeats={repeats}");
        }
    }

    #[test]
    fn bare_release_before_any_press() {
        // Counter starts at zero, which is even.
        let mut filter = MuteFilter::new();
        assert_eq!(filter.filter(mute(0)), Some(MuteOutcome::Emit(MUTE_RELEASED)));
    }
}
