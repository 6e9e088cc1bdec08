//! Capability probing: does a device report anything the catalog knows about?

use std::io;

use crate::{
    bits::BitSet,
    event::{Code, EventType},
    table::Catalog,
};

/// Capability queries on an input device.
///
/// Implemented by [`Device`][crate::Device] via `EVIOCGBIT`.
pub trait Capabilities {
    /// Returns the set of event types the device supports.
    fn supported_events(&self) -> io::Result<BitSet<EventType>>;

    /// Returns the set of codes the device supports for event type `ty`.
    fn supported_codes(&self, ty: EventType) -> io::Result<BitSet<Code>>;
}

/// Returns whether `device` can emit any `(type, code)` pair listed in `catalog`.
///
/// Every supported type except `EV_SYN` is scanned until the first hit. Failed queries are treated
/// as empty bitmaps, so a device that cannot be queried is simply not interesting.
pub fn probe<C: Capabilities + ?Sized>(device: &C, catalog: &Catalog) -> bool {
    let types = match device.supported_events() {
        Ok(types) => types,
        Err(e) => {
            log::debug!("couldn't fetch supported event types: {e}");
            return false;
        }
    };

    for ty in &types {
        if ty == EventType::SYN {
            continue;
        }
        let codes = match device.supported_codes(ty) {
            Ok(codes) => codes,
            Err(e) => {
                log::debug!("couldn't fetch supported codes for {ty:?}: {e}");
                continue;
            }
        };
        if codes.iter().any(|code| catalog.has_interest(ty, code.raw())) {
            return true;
        }
    }
    false
}
