//! Opening input devices and deciding which ones to listen to.

use std::{
    io,
    os::fd::RawFd,
    path::{Path, PathBuf},
};

use crate::{
    connection::{Connection, ConnectionRegistry, InputDevice},
    device::Device,
    pattern::DevicePattern,
    probe::probe,
    table::Catalog,
};

/// Result of [`admit_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The device was opened and registered under this descriptor.
    Admitted(RawFd),
    /// A connection for this path already exists; the device was not reopened.
    AlreadyRegistered,
    /// The device could not be opened or registered, or reports nothing of interest.
    Skipped,
}

/// Summary of an [`admit_all`] scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionReport {
    /// Paths registered by this scan, in scan order.
    pub admitted: Vec<PathBuf>,
    pub already_registered: usize,
    pub skipped: usize,
}

impl AdmissionReport {
    /// Returns `true` if no device is being listened to after the scan.
    pub fn is_failure(&self) -> bool {
        self.admitted.is_empty() && self.already_registered == 0
    }
}

/// Admits the device at `path`.
///
/// Errors are logged and reported as [`Admission::Skipped`]; they never abort a scan.
pub fn admit_one<R: ConnectionRegistry + ?Sized>(
    path: &Path,
    registry: &mut R,
    catalog: &Catalog,
) -> Admission {
    admit_one_with(path, registry, catalog, |path: &Path| Device::open(path))
}

/// Like [`admit_one`], but opens the device with `open`.
pub fn admit_one_with<R, D, F>(
    path: &Path,
    registry: &mut R,
    catalog: &Catalog,
    open: F,
) -> Admission
where
    R: ConnectionRegistry + ?Sized,
    D: InputDevice,
    F: FnOnce(&Path) -> io::Result<D>,
{
    if registry.find_by_path(path).is_some() {
        return Admission::AlreadyRegistered;
    }

    let device = match open(path) {
        Ok(device) => device,
        Err(e) => {
            log::debug!("{e}");
            return Admission::Skipped;
        }
    };

    if !probe(&device, catalog) {
        log::debug!(
            "input layer {} doesn't support any events of interest",
            path.display()
        );
        return Admission::Skipped;
    }

    let name = device.name().unwrap_or_else(|e| {
        log::debug!("{e}");
        String::from("Unknown")
    });
    let fd = device.fd();
    match registry.register(Connection::from_device(device, name.clone())) {
        Ok(()) => {
            log::debug!(
                "input layer {} ({name}) opened successfully, fd {fd}",
                path.display()
            );
            Admission::Admitted(fd)
        }
        Err(e) => {
            log::error!("can't register input layer {}: {e}", path.display());
            Admission::Skipped
        }
    }
}

/// Admits every device file matching `pattern`.
///
/// Safe to call again later: devices already in `registry` are counted but left alone.
pub fn admit_all<R: ConnectionRegistry + ?Sized>(
    pattern: &DevicePattern,
    registry: &mut R,
    catalog: &Catalog,
) -> AdmissionReport {
    admit_all_with(pattern, registry, catalog, |path: &Path| Device::open(path))
}

/// Like [`admit_all`], but opens each device with `open`.
pub fn admit_all_with<R, D, F>(
    pattern: &DevicePattern,
    registry: &mut R,
    catalog: &Catalog,
    mut open: F,
) -> AdmissionReport
where
    R: ConnectionRegistry + ?Sized,
    D: InputDevice,
    F: FnMut(&Path) -> io::Result<D>,
{
    let paths = pattern.paths().unwrap_or_else(|e| {
        log::error!("{e}");
        Vec::new()
    });

    let mut report = AdmissionReport::default();
    for path in paths {
        match admit_one_with(&path, registry, catalog, &mut open) {
            Admission::Admitted(_) => report.admitted.push(path),
            Admission::AlreadyRegistered => report.already_registered += 1,
            Admission::Skipped => report.skipped += 1,
        }
    }

    if report.is_failure() {
        log::error!("cannot open input layer");
    }
    report
}
