use std::{error::Error, fmt, io, os::fd::RawFd, path::PathBuf};

/// A condition the event reader cannot recover from.
///
/// Returned by [`Dispatcher::process`][crate::Dispatcher::process]. The owning loop is expected to
/// shut the process down with a non-zero exit status.
#[derive(Debug)]
pub enum Fatal {
    /// A read returned end-of-file.
    SourceClosed { path: PathBuf },
    /// More read errors than the configured budget allows.
    TooManyErrors { count: u32, last: io::Error },
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fatal::SourceClosed { path } => {
                write!(f, "input layer connection {} closed", path.display())
            }
            Fatal::TooManyErrors { count, .. } => {
                write!(f, "too many errors reading input layer ({count})")
            }
        }
    }
}

impl Error for Fatal {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Fatal::SourceClosed { .. } => None,
            Fatal::TooManyErrors { last, .. } => Some(last),
        }
    }
}

/// Error returned when a connection can't be added to a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The registry is at capacity.
    Full { limit: usize },
    /// A connection with this descriptor is already registered.
    Duplicate { fd: RawFd },
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::Full { limit } => {
                write!(f, "too many connections (limit is {limit})")
            }
            RegisterError::Duplicate { fd } => write!(f, "fd {fd} is already registered"),
        }
    }
}

impl Error for RegisterError {}
