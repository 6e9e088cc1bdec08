//! Matching input device files by path pattern.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

/// The pattern used when none is configured.
pub const DEFAULT_PATTERN: &str = "/dev/input/event*";

/// A `<dir>/<file-pattern>` path pattern with at most one `*` wildcard in the file name.
///
/// Like a shell glob, `*` matches any sequence of characters but does not match a leading `.`,
/// and the matches are returned sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePattern {
    dir: PathBuf,
    prefix: String,
    /// `None` if the file name is matched exactly.
    suffix: Option<String>,
}

impl Default for DevicePattern {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/dev/input"),
            prefix: "event".into(),
            suffix: Some(String::new()),
        }
    }
}

impl DevicePattern {
    pub fn new(pattern: &str) -> io::Result<Self> {
        let invalid = |msg: &str| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid device pattern '{pattern}': {msg}"),
            )
        };

        let (dir, file) = match pattern.rsplit_once('/') {
            Some(("", file)) => ("/", file),
            Some((dir, file)) => (dir, file),
            None => (".", pattern),
        };
        if dir.contains(['*', '?', '[']) {
            return Err(invalid("wildcards are only supported in the file name"));
        }
        if file.is_empty() {
            return Err(invalid("missing file name"));
        }
        if file.contains(['?', '[']) {
            return Err(invalid("only `*` wildcards are supported"));
        }

        let (prefix, suffix) = match file.split_once('*') {
            Some((_, suffix)) if suffix.contains('*') => {
                return Err(invalid("at most one `*` is supported"));
            }
            Some((prefix, suffix)) => (prefix, Some(suffix.to_string())),
            None => (file, None),
        };

        Ok(Self {
            dir: PathBuf::from(dir),
            prefix: prefix.to_string(),
            suffix,
        })
    }

    /// The directory searched for matching files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns whether a file name in [`DevicePattern::dir`] matches.
    pub fn matches(&self, file_name: &str) -> bool {
        match &self.suffix {
            None => file_name == self.prefix,
            Some(suffix) => {
                if self.prefix.is_empty() && file_name.starts_with('.') {
                    return false;
                }
                file_name.len() >= self.prefix.len() + suffix.len()
                    && file_name.starts_with(&*self.prefix)
                    && file_name.ends_with(&**suffix)
            }
        }
    }

    /// Lists the matching paths, sorted.
    ///
    /// A missing directory yields no matches rather than an error.
    pub fn paths(&self) -> io::Result<Vec<PathBuf>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(io::Error::new(
                    e.kind(),
                    format!("failed to read '{}': {e}", self.dir.display()),
                ));
            }
        };

        let mut paths = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("skipping unreadable entry in '{}': {e}", self.dir.display());
                    continue;
                }
            };
            let file_name = entry.file_name();
            if file_name.to_str().is_some_and(|name| self.matches(name)) {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl FromStr for DevicePattern {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for DevicePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = self.dir.display();
        let sep = if self.dir == Path::new("/") { "" } else { "/" };
        match &self.suffix {
            None => write!(f, "{dir}{sep}{}", self.prefix),
            Some(suffix) => write!(f, "{dir}{sep}{}*{suffix}", self.prefix),
        }
    }
}
