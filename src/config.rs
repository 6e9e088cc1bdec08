//! Settings for admission and dispatch.

use crate::pattern::DevicePattern;

/// Default number of read errors tolerated before [`Fatal::TooManyErrors`][crate::Fatal].
pub const DEFAULT_MAX_ERRORS: u32 = 20;

/// Input layer settings.
///
/// Built with [`Config::default`] and the `with_*` methods:
///
/// ```
/// # use inputlayer::Config;
/// let config = Config::default()
///     .with_max_errors(5)
///     .with_event_logging(true);
/// assert_eq!(config.max_errors(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pattern: DevicePattern,
    max_errors: u32,
    mute_filter: bool,
    log_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: DevicePattern::default(),
            max_errors: DEFAULT_MAX_ERRORS,
            mute_filter: true,
            log_events: false,
        }
    }
}

impl Config {
    /// Sets the pattern of device files to admit. Defaults to `/dev/input/event*`.
    pub fn with_pattern(mut self, pattern: DevicePattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Sets how many read errors are tolerated. Reaching one more is fatal.
    pub fn with_max_errors(mut self, max_errors: u32) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Enables or disables the [`MuteFilter`][crate::MuteFilter]. Enabled by default.
    ///
    /// When disabled, mute key records are translated through the catalog like any other key.
    pub fn with_mute_filter(mut self, enabled: bool) -> Self {
        self.mute_filter = enabled;
        self
    }

    /// Enables `info`-level logging of every forwarded or dropped event.
    pub fn with_event_logging(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }

    pub fn pattern(&self) -> &DevicePattern {
        &self.pattern
    }

    pub fn max_errors(&self) -> u32 {
        self.max_errors
    }

    pub fn mute_filter(&self) -> bool {
        self.mute_filter
    }

    pub fn event_logging(&self) -> bool {
        self.log_events
    }
}
