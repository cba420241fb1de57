//! Microsecond-resolution timing for build and search measurements.
//!
//! [`PrecisionTimer`] is a plain value owned by whoever is measuring; there is
//! no global timer. [`PreciseDuration`] is the immutable measurement it
//! produces, decomposable into calendar-like components for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::time::Instant;

use crate::error::{Error, Result};

const MICROS_PER_MILLI: u64 = 1_000;
const MICROS_PER_SECOND: u64 = 1_000 * MICROS_PER_MILLI;
const MICROS_PER_MINUTE: u64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: u64 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: u64 = 24 * MICROS_PER_HOUR;

/// Elapsed time in whole microseconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PreciseDuration(u64);

impl PreciseDuration {
    /// The zero duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from a microsecond count.
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Total number of microseconds.
    #[must_use]
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Converts from a standard duration, truncating to whole microseconds.
    ///
    /// Durations beyond `u64::MAX` microseconds saturate.
    #[must_use]
    pub fn from_std(duration: std::time::Duration) -> Self {
        Self(u64::try_from(duration.as_micros()).unwrap_or(u64::MAX))
    }

    /// Converts to a standard duration.
    #[must_use]
    pub const fn to_std(self) -> std::time::Duration {
        std::time::Duration::from_micros(self.0)
    }

    /// Whole days.
    #[must_use]
    pub const fn days(self) -> u64 {
        self.0 / MICROS_PER_DAY
    }

    /// Hours component (0..24).
    #[must_use]
    pub const fn hours(self) -> u64 {
        self.0 % MICROS_PER_DAY / MICROS_PER_HOUR
    }

    /// Minutes component (0..60).
    #[must_use]
    pub const fn minutes(self) -> u64 {
        self.0 % MICROS_PER_HOUR / MICROS_PER_MINUTE
    }

    /// Seconds component (0..60).
    #[must_use]
    pub const fn seconds(self) -> u64 {
        self.0 % MICROS_PER_MINUTE / MICROS_PER_SECOND
    }

    /// Milliseconds component (0..1000).
    #[must_use]
    pub const fn milliseconds(self) -> u64 {
        self.0 % MICROS_PER_SECOND / MICROS_PER_MILLI
    }

    /// Microseconds component (0..1000).
    #[must_use]
    pub const fn microseconds(self) -> u64 {
        self.0 % MICROS_PER_MILLI
    }

    /// Returns true for the zero duration.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for PreciseDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for PreciseDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<std::time::Duration> for PreciseDuration {
    fn from(duration: std::time::Duration) -> Self {
        Self::from_std(duration)
    }
}

/// Human format: the largest non-zero unit leads, seconds carry six decimals.
///
/// `2 h 0 min 5.000120 s`, `5.000120 s`, `12.034 ms`. Honors width and
/// alignment flags so durations line up in reports.
impl fmt::Display for PreciseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m, s) = (self.days(), self.hours(), self.minutes(), self.seconds());
        let (ms, us) = (self.milliseconds(), self.microseconds());

        let text = if d > 0 {
            format!("{d} d {h} h {m} min {s}.{ms:03}{us:03} s")
        } else if h > 0 {
            format!("{h} h {m} min {s}.{ms:03}{us:03} s")
        } else if m > 0 {
            format!("{m} min {s}.{ms:03}{us:03} s")
        } else if s > 0 {
            format!("{s}.{ms:03}{us:03} s")
        } else {
            format!("{ms}.{us:03} ms")
        };

        f.pad(&text)
    }
}

/// Arithmetic mean in whole microseconds (truncating).
///
/// An empty slice averages to zero; a single element is returned unchanged.
#[must_use]
pub fn average(durations: &[PreciseDuration]) -> PreciseDuration {
    match durations {
        [] => PreciseDuration::ZERO,
        [only] => *only,
        _ => {
            let total: u128 = durations.iter().map(|d| u128::from(d.0)).sum();
            let mean = total / durations.len() as u128;
            PreciseDuration(u64::try_from(mean).unwrap_or(u64::MAX))
        }
    }
}

/// Start/stop wall-clock timer.
///
/// Stopping consumes the start mark, so the timer must be started again
/// before the next measurement.
#[derive(Debug, Default)]
pub struct PrecisionTimer {
    started: Option<Instant>,
}

impl PrecisionTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timer that is already running.
    #[must_use]
    pub fn started() -> Self {
        Self {
            started: Some(Instant::now()),
        }
    }

    /// Starts (or restarts) the measurement.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Returns true while a measurement is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Stops the measurement and returns the elapsed time.
    ///
    /// Without a preceding [`start`](Self::start) this logs a warning and
    /// returns [`PreciseDuration::ZERO`].
    pub fn stop(&mut self) -> PreciseDuration {
        match self.try_stop() {
            Ok(elapsed) => elapsed,
            Err(err) => {
                tracing::warn!(code = err.code(), "Timer stopped before it was started, reporting zero");
                PreciseDuration::ZERO
            }
        }
    }

    /// Stops the measurement, failing if the timer was never started.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTimerState`] when no measurement is in progress.
    pub fn try_stop(&mut self) -> Result<PreciseDuration> {
        self.started
            .take()
            .map(|start| PreciseDuration::from_std(start.elapsed()))
            .ok_or(Error::EmptyTimerState)
    }

    /// Runs `f` and returns its value together with the time it took.
    pub fn time<T, F: FnOnce() -> T>(f: F) -> (T, PreciseDuration) {
        let mut timer = Self::started();
        let value = f();
        (value, timer.stop())
    }
}
