use crate::{Result, constants::EMERGENCY_SENTINEL_MS, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifier of a physical output line (the control node path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub fn new(node: impl Into<String>) -> Self {
        LineId(node.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LineId {
    fn from(node: &str) -> Self {
        LineId::new(node)
    }
}

/// Logic level driven onto a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Level {
    Deassert = 0,
    Assert = 1,
}

impl Level {
    /// Raw value as written to the control node.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Text payload for a sysfs `value` file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Deassert => "0",
            Level::Assert => "1",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Level::Deassert),
            1 => Ok(Level::Assert),
            other => Err(Error::invalid_task(format!("level must be 0 or 1, got {other}"))),
        }
    }
}

/// How long a task holds its level before the executor moves on.
///
/// | Variant | Raw ms | Behavior |
/// |---------|--------|----------|
/// | `Momentary` | 0 | write once, no auto-revert |
/// | `Timed(d)` | > 0 | write, then auto-off after `d` |
/// | `Sustained` | -1 | emergency control/cancel marker, no timing |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hold {
    Momentary,
    Timed(Duration),
    Sustained,
}

impl Hold {
    /// Build a hold from a raw millisecond count.
    ///
    /// # Errors
    /// Returns `Error::InvalidTask` for a negative value other than
    /// [`EMERGENCY_SENTINEL_MS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use portcullis_core::Hold;
    /// use std::time::Duration;
    ///
    /// assert_eq!(Hold::from_millis(0).unwrap(), Hold::Momentary);
    /// assert_eq!(Hold::from_millis(300).unwrap(), Hold::Timed(Duration::from_millis(300)));
    /// assert_eq!(Hold::from_millis(-1).unwrap(), Hold::Sustained);
    /// assert!(Hold::from_millis(-2).is_err());
    /// ```
    pub fn from_millis(ms: i64) -> Result<Self> {
        match ms {
            0 => Ok(Hold::Momentary),
            EMERGENCY_SENTINEL_MS => Ok(Hold::Sustained),
            ms if ms > 0 => Ok(Hold::Timed(Duration::from_millis(ms as u64))),
            ms => Err(Error::invalid_task(format!(
                "duration {ms}ms is negative and not the emergency marker"
            ))),
        }
    }

    /// Zero maps to `Momentary`, anything else to `Timed`.
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        if duration.is_zero() {
            Hold::Momentary
        } else {
            Hold::Timed(duration)
        }
    }

    /// Raw millisecond encoding, the inverse of [`Hold::from_millis`].
    #[must_use]
    pub fn as_millis(&self) -> i64 {
        match self {
            Hold::Momentary => 0,
            Hold::Timed(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
            Hold::Sustained => EMERGENCY_SENTINEL_MS,
        }
    }

    #[must_use]
    pub fn is_sustained(&self) -> bool {
        matches!(self, Hold::Sustained)
    }

    /// The timed duration, if any.
    #[must_use]
    pub fn timed(&self) -> Option<Duration> {
        match self {
            Hold::Timed(d) => Some(*d),
            _ => None,
        }
    }
}

/// One desired output action.
///
/// Tasks are fully determined when built and never change afterwards; the
/// fields are private and only readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    line: LineId,
    level: Level,
    hold: Hold,
    pace: Duration,
    tag: String,
}

impl Task {
    /// Build a task from typed values.
    ///
    /// `Hold::Timed(Duration::ZERO)` is stored as [`Hold::Momentary`], so a
    /// zero-length hold never produces an auto-off write.
    pub fn new(line: impl Into<LineId>, level: Level, hold: Hold, tag: impl Into<String>) -> Self {
        let hold = match hold {
            Hold::Timed(d) => Hold::from_duration(d),
            other => other,
        };
        Self {
            line: line.into(),
            level,
            hold,
            pace: Duration::ZERO,
            tag: tag.into(),
        }
    }

    /// Build a task from raw values (level byte, duration in ms).
    ///
    /// # Errors
    /// Returns `Error::InvalidTask` if the level is not 0/1 or the duration
    /// is negative and not the emergency marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use portcullis_core::{Hold, Level, Task};
    ///
    /// let task = Task::from_raw("/sys/class/gpio/gpio1/value", 1, 5000, "door").unwrap();
    /// assert_eq!(task.level(), Level::Assert);
    /// assert_eq!(task.hold().as_millis(), 5000);
    ///
    /// assert!(Task::from_raw("/sys/class/gpio/gpio1/value", 1, -7, "door").is_err());
    /// ```
    pub fn from_raw(
        line: impl Into<LineId>,
        level: u8,
        duration_ms: i64,
        tag: impl Into<String>,
    ) -> Result<Self> {
        let level = Level::try_from(level)?;
        let hold = Hold::from_millis(duration_ms)?;
        Ok(Self::new(line, level, hold, tag))
    }

    /// Set the minimum dwell after a `Momentary` write before the next
    /// task on the same line starts. Ignored for other holds.
    #[must_use]
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    #[must_use]
    pub fn line(&self) -> &LineId {
        &self.line
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn hold(&self) -> Hold {
        self.hold
    }

    #[must_use]
    pub fn pace(&self) -> Duration {
        self.pace
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}ms) [{}]",
            self.line,
            self.level,
            self.hold.as_millis(),
            self.tag
        )
    }
}
