//! Named operations over the door, alarm and light executors.
//!
//! The [`Coordinator`] is the surface the rest of the device talks to: UI
//! buttons, recognition results and the fire panel call its methods, and it
//! turns each call into [`Task`]s for the right [`LineExecutor`].
//!
//! It is built once with [`Coordinator::start`] and then shared by reference
//! (typically behind an `Arc`). The executor set never changes after
//! construction, so lookups need no locking.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use portcullis_core::GpioConfig;
//! use portcullis_executor::{Coordinator, Subsystem};
//! use portcullis_hardware::{AnyLineDriver, mock::MockDriver};
//!
//! #[tokio::main]
//! async fn main() -> portcullis_core::Result<()> {
//!     let (mock, _handle) = MockDriver::new();
//!     let coordinator = Coordinator::start(GpioConfig::default(), AnyLineDriver::Mock(mock))?;
//!
//!     coordinator.boot_light_sequence();
//!     coordinator.open_line(Subsystem::Door, Duration::from_secs(3));
//!     coordinator.set_fire_alarm(true);
//!     assert!(coordinator.is_fire_alarm_active());
//!
//!     coordinator.shutdown().await;
//!     Ok(())
//! }
//! ```

use crate::executor::{LineExecutor, LineStats, Submission};
use portcullis_core::constants::{
    TAG_ALARM, TAG_DOOR, TAG_FIRE_ALARM, TAG_FIRE_CANCEL, TAG_FIRE_DOOR, TAG_LIGHT_GREEN,
    TAG_LIGHT_RED, TAG_LIGHT_WHITE,
};
use portcullis_core::{Error, GpioConfig, Hold, Level, LineId, Result, Task};
use portcullis_hardware::AnyLineDriver;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Output subsystem driven by its own executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Door,
    Alarm,
    Light,
}

impl Subsystem {
    pub const ALL: [Subsystem; 3] = [Subsystem::Door, Subsystem::Alarm, Subsystem::Light];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Alarm => "alarm",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subsystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "door" => Ok(Self::Door),
            "alarm" => Ok(Self::Alarm),
            "light" => Ok(Self::Light),
            other => Err(Error::UnknownSubsystem(other.to_string())),
        }
    }
}

/// Registry of line executors plus the named operations built on them.
#[derive(Debug)]
pub struct Coordinator {
    door: LineExecutor,
    alarm: LineExecutor,
    light: LineExecutor,
    config: GpioConfig,
}

impl Coordinator {
    /// Validate `config` and start one executor per subsystem.
    ///
    /// All executors share `driver`; they are running when this returns.
    ///
    /// # Errors
    /// Returns `Error::Config` if the configuration is invalid.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(config: GpioConfig, driver: AnyLineDriver) -> Result<Self> {
        config.validate()?;
        let poll = config.poll_interval();

        let coordinator = Self {
            door: LineExecutor::spawn(Subsystem::Door.as_str(), driver.clone(), poll),
            alarm: LineExecutor::spawn(Subsystem::Alarm.as_str(), driver.clone(), poll),
            light: LineExecutor::spawn(Subsystem::Light.as_str(), driver, poll),
            config,
        };
        info!("Coordinator started with {} executors", Subsystem::ALL.len());
        Ok(coordinator)
    }

    pub fn config(&self) -> &GpioConfig {
        &self.config
    }

    pub fn executor(&self, which: Subsystem) -> &LineExecutor {
        match which {
            Subsystem::Door => &self.door,
            Subsystem::Alarm => &self.alarm,
            Subsystem::Light => &self.light,
        }
    }

    /// Assert a subsystem's primary line, auto-off after `duration`.
    ///
    /// A zero duration leaves the line asserted. The light's primary line is
    /// the white light.
    pub fn open_line(&self, which: Subsystem, duration: Duration) -> Submission {
        let (line, tag) = match which {
            Subsystem::Door => (self.config.door(), TAG_DOOR),
            Subsystem::Alarm => (self.config.alarm(), TAG_ALARM),
            Subsystem::Light => (self.config.light_white(), TAG_LIGHT_WHITE),
        };
        let task = Task::new(line, Level::Assert, Hold::from_duration(duration), tag);
        self.executor(which).submit(task)
    }

    /// Unlock the door for `duration` (zero keeps it open).
    pub fn open_door(&self, duration: Duration) -> Submission {
        self.open_line(Subsystem::Door, duration)
    }

    /// Sound the siren for `duration` (zero keeps it sounding).
    pub fn sound_alarm(&self, duration: Duration) -> Submission {
        self.open_line(Subsystem::Alarm, duration)
    }

    /// Light the white light once boot has finished.
    pub fn boot_light_sequence(&self) -> Submission {
        let task = Task::new(
            self.config.light_white(),
            Level::Assert,
            Hold::from_duration(self.config.boot_light()),
            TAG_LIGHT_WHITE,
        );
        self.light.submit(task)
    }

    /// Flash green (success) or red (failure): on, off, on.
    ///
    /// The three writes are momentary and paced by `feedback_pace_ms`, so the
    /// light ends up on and no auto-off follows.
    pub fn recognition_feedback(&self, success: bool) -> [Submission; 3] {
        let (line, tag) = if success {
            (self.config.light_green(), TAG_LIGHT_GREEN)
        } else {
            (self.config.light_red(), TAG_LIGHT_RED)
        };
        let pace = self.config.feedback_pace();

        [Level::Assert, Level::Deassert, Level::Assert].map(|level| {
            let task = Task::new(line.clone(), level, Hold::Momentary, tag).with_pace(pace);
            self.light.submit(task)
        })
    }

    /// Enter or leave fire-alarm mode.
    ///
    /// Entering holds the siren on and the door open and locks out normal
    /// commands on both lines. Leaving silences the siren, releases the door
    /// and restores normal operation.
    pub fn set_fire_alarm(&self, active: bool) {
        let alarm = self.config.alarm();
        let door = self.config.door();

        if active {
            warn!("Fire alarm raised");
            self.alarm
                .set_emergency(true, emergency_hold(alarm, TAG_FIRE_ALARM));
            self.door
                .set_emergency(true, emergency_hold(door, TAG_FIRE_DOOR));
        } else {
            info!("Fire alarm cleared");
            self.alarm.set_emergency(false, emergency_release(alarm));
            self.door.set_emergency(false, emergency_release(door));
        }
    }

    /// Check if either fire-alarm line is still in emergency mode.
    pub fn is_fire_alarm_active(&self) -> bool {
        self.alarm.is_emergency() || self.door.is_emergency()
    }

    /// Per-subsystem counters.
    pub fn stats(&self) -> Vec<(Subsystem, LineStats)> {
        Subsystem::ALL
            .iter()
            .map(|&which| (which, self.executor(which).stats()))
            .collect()
    }

    /// Stop every executor and wait for their workers.
    pub async fn shutdown(&self) {
        for which in Subsystem::ALL {
            self.executor(which).shutdown().await;
        }
        info!("Coordinator shut down");
    }
}

fn emergency_hold(line: LineId, tag: &str) -> Task {
    Task::new(line, Level::Assert, Hold::Momentary, tag)
}

fn emergency_release(line: LineId) -> Task {
    Task::new(line, Level::Deassert, Hold::Sustained, TAG_FIRE_CANCEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portcullis_hardware::mock::{MockDriver, MockDriverHandle};
    use rstest::rstest;

    fn setup() -> (Coordinator, MockDriverHandle) {
        let (mock, handle) = MockDriver::new();
        let coordinator = Coordinator::start(GpioConfig::default(), AnyLineDriver::Mock(mock))
            .expect("default config is valid");
        (coordinator, handle)
    }

    #[rstest]
    #[case("door", Subsystem::Door)]
    #[case("ALARM", Subsystem::Alarm)]
    #[case(" light ", Subsystem::Light)]
    fn test_subsystem_from_str(#[case] input: &str, #[case] expected: Subsystem) {
        assert_eq!(input.parse::<Subsystem>().unwrap(), expected);
    }

    #[test]
    fn test_subsystem_from_str_unknown() {
        let err = "gate".parse::<Subsystem>().unwrap_err();
        assert!(matches!(err, Error::UnknownSubsystem(name) if name == "gate"));
    }

    #[test]
    fn test_subsystem_display_roundtrip() {
        for which in Subsystem::ALL {
            assert_eq!(which.to_string().parse::<Subsystem>().unwrap(), which);
        }
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_config() {
        let (mock, _) = MockDriver::new();
        let config = GpioConfig {
            poll_interval_ms: 0,
            ..GpioConfig::default()
        };
        let result = Coordinator::start(config, AnyLineDriver::Mock(mock));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_executors_are_named_and_running() {
        let (coordinator, _) = setup();
        for which in Subsystem::ALL {
            let executor = coordinator.executor(which);
            assert_eq!(executor.name(), which.as_str());
            assert!(executor.is_running());
        }
        coordinator.shutdown().await;
        assert!(!coordinator.executor(Subsystem::Door).is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_line_targets_primary_nodes() {
        let (coordinator, handle) = setup();
        let config = coordinator.config().clone();

        coordinator.open_line(Subsystem::Door, Duration::ZERO);
        coordinator.sound_alarm(Duration::ZERO);
        coordinator.open_line(Subsystem::Light, Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(handle.levels(&config.door()), vec![Level::Assert]);
        assert_eq!(handle.levels(&config.alarm()), vec![Level::Assert]);
        assert_eq!(handle.levels(&config.light_white()), vec![Level::Assert]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_alarm_drops_door_commands() {
        let (coordinator, handle) = setup();
        let door = coordinator.config().door();

        coordinator.set_fire_alarm(true);
        assert!(coordinator.open_door(Duration::from_secs(3)).is_dropped());
        assert!(coordinator.sound_alarm(Duration::from_secs(3)).is_dropped());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(handle.levels(&door), vec![Level::Assert]);

        let stats = coordinator.stats();
        let (_, door_stats) = stats
            .iter()
            .find(|(which, _)| *which == Subsystem::Door)
            .unwrap();
        assert_eq!(door_stats.dropped, 1);
    }
}
