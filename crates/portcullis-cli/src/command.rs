//! Line-oriented control commands.
//!
//! One command per input line:
//!
//! | Input | Effect |
//! |-------|--------|
//! | `door <ms>` / `alarm <ms>` / `light <ms>` | assert the line, auto-off after `ms` (0 = stay on) |
//! | `boot` | boot light sequence |
//! | `granted` / `denied` | recognition feedback |
//! | `fire on` / `fire off` | raise or clear the fire alarm |
//! | `status` | print per-line counters |
//! | `quit` | shut down |

use portcullis_core::{Error, Result};
use portcullis_executor::{Coordinator, Submission, Subsystem};
use std::fmt::Write as _;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open { which: Subsystem, duration: Duration },
    Boot,
    Feedback { success: bool },
    Fire { active: bool },
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err(Error::InvalidCommand("empty input".to_string()));
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(Error::InvalidCommand(format!("unexpected argument: {extra}")));
        }

        let command = match (head.to_ascii_lowercase().as_str(), arg) {
            ("door" | "alarm" | "light", Some(ms)) => {
                let ms: u64 = ms
                    .parse()
                    .map_err(|_| Error::InvalidCommand(format!("invalid duration: {ms}")))?;
                Command::Open {
                    which: head.parse()?,
                    duration: Duration::from_millis(ms),
                }
            }
            ("door" | "alarm" | "light", None) => {
                return Err(Error::InvalidCommand(format!("{head} needs a duration in ms")));
            }
            ("boot", None) => Command::Boot,
            ("granted", None) => Command::Feedback { success: true },
            ("denied", None) => Command::Feedback { success: false },
            ("fire", Some("on")) => Command::Fire { active: true },
            ("fire", Some("off")) => Command::Fire { active: false },
            ("status", None) => Command::Status,
            ("quit" | "exit", None) => Command::Quit,
            _ => return Err(Error::InvalidCommand(s.trim().to_string())),
        };
        Ok(command)
    }
}

impl Command {
    /// Run the command and return a one-line summary for the operator.
    pub fn execute(&self, coordinator: &Coordinator) -> String {
        match self {
            Command::Open { which, duration } => {
                describe(*which, coordinator.open_line(*which, *duration))
            }
            Command::Boot => describe(Subsystem::Light, coordinator.boot_light_sequence()),
            Command::Feedback { success } => {
                let outcomes = coordinator.recognition_feedback(*success);
                let dropped = outcomes.iter().filter(|o| o.is_dropped()).count();
                format!("light: feedback queued ({dropped} dropped)")
            }
            Command::Fire { active } => {
                coordinator.set_fire_alarm(*active);
                if *active {
                    "fire alarm raised".to_string()
                } else {
                    "fire alarm cleared".to_string()
                }
            }
            Command::Status => status(coordinator),
            Command::Quit => "bye".to_string(),
        }
    }
}

fn describe(which: Subsystem, outcome: Submission) -> String {
    match outcome {
        Submission::Queued => format!("{which}: queued"),
        Submission::Extended { remaining } => {
            format!("{which}: extended, {}ms remaining", remaining.as_millis())
        }
        Submission::Dropped(reason) => format!("{which}: dropped ({reason:?})"),
    }
}

fn status(coordinator: &Coordinator) -> String {
    let mut out = String::new();
    for (which, stats) in coordinator.stats() {
        let executor = coordinator.executor(which);
        let last = stats
            .last_write_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{which}: emergency={} pending={} writes={} failures={} extended={} dropped={} last_write={last}",
            executor.is_emergency(),
            executor.pending(),
            stats.writes,
            stats.write_failures,
            stats.extended,
            stats.dropped,
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("door 3000", Command::Open { which: Subsystem::Door, duration: Duration::from_millis(3000) })]
    #[case("ALARM 0", Command::Open { which: Subsystem::Alarm, duration: Duration::ZERO })]
    #[case("  light   250 ", Command::Open { which: Subsystem::Light, duration: Duration::from_millis(250) })]
    #[case("boot", Command::Boot)]
    #[case("granted", Command::Feedback { success: true })]
    #[case("denied", Command::Feedback { success: false })]
    #[case("fire on", Command::Fire { active: true })]
    #[case("fire off", Command::Fire { active: false })]
    #[case("status", Command::Status)]
    #[case("exit", Command::Quit)]
    fn test_parse_valid(#[case] input: &str, #[case] expected: Command) {
        assert_eq!(input.parse::<Command>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("door")]
    #[case("door -5")]
    #[case("door soon")]
    #[case("fire maybe")]
    #[case("boot now")]
    #[case("door 10 20")]
    #[case("gate 100")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Command>(),
            Err(Error::InvalidCommand(_))
        ));
    }
}
