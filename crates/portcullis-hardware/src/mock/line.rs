//! Mock line driver that records writes.

use crate::error::{LineWriteError, Result};
use crate::traits::LineDriver;
use portcullis_core::{Level, LineId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;

/// One successful write seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWrite {
    pub line: LineId,
    pub level: Level,
    /// Tokio clock reading, so paused-time tests see virtual instants.
    pub at: Instant,
}

#[derive(Debug, Default)]
struct MockState {
    writes: Vec<LineWrite>,
    failing: HashSet<LineId>,
    failed_attempts: usize,
}

/// In-memory line driver for testing and development.
///
/// Writes are appended to a shared log that the paired
/// [`MockDriverHandle`] can inspect. Clones share the same log, so one mock
/// can back several executors.
///
/// # Examples
///
/// ```
/// use portcullis_core::{Level, LineId};
/// use portcullis_hardware::{LineDriver, LineWriteError, mock::MockDriver};
///
/// let (driver, handle) = MockDriver::new();
/// let siren = LineId::new("/sys/class/gpio/gpio2/value");
///
/// driver.write(&siren, Level::Assert).unwrap();
///
/// handle.fail_line(&siren);
/// assert!(matches!(
///     driver.write(&siren, Level::Deassert),
///     Err(LineWriteError::Unavailable { .. })
/// ));
///
/// assert_eq!(handle.levels(&siren), vec![Level::Assert]);
/// assert_eq!(handle.failed_attempts(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    /// Create a new mock driver and the handle used to inspect it.
    pub fn new() -> (Self, MockDriverHandle) {
        let state = Arc::new(Mutex::new(MockState::default()));
        let driver = Self {
            state: Arc::clone(&state),
        };
        (driver, MockDriverHandle { state })
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new().0
    }
}

impl LineDriver for MockDriver {
    fn write(&self, line: &LineId, level: Level) -> Result<()> {
        let mut state = lock(&self.state);
        if state.failing.contains(line) {
            state.failed_attempts += 1;
            return Err(LineWriteError::unavailable(line.as_str()));
        }
        state.writes.push(LineWrite {
            line: line.clone(),
            level,
            at: Instant::now(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Handle for inspecting and steering a [`MockDriver`].
#[derive(Debug, Clone)]
pub struct MockDriverHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockDriverHandle {
    /// Every successful write, in order.
    pub fn writes(&self) -> Vec<LineWrite> {
        lock(&self.state).writes.clone()
    }

    /// Successful writes to one line, in order.
    pub fn writes_for(&self, line: &LineId) -> Vec<LineWrite> {
        lock(&self.state)
            .writes
            .iter()
            .filter(|w| &w.line == line)
            .cloned()
            .collect()
    }

    /// Levels written to one line, in order.
    pub fn levels(&self, line: &LineId) -> Vec<Level> {
        self.writes_for(line).into_iter().map(|w| w.level).collect()
    }

    /// Last level written to a line, if any.
    pub fn current_level(&self, line: &LineId) -> Option<Level> {
        lock(&self.state)
            .writes
            .iter()
            .rev()
            .find(|w| &w.line == line)
            .map(|w| w.level)
    }

    /// Make every following write to `line` fail.
    pub fn fail_line(&self, line: &LineId) {
        lock(&self.state).failing.insert(line.clone());
    }

    /// Undo [`fail_line`](Self::fail_line).
    pub fn restore_line(&self, line: &LineId) {
        lock(&self.state).failing.remove(line);
    }

    /// Number of writes rejected because the line was failing.
    pub fn failed_attempts(&self) -> usize {
        lock(&self.state).failed_attempts
    }

    /// Forget recorded writes (failure settings stay).
    pub fn clear(&self) {
        lock(&self.state).writes.clear();
    }
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
