//! Per-line task executor.
//!
//! A [`LineExecutor`] owns one output subsystem. Producers on any thread hand
//! it [`Task`]s; a single worker task applies them one at a time, so two
//! writes to the same line never race.
//!
//! # Architecture
//!
//! ```text
//! submit() ──┐                           ┌──────────────┐
//!            ├──► LineState (mutex) ───► │ Worker task  │ ──► LineDriver::write
//! set_emergency()   pending / deadline   │ (one / line) │
//!                   emergency / stats    └──────────────┘
//!                          ▲                    │
//!                          └── Notify wake ─────┘
//! ```
//!
//! The mutex is only held for short bookkeeping and never across an
//! `.await`. The worker suspends in exactly three places: waiting for work,
//! waiting out a timed hold, and dwelling after a paced write.
//!
//! # Submission policy
//!
//! Evaluated in one critical section per call:
//!
//! 1. In emergency mode, anything that is not [`Hold::Sustained`] is dropped.
//! 2. If a timed hold is running and the new task is [`Hold::Timed`], the
//!    running deadline is pushed back by the new duration instead of queuing.
//! 3. Otherwise the task joins the tail of the queue.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use portcullis_core::{Hold, Level, Task};
//! use portcullis_executor::{LineExecutor, Submission};
//! use portcullis_hardware::{AnyLineDriver, mock::MockDriver};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (mock, handle) = MockDriver::new();
//!     let door = LineExecutor::spawn("door", AnyLineDriver::Mock(mock), Duration::from_millis(10));
//!
//!     let open = Task::new("/mock/door", Level::Assert, Hold::Timed(Duration::from_millis(30)), "door");
//!     assert_eq!(door.submit(open), Submission::Queued);
//!
//!     tokio::time::sleep(Duration::from_millis(100)).await;
//!     assert_eq!(handle.levels(&"/mock/door".into()), vec![Level::Assert, Level::Deassert]);
//!
//!     door.shutdown().await;
//! }
//! ```

use chrono::{DateTime, Utc};
use portcullis_core::constants::TAG_AUTO_OFF;
use portcullis_core::{Hold, Level, Task};
use portcullis_hardware::{AnyLineDriver, LineDriver};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of [`LineExecutor::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Appended to the line's queue.
    Queued,

    /// Merged into the running timed hold.
    Extended {
        /// Hold time left after the extension.
        remaining: Duration,
    },

    /// Discarded without any write.
    Dropped(DropReason),
}

impl Submission {
    /// Check if the task was discarded.
    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }
}

/// Why a submission was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DropReason {
    /// The line is held by emergency mode.
    Emergency,
}

/// Counters describing what a line executor has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Tasks appended to the queue (overrides included).
    pub queued: u64,

    /// Submissions merged into a running timed hold.
    pub extended: u64,

    /// Submissions rejected while in emergency mode.
    pub dropped: u64,

    /// Queued tasks thrown away on emergency entry.
    pub discarded: u64,

    /// Successful line writes, auto-off included.
    pub writes: u64,

    /// Line writes that failed.
    pub write_failures: u64,

    /// Wall-clock time of the last successful write.
    pub last_write_at: Option<DateTime<Utc>>,
}

/// Longest hold the executor will schedule; longer holds are capped.
const MAX_HOLD: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `from + duration`, capped at [`MAX_HOLD`] and saturating instead of
/// overflowing the clock.
fn deadline_after(from: Instant, duration: Duration) -> Instant {
    from.checked_add(duration.min(MAX_HOLD)).unwrap_or(from)
}

#[derive(Debug, Default)]
struct LineState {
    pending: VecDeque<Task>,
    emergency: bool,
    /// When the running timed task auto-reverts.
    deadline: Option<Instant>,
    /// Bumped on every emergency entry; a running wait compares against it.
    preemptions: u64,
    stats: LineStats,
}

#[derive(Debug)]
struct Shared {
    name: String,
    state: Mutex<LineState>,
    wake: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, LineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_pop(&self) -> Option<(Task, u64)> {
        let mut state = self.lock();
        let epoch = state.preemptions;
        state.pending.pop_front().map(|task| (task, epoch))
    }

    /// Wait until a task is available. Also returns the preemption epoch the
    /// task was taken under.
    async fn next_task(&self) -> (Task, u64) {
        loop {
            if let Some(next) = self.try_pop() {
                return next;
            }
            self.wake.notified().await;
        }
    }

    fn preempted_since(&self, epoch: u64) -> bool {
        self.lock().preemptions != epoch
    }

    fn check_deadline(&self, epoch: u64) -> HoldPoll {
        let mut guard = self.lock();
        let state = &mut *guard;
        if state.preemptions != epoch {
            state.deadline = None;
            return HoldPoll::Done(WaitOutcome::Preempted);
        }

        let now = Instant::now();
        match state.deadline {
            Some(deadline) if now < deadline => HoldPoll::Wait(deadline - now),
            _ => {
                state.deadline = None;
                if state.emergency {
                    HoldPoll::Done(WaitOutcome::Preempted)
                } else {
                    HoldPoll::Done(WaitOutcome::Elapsed)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    Elapsed,
    Preempted,
}

enum HoldPoll {
    Wait(Duration),
    Done(WaitOutcome),
}

/// Owns one output subsystem and its worker task.
///
/// Dropping the executor stops the worker; [`shutdown`](Self::shutdown)
/// additionally waits for it to finish.
#[derive(Debug)]
pub struct LineExecutor {
    shared: Arc<Shared>,
    cancel: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl LineExecutor {
    /// Start an executor and its worker loop.
    ///
    /// `poll_interval` bounds how long a timed hold sleeps between checks of
    /// its deadline; it is clamped to at least 1ms.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(name: impl Into<String>, driver: AnyLineDriver, poll_interval: Duration) -> Self {
        let name = name.into();
        let shared = Arc::new(Shared {
            name: name.clone(),
            state: Mutex::new(LineState::default()),
            wake: Notify::new(),
        });
        let cancel = CancellationToken::new();

        info!("Starting line executor {} ({} driver)", name, driver.name());

        let worker = Worker {
            shared: Arc::clone(&shared),
            driver,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(worker.run());

        Self {
            shared,
            cancel,
            worker: Mutex::new(Some(handle)),
        }
    }

    /// Hand a task to the line.
    ///
    /// Never blocks on the worker. The returned [`Submission`] reports which
    /// policy branch applied; callers that only care about the side effect can
    /// ignore it.
    pub fn submit(&self, task: Task) -> Submission {
        let outcome = {
            let mut guard = self.shared.lock();
            let state = &mut *guard;

            if state.emergency && !task.hold().is_sustained() {
                state.stats.dropped += 1;
                warn!(
                    "Line {} in emergency mode, dropping task {}",
                    self.shared.name, task
                );
                Submission::Dropped(DropReason::Emergency)
            } else if let Some(extra) = task.hold().timed()
                && let Some(deadline) = state.deadline.as_mut()
                && Instant::now() < *deadline
            {
                *deadline = deadline_after(*deadline, extra);
                state.stats.extended += 1;
                let remaining = deadline.saturating_duration_since(Instant::now());
                debug!(
                    "Line {} extending active hold by {}ms [{}], {}ms remaining",
                    self.shared.name,
                    extra.as_millis(),
                    task.tag(),
                    remaining.as_millis()
                );
                Submission::Extended { remaining }
            } else {
                debug!("Line {} queued task {}", self.shared.name, task);
                state.pending.push_back(task);
                state.stats.queued += 1;
                Submission::Queued
            }
        };

        if outcome == Submission::Queued {
            self.shared.wake.notify_one();
        }
        outcome
    }

    /// Enter or leave emergency mode and inject `override_task`.
    ///
    /// Entering discards every queued task, abandons a running timed hold
    /// without its auto-off, and queues the override (normally a
    /// [`Hold::Momentary`] assert that stays in place). Leaving clears the
    /// flag and queues the override (normally a [`Hold::Sustained`] deassert).
    ///
    /// Returns how many queued tasks were discarded.
    pub fn set_emergency(&self, active: bool, override_task: Task) -> usize {
        let tag = override_task.tag().to_string();
        let discarded = {
            let mut guard = self.shared.lock();
            let state = &mut *guard;

            state.emergency = active;
            let discarded = if active {
                state.preemptions += 1;
                state.deadline = None;
                let discarded = state.pending.len();
                state.pending.clear();
                state.stats.discarded += discarded as u64;
                discarded
            } else {
                0
            };
            state.pending.push_back(override_task);
            state.stats.queued += 1;
            discarded
        };
        self.shared.wake.notify_one();

        if active {
            warn!(
                "Line {} entering emergency mode [{}], {} queued task(s) discarded",
                self.shared.name, tag, discarded
            );
        } else {
            info!("Line {} leaving emergency mode [{}]", self.shared.name, tag);
        }
        discarded
    }

    /// Subsystem name the executor was spawned with.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn is_emergency(&self) -> bool {
        self.shared.lock().emergency
    }

    /// Number of tasks waiting behind the active one.
    pub fn pending(&self) -> usize {
        self.shared.lock().pending.len()
    }

    /// Time left on the running timed hold, if one is active.
    pub fn remaining_hold(&self) -> Option<Duration> {
        let deadline = self.shared.lock().deadline?;
        let now = Instant::now();
        (now < deadline).then(|| deadline - now)
    }

    /// Snapshot of the line's counters.
    pub fn stats(&self) -> LineStats {
        self.shared.lock().stats.clone()
    }

    /// Check if the worker loop is still alive.
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// Queued tasks are abandoned and a running timed hold ends without its
    /// auto-off write. Calling this more than once is harmless.
    pub async fn shutdown(&self) {
        self.cancel.cancel();

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => error!("Line executor {} worker panicked: {}", self.shared.name, e),
            }
            info!("Line executor {} shut down", self.shared.name);
        }
    }
}

impl Drop for LineExecutor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Worker {
    shared: Arc<Shared>,
    driver: AnyLineDriver,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl Worker {
    async fn run(self) {
        loop {
            let (task, epoch) = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                next = self.shared.next_task() => next,
            };

            self.apply(&task, task.level(), task.tag());

            match task.hold() {
                Hold::Timed(duration) => {
                    let outcome = tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => break,
                        outcome = self.hold(duration, epoch) => outcome,
                    };
                    match outcome {
                        WaitOutcome::Elapsed => self.apply(&task, Level::Deassert, TAG_AUTO_OFF),
                        WaitOutcome::Preempted => debug!(
                            "Line {} hold [{}] preempted, skipping auto-off",
                            self.shared.name,
                            task.tag()
                        ),
                    }
                }
                Hold::Momentary if !task.pace().is_zero() => {
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => break,
                        _ = self.dwell(task.pace(), epoch) => {}
                    }
                }
                Hold::Momentary | Hold::Sustained => {}
            }
        }
        debug!("Line executor {} worker stopped", self.shared.name);
    }

    /// Wait out a timed hold, following extensions and noticing preemption
    /// within one poll interval.
    async fn hold(&self, duration: Duration, epoch: u64) -> WaitOutcome {
        self.shared.lock().deadline = Some(deadline_after(Instant::now(), duration));

        loop {
            match self.shared.check_deadline(epoch) {
                HoldPoll::Wait(remaining) => {
                    tokio::time::sleep(remaining.min(self.poll_interval)).await;
                }
                HoldPoll::Done(outcome) => return outcome,
            }
        }
    }

    /// Keep the line untouched for `pace` after a momentary write.
    async fn dwell(&self, pace: Duration, epoch: u64) -> WaitOutcome {
        let until = deadline_after(Instant::now(), pace);

        loop {
            if self.shared.preempted_since(epoch) {
                return WaitOutcome::Preempted;
            }
            let now = Instant::now();
            if now >= until {
                return WaitOutcome::Elapsed;
            }
            tokio::time::sleep((until - now).min(self.poll_interval)).await;
        }
    }

    fn apply(&self, task: &Task, level: Level, tag: &str) {
        debug!(
            "Line {} write {} -> {} [{}]",
            self.shared.name,
            task.line(),
            level,
            tag
        );

        match self.driver.write(task.line(), level) {
            Ok(()) => {
                let mut state = self.shared.lock();
                state.stats.writes += 1;
                state.stats.last_write_at = Some(Utc::now());
            }
            Err(e) => {
                error!("Line {} write failed [{}]: {}", self.shared.name, tag, e);
                self.shared.lock().stats.write_failures += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portcullis_core::LineId;
    use portcullis_hardware::mock::{MockDriver, MockDriverHandle};

    const NODE: &str = "/mock/door";
    const POLL: Duration = Duration::from_millis(50);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn line() -> LineId {
        LineId::new(NODE)
    }

    fn timed(millis: u64) -> Task {
        Task::new(NODE, Level::Assert, Hold::Timed(ms(millis)), "door")
    }

    fn setup() -> (LineExecutor, MockDriverHandle) {
        let (mock, handle) = MockDriver::new();
        (LineExecutor::spawn("door", AnyLineDriver::Mock(mock), POLL), handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_momentary_task_writes_once() {
        let (executor, handle) = setup();

        let task = Task::new(NODE, Level::Assert, Hold::Momentary, "door");
        assert_eq!(executor.submit(task), Submission::Queued);

        tokio::time::sleep(ms(1000)).await;
        assert_eq!(handle.levels(&line()), vec![Level::Assert]);
        assert_eq!(executor.stats().writes, 1);
        assert!(executor.stats().last_write_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_task_auto_off() {
        let (executor, handle) = setup();
        let start = Instant::now();

        executor.submit(timed(300));
        tokio::time::sleep(ms(100)).await;
        assert!(executor.remaining_hold().is_some());

        tokio::time::sleep(ms(900)).await;
        let writes = handle.writes_for(&line());
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].level, Level::Deassert);
        assert!(writes[1].at - start >= ms(300));
        assert!(writes[1].at - start < ms(300) + POLL);
        assert_eq!(executor.remaining_hold(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_submission_extends_active_hold() {
        let (executor, handle) = setup();

        executor.submit(timed(1000));
        tokio::time::sleep(ms(400)).await;

        let Submission::Extended { remaining } = executor.submit(timed(500)) else {
            panic!("expected the running hold to be extended");
        };
        assert!(remaining > ms(1000) && remaining <= ms(1100));
        assert_eq!(executor.pending(), 0);

        tokio::time::sleep(ms(3000)).await;
        assert_eq!(handle.levels(&line()), vec![Level::Assert, Level::Deassert]);
        assert_eq!(executor.stats().extended, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_momentary_during_hold_is_queued_after_auto_off() {
        let (executor, handle) = setup();

        executor.submit(timed(500));
        tokio::time::sleep(ms(100)).await;

        let outcome = executor.submit(Task::new(NODE, Level::Assert, Hold::Momentary, "door"));
        assert_eq!(outcome, Submission::Queued);
        assert_eq!(executor.pending(), 1);
        assert_eq!(handle.levels(&line()), vec![Level::Assert]);

        tokio::time::sleep(ms(1000)).await;
        assert_eq!(
            handle.levels(&line()),
            vec![Level::Assert, Level::Deassert, Level::Assert]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_emergency_drops_normal_submissions() {
        let (executor, handle) = setup();

        executor.set_emergency(true, Task::new(NODE, Level::Assert, Hold::Momentary, "fire_door"));
        tokio::time::sleep(ms(100)).await;
        handle.clear();

        for task in [
            timed(300),
            Task::new(NODE, Level::Deassert, Hold::Momentary, "door"),
        ] {
            assert_eq!(executor.submit(task), Submission::Dropped(DropReason::Emergency));
        }

        tokio::time::sleep(ms(1000)).await;
        assert!(handle.writes().is_empty());
        assert_eq!(executor.stats().dropped, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_emergency_discards_queue_and_skips_auto_off() {
        let (executor, handle) = setup();

        executor.submit(timed(1000));
        executor.submit(Task::new(NODE, Level::Deassert, Hold::Momentary, "door"));
        executor.submit(Task::new(NODE, Level::Assert, Hold::Momentary, "door"));
        tokio::time::sleep(ms(200)).await;

        let discarded =
            executor.set_emergency(true, Task::new(NODE, Level::Assert, Hold::Momentary, "fire_door"));
        assert_eq!(discarded, 2);
        assert!(executor.is_emergency());

        tokio::time::sleep(ms(5000)).await;
        assert_eq!(handle.levels(&line()), vec![Level::Assert, Level::Assert]);
        assert_eq!(executor.stats().discarded, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_emergency_restores_normal_policy() {
        let (executor, handle) = setup();

        executor.set_emergency(true, Task::new(NODE, Level::Assert, Hold::Momentary, "fire_door"));
        tokio::time::sleep(ms(100)).await;
        let discarded = executor.set_emergency(
            false,
            Task::new(NODE, Level::Deassert, Hold::Sustained, "fire_cancel"),
        );
        assert_eq!(discarded, 0);
        assert!(!executor.is_emergency());

        tokio::time::sleep(ms(100)).await;
        assert_eq!(handle.levels(&line()), vec![Level::Assert, Level::Deassert]);

        assert_eq!(executor.submit(timed(200)), Submission::Queued);
        tokio::time::sleep(ms(1000)).await;
        assert_eq!(
            handle.levels(&line()),
            vec![Level::Assert, Level::Deassert, Level::Assert, Level::Deassert]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sustained_marker_accepted_during_emergency() {
        let (executor, handle) = setup();

        executor.set_emergency(true, Task::new(NODE, Level::Assert, Hold::Momentary, "fire_door"));
        let outcome = executor.submit(Task::new(NODE, Level::Deassert, Hold::Sustained, "manual"));
        assert_eq!(outcome, Submission::Queued);

        tokio::time::sleep(ms(100)).await;
        assert_eq!(handle.levels(&line()), vec![Level::Assert, Level::Deassert]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failure_does_not_stop_loop() {
        let (executor, handle) = setup();
        handle.fail_line(&line());

        executor.submit(timed(100));
        tokio::time::sleep(ms(500)).await;
        assert_eq!(executor.stats().write_failures, 2);
        assert!(handle.writes().is_empty());

        handle.restore_line(&line());
        executor.submit(Task::new(NODE, Level::Assert, Hold::Momentary, "door"));
        tokio::time::sleep(ms(100)).await;
        assert_eq!(handle.levels(&line()), vec![Level::Assert]);
        assert!(executor.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_paced_tasks_are_spaced() {
        let (executor, handle) = setup();
        let start = Instant::now();

        for level in [Level::Assert, Level::Deassert, Level::Assert] {
            executor.submit(Task::new(NODE, level, Hold::Momentary, "light").with_pace(ms(200)));
        }

        tokio::time::sleep(ms(1000)).await;
        let offsets: Vec<Duration> = handle
            .writes_for(&line())
            .iter()
            .map(|w| w.at - start)
            .collect();
        assert_eq!(offsets.len(), 3);
        assert!(offsets[1] - offsets[0] >= ms(200));
        assert!(offsets[2] - offsets[1] >= ms(200));
        assert!(offsets[2] < ms(400) + POLL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_emergency_cuts_paced_dwell_short() {
        let (executor, handle) = setup();
        let start = Instant::now();

        for level in [Level::Assert, Level::Deassert, Level::Assert] {
            executor.submit(Task::new(NODE, level, Hold::Momentary, "light").with_pace(ms(200)));
        }
        tokio::time::sleep(ms(50)).await;
        assert_eq!(executor.pending(), 2);

        let discarded =
            executor.set_emergency(true, Task::new(NODE, Level::Assert, Hold::Momentary, "fire"));
        assert_eq!(discarded, 2);

        tokio::time::sleep(ms(1000)).await;
        let writes = handle.writes_for(&line());
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].level, Level::Assert);
        assert!(writes[1].at - start <= ms(50) + POLL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_timed_hold_keeps_worker_alive() {
        let (executor, handle) = setup();

        executor.submit(Task::new(NODE, Level::Assert, Hold::Timed(Duration::MAX), "door"));
        tokio::time::sleep(ms(1000)).await;

        assert!(executor.is_running());
        assert_eq!(handle.levels(&line()), vec![Level::Assert]);
        assert!(executor.remaining_hold().is_some_and(|left| left > ms(1000)));

        // The line still takes extensions and shuts down cleanly.
        assert!(matches!(executor.submit(timed(500)), Submission::Extended { .. }));
        executor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_extension_saturates() {
        let (executor, handle) = setup();

        executor.submit(timed(1_000_000));
        tokio::time::sleep(ms(10)).await;

        let outcome = executor.submit(Task::new(NODE, Level::Assert, Hold::Timed(Duration::MAX), "door"));
        let Submission::Extended { remaining } = outcome else {
            panic!("expected the running hold to be extended");
        };
        assert!(remaining > ms(1_000_000));

        tokio::time::sleep(ms(1000)).await;
        assert!(executor.is_running());
        assert_eq!(handle.levels(&line()), vec![Level::Assert]);
        executor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timed_hold_has_no_auto_off() {
        let (executor, handle) = setup();

        executor.submit(Task::new(NODE, Level::Assert, Hold::Timed(Duration::ZERO), "door"));
        tokio::time::sleep(ms(500)).await;

        assert_eq!(handle.levels(&line()), vec![Level::Assert]);
        assert_eq!(executor.remaining_hold(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_worker() {
        let (executor, handle) = setup();

        executor.submit(timed(1000));
        tokio::time::sleep(ms(100)).await;
        executor.shutdown().await;
        assert!(!executor.is_running());

        assert_eq!(executor.submit(Task::new(NODE, Level::Assert, Hold::Momentary, "door")), Submission::Queued);
        tokio::time::sleep(ms(2000)).await;
        assert_eq!(handle.levels(&line()), vec![Level::Assert]);

        executor.shutdown().await;
    }
}
