//! Stopwatch state machine.
//!
//! A [`Timer`] is either idle or holds one active timer that is running or
//! paused:
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --resume--> Running
//!                    |                  |
//!                    +------stop--------+--> Idle
//! ```
//!
//! Elapsed time is never stored while running. Instead the timer keeps an
//! anchor instant such that `elapsed = now - anchor`, and pausing snapshots
//! the elapsed seconds so resume can rebase the anchor. This makes
//! [`Timer::elapsed_seconds`] a pure function of state and "now", correct no
//! matter how often it is polled.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::types::{Activity, Subject, ValidationError};

/// Timer phase violations and invalid start arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A timer is already running or paused.
    #[error("a timer is already running for {subject}; stop the current timer first")]
    AlreadyRunning { subject: Subject },

    #[error("no running timer to pause")]
    NotRunning,

    #[error("the timer is not paused")]
    NotPaused,

    #[error("no active timer")]
    NoActiveTimer,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Observable phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

impl TimerPhase {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of the active timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub subject: Subject,
    pub activity: Activity,
    pub elapsed_seconds: i64,
}

/// What a stopped timer measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedTimer {
    pub subject: Subject,
    pub activity: Activity,
    pub elapsed_seconds: i64,
}

impl FinishedTimer {
    /// Whole minutes, truncated.
    pub const fn minutes(&self) -> i64 {
        self.elapsed_seconds / 60
    }
}

#[derive(Debug, Clone)]
struct ActiveTimer {
    subject: Subject,
    activity: Activity,
    anchor_start: DateTime<Utc>,
    /// Full-precision elapsed time frozen at the last pause.
    paused_elapsed: Duration,
    running: bool,
}

impl ActiveTimer {
    fn elapsed_delta(&self, now: DateTime<Utc>) -> Duration {
        if self.running {
            // A clock stepped backwards must not produce negative time.
            (now - self.anchor_start).max(Duration::zero())
        } else {
            self.paused_elapsed
        }
    }

    /// Whole seconds; truncation happens only here.
    fn elapsed_at(&self, now: DateTime<Utc>) -> i64 {
        self.elapsed_delta(now).num_seconds()
    }

    const fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else {
            TimerPhase::Paused
        }
    }
}

/// The single stopwatch. Idle when it holds no active timer.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    active: Option<ActiveTimer>,
}

impl Timer {
    pub const fn new() -> Self {
        Self { active: None }
    }

    pub const fn phase(&self) -> TimerPhase {
        match &self.active {
            None => TimerPhase::Idle,
            Some(active) => active.phase(),
        }
    }

    /// Starts a fresh timer at `now`.
    ///
    /// Fails without touching the current timer if one is running or paused.
    pub fn start(
        &mut self,
        subject: &str,
        activity: &str,
        now: DateTime<Utc>,
    ) -> Result<(), TimerError> {
        let subject = Subject::new(subject)?;
        let activity = Activity::new(activity)?;
        if let Some(active) = &self.active {
            return Err(TimerError::AlreadyRunning {
                subject: active.subject.clone(),
            });
        }
        self.active = Some(ActiveTimer {
            subject,
            activity,
            anchor_start: now,
            paused_elapsed: Duration::zero(),
            running: true,
        });
        Ok(())
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        match &mut self.active {
            Some(active) if active.running => {
                active.paused_elapsed = active.elapsed_delta(now);
                active.running = false;
                Ok(())
            }
            _ => Err(TimerError::NotRunning),
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        match &mut self.active {
            Some(active) if !active.running => {
                active.anchor_start = now - active.paused_elapsed;
                active.running = true;
                Ok(())
            }
            _ => Err(TimerError::NotPaused),
        }
    }

    /// Clears the active timer and reports what it measured.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<FinishedTimer, TimerError> {
        let active = self.active.take().ok_or(TimerError::NoActiveTimer)?;
        let elapsed_seconds = active.elapsed_at(now);
        Ok(FinishedTimer {
            subject: active.subject,
            activity: active.activity,
            elapsed_seconds,
        })
    }

    /// Seconds attributed to the active timer, 0 when idle.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.active.as_ref().map_or(0, |active| active.elapsed_at(now))
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Option<TimerSnapshot> {
        self.active.as_ref().map(|active| TimerSnapshot {
            phase: active.phase(),
            subject: active.subject.clone(),
            activity: active.activity.clone(),
            elapsed_seconds: active.elapsed_at(now),
        })
    }
}
