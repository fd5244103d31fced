//! The tracker context: one clock, one timer, one ledger.
//!
//! # Thread Safety
//!
//! Timer and ledger sit behind a single `Mutex`, so every operation is atomic
//! with respect to every other. A display thread polling
//! [`StudyTracker::elapsed_seconds`] sees the state either before or after a
//! concurrent pause/resume/stop, never in between. Share a tracker across
//! threads with `Arc<StudyTracker<_>>`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::clock::{Clock, SystemClock};
use crate::ledger::Ledger;
use crate::report::{self, Summary};
use crate::session::{SessionFilter, StudySession};
use crate::timer::{Timer, TimerError, TimerPhase, TimerSnapshot};
use crate::types::{SessionId, ValidationError};

#[derive(Debug, Default)]
struct TrackerState {
    timer: Timer,
    ledger: Ledger,
}

/// Study-time tracker owning its clock, timer and session ledger.
///
/// Independent instances share nothing.
#[derive(Debug)]
pub struct StudyTracker<C = SystemClock> {
    clock: C,
    state: Mutex<TrackerState>,
}

impl Default for StudyTracker<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> StudyTracker<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: Mutex::new(TrackerState::default()),
        }
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Transitions validate before mutating, so a poisoned lock still guards
    /// consistent state.
    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Timer ==========

    pub fn start(&self, subject: &str, activity: &str) -> Result<(), TimerError> {
        let mut state = self.lock();
        state.timer.start(subject, activity, self.clock.now())?;
        tracing::info!(subject, activity, "timer started");
        Ok(())
    }

    pub fn pause(&self) -> Result<(), TimerError> {
        let mut state = self.lock();
        let now = self.clock.now();
        state.timer.pause(now)?;
        tracing::info!(elapsed = state.timer.elapsed_seconds(now), "timer paused");
        Ok(())
    }

    pub fn resume(&self) -> Result<(), TimerError> {
        let mut state = self.lock();
        let now = self.clock.now();
        state.timer.resume(now)?;
        tracing::info!(elapsed = state.timer.elapsed_seconds(now), "timer resumed");
        Ok(())
    }

    /// Stops the active timer and records it if it ran for at least a minute.
    ///
    /// Shorter timers are cleared without writing a session.
    pub fn stop(&self) -> Result<Option<StudySession>, TimerError> {
        let mut state = self.lock();
        let finished = state.timer.stop(self.clock.now())?;
        let minutes = finished.minutes();
        if minutes <= 0 {
            tracing::info!(
                subject = %finished.subject,
                elapsed = finished.elapsed_seconds,
                "timer stopped under a minute; nothing recorded"
            );
            return Ok(None);
        }

        let session = StudySession::from_parts(
            finished.subject,
            finished.activity,
            minutes,
            self.clock.today(),
        )?;
        state.ledger.add(session.clone())?;
        tracing::info!(
            id = %session.id,
            subject = %session.subject,
            minutes,
            "timer stopped; session recorded"
        );
        Ok(Some(session))
    }

    /// Seconds on the active timer; safe to poll at any rate.
    pub fn elapsed_seconds(&self) -> i64 {
        self.lock().timer.elapsed_seconds(self.clock.now())
    }

    pub fn phase(&self) -> TimerPhase {
        self.lock().timer.phase()
    }

    pub fn active_timer(&self) -> Option<TimerSnapshot> {
        self.lock().timer.snapshot(self.clock.now())
    }

    // ========== Ledger ==========

    pub fn add_manual_session(
        &self,
        subject: &str,
        activity: &str,
        duration_minutes: i64,
        date: NaiveDate,
    ) -> Result<StudySession, ValidationError> {
        let session = StudySession::new(subject, activity, duration_minutes, date)?;
        self.lock().ledger.add(session.clone())?;
        tracing::info!(
            id = %session.id,
            subject = %session.subject,
            minutes = duration_minutes,
            %date,
            "manual session added"
        );
        Ok(session)
    }

    /// Deletes a session by ID. Returns whether one was removed; a missing ID
    /// is not an error.
    pub fn delete_session(&self, id: &SessionId) -> bool {
        let removed = self.lock().ledger.delete(id);
        match &removed {
            Some(session) => tracing::info!(%id, subject = %session.subject, "session deleted"),
            None => tracing::debug!(%id, "delete of unknown session ignored"),
        }
        removed.is_some()
    }

    /// Snapshot of matching sessions, most recent first.
    pub fn list_sessions(&self, filter: &SessionFilter) -> Vec<StudySession> {
        self.lock().ledger.filter(filter).cloned().collect()
    }

    /// Runs `f` against the ledger while holding the lock. `f` must not call
    /// back into the tracker.
    #[cfg(test)]
    fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.lock().ledger)
    }

    pub fn session_count(&self) -> usize {
        self.lock().ledger.len()
    }

    /// IDs of sessions whose ID starts with `prefix`.
    pub fn session_ids_with_prefix(&self, prefix: &str) -> Vec<SessionId> {
        self.lock()
            .ledger
            .iter()
            .filter(|s| s.id.as_str().starts_with(prefix))
            .map(|s| s.id.clone())
            .collect()
    }

    // ========== Reporting ==========

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn total_minutes(&self, date: NaiveDate) -> i64 {
        report::total_minutes(&self.lock().ledger, date)
    }

    pub fn total_minutes_in_window(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        report::total_minutes_in_window(&self.lock().ledger, start, end)
    }

    pub fn total_minutes_this_week(&self) -> i64 {
        report::total_minutes_this_week(&self.lock().ledger, self.clock.today())
    }

    pub fn distinct_subjects(&self) -> Vec<String> {
        report::distinct_subjects(&self.lock().ledger)
    }

    pub fn summary(&self) -> Summary {
        report::summarize(&self.lock().ledger, self.clock.today())
    }
}
