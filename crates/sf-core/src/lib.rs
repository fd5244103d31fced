//! Core domain logic for the study-time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Timer: the start/pause/resume/stop stopwatch state machine
//! - Ledger: the ordered collection of committed study sessions
//! - Reporting: daily, weekly and per-subject views over the ledger
//! - Tracker: the context object tying them to an injectable clock

pub mod clock;
pub mod format;
mod ledger;
pub mod report;
mod session;
mod timer;
mod tracker;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{format_duration, format_elapsed};
pub use ledger::Ledger;
pub use report::Summary;
pub use session::{SessionFilter, StudySession};
pub use timer::{FinishedTimer, Timer, TimerError, TimerPhase, TimerSnapshot};
pub use tracker::StudyTracker;
pub use types::{Activity, SessionId, Subject, ValidationError};
