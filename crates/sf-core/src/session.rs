//! Completed study sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Activity, SessionId, Subject, ValidationError};

/// One committed block of study time.
///
/// Sessions are immutable once created; the ledger only inserts and deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: SessionId,
    pub subject: Subject,
    pub activity: Activity,
    pub duration_minutes: i64,
    /// Calendar day the session counts towards.
    pub date: NaiveDate,
    /// Always true for ledger entries; there is no draft state.
    #[serde(default = "completed_default")]
    pub completed: bool,
}

const fn completed_default() -> bool {
    true
}

impl StudySession {
    /// Builds a session from raw field values, assigning a fresh ID.
    ///
    /// Rejects blank labels and non-positive durations.
    pub fn new(
        subject: &str,
        activity: &str,
        duration_minutes: i64,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let subject = Subject::new(subject)?;
        let activity = Activity::new(activity)?;
        Self::from_parts(subject, activity, duration_minutes, date)
    }

    pub(crate) fn from_parts(
        subject: Subject,
        activity: Activity,
        duration_minutes: i64,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let session = Self {
            id: SessionId::generate(),
            subject,
            activity,
            duration_minutes,
            date,
            completed: true,
        };
        session.validate()?;
        Ok(session)
    }

    /// Checks the invariants that the field types cannot express.
    pub const fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_minutes <= 0 {
            return Err(ValidationError::InvalidDuration {
                minutes: self.duration_minutes,
            });
        }
        Ok(())
    }
}

/// Optional subject/date constraints for listing sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub subject: Option<String>,
    pub date: Option<NaiveDate>,
}

impl SessionFilter {
    /// A filter that matches every session.
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn matches(&self, session: &StudySession) -> bool {
        let subject_ok = self
            .subject
            .as_deref()
            .is_none_or(|subject| session.subject.as_str() == subject.trim());
        subject_ok && self.date.is_none_or(|date| session.date == date)
    }
}
