//! The ordered collection of committed study sessions.

use crate::session::{SessionFilter, StudySession};
use crate::types::{SessionId, ValidationError};

/// Committed sessions, most recent insertion first.
///
/// Insertion order is display order; entries are never re-sorted by date.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    sessions: Vec<StudySession>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a session at the head.
    ///
    /// Rejects sessions with a non-positive duration; labels are already
    /// non-empty by construction.
    pub fn add(&mut self, session: StudySession) -> Result<(), ValidationError> {
        session.validate()?;
        tracing::debug!(id = %session.id, subject = %session.subject, "ledger insert");
        self.sessions.insert(0, session);
        Ok(())
    }

    /// Removes the session with `id`, returning it if it was present.
    pub fn delete(&mut self, id: &SessionId) -> Option<StudySession> {
        let index = self.sessions.iter().position(|s| &s.id == id)?;
        Some(self.sessions.remove(index))
    }

    pub fn get(&self, id: &SessionId) -> Option<&StudySession> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    /// Sessions matching `filter`, in ledger order.
    ///
    /// Lazy and recomputed on every call.
    pub fn filter<'a>(
        &'a self,
        filter: &'a SessionFilter,
    ) -> impl Iterator<Item = &'a StudySession> + 'a {
        self.sessions.iter().filter(move |s| filter.matches(s))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudySession> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a StudySession;
    type IntoIter = std::slice::Iter<'a, StudySession>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
