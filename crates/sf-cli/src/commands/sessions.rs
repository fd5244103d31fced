//! Session history commands: add, delete and list.
//!
//! IDs are shown shortened to their first 8 characters; any unique prefix is
//! accepted wherever an ID is expected.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::Duration;
use sf_core::{Clock, SessionFilter, SessionId, StudySession, StudyTracker, format_duration};

use super::util::{parse_date, truncate};

/// Characters of the session ID shown in listings.
pub const ID_DISPLAY_LEN: usize = 8;

pub fn add<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &StudyTracker<C>,
    subject: &str,
    activity: &str,
    minutes: i64,
    date: &str,
) -> Result<()> {
    let date = parse_date(date, tracker.today())?;
    let session = tracker.add_manual_session(subject, activity, minutes, date)?;
    writeln!(
        writer,
        "Session added: {} for {} on {} (id {})",
        format_duration(session.duration_minutes),
        session.subject,
        session.date,
        session.id.short(ID_DISPLAY_LEN)
    )?;
    Ok(())
}

/// Picks the single session ID matching `prefix`.
///
/// Returns `None` when nothing matches; more than one match is an error.
fn resolve_id(prefix: &str, mut matches: Vec<SessionId>) -> Result<Option<SessionId>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        n => bail!("ambiguous session id '{prefix}' matches {n} sessions"),
    }
}

pub fn delete<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &StudyTracker<C>,
    id: &str,
) -> Result<()> {
    let prefix = id.trim();
    if prefix.is_empty() {
        bail!("session id cannot be empty");
    }
    match resolve_id(prefix, tracker.session_ids_with_prefix(prefix))? {
        Some(id) if tracker.delete_session(&id) => {
            writeln!(writer, "Session deleted: {}", id.short(ID_DISPLAY_LEN))?;
        }
        _ => writeln!(writer, "No session matches '{prefix}'. Nothing deleted.")?,
    }
    Ok(())
}

pub fn list<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &StudyTracker<C>,
    subject: Option<&str>,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut filter = SessionFilter::all();
    if let Some(subject) = subject {
        filter = filter.with_subject(subject);
    }
    if let Some(date) = date {
        filter = filter.with_date(parse_date(date, tracker.today())?);
    }

    let sessions = tracker.list_sessions(&filter);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&sessions)?)?;
    } else {
        write!(writer, "{}", format_sessions(&sessions))?;
    }
    Ok(())
}

// ========== Human-Readable Output ==========

/// Format sessions as the history table.
pub fn format_sessions(sessions: &[StudySession]) -> String {
    let mut output = String::new();

    writeln!(output, "SESSION HISTORY").unwrap();
    writeln!(output).unwrap();

    if sessions.is_empty() {
        writeln!(output, "No sessions found.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Start a timer or adjust the filters.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<8}  {:<20}  {:<20}  {:>8}  Date",
        "ID", "Subject", "Activity", "Duration"
    )
    .unwrap();
    writeln!(
        output,
        "────────  ────────────────────  ────────────────────  ────────  ──────────"
    )
    .unwrap();

    for session in sessions {
        writeln!(
            output,
            "{:<8}  {:<20}  {:<20}  {:>8}  {}",
            session.id.short(ID_DISPLAY_LEN),
            truncate(session.subject.as_str(), 20),
            truncate(session.activity.as_str(), 20),
            format_duration(session.duration_minutes),
            session.date
        )
        .unwrap();
    }

    let total = sessions
        .iter()
        .map(|s| s.duration_minutes)
        .fold(0, i64::saturating_add);
    let noun = if sessions.len() == 1 { "session" } else { "sessions" };
    writeln!(output).unwrap();
    writeln!(
        output,
        "Total: {} {noun}, {}",
        sessions.len(),
        format_duration(total)
    )
    .unwrap();

    output
}

/// Seeds the sample history: two sessions today, two yesterday.
pub fn seed_demo<C: Clock>(tracker: &StudyTracker<C>) -> Result<usize> {
    let today = tracker.today();
    let yesterday = today - Duration::days(1);
    // Inserted oldest first so the listing reads newest first.
    let samples = [
        ("Statistics", "Exam preparation", 150, yesterday),
        ("Psychology", "Reading Chapter 5", 60, yesterday),
        ("Chemistry", "Lab report writing", 120, today),
        ("Calculus II", "Problem solving", 90, today),
    ];
    for (subject, activity, minutes, date) in samples {
        tracker.add_manual_session(subject, activity, minutes, date)?;
    }
    tracing::debug!(count = samples.len(), "seeded demo sessions");
    Ok(samples.len())
}
