//! Aggregate views: summary, subjects and presets.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use sf_core::{Clock, StudyTracker, Summary, format_duration};

use crate::config::QuickStart;

pub fn summary<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &StudyTracker<C>,
    json: bool,
) -> Result<()> {
    let summary = tracker.summary();
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(())
}

/// Format the summary as human-readable text.
pub fn format_summary(summary: &Summary) -> String {
    let mut output = String::new();

    writeln!(output, "STUDY SUMMARY ({})", summary.today).unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "Today:          {}",
        format_duration(summary.today_minutes)
    )
    .unwrap();
    writeln!(
        output,
        "This week:      {} ({} to {})",
        format_duration(summary.week_minutes),
        summary.week_start,
        summary.today
    )
    .unwrap();
    writeln!(output, "Total sessions: {}", summary.session_count).unwrap();

    if summary.subjects.is_empty() {
        writeln!(output, "Subjects:       none yet").unwrap();
    } else {
        writeln!(output, "Subjects:       {}", summary.subjects.join(", ")).unwrap();
    }

    output
}

pub fn subjects<W: Write, C: Clock>(writer: &mut W, tracker: &StudyTracker<C>) -> Result<()> {
    let subjects = tracker.distinct_subjects();
    if subjects.is_empty() {
        writeln!(writer, "No subjects yet.")?;
    }
    for subject in subjects {
        writeln!(writer, "{subject}")?;
    }
    Ok(())
}

pub fn presets<W: Write>(writer: &mut W, presets: &[QuickStart]) -> Result<()> {
    if presets.is_empty() {
        writeln!(writer, "No quick-start options configured.")?;
    }
    for (i, preset) in presets.iter().enumerate() {
        writeln!(writer, "{}. {} - {}", i + 1, preset.subject, preset.activity)?;
    }
    Ok(())
}
