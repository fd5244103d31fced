//! Shared utilities for shell commands.

use std::sync::LazyLock;

use anyhow::{Context, bail};
use chrono::{Duration, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative dates (~100 years).
const MAX_RELATIVE_DAYS: i64 = 100 * 366;

/// Parse a date string as either ISO 8601 or relative to `today`.
///
/// Supports:
/// - ISO 8601: "2024-01-15"
/// - "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        bail!("Invalid date: {s}. Use YYYY-MM-DD, 'today', 'yesterday' or e.g. '3 days ago'");
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;
    let days = match &caps[2] {
        "week" => n.saturating_mul(7),
        _ => n,
    };
    if days > MAX_RELATIVE_DAYS {
        bail!("Relative date too far back: {s}");
    }
    Ok(today - Duration::days(days))
}

/// Split a shell line into arguments, honoring single and double quotes.
///
/// `start "Calculus II" 'Problem solving'` yields three arguments.
pub fn split_line(line: &str) -> anyhow::Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("unterminated {q} quote");
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}

/// Truncate by characters, not bytes, to avoid panics on multi-byte UTF-8.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let keep = width.saturating_sub(3);
        format!("{}...", s.chars().take(keep).collect::<String>())
    } else {
        s.to_string()
    }
}
