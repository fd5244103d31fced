//! Timer commands: start, pause, resume, stop, status and watch.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use sf_core::{Clock, StudyTracker, TimerSnapshot, format_duration, format_elapsed};

use super::sessions::ID_DISPLAY_LEN;
use crate::config::QuickStart;

/// Starts a timer from explicit labels or a 1-based quick-start preset.
pub fn start<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &StudyTracker<C>,
    labels: Option<(&str, &str)>,
    preset: Option<usize>,
    presets: &[QuickStart],
) -> Result<()> {
    let (subject, activity) = match (labels, preset) {
        (Some(labels), _) => labels,
        (None, Some(n)) => {
            let option = n
                .checked_sub(1)
                .and_then(|i| presets.get(i))
                .with_context(|| {
                    format!("no quick-start option {n}; choose 1-{}", presets.len())
                })?;
            (option.subject.as_str(), option.activity.as_str())
        }
        (None, None) => bail!("give a subject and activity, or --preset N"),
    };

    tracker.start(subject, activity)?;
    let active = tracker
        .active_timer()
        .context("timer missing right after start")?;
    writeln!(
        writer,
        "Timer started: {} - {}",
        active.subject, active.activity
    )?;
    Ok(())
}

pub fn pause<W: Write, C: Clock>(writer: &mut W, tracker: &StudyTracker<C>) -> Result<()> {
    tracker.pause()?;
    writeln!(
        writer,
        "Timer paused at {}. Resume to continue tracking.",
        format_elapsed(tracker.elapsed_seconds())
    )?;
    Ok(())
}

pub fn resume<W: Write, C: Clock>(writer: &mut W, tracker: &StudyTracker<C>) -> Result<()> {
    tracker.resume()?;
    writeln!(
        writer,
        "Timer resumed at {}.",
        format_elapsed(tracker.elapsed_seconds())
    )?;
    Ok(())
}

pub fn stop<W: Write, C: Clock>(writer: &mut W, tracker: &StudyTracker<C>) -> Result<()> {
    match tracker.stop()? {
        Some(session) => writeln!(
            writer,
            "Session completed: recorded {} for {} (id {})",
            format_duration(session.duration_minutes),
            session.subject,
            session.id.short(ID_DISPLAY_LEN)
        )?,
        None => writeln!(
            writer,
            "Timer stopped. Sessions under a minute are not recorded."
        )?,
    }
    Ok(())
}

fn describe(active: &TimerSnapshot) -> String {
    format!(
        "{} {} - {} ({})",
        format_elapsed(active.elapsed_seconds),
        active.subject,
        active.activity,
        active.phase
    )
}

pub fn status<W: Write, C: Clock>(writer: &mut W, tracker: &StudyTracker<C>) -> Result<()> {
    match tracker.active_timer() {
        Some(active) => writeln!(writer, "{}", describe(&active))?,
        None => writeln!(writer, "No active timer. Start one with 'start' or 'start --preset N'.")?,
    }
    Ok(())
}

/// Polls the tracker `ticks` times, `interval` apart, printing each reading.
///
/// Stops early once the timer is no longer active.
pub fn watch<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &StudyTracker<C>,
    ticks: u32,
    interval: Duration,
) -> Result<()> {
    for tick in 0..ticks {
        if tick > 0 {
            std::thread::sleep(interval);
        }
        let Some(active) = tracker.active_timer() else {
            writeln!(writer, "No active timer.")?;
            break;
        };
        writeln!(writer, "{}", describe(&active))?;
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use sf_core::{ManualClock, SessionFilter, TimerPhase};

    use crate::config::Config;

    fn tracker() -> StudyTracker<Arc<ManualClock>> {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap());
        StudyTracker::new(Arc::new(clock))
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn start_with_labels() {
        let tracker = tracker();
        let mut out = Vec::new();
        start(&mut out, &tracker, Some(("Chemistry", "Lab")), None, &[]).unwrap();
        assert_eq!(output(out), "Timer started: Chemistry - Lab\n");
        assert_eq!(tracker.phase(), TimerPhase::Running);
    }

    #[test]
    fn start_with_preset_is_one_based() {
        let tracker = tracker();
        let presets = Config::default().quick_start;
        let mut out = Vec::new();
        start(&mut out, &tracker, None, Some(2), &presets).unwrap();
        assert_eq!(output(out), "Timer started: Chemistry - Lab work\n");
    }

    #[test]
    fn start_with_unknown_preset_fails() {
        let tracker = tracker();
        let presets = Config::default().quick_start;
        let mut out = Vec::new();

        let err = start(&mut out, &tracker, None, Some(0), &presets).unwrap_err();
        assert_eq!(err.to_string(), "no quick-start option 0; choose 1-6");

        let err = start(&mut out, &tracker, None, Some(7), &presets).unwrap_err();
        assert_eq!(err.to_string(), "no quick-start option 7; choose 1-6");
        assert_eq!(tracker.phase(), TimerPhase::Idle);
    }

    #[test]
    fn start_twice_reports_running_timer() {
        let tracker = tracker();
        let mut out = Vec::new();
        start(&mut out, &tracker, Some(("Chemistry", "Lab")), None, &[]).unwrap();

        let err = start(&mut out, &tracker, Some(("Physics", "Theory")), None, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "a timer is already running for Chemistry; stop the current timer first"
        );
    }

    #[test]
    fn pause_resume_and_stop_messages() {
        let tracker = tracker();
        let mut out = Vec::new();
        start(&mut out, &tracker, Some(("Chemistry", "Lab")), None, &[]).unwrap();
        tracker.clock().advance(90);
        pause(&mut out, &tracker).unwrap();
        tracker.clock().advance(500);
        resume(&mut out, &tracker).unwrap();
        tracker.clock().advance(30);
        stop(&mut out, &tracker).unwrap();

        let id = tracker.list_sessions(&SessionFilter::all())[0].id.clone();
        let text = output(out).replace(id.short(ID_DISPLAY_LEN), "XXXXXXXX");
        insta::assert_snapshot!(text, @r"
        Timer started: Chemistry - Lab
        Timer paused at 1:30. Resume to continue tracking.
        Timer resumed at 1:30.
        Session completed: recorded 2m for Chemistry (id XXXXXXXX)
        ");
    }

    #[test]
    fn stop_under_a_minute_says_nothing_recorded() {
        let tracker = tracker();
        let mut out = Vec::new();
        tracker.start("Physics", "Theory").unwrap();
        tracker.clock().advance(45);
        stop(&mut out, &tracker).unwrap();

        assert_eq!(
            output(out),
            "Timer stopped. Sessions under a minute are not recorded.\n"
        );
        assert_eq!(tracker.session_count(), 0);
    }

    #[test]
    fn status_shows_elapsed_and_phase() {
        let tracker = tracker();
        let mut out = Vec::new();
        status(&mut out, &tracker).unwrap();

        tracker.start("Statistics", "Exam preparation").unwrap();
        tracker.clock().advance(3725);
        status(&mut out, &tracker).unwrap();

        tracker.pause().unwrap();
        status(&mut out, &tracker).unwrap();

        insta::assert_snapshot!(output(out), @r"
        No active timer. Start one with 'start' or 'start --preset N'.
        1:02:05 Statistics - Exam preparation (running)
        1:02:05 Statistics - Exam preparation (paused)
        ");
    }

    #[test]
    fn watch_prints_each_tick() {
        let tracker = tracker();
        tracker.start("Physics", "Theory").unwrap();
        tracker.clock().advance(5);

        let mut out = Vec::new();
        watch(&mut out, &tracker, 3, Duration::ZERO).unwrap();
        assert_eq!(output(out).lines().count(), 3);
    }

    #[test]
    fn watch_without_timer_stops_early() {
        let tracker = tracker();
        let mut out = Vec::new();
        watch(&mut out, &tracker, 5, Duration::ZERO).unwrap();
        assert_eq!(output(out), "No active timer.\n");
    }

    #[test]
    fn phase_errors_surface_as_messages() {
        let tracker = tracker();
        let mut out = Vec::new();
        assert_eq!(
            pause(&mut out, &tracker).unwrap_err().to_string(),
            "no running timer to pause"
        );
        assert_eq!(
            resume(&mut out, &tracker).unwrap_err().to_string(),
            "the timer is not paused"
        );
        assert_eq!(stop(&mut out, &tracker).unwrap_err().to_string(), "no active timer");
    }
}
