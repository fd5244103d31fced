//! Interactive shell: line parsing, command dispatch and the readline loop.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use sf_core::{Clock, StudyTracker, SystemClock, TimerPhase, format_elapsed};

use crate::cli::{ShellCommand, ShellLine};
use crate::commands::{sessions, summary, timer, util};
use crate::config::Config;

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A tracker plus the configuration the shell commands read.
pub struct Shell<C: Clock = SystemClock> {
    tracker: StudyTracker<C>,
    config: Config,
}

impl<C: Clock> Shell<C> {
    pub const fn new(tracker: StudyTracker<C>, config: Config) -> Self {
        Self { tracker, config }
    }

    pub const fn tracker(&self) -> &StudyTracker<C> {
        &self.tracker
    }

    /// Prompt showing the active timer, if any.
    pub fn prompt(&self) -> String {
        match self.tracker.active_timer() {
            Some(active) if active.phase == TimerPhase::Paused => format!(
                "sf [{} {} paused]> ",
                active.subject,
                format_elapsed(active.elapsed_seconds)
            ),
            Some(active) => format!(
                "sf [{} {}]> ",
                active.subject,
                format_elapsed(active.elapsed_seconds)
            ),
            None => "sf> ".to_string(),
        }
    }

    /// Parses and runs one shell line, writing command output to `out`.
    ///
    /// Usage errors are printed and the shell carries on; command failures
    /// are returned to the caller.
    pub fn execute<W: Write>(&self, line: &str, out: &mut W) -> Result<Flow> {
        let args = util::split_line(line)?;
        if args.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match ShellLine::try_parse_from(&args) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };
        tracing::debug!(?command, "dispatching shell command");

        let tracker = &self.tracker;
        match command {
            ShellCommand::Start {
                subject,
                activity,
                preset,
            } => {
                let labels = subject.as_deref().zip(activity.as_deref());
                timer::start(out, tracker, labels, preset, &self.config.quick_start)?;
            }
            ShellCommand::Pause => timer::pause(out, tracker)?,
            ShellCommand::Resume => timer::resume(out, tracker)?,
            ShellCommand::Stop => timer::stop(out, tracker)?,
            ShellCommand::Status => timer::status(out, tracker)?,
            ShellCommand::Watch { ticks } => {
                let interval = Duration::from_millis(self.config.watch_interval_ms);
                timer::watch(out, tracker, ticks, interval)?;
            }
            ShellCommand::Add {
                subject,
                activity,
                minutes,
                date,
            } => sessions::add(out, tracker, &subject, &activity, minutes, &date)?,
            ShellCommand::Delete { id } => sessions::delete(out, tracker, &id)?,
            ShellCommand::List {
                subject,
                date,
                json,
            } => sessions::list(out, tracker, subject.as_deref(), date.as_deref(), json)?,
            ShellCommand::Summary { json } => summary::summary(out, tracker, json)?,
            ShellCommand::Subjects => summary::subjects(out, tracker)?,
            ShellCommand::Presets => summary::presets(out, &self.config.quick_start)?,
            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}

/// Tab completion for shell command names.
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = ShellLine::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
        commands.push("quit".to_string());
        commands.sort();
        Self { commands }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        // Only the first word is a command name.
        if line.contains(char::is_whitespace) {
            return Ok((0, Vec::new()));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

/// Runs the shell on the terminal until `exit` or end of input.
pub fn run<C: Clock>(shell: &Shell<C>) -> Result<()> {
    let mut rl: Editor<ShellHelper, DefaultHistory> =
        Editor::new().context("failed to initialize line editor")?;
    rl.set_helper(Some(ShellHelper::new()));

    println!("Study tracker. Type 'help' for commands or 'exit' to leave.");

    let mut stdout = io::stdout();
    loop {
        match rl.readline(&shell.prompt()) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match shell.execute(&line, &mut stdout) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => break,
                    Err(e) => eprintln!("error: {e:#}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted. Type 'exit' to leave.");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("failed to read input"),
        }
    }

    println!("Goodbye!");
    Ok(())
}
