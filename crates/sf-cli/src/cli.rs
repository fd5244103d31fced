//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Study-time tracker.
///
/// Runs an interactive shell with a stopwatch timer and a study session
/// history. Everything lives in memory for the lifetime of the shell.
#[derive(Debug, Parser)]
#[command(name = "sf", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed the session history with sample sessions.
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands. Without one, the interactive shell starts.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the interactive shell.
    Shell,

    /// List the configured quick-start options.
    Presets,
}

/// One line typed into the shell.
#[derive(Debug, Parser)]
#[command(name = "sf", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the shell.
#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Start a timer for a subject and activity.
    Start {
        /// What you are studying (e.g., "Calculus II").
        #[arg(required_unless_present = "preset")]
        subject: Option<String>,

        /// How you are studying it (e.g., "Problem solving").
        #[arg(required_unless_present = "preset")]
        activity: Option<String>,

        /// Start quick-start option N instead (see `presets`).
        #[arg(short, long, conflicts_with_all = ["subject", "activity"])]
        preset: Option<usize>,
    },

    /// Pause the running timer.
    Pause,

    /// Resume the paused timer.
    Resume,

    /// Stop the timer and save the session.
    Stop,

    /// Show the active timer.
    Status,

    /// Print the elapsed time repeatedly.
    Watch {
        /// Number of readings to print.
        #[arg(short, long, default_value_t = 10)]
        ticks: u32,
    },

    /// Add a session manually.
    Add {
        subject: String,

        activity: String,

        /// Duration in minutes.
        #[arg(allow_negative_numbers = true)]
        minutes: i64,

        /// Date studied: YYYY-MM-DD, today, yesterday or "N days ago".
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Delete a session by ID or unique ID prefix.
    Delete { id: String },

    /// Show the session history, most recent first.
    List {
        /// Only sessions for this subject.
        #[arg(short, long)]
        subject: Option<String>,

        /// Only sessions on this date.
        #[arg(short, long)]
        date: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show today's and this week's totals.
    Summary {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the subjects studied so far.
    Subjects,

    /// List the quick-start options.
    Presets,

    /// Leave the shell.
    #[command(alias = "quit")]
    Exit,
}
