//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// A one-keystroke timer start option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStart {
    pub subject: String,
    pub activity: String,
}

impl QuickStart {
    fn new(subject: &str, activity: &str) -> Self {
        Self {
            subject: subject.to_string(),
            activity: activity.to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Options offered by `start --preset N`.
    pub quick_start: Vec<QuickStart>,

    /// Poll cadence of `watch`, in milliseconds.
    pub watch_interval_ms: u64,

    /// Seed the sample session history on startup.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quick_start: vec![
                QuickStart::new("Mathematics", "Problem solving"),
                QuickStart::new("Chemistry", "Lab work"),
                QuickStart::new("Psychology", "Reading"),
                QuickStart::new("Statistics", "Data analysis"),
                QuickStart::new("Physics", "Theory study"),
                QuickStart::new("English", "Essay writing"),
            ],
            watch_interval_ms: 1000,
            seed_demo: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SF_*)
        figment = figment.merge(Env::prefixed("SF_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for sf.
///
/// On Linux: `~/.config/sf`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sf"))
}
