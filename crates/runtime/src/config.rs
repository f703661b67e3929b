//! Runtime configuration read from the process environment.

use std::env;
use std::path::PathBuf;

/// Where saves live, where content comes from and how the session is seeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding `save_1.json` through `save_3.json`.
    pub save_dir: PathBuf,
    /// Data directory with RON/TOML catalogs; `None` uses the bundled copy.
    pub content_dir: Option<PathBuf>,
    /// Fixed session seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            content_dir: None,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AUREN_SAVE_DIR` - Save slot directory (default: platform data dir)
    /// - `AUREN_CONTENT_DIR` - Content data directory (default: bundled content)
    /// - `AUREN_SEED` - Session seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env_path("AUREN_SAVE_DIR") {
            config.save_dir = dir;
        }
        config.content_dir = read_env_path("AUREN_CONTENT_DIR");
        config.seed = read_env::<u64>("AUREN_SEED");

        config
    }

    /// The configured seed, or a fresh one when none was set.
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Platform data directory for save slots.
///
/// - macOS: `~/Library/Application Support/auren`
/// - Linux: `~/.local/share/auren` (or `$XDG_DATA_HOME/auren`)
/// - Windows: `%APPDATA%\auren`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "auren")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
