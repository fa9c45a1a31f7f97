//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use valley_runtime::SaveFormat;

/// Configuration required to bootstrap a session and its terminal driver.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Directory holding `config.toml` and the task catalog.
    pub data_dir: Option<PathBuf>,
    /// Directory for save files (default: platform-specific).
    pub save_dir: Option<PathBuf>,
    pub save_format: SaveFormat,
    /// Session identifier used to group logs.
    pub session_id: Option<String>,
    pub seed: Option<u64>,
    pub players: Vec<String>,
    /// Save nonce to resume from.
    pub resume: Option<u64>,
    /// Mirror logs to stderr.
    pub verbose: bool,
}

impl CliConfig {
    /// Fallback table when none is given.
    pub const DEFAULT_PLAYERS: [&'static str; 2] = ["Player 1", "Player 2"];

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VALLEY_DATA_DIR` - Content directory (default: the shipped content)
    /// - `VALLEY_SAVE_DIR` - Directory for save files (default: platform-specific)
    /// - `VALLEY_SAVE_FORMAT` - `json` or `bincode` (default: json)
    /// - `VALLEY_SESSION_ID` - Session identifier for logs (default: auto-generated)
    /// - `VALLEY_SEED` - Fixed session seed (default: wall clock)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("VALLEY_DATA_DIR").ok().map(PathBuf::from);
        config.save_dir = env::var("VALLEY_SAVE_DIR").ok().map(PathBuf::from);
        if let Some(format) = read_env::<SaveFormat>("VALLEY_SAVE_FORMAT") {
            config.save_format = format;
        }
        config.session_id = env::var("VALLEY_SESSION_ID").ok();
        config.seed = read_env::<u64>("VALLEY_SEED");

        config
    }

    /// Content shipped with the workspace.
    pub const DEFAULT_DATA_DIR: &'static str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../game/content/data");

    /// Content directory, defaulting to the shipped content.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DATA_DIR))
    }

    /// Save directory, falling back to the platform data directory and then
    /// to `./saves`.
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir
            .clone()
            .or_else(valley_runtime::default_save_dir)
            .unwrap_or_else(|| PathBuf::from("saves"))
    }

    /// Player names, or the default two-seat table.
    pub fn players(&self) -> Vec<String> {
        if self.players.is_empty() {
            Self::DEFAULT_PLAYERS.iter().map(|name| name.to_string()).collect()
        } else {
            self.players.clone()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
