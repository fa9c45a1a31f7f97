//! Terminal client entry point.
mod app;
mod config;
mod input;
mod presentation;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use valley_runtime::SaveFormat;

use app::CliApp;
use config::CliConfig;

/// Hot-seat board game about building up a valley community
#[derive(Parser)]
#[command(name = "valley")]
#[command(about = "Play a hot-seat session in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory with config.toml and tasks.ron (or tasks.json)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory for save files
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Save file encoding
    #[arg(long, value_name = "FORMAT")]
    save_format: Option<SaveFormat>,

    /// Fixed seed for board generation and dice
    #[arg(short, long)]
    seed: Option<u64>,

    /// Player name, in turn order (repeat for each seat)
    #[arg(short, long = "player", value_name = "NAME")]
    players: Vec<String>,

    /// Resume from the save with this nonce
    #[arg(short, long, value_name = "NONCE")]
    load: Option<u64>,

    /// Mirror logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags override the environment.
    fn apply(self, mut config: CliConfig) -> CliConfig {
        if self.data_dir.is_some() {
            config.data_dir = self.data_dir;
        }
        if self.save_dir.is_some() {
            config.save_dir = self.save_dir;
        }
        if let Some(format) = self.save_format {
            config.save_format = format;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if !self.players.is_empty() {
            config.players = self.players;
        }
        config.resume = self.load;
        config.verbose = self.verbose;
        config
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Cli::parse().apply(CliConfig::from_env());
    let _guard = setup_logging(&config)?;

    let mut app = CliApp::from_config(&config)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    app.run(stdin.lock(), &mut stdout)
}

/// Setup logging to a per-session file, plus stderr with `--verbose`.
fn setup_logging(config: &CliConfig) -> Result<WorkerGuard> {
    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let session_log_dir = log_directory().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = config.verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}

/// Platform cache directory for logs, falling back to the temp directory.
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("org", "valley", "valley")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("valley").join("logs"))
}
