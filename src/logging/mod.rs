pub mod config;
pub mod context;
pub mod layers;

pub use config::LoggingConfig;
pub use context::{detect_context, ExecutionContext};
pub use layers::console::ConsoleOutput;

use crate::cli::Args;
use crate::core::config::ConfigLoader;
use crate::logging::layers::{console, file};
use crate::Result;
use anyhow::{anyhow, Context};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Guards that keep logging sinks active for the duration of the command.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    console_output: ConsoleOutput,
    log_file_path: Option<PathBuf>,
}

impl LoggingGuard {
    /// Returns the console output configuration used during initialization.
    pub fn console_output(&self) -> ConsoleOutput {
        self.console_output
    }

    /// Returns the log file path when the file sink is enabled.
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }
}

/// Initialize the logging framework for the provided CLI arguments.
///
/// `RUST_LOG` wins over the configured level. Errors when invoked more than
/// once per process.
pub fn init(args: &Args) -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let context = detect_context(args);
    let cwd = env::current_dir().context("failed to resolve working directory")?;
    let config_path = ConfigLoader::resolve_path(args.config.as_deref(), &cwd);
    let config = LoggingConfig::load(Some(&config_path), args.verbose)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;

    let log_file_path = if config.enable_file {
        Some(file::log_file_path(&config, config_path.parent())?)
    } else {
        None
    };
    type FileSubscriber = file::FileLayerStack<Registry>;

    let (file_layer, file_guard) = match &log_file_path {
        Some(path) => file::file_layer::<Registry>(path, true)?,
        None => file::file_layer::<Registry>(Path::new(""), false)?,
    };

    let console_output = console::select_console_output(context, config.console_output);
    let console_layer = console::console_layer::<FileSubscriber>(console_output);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(env_filter)
        .init();

    tracing::debug!(?context, %console_output, "logging initialized");

    Ok(LoggingGuard {
        _file_guard: file_guard,
        console_output,
        log_file_path,
    })
}
