mod app_state;
mod cli;
mod pty;

use std::path::{Path, PathBuf};

use termview_common::ConfigError;
use termview_config::schema::TermviewConfig;
use termview_config::toml_loader::default_config_path;
use termview_config::ReloadManager;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::{LaunchOptions, TermviewApp};

/// Config resolved before logging is up, so errors are reported afterwards.
struct StartupConfig {
    config: TermviewConfig,
    path: Option<PathBuf>,
    error: Option<ConfigError>,
}

fn load_startup_config(args: &cli::Args) -> StartupConfig {
    let (path, result) = match &args.config {
        Some(p) => (
            Some(PathBuf::from(p)),
            termview_config::load_config_from(Path::new(p)),
        ),
        None => (default_config_path().ok(), termview_config::load_config()),
    };

    match result {
        Ok(config) => StartupConfig {
            config,
            path,
            error: None,
        },
        Err(e) => StartupConfig {
            config: TermviewConfig::default(),
            path,
            error: Some(e),
        },
    }
}

/// The `--log-level` flag wins over the config file.
fn log_directive(flag: Option<&str>, config: &TermviewConfig) -> Directive {
    let raw = flag.unwrap_or_else(|| config.logging.level.directive());
    raw.parse()
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO))
}

fn main() {
    let args = cli::parse();
    let startup = load_startup_config(&args);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_directive(args.log_level.as_deref(), &startup.config)),
        )
        .init();

    tracing::info!("termview v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(e) = &startup.error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("termview-rt")
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    let config_rx = startup.path.map(|path| {
        let _guard = runtime.enter();
        let manager = ReloadManager::new(path);
        tracing::info!("Watching config at {}", manager.path().display());
        let rx = manager.subscribe();
        manager.spawn();
        rx
    });

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    let launch = LaunchOptions {
        execute: args.execute,
        directory: args.directory.map(PathBuf::from),
    };
    let mut app = TermviewApp::new(startup.config, launch, runtime);
    if let Some(rx) = config_rx {
        app.watch_config(rx);
    }

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
