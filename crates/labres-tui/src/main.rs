//! `labres-tui`: terminal front end for laboratory reservations.
//!
//! Three tabs (Current, Past, New) over a single `ViewController`. The
//! service URL comes from `--service`, else the selected profile in the
//! shared config file.
//!
//! Logs go to a file (default `/tmp/labres-tui.log`); the terminal
//! belongs to the UI.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use labres_config::{ConfigError, Profile};
use labres_core::{ServiceConfig, ViewController};

use crate::app::App;

/// Browse and book laboratory reservations from the terminal.
#[derive(Parser, Debug)]
#[command(name = "labres-tui", version, about)]
struct Cli {
    /// Reservation service base URL (e.g., http://localhost:8000)
    #[arg(short = 's', long, env = "LABRES_SERVICE")]
    service: Option<String>,

    /// Profile from the config file
    #[arg(short = 'p', long, env = "LABRES_PROFILE")]
    profile: Option<String>,

    /// Log file path (defaults to /tmp/labres-tui.log)
    #[arg(long, default_value = "/tmp/labres-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Nothing may go to stdout/stderr while the UI owns
/// the terminal. The returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("labres_tui={log_level},labres_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("labres-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Flag > env > profile. An unknown profile is tolerated when `--service`
/// supplies the URL on its own.
fn resolve_service_config(cli: &Cli) -> Result<ServiceConfig> {
    let cfg = labres_config::load_config()?;

    let mut profile = match cfg.resolve_profile(cli.profile.as_deref()) {
        Ok((name, profile)) => {
            info!(profile = %name, "using profile");
            profile
        }
        Err(ConfigError::UnknownProfile { .. }) if cli.service.is_some() => Profile::local(),
        Err(err) => return Err(err.into()),
    };

    if let Some(ref url) = cli.service {
        profile.service_url.clone_from(url);
    }

    Ok(labres_config::profile_to_service_config(
        &profile,
        &cfg.defaults,
    )?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let service = resolve_service_config(&cli)?;
    let label = service.base_url.to_string();
    info!(service = %label, "starting labres-tui");

    let client = service.connect()?;
    let mut app = App::new(ViewController::new(client), label);
    app.run().await?;

    Ok(())
}
