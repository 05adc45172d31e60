use clap::{Args, Parser, Subcommand};
use sots_domain::{CliOverrides, ServiceCategory};
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "sots")]
#[command(version)]
#[command(about = "Sots - verify traffic filtering profiles and manage the filtering service")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Installation directory (profiles, binaries, logs)
    #[arg(long, value_name = "DIR", global = true)]
    base_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Name of the OS service wrapping the executable
    #[arg(long, global = true)]
    service_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check profiles one by one and report which ones restore connectivity
    Check(CheckArgs),
    /// Print the state of the OS service
    Status,
    /// Start the service with a profile, recreating it if it is stopped
    Start {
        /// Profile file name without extension
        profile: String,
    },
    /// Recreate the service with a profile
    Restart {
        profile: String,
    },
    /// Stop and remove the service
    Stop,
    /// List known profiles
    Profiles,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Only check these profiles (repeatable); all profiles otherwise
    #[arg(short = 'p', long = "profile", value_name = "NAME")]
    pub profiles: Vec<String>,

    /// Only check profiles of this category
    #[arg(long, value_parser = parse_category)]
    pub category: Option<ServiceCategory>,

    /// Session label used in the session log
    #[arg(long)]
    pub label: Option<String>,
}

/// Drops `command` when the shutdown token fires; spawned scripts are killed with it.
async fn interruptible<F>(shutdown: &CancellationToken, command: F) -> anyhow::Result<bool>
where
    F: Future<Output = anyhow::Result<bool>>,
{
    tokio::select! {
        result = command => result,
        _ = shutdown.cancelled() => {
            warn!("Command interrupted");
            Ok(false)
        }
    }
}

fn parse_category(raw: &str) -> Result<ServiceCategory, String> {
    ServiceCategory::parse(raw)
        .ok_or_else(|| format!("unknown category '{}' (universal, youtube, discord, custom)", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        base_dir: cli.base_dir.clone(),
        log_level: cli.log_level.clone(),
        service_name: cli.service_name.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_dir = %config.paths.base_dir.display(),
        "Starting Sots"
    );

    let shutdown = CancellationToken::new();
    let services = di::Services::new(&config, shutdown.clone())?;

    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping");
            interrupt.cancel();
        }
    });

    let succeeded = match cli.command {
        Command::Check(args) => commands::check::run(&services, args).await?,
        Command::Status => {
            interruptible(&shutdown, async {
                Ok(commands::service::status(&services).await)
            })
            .await?
        }
        Command::Start { profile } => {
            interruptible(&shutdown, commands::service::start(&services, &profile)).await?
        }
        Command::Restart { profile } => {
            interruptible(&shutdown, commands::service::restart(&services, &profile)).await?
        }
        Command::Stop => interruptible(&shutdown, commands::service::stop(&services)).await?,
        Command::Profiles => {
            interruptible(&shutdown, commands::profiles::list(&services)).await?
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
