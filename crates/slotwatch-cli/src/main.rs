mod run;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slotwatch_core::{load_monitor_config, load_notify_config};
use slotwatch_notify::Notifier;

#[derive(Debug, Parser)]
#[command(name = "slotwatch")]
#[command(about = "Appointment-slot monitor for the BMVS booking site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the pipeline once and notify on matches.
    Run {
        /// Keep the browser visible for manual inspection.
        #[arg(long)]
        headed: bool,
        /// Skip notification delivery even when matches are found.
        #[arg(long)]
        no_notify: bool,
    },
    /// Run immediately, then keep checking at the configured interval.
    Watch {
        /// Keep the browser visible for manual inspection.
        #[arg(long)]
        headed: bool,
    },
    /// Send a test message to verify the notifier configuration.
    TestNotify,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_monitor_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { headed, no_notify } => {
            let notifier = if no_notify {
                None
            } else {
                Some(Notifier::new(load_notify_config()?)?)
            };
            run::run_once(&config, notifier.as_ref(), headed).await?;
        }
        Commands::Watch { headed } => {
            let notifier = Notifier::new(load_notify_config()?)?;
            watch::run_watch(config, notifier, headed).await?;
        }
        Commands::TestNotify => {
            let notifier = Notifier::new(load_notify_config()?)?;
            notifier.send_test_message().await?;
            println!("test notification delivered");
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
