//! Command-line entry point for the Hack or Snooze client.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hack_or_snooze::config::ClientSettings;
use hack_or_snooze::inbound::cli::{Cli, CliError, Controller, ControllerPorts};
use hack_or_snooze::outbound::http::HackOrSnoozeHttpApi;
use hack_or_snooze::outbound::session_file::FileSessionStore;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match ClientSettings::load_from_env() {
        Ok(settings) => settings.with_overrides(cli.base_url.clone(), cli.session_dir.clone()),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(settings.log_json);

    match run(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn run(cli: Cli, settings: &ClientSettings) -> Result<(), CliError> {
    let api = Arc::new(HackOrSnoozeHttpApi::new(
        settings.base_url()?,
        settings.timeout(),
    )?);
    let session = Arc::new(FileSessionStore::open(settings.session_dir()?)?);
    let runtime = Builder::new_current_thread().enable_all().build()?;

    runtime.block_on(async move {
        let ports = ControllerPorts {
            stories: api.clone(),
            users: api,
            session,
        };
        let mut controller = Controller::bootstrap(ports, io::stdout().lock()).await;
        controller.dispatch(cli.command).await
    })
}
