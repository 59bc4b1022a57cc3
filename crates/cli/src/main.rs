//! ReproLab CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** from flags and `REPROLAB_*` / `JUPYTER_TOKEN`
//!    environment variables.
//! 2. **Wire observability**: `tracing-subscriber` with a text or JSON layer
//!    on stderr.
//! 3. **Construct infrastructure**: a [`client::ServerConnection`] injected
//!    into a [`client::ApiService`].
//! 4. **Run one action** and print the response envelope as JSON on stdout.
//!
//! Exit codes: `0` success envelope, `1` error envelope, `2` the request
//! could not be completed.

mod args;
mod observability;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use client::{ApiService, ServerConnection};
use protocol::ApiResponse;
use tracing::info;

use crate::args::{archive_data, environment_data, experiment_data, zenodo_data, Cli, Command};

async fn run(cli: Cli) -> anyhow::Result<ApiResponse> {
    let connection = ServerConnection::new(cli.server_settings())
        .context("invalid server configuration")?;
    info!(server = %connection.base_url(), "Connecting to Jupyter server");
    let api = ApiService::new(connection);

    let response = match cli.command {
        Command::Status => api.check_status().await?,
        Command::Experiment {
            name,
            description,
            notebook_path,
            action,
        } => {
            api.create_experiment(&experiment_data(name, description, notebook_path, action))
                .await?
        }
        Command::Environment { action, venv_name } => {
            api.perform_environment_action(&environment_data(action, venv_name))
                .await?
        }
        Command::Archive {
            name,
            include_data,
            include_notebooks,
            tag_name,
        } => {
            api.create_archive(&archive_data(name, include_data, include_notebooks, tag_name))
                .await?
        }
        Command::Zenodo {
            title,
            description,
            authors,
            tag_name,
        } => {
            api.create_zenodo_package(&zenodo_data(title, description, authors, tag_name))
                .await?
        }
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = observability::init_tracing(cli.log_format) {
        eprintln!("failed to initialise logging: {e:#}");
        return ExitCode::from(2);
    }

    match run(cli).await {
        Ok(response) => {
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: could not render response: {e}");
                    return ExitCode::from(2);
                }
            }
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
