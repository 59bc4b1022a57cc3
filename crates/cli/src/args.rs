//! Command-line arguments and their conversion into client settings and payloads.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use client::{ServerSettings, DEFAULT_BASE_URL};
use protocol::{
    ArchiveData, EnvironmentAction, EnvironmentData, ExperimentAction, ExperimentData, ZenodoData,
};

/// Drive the ReproLab server extension of a running Jupyter server.
#[derive(Parser, Debug)]
#[clap(name = "reprolab", version)]
#[clap(about = "Send ReproLab actions to a Jupyter server", long_about = None)]
pub struct Cli {
    /// Base URL of the Jupyter server, including any base path
    #[clap(long, env = "REPROLAB_SERVER_URL", default_value = DEFAULT_BASE_URL, value_name = "URL")]
    pub server_url: String,

    /// Jupyter server token
    #[clap(long, env = "JUPYTER_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[clap(long, env = "REPROLAB_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Log output format (written to stderr)
    #[clap(long, env = "REPROLAB_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            base_url: self.server_url.clone(),
            token: self.token.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Check that the server extension is running
    Status,

    /// Start or end an experiment
    Experiment {
        #[clap(long)]
        name: Option<String>,

        #[clap(long)]
        description: Option<String>,

        /// Notebook path relative to the server root
        #[clap(long, value_name = "PATH")]
        notebook_path: Option<String>,

        #[clap(long, value_enum)]
        action: Option<ExperimentActionArg>,
    },

    /// Create a virtual environment or freeze its dependencies
    Environment {
        #[clap(value_enum)]
        action: EnvironmentActionArg,

        #[clap(long, value_name = "NAME")]
        venv_name: Option<String>,
    },

    /// Create an archive package
    Archive {
        #[clap(long)]
        name: Option<String>,

        #[clap(long, value_name = "BOOL")]
        include_data: Option<bool>,

        #[clap(long, value_name = "BOOL")]
        include_notebooks: Option<bool>,

        /// Git tag to associate with the archive
        #[clap(long, value_name = "TAG")]
        tag_name: Option<String>,
    },

    /// Create a Zenodo-ready package
    Zenodo {
        #[clap(long)]
        title: Option<String>,

        #[clap(long)]
        description: Option<String>,

        /// Author name (repeatable, in citation order)
        #[clap(long = "author", value_name = "NAME")]
        authors: Vec<String>,

        #[clap(long, value_name = "TAG")]
        tag_name: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentActionArg {
    Start,
    End,
}

impl From<ExperimentActionArg> for ExperimentAction {
    fn from(arg: ExperimentActionArg) -> Self {
        match arg {
            ExperimentActionArg::Start => Self::Start,
            ExperimentActionArg::End => Self::End,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentActionArg {
    CreateEnvironment,
    FreezeDependencies,
}

impl From<EnvironmentActionArg> for EnvironmentAction {
    fn from(arg: EnvironmentActionArg) -> Self {
        match arg {
            EnvironmentActionArg::CreateEnvironment => Self::CreateEnvironment,
            EnvironmentActionArg::FreezeDependencies => Self::FreezeDependencies,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload conversion
// ---------------------------------------------------------------------------

pub fn experiment_data(
    name: Option<String>,
    description: Option<String>,
    notebook_path: Option<String>,
    action: Option<ExperimentActionArg>,
) -> ExperimentData {
    ExperimentData {
        name,
        description,
        notebook_path,
        action: action.map(Into::into),
    }
}

pub fn environment_data(action: EnvironmentActionArg, venv_name: Option<String>) -> EnvironmentData {
    EnvironmentData {
        action: action.into(),
        venv_name,
    }
}

pub fn archive_data(
    name: Option<String>,
    include_data: Option<bool>,
    include_notebooks: Option<bool>,
    tag_name: Option<String>,
) -> ArchiveData {
    ArchiveData {
        name,
        include_data,
        include_notebooks,
        tag_name,
    }
}

/// An empty `--author` list is sent as "no authors field", not `[]`.
pub fn zenodo_data(
    title: Option<String>,
    description: Option<String>,
    authors: Vec<String>,
    tag_name: Option<String>,
) -> ZenodoData {
    ZenodoData {
        title,
        description,
        authors: (!authors.is_empty()).then_some(authors),
        tag_name,
    }
}
