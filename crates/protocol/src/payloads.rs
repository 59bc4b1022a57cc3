//! Action payloads sent as JSON request bodies.
//!
//! These are plain records. The client performs no validation on them; the
//! server decides what a missing or contradictory field means. Fields left as
//! `None` are omitted from the serialised body rather than sent as `null`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Experiments
// ---------------------------------------------------------------------------

/// Lifecycle step of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentAction {
    /// Begin tracking a new experiment.
    Start,
    /// Finish the running experiment and record its results.
    End,
}

/// Body of `POST reprolab/api/experiment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Notebook the experiment belongs to, relative to the server root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ExperimentAction>,
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Environment operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentAction {
    /// Create a fresh virtual environment.
    CreateEnvironment,
    /// Snapshot the installed packages of the current environment.
    FreezeDependencies,
}

/// Body of `POST reprolab/api/environment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentData {
    /// The operation to perform. Required.
    pub action: EnvironmentAction,

    /// Name of the virtual environment to create or freeze.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venv_name: Option<String>,
}

impl EnvironmentData {
    /// Creates a payload for `action` with no environment name.
    pub fn new(action: EnvironmentAction) -> Self {
        Self {
            action,
            venv_name: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Archives
// ---------------------------------------------------------------------------

/// Body of `POST reprolab/api/archive`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Include the project's data directory in the archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_data: Option<bool>,

    /// Include notebooks in the archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_notebooks: Option<bool>,

    /// Git tag the archive is associated with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Zenodo
// ---------------------------------------------------------------------------

/// Body of `POST reprolab/api/zenodo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZenodoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Author names in citation order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
}
