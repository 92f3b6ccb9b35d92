//! Finish initialization of a freshly created project
//!
//! A new project carries a marker file holding the parameters it was created
//! with. The first time the tool runs inside that project, the marker is read,
//! its root namespace is stored in the project settings and the marker is
//! deleted. Without a marker there is nothing to do.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::materialize::MARKER_FILE;
use crate::params::NewProjectParams;
use crate::settings::{SettingsError, SettingsStore};

/// Resume failures
#[derive(Debug, Error)]
pub enum ResumeError {
    /// The marker exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Marker file
        path: PathBuf,
        /// Read failure
        source: io::Error,
    },

    /// The marker does not contain valid project parameters
    ///
    /// The marker is left in place.
    #[error("The .pitchfork-init file in this directory is not valid JSON: {source}")]
    Parse {
        /// Marker file
        path: PathBuf,
        /// Parse failure
        source: serde_json::Error,
    },

    /// The recovered namespace could not be stored
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The marker could not be deleted after being applied
    #[error("Failed to remove {path}: {source}")]
    Remove {
        /// Marker file
        path: PathBuf,
        /// Removal failure
        source: io::Error,
    },
}

/// What [`resume`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// No marker file, the project is already initialized
    NothingToDo,
    /// The marker was applied and removed
    Applied(NewProjectParams),
}

/// Path of the marker file inside `project_root`
#[must_use]
pub fn marker_path(project_root: &Path) -> PathBuf {
    project_root.join(MARKER_FILE)
}

/// Apply and remove the marker file in `project_root`, if there is one
///
/// # Errors
///
/// Returns an error if the marker cannot be read or parsed, if the settings
/// cannot be saved, or if the marker cannot be removed. A marker that fails to
/// parse is kept.
pub fn resume(
    project_root: &Path,
    settings: &mut SettingsStore,
) -> Result<ResumeOutcome, ResumeError> {
    let path = marker_path(project_root);
    if !path.is_file() {
        tracing::trace!(path = %path.display(), "no marker file");
        return Ok(ResumeOutcome::NothingToDo);
    }

    let contents = fs::read_to_string(&path).map_err(|source| ResumeError::Read {
        path: path.clone(),
        source,
    })?;
    let params: NewProjectParams = match serde_json::from_str(&contents) {
        Ok(params) => params,
        Err(source) => {
            tracing::warn!(path = %path.display(), error = %source, "invalid marker file kept");
            return Err(ResumeError::Parse { path, source });
        }
    };

    settings.set_root_namespace(params.root_namespace.clone())?;
    fs::remove_file(&path).map_err(|source| ResumeError::Remove {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        project = %params.name,
        root_namespace = %params.root_namespace,
        "project initialization finished"
    );
    Ok(ResumeOutcome::Applied(params))
}
