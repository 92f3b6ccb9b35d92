//! Persistent settings
//!
//! Two independent scopes, each a small TOML file:
//!
//! - global: `~/.config/pitchfork/settings.toml`, holding `baseDirPath`
//! - project: `<project>/.pitchfork/settings.toml`, holding `rootNamespace`
//!
//! Values are loaded once when the store is opened and written back
//! immediately on every set.

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the settings file in each scope
pub const SETTINGS_FILE: &str = "settings.toml";

/// Directory holding per-project state inside a project
pub const PROJECT_STATE_DIR: &str = ".pitchfork";

/// Settings load/store failures
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but cannot be parsed
    #[error("Failed to load settings from {path}: {source}")]
    Load {
        /// Settings file
        path: PathBuf,
        /// Parse failure
        source: Box<figment::Error>,
    },

    /// Settings could not be encoded
    #[error("Failed to encode settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The settings file could not be written
    #[error("Failed to write settings to {path}: {source}")]
    Io {
        /// Settings file
        path: PathBuf,
        /// Write failure
        source: std::io::Error,
    },
}

/// Settings shared by every project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Directory new projects are created in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir_path: Option<PathBuf>,
}

/// Settings of the current project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Root namespace of the project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_namespace: Option<String>,
}

/// One settings scope backed by a file
#[derive(Debug, Clone)]
struct SettingsFile<T> {
    path: PathBuf,
    value: T,
}

impl<T> SettingsFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    fn load(path: PathBuf) -> Result<Self, SettingsError> {
        let value = if path.is_file() {
            Figment::new()
                .merge(Serialized::defaults(T::default()))
                .merge(Toml::file(&path))
                .extract()
                .map_err(|source| SettingsError::Load {
                    path: path.clone(),
                    source: Box::new(source),
                })?
        } else {
            T::default()
        };

        Ok(Self { path, value })
    }

    fn store(&mut self, value: T) -> Result<(), SettingsError> {
        let encoded = toml::to_string_pretty(&value)?;
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, encoded).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "settings saved");

        self.value = value;
        Ok(())
    }
}

/// Global and per-project settings for one run of the tool
#[derive(Debug, Clone)]
pub struct SettingsStore {
    global: SettingsFile<GlobalSettings>,
    project: SettingsFile<ProjectSettings>,
}

impl SettingsStore {
    /// Open the settings stored under `config_dir` and in `project_root`
    ///
    /// Missing files are treated as empty settings.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing settings file cannot be parsed.
    pub fn open(config_dir: &Path, project_root: &Path) -> Result<Self, SettingsError> {
        Ok(Self {
            global: SettingsFile::load(config_dir.join(SETTINGS_FILE))?,
            project: SettingsFile::load(project_root.join(PROJECT_STATE_DIR).join(SETTINGS_FILE))?,
        })
    }

    /// Default location of the global settings directory
    #[must_use]
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(".").join(PROJECT_STATE_DIR),
            |config_dir| config_dir.join("pitchfork"),
        )
    }

    /// Directory new projects are created in, if one was chosen
    #[must_use]
    pub fn base_dir_path(&self) -> Option<&Path> {
        self.global.value.base_dir_path.as_deref()
    }

    /// Remember the directory new projects are created in
    ///
    /// # Errors
    ///
    /// Returns an error if the global settings file cannot be written.
    pub fn set_base_dir_path(&mut self, path: PathBuf) -> Result<(), SettingsError> {
        let settings = GlobalSettings {
            base_dir_path: Some(path),
        };
        self.global.store(settings)
    }

    /// Root namespace of the current project, if known
    #[must_use]
    pub fn root_namespace(&self) -> Option<&str> {
        self.project.value.root_namespace.as_deref()
    }

    /// Remember the root namespace of the current project
    ///
    /// # Errors
    ///
    /// Returns an error if the project settings file cannot be written.
    pub fn set_root_namespace(&mut self, ns: String) -> Result<(), SettingsError> {
        let settings = ProjectSettings {
            root_namespace: Some(ns),
        };
        self.project.store(settings)
    }

    /// All global settings
    #[must_use]
    pub const fn global(&self) -> &GlobalSettings {
        &self.global.value
    }

    /// All settings of the current project
    #[must_use]
    pub const fn project(&self) -> &ProjectSettings {
        &self.project.value
    }
}
