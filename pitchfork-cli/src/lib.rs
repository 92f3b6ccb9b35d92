//! Pitchfork project generator library
//!
//! Creates C++ projects that follow the Pitchfork layout:
//!
//! 1. [`wizard`] collects a [`NewProjectParams`] record, step by step
//! 2. [`materialize`] writes the directory tree and files, plus a marker file
//! 3. [`resume`] picks up the marker the next time the tool runs inside the
//!    new project and stores its settings
//!
//! For existing projects, [`update`] keeps the CMake source lists in sync
//! with the files on disk.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod materialize;
pub mod namespace;
pub mod observability;
pub mod params;
pub mod projects;
pub mod resume;
pub mod settings;
pub mod templates;
pub mod testing;
pub mod update;
pub mod wizard;

pub use materialize::{materialize, MaterializeReport, ProjectMaterializer, MARKER_FILE};
pub use namespace::{path_for_namespace, validate_namespace, NamespaceError};
pub use params::{BuildSystem, NewProjectParams};
pub use projects::{detect_project_root, list_projects};
pub use resume::{resume, ResumeError, ResumeOutcome};
pub use settings::{SettingsError, SettingsStore};
pub use update::{update_project, update_source_files, SourceGrouping};
pub use wizard::{NameError, NewProjectWizard, WizardPresets, WizardState};
