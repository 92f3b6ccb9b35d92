//! Finish initializing a new project

use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

use pitchfork::{resume, ResumeOutcome, SettingsStore};

/// Apply the marker file left in a freshly created project
pub struct ResumeCommand {
    project_root: PathBuf,
}

impl ResumeCommand {
    /// Resume the project at `project_root`
    pub const fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Execute the command
    pub fn execute(self, config_dir: &Path) -> Result<()> {
        let mut settings = SettingsStore::open(config_dir, &self.project_root)
            .context("Failed to open project settings")?;

        match resume(&self.project_root, &mut settings)? {
            ResumeOutcome::NothingToDo => {
                println!(
                    "{}",
                    style("Nothing to resume, the project is already initialized.").dim()
                );
            }
            ResumeOutcome::Applied(params) => print_applied(&params.name, &params.root_namespace),
        }
        Ok(())
    }
}

/// Resume the current directory before another command runs
///
/// Failures are reported and otherwise ignored.
pub fn resume_on_startup(settings: &mut SettingsStore, cwd: &Path) {
    match resume(cwd, settings) {
        Ok(ResumeOutcome::NothingToDo) => {}
        Ok(ResumeOutcome::Applied(params)) => print_applied(&params.name, &params.root_namespace),
        Err(err) => {
            tracing::error!(error = %err, "failed to resume project");
            eprintln!("{} {err}", style("Error:").red().bold());
        }
    }
}

fn print_applied(name: &str, root_namespace: &str) {
    println!(
        "{} {} {}",
        style("✓ Finished setting up").green().bold(),
        style(name).cyan().bold(),
        style(format!("(namespace {root_namespace})")).dim()
    );
}
