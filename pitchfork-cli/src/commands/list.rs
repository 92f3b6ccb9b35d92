//! List existing projects

use anyhow::Result;
use console::style;
use std::path::PathBuf;

use pitchfork::projects::list_projects;

/// Print the projects under the base directory
pub struct ListCommand {
    base_dir: PathBuf,
}

impl ListCommand {
    /// List projects in `base_dir`
    pub const fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let names = list_projects(&self.base_dir)?;
        if names.is_empty() {
            println!(
                "{} {}",
                style("No projects in").dim(),
                style(self.base_dir.display()).cyan()
            );
            return Ok(());
        }

        println!(
            "{} {}",
            style("Projects in").bold(),
            style(self.base_dir.display()).cyan()
        );
        for name in names {
            println!("  {name}");
        }
        Ok(())
    }
}
