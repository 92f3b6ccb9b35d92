//! Refresh source lists of an existing project

use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

use pitchfork::{detect_project_root, update_project, SourceGrouping};

/// Rewrite the marked source lists of the project containing a directory
pub struct UpdateCommand {
    from: PathBuf,
    grouping: SourceGrouping,
}

impl UpdateCommand {
    /// Update the project enclosing `from`
    pub const fn new(from: PathBuf, grouping: SourceGrouping) -> Self {
        Self { from, grouping }
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let root = project_root(&self.from)?;
        let changed = update_project(&root, self.grouping)
            .with_context(|| format!("Failed to update project in {}", root.display()))?;

        if changed.is_empty() {
            println!("{}", style("Source lists are already up to date.").dim());
            return Ok(());
        }
        for path in changed {
            println!("  {} {}", style("~").yellow(), path.display());
        }
        println!("{}", style("✓ Source lists updated").green().bold());
        Ok(())
    }
}

/// Project root enclosing `from`, as an absolute path
pub fn project_root(from: &Path) -> Result<PathBuf> {
    let from = std::fs::canonicalize(from)
        .with_context(|| format!("Failed to resolve directory: {}", from.display()))?;
    detect_project_root(&from)?
        .with_context(|| format!("No CMake project found at or above {}", from.display()))
}
