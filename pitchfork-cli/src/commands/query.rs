//! Print information about the current project

use anyhow::Result;
use clap::ValueEnum;
use std::path::PathBuf;

use super::update::project_root;

/// Values that can be queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryId {
    /// Root directory of the enclosing CMake project
    #[value(name = "project.root")]
    ProjectRoot,
}

/// Answer a single query about the project containing a directory
pub struct QueryCommand {
    id: QueryId,
    from: PathBuf,
}

impl QueryCommand {
    /// Query `id` for the project enclosing `from`
    pub const fn new(id: QueryId, from: PathBuf) -> Self {
        Self { id, from }
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self.id {
            QueryId::ProjectRoot => println!("{}", project_root(&self.from)?.display()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_query_id_names() {
        assert_eq!(
            QueryId::from_str("project.root", false),
            Ok(QueryId::ProjectRoot)
        );
        assert!(QueryId::from_str("project", false).is_err());
    }

    #[test]
    fn test_project_root_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("demo");
        fs::create_dir_all(root.join("src/acme")).unwrap();
        fs::write(root.join("CMakeLists.txt"), "").unwrap();
        fs::write(root.join("src/CMakeLists.txt"), "").unwrap();

        assert_eq!(
            project_root(&root.join("src/acme")).unwrap(),
            fs::canonicalize(&root).unwrap()
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(project_root(&dir.path().join("missing")).is_err());
    }
}
