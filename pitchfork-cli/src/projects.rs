//! Existing projects: the ones in the base directory, and the one enclosing
//! a working directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Names of the directories directly under `base_dir`, sorted
///
/// Entries that are not directories are skipped.
///
/// # Errors
///
/// Returns an error if `base_dir` cannot be read.
pub fn list_projects(base_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(base_dir)
        .with_context(|| format!("Failed to enumerate directory: {}", base_dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to enumerate directory: {}", base_dir.display()))?;
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(path = %entry.path().display(), error = %err, "skipping entry");
            }
        }
    }

    names.sort();
    Ok(names)
}

/// Root of the CMake project containing `from`
///
/// Walks up from `from`. The first directory with a `CMakeLists.txt` is
/// inside the project; its outermost ancestor that still has one is the
/// root. A build directory is recognized by its `CMakeCache.txt`, whose
/// `CMAKE_HOME_DIRECTORY` entry names the root. `from` should be absolute.
///
/// # Errors
///
/// Returns an error if a `CMakeCache.txt` cannot be read.
pub fn detect_project_root(from: &Path) -> Result<Option<PathBuf>> {
    // The filesystem root is never a project root
    for dir in from.ancestors().filter(|dir| dir.parent().is_some()) {
        if dir.join("CMakeLists.txt").is_file() {
            let root = dir
                .ancestors()
                .take_while(|candidate| candidate.join("CMakeLists.txt").is_file())
                .last()
                .unwrap_or(dir);
            return Ok(Some(root.to_path_buf()));
        }

        let cache = dir.join("CMakeCache.txt");
        if cache.is_file() {
            let contents = fs::read_to_string(&cache)
                .with_context(|| format!("Failed to read file: {}", cache.display()))?;
            return Ok(cmake_home_directory(&contents));
        }
    }

    Ok(None)
}

/// Value of `CMAKE_HOME_DIRECTORY` in a CMake cache
fn cmake_home_directory(cache: &str) -> Option<PathBuf> {
    cache
        .lines()
        .find(|line| line.starts_with("CMAKE_HOME_DIRECTORY"))
        .and_then(|line| line.split_once('='))
        .map(|(_, value)| PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_directories() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("zeta")).unwrap();
        fs::create_dir(base.path().join("alpha")).unwrap();
        fs::write(base.path().join("README.md"), "hi").unwrap();

        assert_eq!(list_projects(base.path()).unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_missing_base_dir_is_an_error() {
        let base = TempDir::new().unwrap();
        assert!(list_projects(&base.path().join("nope")).is_err());
    }

    /// `sample/project` with a nested `src/CMakeLists.txt`, an in-tree
    /// `build/` and an out-of-tree `parallel_build/`
    fn sample_layout() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let sample = dir.path().join("sample");
        let project = sample.join("project");
        for sub in ["src", "data", "build"] {
            fs::create_dir_all(project.join(sub)).unwrap();
        }
        fs::create_dir_all(sample.join("parallel_build")).unwrap();

        fs::write(project.join("CMakeLists.txt"), "").unwrap();
        fs::write(project.join("src/CMakeLists.txt"), "").unwrap();
        let cache = format!(
            "# This is the CMakeCache file.\nCMAKE_BUILD_TYPE:STRING=Debug\nCMAKE_HOME_DIRECTORY:INTERNAL={}\n",
            project.display()
        );
        fs::write(sample.join("parallel_build/CMakeCache.txt"), &cache).unwrap();
        fs::write(project.join("build/CMakeCache.txt"), &cache).unwrap();

        (dir, project)
    }

    #[test]
    fn test_detect_project_root() {
        let (dir, project) = sample_layout();
        let sample = dir.path().join("sample");

        for from in [
            project.clone(),
            project.join("data"),
            project.join("build"),
            project.join("src"),
            sample.join("parallel_build"),
        ] {
            assert_eq!(
                detect_project_root(&from).unwrap(),
                Some(project.clone()),
                "from {}",
                from.display()
            );
        }
    }

    #[test]
    fn test_no_project_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        // Only meaningful when no ancestor of the temp dir is a CMake project
        if detect_project_root(dir.path()).unwrap().is_none() {
            assert_eq!(detect_project_root(&nested).unwrap(), None);
        }
    }

    #[test]
    fn test_cache_without_home_directory() {
        assert_eq!(cmake_home_directory("CMAKE_BUILD_TYPE:STRING=Debug\n"), None);
        assert_eq!(
            cmake_home_directory("CMAKE_HOME_DIRECTORY:INTERNAL=/src/demo\n"),
            Some(PathBuf::from("/src/demo"))
        );
    }
}
