//! Keep the source lists of an existing project in sync with its files
//!
//! Inside a target's argument list, a `# sources` line marks the start of the
//! source list. Everything after the marker up to the closing parenthesis is
//! replaced with the sources found on disk, one per line, indented like the
//! marker. Lists without a marker are left alone.
//!
//! ```text
//! add_library(
//!   demo
//!   # sources
//!   acme/demo/demo.cpp
//!   )
//! ```

use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Line that starts a managed source list
pub const SOURCES_MARKER: &str = "# sources\n";

/// Extensions of C and C++ translation units
pub const SOURCE_EXTENSIONS: [&str; 5] = ["c", "cc", "cpp", "cxx", "c++"];

/// Extensions of C and C++ headers
pub const HEADER_EXTENSIONS: [&str; 5] = ["h", "hh", "hpp", "hxx", "h++"];

/// Layout of a rewritten source list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceGrouping {
    /// One source per line
    None,
    /// Blank line between sources of different directories
    #[default]
    Smart,
}

/// Source files under `directory`, recursively, in path order
///
/// # Errors
///
/// Returns an error if `directory` cannot be walked.
pub fn glob_sources(directory: &Path) -> Result<BTreeSet<PathBuf>> {
    glob_with_extensions(directory, &SOURCE_EXTENSIONS)
}

/// Header files under `directory`, recursively, in path order
///
/// # Errors
///
/// Returns an error if `directory` cannot be walked.
pub fn glob_headers(directory: &Path) -> Result<BTreeSet<PathBuf>> {
    glob_with_extensions(directory, &HEADER_EXTENSIONS)
}

fn glob_with_extensions(directory: &Path, extensions: &[&str]) -> Result<BTreeSet<PathBuf>> {
    let mut found = BTreeSet::new();
    for entry in WalkDir::new(directory) {
        let entry = entry
            .with_context(|| format!("Failed to enumerate directory: {}", directory.display()))?;
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if entry.file_type().is_file() && matches {
            found.insert(entry.into_path());
        }
    }
    Ok(found)
}

/// Rewrite every marked source list in `cmakelists` to hold `sources`
///
/// Sources are written relative to the directory of `cmakelists`, with `/`
/// separators. The file is only written when its contents change.
///
/// Returns whether the file was modified.
///
/// # Errors
///
/// Returns an error if `cmakelists` does not exist or cannot be read or
/// written.
pub fn update_source_files(
    cmakelists: &Path,
    sources: &BTreeSet<PathBuf>,
    grouping: SourceGrouping,
) -> Result<bool> {
    if !cmakelists.is_file() {
        bail!("{} does not exist", cmakelists.display());
    }
    let base = cmakelists.parent().unwrap_or_else(|| Path::new(""));

    let original = fs::read_to_string(cmakelists)
        .with_context(|| format!("Failed to read file: {}", cmakelists.display()))?;
    let entries = source_list_entries(sources, base, grouping);
    let updated = rewrite_source_lists(&original, &entries);

    if updated == original {
        tracing::debug!(path = %cmakelists.display(), "source lists already current");
        return Ok(false);
    }
    fs::write(cmakelists, &updated)
        .with_context(|| format!("Failed to write file: {}", cmakelists.display()))?;
    tracing::info!(path = %cmakelists.display(), sources = sources.len(), "source lists updated");
    Ok(true)
}

/// Refresh `src/CMakeLists.txt` and, when `tests/` exists,
/// `tests/CMakeLists.txt` of the project at `project_root`
///
/// Returns the build files that changed.
///
/// # Errors
///
/// Returns an error if a required `CMakeLists.txt` is missing or any file
/// operation fails.
pub fn update_project(project_root: &Path, grouping: SourceGrouping) -> Result<Vec<PathBuf>> {
    let mut changed = Vec::new();

    for (dir, required) in [("src", true), ("tests", false)] {
        let dir = project_root.join(dir);
        if !required && !dir.is_dir() {
            continue;
        }
        let cmakelists = dir.join("CMakeLists.txt");
        let mut sources = glob_sources(&dir)?;
        sources.extend(glob_headers(&dir)?);
        if update_source_files(&cmakelists, &sources, grouping)? {
            changed.push(cmakelists);
        }
    }

    Ok(changed)
}

/// Lines of a source list; empty strings become blank separator lines
fn source_list_entries(
    sources: &BTreeSet<PathBuf>,
    base: &Path,
    grouping: SourceGrouping,
) -> Vec<String> {
    let relative = sources.iter().map(|source| {
        source
            .strip_prefix(base)
            .unwrap_or(source)
            .to_string_lossy()
            .replace('\\', "/")
    });

    match grouping {
        SourceGrouping::None => relative.collect(),
        SourceGrouping::Smart => {
            let mut entries = Vec::new();
            let mut last_dir: Option<String> = None;
            for source in relative {
                let dir = source.rfind('/').map_or("", |end| &source[..end]).to_string();
                if last_dir.as_ref().is_some_and(|previous| *previous != dir) {
                    entries.push(String::new());
                }
                last_dir = Some(dir);
                entries.push(source);
            }
            entries
        }
    }
}

/// Replace the contents of every marked list in `contents` with `entries`
///
/// Parentheses inside comments are not understood.
#[must_use]
pub fn rewrite_source_lists(contents: &str, entries: &[String]) -> String {
    let mut text = contents.to_string();
    let mut pos = 0;

    while pos < text.len() {
        let Some(open) = text[pos..].find('(').map(|i| pos + i) else {
            break;
        };
        let close = text[open..].find(')').map_or(text.len(), |i| open + i);
        let Some(marker) = text[open..close].find(SOURCES_MARKER).map(|i| open + i) else {
            pos = close;
            continue;
        };

        let before = &text[open..marker];
        let blank_start = before
            .trim_end_matches(|c: char| c != '\n' && c.is_whitespace())
            .len();
        let indent = before[blank_start..].to_string();
        let insert_at = marker + SOURCES_MARKER.len();

        // Keep the line break and indentation in front of ')'
        let mut list_end = text[open..close].trim_end_matches([' ', '\t']).len() + open;
        let ends_with_newline = text[..list_end].ends_with('\n');
        if ends_with_newline {
            list_end -= 1;
        }

        let mut rendered = String::new();
        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                rendered.push('\n');
            }
            if !entry.is_empty() {
                rendered.push_str(&indent);
            }
            rendered.push_str(entry);
        }

        if list_end <= insert_at {
            if !rendered.is_empty() {
                rendered.push('\n');
                text.insert_str(insert_at, &rendered);
            }
        } else if rendered.is_empty() && ends_with_newline {
            text.replace_range(insert_at..=list_end, "");
        } else {
            text.replace_range(insert_at..list_end, &rendered);
        }
        pos = insert_at + rendered.len();
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_SOURCES: [&str; 12] = [
        "project/source1.c",
        "project/source2.cc",
        "project/source3.cpp",
        "project/source4.cxx",
        "project/source5.c++",
        "project/sub2/source1.c",
        "project/sub3/source1.c",
        "project/subfolder/source1.c",
        "project/subfolder/source2.cc",
        "project/subfolder/source3.cpp",
        "project/subfolder/source4.cxx",
        "project/subfolder/source5.c++",
    ];

    const SAMPLE_CMAKELISTS: &str = "\
add_library(project
  # sources
  project/old.cpp
  )

target_include_directories(project PUBLIC .)

add_executable(tool
    # sources
    )
";

    fn sample_sources(src: &Path) -> BTreeSet<PathBuf> {
        SAMPLE_SOURCES.iter().map(|s| src.join(s)).collect()
    }

    fn write_sample_tree(root: &Path) {
        for dir in ["src/project/subfolder", "src/project/sub2", "src/project/sub3"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        for stem in ["src/project", "src/project/subfolder"] {
            for (i, ext) in SOURCE_EXTENSIONS.iter().enumerate() {
                fs::write(root.join(format!("{stem}/source{}.{ext}", i + 1)), "").unwrap();
            }
            for (i, ext) in HEADER_EXTENSIONS.iter().enumerate() {
                fs::write(root.join(format!("{stem}/header{}.{ext}", i + 1)), "").unwrap();
            }
            fs::write(root.join(format!("{stem}/notes.txt")), "").unwrap();
        }
    }

    fn relative(root: &Path, paths: BTreeSet<PathBuf>) -> BTreeSet<String> {
        paths
            .into_iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_glob_sources() {
        let dir = TempDir::new().unwrap();
        write_sample_tree(dir.path());

        let expected: BTreeSet<String> = [
            "src/project/source1.c",
            "src/project/source2.cc",
            "src/project/source3.cpp",
            "src/project/source4.cxx",
            "src/project/source5.c++",
            "src/project/subfolder/source1.c",
            "src/project/subfolder/source2.cc",
            "src/project/subfolder/source3.cpp",
            "src/project/subfolder/source4.cxx",
            "src/project/subfolder/source5.c++",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(
            relative(dir.path(), glob_sources(dir.path()).unwrap()),
            expected
        );
    }

    #[test]
    fn test_glob_headers() {
        let dir = TempDir::new().unwrap();
        write_sample_tree(dir.path());

        let headers = relative(dir.path(), glob_headers(dir.path()).unwrap());
        assert_eq!(headers.len(), 10);
        assert!(headers.contains("src/project/header3.hpp"));
        assert!(headers.contains("src/project/subfolder/header5.h++"));
    }

    #[test]
    fn test_update_without_grouping() {
        let dir = TempDir::new().unwrap();
        let cmakelists = dir.path().join("CMakeLists.txt");
        fs::write(&cmakelists, SAMPLE_CMAKELISTS).unwrap();

        let changed =
            update_source_files(&cmakelists, &sample_sources(dir.path()), SourceGrouping::None)
                .unwrap();
        assert!(changed);

        let expected = "\
add_library(project
  # sources
  project/source1.c
  project/source2.cc
  project/source3.cpp
  project/source4.cxx
  project/source5.c++
  project/sub2/source1.c
  project/sub3/source1.c
  project/subfolder/source1.c
  project/subfolder/source2.cc
  project/subfolder/source3.cpp
  project/subfolder/source4.cxx
  project/subfolder/source5.c++
  )

target_include_directories(project PUBLIC .)

add_executable(tool
    # sources
    project/source1.c
    project/source2.cc
    project/source3.cpp
    project/source4.cxx
    project/source5.c++
    project/sub2/source1.c
    project/sub3/source1.c
    project/subfolder/source1.c
    project/subfolder/source2.cc
    project/subfolder/source3.cpp
    project/subfolder/source4.cxx
    project/subfolder/source5.c++
    )
";
        assert_eq!(fs::read_to_string(&cmakelists).unwrap(), expected);
    }

    #[test]
    fn test_update_with_grouping() {
        let dir = TempDir::new().unwrap();
        let cmakelists = dir.path().join("CMakeLists.txt");
        fs::write(&cmakelists, "add_library(project\n  # sources\n  )\n").unwrap();

        update_source_files(&cmakelists, &sample_sources(dir.path()), SourceGrouping::Smart)
            .unwrap();

        let expected = "\
add_library(project
  # sources
  project/source1.c
  project/source2.cc
  project/source3.cpp
  project/source4.cxx
  project/source5.c++

  project/sub2/source1.c

  project/sub3/source1.c

  project/subfolder/source1.c
  project/subfolder/source2.cc
  project/subfolder/source3.cpp
  project/subfolder/source4.cxx
  project/subfolder/source5.c++
  )
";
        assert_eq!(fs::read_to_string(&cmakelists).unwrap(), expected);
    }

    #[test]
    fn test_update_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let cmakelists = dir.path().join("CMakeLists.txt");
        fs::write(&cmakelists, SAMPLE_CMAKELISTS).unwrap();
        let sources = sample_sources(dir.path());

        assert!(update_source_files(&cmakelists, &sources, SourceGrouping::Smart).unwrap());
        let first = fs::read_to_string(&cmakelists).unwrap();
        assert!(!update_source_files(&cmakelists, &sources, SourceGrouping::Smart).unwrap());
        assert_eq!(fs::read_to_string(&cmakelists).unwrap(), first);
    }

    #[test]
    fn test_unmarked_lists_are_untouched() {
        let contents = "add_library(x a.cpp)\ntarget_link_libraries(x PRIVATE y)\n";
        let entries = vec!["b.cpp".to_string()];
        assert_eq!(rewrite_source_lists(contents, &entries), contents);
    }

    #[test]
    fn test_empty_source_list() {
        let contents = "add_library(x\n  # sources\n  a.cpp\n  )\n";
        assert_eq!(
            rewrite_source_lists(contents, &[]),
            "add_library(x\n  # sources\n  )\n"
        );
    }

    #[test]
    fn test_missing_cmakelists_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = update_source_files(
            &dir.path().join("CMakeLists.txt"),
            &BTreeSet::new(),
            SourceGrouping::None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_update_generated_project() {
        let base = TempDir::new().unwrap();
        let params = crate::params::NewProjectParams {
            name: "demo".to_string(),
            root_namespace: "acme::demo".to_string(),
            build_system: crate::params::BuildSystem::CMake,
            generate_third_party: false,
            generate_examples: false,
            separate_headers: false,
        };
        let root = crate::materialize::materialize(base.path(), &params).unwrap();
        fs::write(root.join("src/acme/demo/extra.cpp"), "").unwrap();
        fs::write(root.join("tests/other_test.cpp"), "").unwrap();

        let changed = update_project(&root, SourceGrouping::Smart).unwrap();
        assert_eq!(
            changed,
            vec![
                root.join("src/CMakeLists.txt"),
                root.join("tests/CMakeLists.txt")
            ]
        );

        let src = fs::read_to_string(root.join("src/CMakeLists.txt")).unwrap();
        assert!(src.contains(
            "  # sources\n  acme/demo/demo.cpp\n  acme/demo/demo.hpp\n  acme/demo/extra.cpp\n  )"
        ));
        let tests = fs::read_to_string(root.join("tests/CMakeLists.txt")).unwrap();
        assert!(tests.contains("  # sources\n  my_test.cpp\n  other_test.cpp\n  )"));
    }

    #[test]
    fn test_update_project_requires_src_build_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        assert!(update_project(dir.path(), SourceGrouping::None).is_err());
    }
}
