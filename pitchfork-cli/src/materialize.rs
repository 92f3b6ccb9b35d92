//! Turn project parameters into a directory tree on disk
//!
//! Creation is not transactional: the first failing filesystem operation
//! aborts the rest and whatever was already created stays in place.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::namespace::path_for_namespace;
use crate::params::NewProjectParams;
use crate::templates::{TemplateCatalog, TemplateContext, TemplateRole};

/// Marker file name written at the root of every new project
pub const MARKER_FILE: &str = ".pitchfork-init";

/// What [`ProjectMaterializer::materialize`] created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    /// `<base_dir>/<name>`
    pub project_root: PathBuf,
    /// Directories created, relative to the project root, in creation order
    pub directories: Vec<PathBuf>,
    /// Files written, relative to the project root, in write order
    pub files: Vec<PathBuf>,
}

/// Creates new project trees from the built-in templates
pub struct ProjectMaterializer {
    catalog: TemplateCatalog,
}

impl ProjectMaterializer {
    /// Create a materializer with the built-in template catalog
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog: TemplateCatalog::new()?,
        })
    }

    /// Create `<base_dir>/<params.name>` with all directories and files
    ///
    /// # Errors
    ///
    /// Returns an error if the project directory already exists, or if any
    /// directory or file cannot be created.
    pub fn materialize(
        &self,
        base_dir: &Path,
        params: &NewProjectParams,
    ) -> Result<MaterializeReport> {
        let mut job = Job {
            catalog: &self.catalog,
            params,
            context: TemplateContext::new(params),
            report: MaterializeReport {
                project_root: base_dir.join(&params.name),
                directories: Vec::new(),
                files: Vec::new(),
            },
        };

        job.create_structure()?;
        // Without a build system only the layout and the marker are written
        if params.uses_cmake() {
            job.generate_cmake_files()?;
        }
        job.write_marker()?;

        tracing::info!(
            project = %job.report.project_root.display(),
            directories = job.report.directories.len(),
            files = job.report.files.len(),
            "project created"
        );
        Ok(job.report)
    }
}

/// Convenience wrapper around [`ProjectMaterializer`]
///
/// # Errors
///
/// See [`ProjectMaterializer::materialize`].
pub fn materialize(base_dir: &Path, params: &NewProjectParams) -> Result<PathBuf> {
    let report = ProjectMaterializer::new()?.materialize(base_dir, params)?;
    Ok(report.project_root)
}

/// State for a single materialization
struct Job<'a> {
    catalog: &'a TemplateCatalog,
    params: &'a NewProjectParams,
    context: TemplateContext,
    report: MaterializeReport,
}

impl Job<'_> {
    fn root(&self) -> &Path {
        &self.report.project_root
    }

    fn library_dir(&self) -> PathBuf {
        Path::new("src").join(path_for_namespace(&self.params.root_namespace))
    }

    /// Create directory structure
    fn create_structure(&mut self) -> Result<()> {
        // The project root itself must be new
        fs::create_dir(self.root()).with_context(|| {
            format!("Failed to create project directory: {}", self.root().display())
        })?;
        tracing::debug!(path = %self.root().display(), "created project root");

        let ns_path = path_for_namespace(&self.params.root_namespace);
        self.create_dir(Path::new("src").join(&ns_path))?;
        if self.params.separate_headers {
            self.create_dir(Path::new("include").join(&ns_path))?;
        }
        if self.params.generate_third_party {
            self.create_dir(PathBuf::from("third_party"))?;
        }
        if self.params.generate_examples {
            self.create_dir(PathBuf::from("examples"))?;
        }
        self.create_dir(PathBuf::from("tests"))?;
        self.create_dir(PathBuf::from("doc"))?;
        if self.params.uses_cmake() {
            self.create_dir(PathBuf::from("cmake"))?;
        }

        Ok(())
    }

    /// Build files plus sources, assembling the root `CMakeLists.txt` last
    fn generate_cmake_files(&mut self) -> Result<()> {
        let mut root_cmake = self.render(TemplateRole::RootBuildHead)?;

        if self.params.generate_third_party {
            self.write_file(
                Path::new("third_party/CMakeLists.txt"),
                TemplateRole::ThirdPartyBuild,
            )?;
            root_cmake.push_str(&self.render(TemplateRole::RootBuildThirdParty)?);
        }

        let src_role = if self.params.separate_headers {
            TemplateRole::SourceBuildSeparateHeaders
        } else {
            TemplateRole::SourceBuildMergedHeaders
        };
        self.write_file(Path::new("src/CMakeLists.txt"), src_role)?;

        self.write_library()?;
        self.write_file(Path::new("tests/my_test.cpp"), TemplateRole::TestSource)?;
        self.write_file(Path::new("tests/CMakeLists.txt"), TemplateRole::TestBuild)?;
        root_cmake.push_str(&self.render(TemplateRole::RootBuildMiddle)?);

        if self.params.generate_examples {
            self.write_file(Path::new("examples/example1.cpp"), TemplateRole::ExampleSource)?;
            self.write_file(Path::new("examples/CMakeLists.txt"), TemplateRole::ExampleBuild)?;
            root_cmake.push_str(&self.render(TemplateRole::RootBuildExamples)?);
        }

        self.write_contents(Path::new("CMakeLists.txt"), &root_cmake)
    }

    fn write_library(&mut self) -> Result<()> {
        let params = self.params;
        let dir = self.library_dir();
        let name = &params.name;
        self.write_file(&dir.join(format!("{name}.hpp")), TemplateRole::LibraryHeader)?;
        self.write_file(&dir.join(format!("{name}.cpp")), TemplateRole::LibrarySource)
    }

    fn write_marker(&mut self) -> Result<()> {
        let json = serde_json::to_string(self.params)
            .context("Failed to serialize project parameters")?;
        self.write_contents(Path::new(MARKER_FILE), &json)
    }

    fn create_dir(&mut self, relative: PathBuf) -> Result<()> {
        let path = self.root().join(&relative);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "created directory");
        self.report.directories.push(relative);
        Ok(())
    }

    fn render(&self, role: TemplateRole) -> Result<String> {
        self.catalog
            .render(role, &self.context)
            .with_context(|| format!("Failed to render template: {}", role.name()))
    }

    /// Write a single file from template
    fn write_file(&mut self, relative: &Path, role: TemplateRole) -> Result<()> {
        let rendered = self.render(role)?;
        self.write_contents(relative, &rendered)
    }

    fn write_contents(&mut self, relative: &Path, contents: &str) -> Result<()> {
        let path = self.root().join(relative);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote file");
        self.report.files.push(relative.to_path_buf());
        Ok(())
    }
}
