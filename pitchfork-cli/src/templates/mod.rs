//! Template catalog and expansion

use anyhow::{anyhow, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::namespace::{include_guard_stem, SEPARATOR};
use crate::params::NewProjectParams;

pub mod files;
pub use files::*;

/// Logical role of a generated file (or a block of one)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateRole {
    /// `src/<ns>/<name>.hpp`
    LibraryHeader,
    /// `src/<ns>/<name>.cpp`
    LibrarySource,
    /// `tests/my_test.cpp`
    TestSource,
    /// `tests/CMakeLists.txt`
    TestBuild,
    /// `examples/example1.cpp`
    ExampleSource,
    /// `examples/CMakeLists.txt`
    ExampleBuild,
    /// `src/CMakeLists.txt` exporting `include/`
    SourceBuildSeparateHeaders,
    /// `src/CMakeLists.txt` exporting `src/`
    SourceBuildMergedHeaders,
    /// `third_party/CMakeLists.txt`
    ThirdPartyBuild,
    /// Start of the root `CMakeLists.txt`
    RootBuildHead,
    /// Root `CMakeLists.txt` third-party inclusion
    RootBuildThirdParty,
    /// Root `CMakeLists.txt` src/tests inclusion
    RootBuildMiddle,
    /// Root `CMakeLists.txt` examples inclusion
    RootBuildExamples,
}

impl TemplateRole {
    /// Every role in the catalog
    pub const ALL: [Self; 13] = [
        Self::LibraryHeader,
        Self::LibrarySource,
        Self::TestSource,
        Self::TestBuild,
        Self::ExampleSource,
        Self::ExampleBuild,
        Self::SourceBuildSeparateHeaders,
        Self::SourceBuildMergedHeaders,
        Self::ThirdPartyBuild,
        Self::RootBuildHead,
        Self::RootBuildThirdParty,
        Self::RootBuildMiddle,
        Self::RootBuildExamples,
    ];

    /// Registry key
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LibraryHeader => "library_header",
            Self::LibrarySource => "library_source",
            Self::TestSource => "test_source",
            Self::TestBuild => "test_build",
            Self::ExampleSource => "example_source",
            Self::ExampleBuild => "example_build",
            Self::SourceBuildSeparateHeaders => "src_build_separate_headers",
            Self::SourceBuildMergedHeaders => "src_build_merged_headers",
            Self::ThirdPartyBuild => "third_party_build",
            Self::RootBuildHead => "root_build_head",
            Self::RootBuildThirdParty => "root_build_third_party",
            Self::RootBuildMiddle => "root_build_middle",
            Self::RootBuildExamples => "root_build_examples",
        }
    }

    /// Raw template text
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::LibraryHeader => LIBRARY_HEADER,
            Self::LibrarySource => LIBRARY_SOURCE,
            Self::TestSource => TEST_SOURCE,
            Self::TestBuild => TEST_CMAKE,
            Self::ExampleSource => EXAMPLE_SOURCE,
            Self::ExampleBuild => EXAMPLE_CMAKE,
            Self::SourceBuildSeparateHeaders => SRC_CMAKE_SEPARATE_HEADERS,
            Self::SourceBuildMergedHeaders => SRC_CMAKE_MERGED_HEADERS,
            Self::ThirdPartyBuild => THIRD_PARTY_CMAKE,
            Self::RootBuildHead => ROOT_CMAKE_HEAD,
            Self::RootBuildThirdParty => ROOT_CMAKE_THIRD_PARTY,
            Self::RootBuildMiddle => ROOT_CMAKE_MIDDLE,
            Self::RootBuildExamples => ROOT_CMAKE_EXAMPLES,
        }
    }
}

/// Values substituted into templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    /// Project name as entered
    pub project_name: String,
    /// Namespace as a `/`-separated include path
    pub src_path: String,
    /// Namespace as entered
    pub root_namespace: String,
    /// Upper-cased, `_`-joined namespace for include guards
    pub ns_upper: String,
    /// `<namespace>::<name>`
    pub alias_target: String,
    /// Project name with `-` replaced by `_`
    pub project_ident: String,
}

impl TemplateContext {
    /// Derive every template value from the project parameters
    #[must_use]
    pub fn new(params: &NewProjectParams) -> Self {
        Self {
            project_name: params.name.clone(),
            src_path: params.root_namespace.replace(SEPARATOR, "/"),
            root_namespace: params.root_namespace.clone(),
            ns_upper: include_guard_stem(&params.root_namespace),
            alias_target: params.alias_target(),
            project_ident: params.name_ident(),
        }
    }
}

/// Compiled, read-only set of project templates
pub struct TemplateCatalog {
    handlebars: Handlebars<'static>,
}

impl TemplateCatalog {
    /// Compile every template in the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generated files are C++ and CMake, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        // A placeholder without a value is a bug, never an empty string
        handlebars.set_strict_mode(true);

        for role in TemplateRole::ALL {
            handlebars
                .register_template_string(role.name(), role.source())
                .map_err(|e| anyhow!("Failed to compile template {}: {e}", role.name()))?;
        }

        Ok(Self { handlebars })
    }

    /// Expand the template for `role`
    ///
    /// # Errors
    ///
    /// Returns an error if the template references a value the context lacks.
    pub fn render(
        &self,
        role: TemplateRole,
        context: &TemplateContext,
    ) -> std::result::Result<String, handlebars::RenderError> {
        self.handlebars.render(role.name(), context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BuildSystem;

    const PLACEHOLDERS: [&str; 6] = [
        "{{project_name}}",
        "{{src_path}}",
        "{{root_namespace}}",
        "{{ns_upper}}",
        "{{alias_target}}",
        "{{project_ident}}",
    ];

    fn params() -> NewProjectParams {
        NewProjectParams {
            name: "my-lib".to_string(),
            root_namespace: "acme::tools".to_string(),
            build_system: BuildSystem::CMake,
            generate_third_party: true,
            generate_examples: true,
            separate_headers: false,
        }
    }

    #[test]
    fn test_context_values() {
        let ctx = TemplateContext::new(&params());
        assert_eq!(ctx.project_name, "my-lib");
        assert_eq!(ctx.src_path, "acme/tools");
        assert_eq!(ctx.root_namespace, "acme::tools");
        assert_eq!(ctx.ns_upper, "ACME_TOOLS");
        assert_eq!(ctx.alias_target, "acme::tools::my-lib");
        assert_eq!(ctx.project_ident, "my_lib");
    }

    #[test]
    fn test_every_role_renders_without_placeholders() {
        let catalog = TemplateCatalog::new().unwrap();
        let ctx = TemplateContext::new(&params());

        for role in TemplateRole::ALL {
            let rendered = catalog.render(role, &ctx).unwrap();
            for placeholder in PLACEHOLDERS {
                assert!(
                    !rendered.contains(placeholder),
                    "{} still contains {placeholder}",
                    role.name()
                );
            }
            assert!(!rendered.contains("{{"), "{} has an unexpanded tag", role.name());
        }
    }

    #[test]
    fn test_header_uses_flattened_guard() {
        let catalog = TemplateCatalog::new().unwrap();
        let header = catalog
            .render(TemplateRole::LibraryHeader, &TemplateContext::new(&params()))
            .unwrap();

        assert!(header.contains("#ifndef ACME_TOOLS_HPP_INCLUDED"));
        assert!(header.contains("namespace acme::tools {"));
        assert!(header.contains("int my_lib();"));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let catalog = TemplateCatalog::new().unwrap();
        let mut p = params();
        p.name = "{{root_namespace}}".to_string();

        let rendered = catalog
            .render(TemplateRole::TestBuild, &TemplateContext::new(&p))
            .unwrap();
        assert!(rendered.contains("acme::tools::{{root_namespace}}"));
    }

    #[test]
    fn test_cmake_variables_survive() {
        let catalog = TemplateCatalog::new().unwrap();
        let ctx = TemplateContext::new(&params());

        let src = catalog
            .render(TemplateRole::SourceBuildSeparateHeaders, &ctx)
            .unwrap();
        assert!(src.contains("PRIVATE ${CMAKE_CURRENT_SOURCE_DIR}"));
        assert!(src.contains("$<BUILD_INTERFACE:${PROJECT_SOURCE_DIR}/include>"));
        assert!(src.contains("add_library(acme::tools::my-lib ALIAS my-lib)"));

        let merged = catalog
            .render(TemplateRole::SourceBuildMergedHeaders, &ctx)
            .unwrap();
        assert!(merged.contains("PUBLIC $<BUILD_INTERFACE:${CMAKE_CURRENT_SOURCE_DIR}>"));
        assert!(!merged.contains("PRIVATE"));
    }
}
