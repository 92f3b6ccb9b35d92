//! Parameters for a new project

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build system to generate inside the new project
///
/// Serialized as an integer (`0` = none, `1` = CMake) so that marker files
/// stay compatible with older tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(try_from = "u8", into = "u8")]
pub enum BuildSystem {
    /// No build files are generated
    None,
    /// Generate `CMakeLists.txt` files (default)
    #[default]
    #[value(name = "cmake")]
    CMake,
}

impl From<BuildSystem> for u8 {
    fn from(value: BuildSystem) -> Self {
        match value {
            BuildSystem::None => 0,
            BuildSystem::CMake => 1,
        }
    }
}

impl TryFrom<u8> for BuildSystem {
    type Error = UnknownBuildSystem;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::CMake),
            other => Err(UnknownBuildSystem(other)),
        }
    }
}

/// A build system code that does not name a known build system
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown build system code {0}")]
pub struct UnknownBuildSystem(pub u8);

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::CMake => f.write_str("CMake"),
        }
    }
}

/// Everything needed to create a new project
///
/// Produced only by a wizard that ran to completion, so every field is
/// populated and already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectParams {
    /// Project directory name, also used for the library target
    pub name: String,
    /// Root namespace, e.g. `acme::demo`
    pub root_namespace: String,
    /// Build system to generate
    pub build_system: BuildSystem,
    /// Create `third_party/`
    pub generate_third_party: bool,
    /// Create `examples/` with one example program
    pub generate_examples: bool,
    /// Create `include/` for public headers
    pub separate_headers: bool,
}

impl NewProjectParams {
    /// `name` with hyphens turned into underscores, usable as a C++ identifier
    #[must_use]
    pub fn name_ident(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Library alias target, e.g. `acme::demo::demo`
    #[must_use]
    pub fn alias_target(&self) -> String {
        format!("{}::{}", self.root_namespace, self.name)
    }

    /// Whether build descriptors are generated
    #[must_use]
    pub const fn uses_cmake(&self) -> bool {
        matches!(self.build_system, BuildSystem::CMake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NewProjectParams {
        NewProjectParams {
            name: "my-lib".to_string(),
            root_namespace: "acme::my_lib".to_string(),
            build_system: BuildSystem::CMake,
            generate_third_party: false,
            generate_examples: true,
            separate_headers: true,
        }
    }

    #[test]
    fn test_marker_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "my-lib",
                "rootNamespace": "acme::my_lib",
                "buildSystem": 1,
                "generateThirdParty": false,
                "generateExamples": true,
                "separateHeaders": true,
            })
        );
    }

    #[test]
    fn test_build_system_codes() {
        let params: NewProjectParams = serde_json::from_value(json!({
            "name": "x",
            "rootNamespace": "x",
            "buildSystem": 0,
            "generateThirdParty": true,
            "generateExamples": false,
            "separateHeaders": false,
        }))
        .unwrap();
        assert_eq!(params.build_system, BuildSystem::None);

        let bad = serde_json::from_value::<NewProjectParams>(json!({
            "name": "x",
            "rootNamespace": "x",
            "buildSystem": 7,
            "generateThirdParty": true,
            "generateExamples": false,
            "separateHeaders": false,
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_derived_names() {
        let params = sample();
        assert_eq!(params.name_ident(), "my_lib");
        assert_eq!(params.alias_target(), "acme::my_lib::my-lib");
        assert!(params.uses_cmake());
    }
}
