//! New-project wizard
//!
//! Collects, strictly in order, the project name, the root namespace, the
//! build system and the optional layout flags. Each step either advances to
//! the next one or cancels the whole wizard; there is no way back.
//!
//! ```rust,no_run
//! use pitchfork::wizard::{NewProjectWizard, TerminalPrompter, WizardPresets};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut prompter = TerminalPrompter::new();
//! let wizard = NewProjectWizard::new(Path::new("/home/me/projects"), &mut prompter)
//!     .with_presets(WizardPresets::default());
//! match wizard.run_to_completion()? {
//!     Some(params) => println!("creating {}", params.name),
//!     None => println!("cancelled"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod prompt;

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::namespace::validate_namespace;
use crate::params::{BuildSystem, NewProjectParams};

pub use prompt::{
    Choice, ChoiceRequest, LatestValidation, PromptError, Prompter, TerminalPrompter,
    TextRequest, ValidationTicket, Validator,
};

/// Reasons a project name is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    /// Nothing was entered
    #[error("A project name is required")]
    Empty,

    /// A directory of that name is already in the base directory
    #[error("A project with this name already exists")]
    DirectoryExists,

    /// A non-directory of that name is already in the base directory
    #[error("A file in the project directory already has this name")]
    FileExists,

    /// The name is not a single path component
    #[error("A project name must be a single directory name")]
    IllegalName,

    /// The base directory entry could not be inspected
    #[error("Unable to check whether this name is already taken")]
    Inaccessible,
}

/// Check that `name` can become a new directory directly under `base_dir`
///
/// # Errors
///
/// Returns a [`NameError`] describing why the name cannot be used.
pub fn validate_name(base_dir: &Path, name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal || name.contains(['/', '\\', '\0']) {
        return Err(NameError::IllegalName);
    }

    // Symlinks count as taken, even dangling ones
    match fs::symlink_metadata(base_dir.join(name)) {
        Ok(meta) if meta.is_dir() => Err(NameError::DirectoryExists),
        Ok(_) => Err(NameError::FileExists),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(_) => Err(NameError::Inaccessible),
    }
}

/// Wizard position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Asking for the project name
    CollectName,
    /// Asking for the root namespace
    CollectNamespace,
    /// Asking for the build system
    CollectBuildSystem,
    /// Asking for the optional flags
    CollectFlags,
    /// All parameters collected
    Finished,
    /// The user dismissed a prompt
    Cancelled,
}

impl WizardState {
    /// Number of interactive steps
    pub const TOTAL_STEPS: usize = 4;

    /// 1-based step number for the collecting states
    #[must_use]
    pub const fn step(self) -> Option<usize> {
        match self {
            Self::CollectName => Some(1),
            Self::CollectNamespace => Some(2),
            Self::CollectBuildSystem => Some(3),
            Self::CollectFlags => Some(4),
            Self::Finished | Self::Cancelled => None,
        }
    }

    /// The state reached when the current step succeeds
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::CollectName => Self::CollectNamespace,
            Self::CollectNamespace => Self::CollectBuildSystem,
            Self::CollectBuildSystem => Self::CollectFlags,
            Self::CollectFlags | Self::Finished => Self::Finished,
            Self::Cancelled => Self::Cancelled,
        }
    }

    /// Whether the wizard has stopped
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

/// Entries of the build-system step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSystemChoice {
    /// Generate CMake files
    CMake,
    /// Generate nothing
    None,
}

impl BuildSystemChoice {
    /// Entries in display order
    pub const ALL: [Self; 2] = [Self::CMake, Self::None];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CMake => "CMake",
            Self::None => "None",
        }
    }

    /// Display description
    #[must_use]
    pub const fn detail(self) -> &'static str {
        match self {
            Self::CMake => "Generate a CMake build system in the new project",
            Self::None => "Do not generate a build system",
        }
    }

    /// Build system selected by this entry
    #[must_use]
    pub const fn build_system(self) -> BuildSystem {
        match self {
            Self::CMake => BuildSystem::CMake,
            Self::None => BuildSystem::None,
        }
    }
}

/// Entries of the flags step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagChoice {
    /// Keep public headers in `include/`
    SeparateHeaders,
    /// Create `third_party/`
    GenerateThirdParty,
    /// Create `examples/`
    GenerateExamples,
}

impl FlagChoice {
    /// Entries in display order
    pub const ALL: [Self; 3] = [
        Self::SeparateHeaders,
        Self::GenerateThirdParty,
        Self::GenerateExamples,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SeparateHeaders => "Separate Headers and Sources",
            Self::GenerateThirdParty => "Generate a third_party/ directory",
            Self::GenerateExamples => "Generate an examples/ directory",
        }
    }

    /// Display description
    #[must_use]
    pub const fn detail(self) -> &'static str {
        match self {
            Self::SeparateHeaders => "Put header files in a separate `include/` directory",
            Self::GenerateThirdParty => "Create a third_party/ directory for external libraries",
            Self::GenerateExamples => {
                "Create an examples/ directory for library/program example usages"
            }
        }
    }

    /// Selected before the user changes anything
    #[must_use]
    pub const fn picked_by_default(self) -> bool {
        matches!(self, Self::GenerateExamples)
    }
}

/// Optional layout flags chosen in the last step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectFlags {
    /// Keep public headers in `include/`
    pub separate_headers: bool,
    /// Create `third_party/`
    pub generate_third_party: bool,
    /// Create `examples/`
    pub generate_examples: bool,
}

impl ProjectFlags {
    /// Flags with exactly the given entries enabled
    #[must_use]
    pub fn from_choices(choices: impl IntoIterator<Item = FlagChoice>) -> Self {
        choices.into_iter().fold(Self::default(), |mut flags, choice| {
            *flags.get_mut(choice) = true;
            flags
        })
    }

    /// Value of one flag
    #[must_use]
    pub const fn get(&self, choice: FlagChoice) -> bool {
        match choice {
            FlagChoice::SeparateHeaders => self.separate_headers,
            FlagChoice::GenerateThirdParty => self.generate_third_party,
            FlagChoice::GenerateExamples => self.generate_examples,
        }
    }

    fn get_mut(&mut self, choice: FlagChoice) -> &mut bool {
        match choice {
            FlagChoice::SeparateHeaders => &mut self.separate_headers,
            FlagChoice::GenerateThirdParty => &mut self.generate_third_party,
            FlagChoice::GenerateExamples => &mut self.generate_examples,
        }
    }
}

/// Answers supplied ahead of time, e.g. from command-line flags
///
/// A preset that passes validation replaces its prompt. An invalid preset is
/// logged and the step prompts as usual, pre-filled with the rejected value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardPresets {
    /// Project name
    pub name: Option<String>,
    /// Root namespace
    pub root_namespace: Option<String>,
    /// Build system
    pub build_system: Option<BuildSystem>,
    /// Keep public headers in `include/`
    pub separate_headers: Option<bool>,
    /// Create `third_party/`
    pub generate_third_party: Option<bool>,
    /// Create `examples/`
    pub generate_examples: Option<bool>,
}

impl WizardPresets {
    fn flag(&self, choice: FlagChoice) -> Option<bool> {
        match choice {
            FlagChoice::SeparateHeaders => self.separate_headers,
            FlagChoice::GenerateThirdParty => self.generate_third_party,
            FlagChoice::GenerateExamples => self.generate_examples,
        }
    }
}

/// Sequential parameter collection for a new project
pub struct NewProjectWizard<'a, P: Prompter + ?Sized> {
    base_dir: PathBuf,
    prompter: &'a mut P,
    presets: WizardPresets,
    state: WizardState,
    name: String,
    root_namespace: String,
    build_system: BuildSystem,
    flags: ProjectFlags,
}

impl<'a, P: Prompter + ?Sized> NewProjectWizard<'a, P> {
    /// Create a wizard for a project that will live in `base_dir`
    pub fn new(base_dir: &Path, prompter: &'a mut P) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            prompter,
            presets: WizardPresets::default(),
            state: WizardState::CollectName,
            name: String::new(),
            root_namespace: String::new(),
            build_system: BuildSystem::default(),
            flags: ProjectFlags::default(),
        }
    }

    /// Use answers supplied ahead of time
    #[must_use]
    pub fn with_presets(mut self, presets: WizardPresets) -> Self {
        self.presets = presets;
        self
    }

    /// Current position
    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Run every step, returning `None` if the user cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails to read from the terminal.
    pub fn run_to_completion(mut self) -> Result<Option<NewProjectParams>, PromptError> {
        while !self.state.is_terminal() {
            self.run_next()?;
        }

        if self.state == WizardState::Cancelled {
            return Ok(None);
        }

        Ok(Some(NewProjectParams {
            name: self.name,
            root_namespace: self.root_namespace,
            build_system: self.build_system,
            generate_third_party: self.flags.generate_third_party,
            generate_examples: self.flags.generate_examples,
            separate_headers: self.flags.separate_headers,
        }))
    }

    /// Run the current step and move to the next state
    ///
    /// Does nothing once the wizard has finished or been cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails to read from the terminal.
    pub fn run_next(&mut self) -> Result<(), PromptError> {
        let before = self.state;
        let accepted = match self.state {
            WizardState::CollectName => self.collect_name()?,
            WizardState::CollectNamespace => self.collect_namespace()?,
            WizardState::CollectBuildSystem => self.collect_build_system()?,
            WizardState::CollectFlags => self.collect_flags()?,
            WizardState::Finished | WizardState::Cancelled => return Ok(()),
        };

        self.state = if accepted {
            self.state.next()
        } else {
            WizardState::Cancelled
        };
        tracing::debug!(from = ?before, to = ?self.state, "wizard step completed");
        Ok(())
    }

    fn title(&self, title: &str) -> String {
        self.state.step().map_or_else(
            || title.to_string(),
            |step| format!("{title} [{step}/{}]", WizardState::TOTAL_STEPS),
        )
    }

    fn collect_name(&mut self) -> Result<bool, PromptError> {
        let base_dir = self.base_dir.clone();
        let validate = |value: &str| validate_name(&base_dir, value).map_err(|e| e.to_string());

        let preset = self.presets.name.take();
        if let Some(name) = preset.as_deref() {
            match validate(name) {
                Ok(()) => {
                    self.name = name.to_string();
                    return Ok(true);
                }
                Err(message) => tracing::warn!(name, %message, "ignoring preset project name"),
            }
        }

        let request = TextRequest {
            title: self.title("Project Name"),
            prompt: "Enter the name for your new project".to_string(),
            initial: preset,
        };
        match self.prompter.text(&request, &validate)? {
            Some(name) => {
                self.name = name;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn collect_namespace(&mut self) -> Result<bool, PromptError> {
        let validate = |value: &str| validate_namespace(value).map_err(|e| e.to_string());

        let preset = self.presets.root_namespace.take();
        if let Some(ns) = preset.as_deref() {
            match validate(ns) {
                Ok(()) => {
                    self.root_namespace = ns.to_string();
                    return Ok(true);
                }
                Err(message) => tracing::warn!(ns, %message, "ignoring preset root namespace"),
            }
        }

        let request = TextRequest {
            title: self.title("Root Namespace"),
            prompt: "Enter the base root namespace for the new project".to_string(),
            initial: Some(preset.unwrap_or_else(|| self.name.clone())),
        };
        match self.prompter.text(&request, &validate)? {
            Some(ns) => {
                self.root_namespace = ns;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn collect_build_system(&mut self) -> Result<bool, PromptError> {
        if let Some(build_system) = self.presets.build_system {
            self.build_system = build_system;
            return Ok(true);
        }

        let request = ChoiceRequest {
            title: self.title("Build System"),
            choices: BuildSystemChoice::ALL
                .iter()
                .map(|choice| Choice {
                    label: choice.label(),
                    detail: choice.detail(),
                    picked: false,
                })
                .collect(),
        };
        let chosen = self
            .prompter
            .select(&request)?
            .and_then(|index| BuildSystemChoice::ALL.get(index).copied());
        match chosen {
            Some(choice) => {
                self.build_system = choice.build_system();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn collect_flags(&mut self) -> Result<bool, PromptError> {
        let preset: Option<Vec<bool>> = FlagChoice::ALL
            .iter()
            .map(|&choice| self.presets.flag(choice))
            .collect();
        if let Some(values) = preset {
            self.flags = ProjectFlags::from_choices(
                FlagChoice::ALL
                    .iter()
                    .zip(values)
                    .filter_map(|(&choice, on)| on.then_some(choice)),
            );
            return Ok(true);
        }

        let request = ChoiceRequest {
            title: self.title("Other Options"),
            choices: FlagChoice::ALL
                .iter()
                .map(|&choice| Choice {
                    label: choice.label(),
                    detail: choice.detail(),
                    picked: self
                        .presets
                        .flag(choice)
                        .unwrap_or_else(|| choice.picked_by_default()),
                })
                .collect(),
        };
        match self.prompter.multi_select(&request)? {
            Some(indices) => {
                self.flags = ProjectFlags::from_choices(
                    indices
                        .into_iter()
                        .filter_map(|index| FlagChoice::ALL.get(index).copied()),
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
