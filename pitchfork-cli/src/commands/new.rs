//! Project creation command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use pitchfork::wizard::{NewProjectWizard, TerminalPrompter, WizardPresets};
use pitchfork::{BuildSystem, MaterializeReport, NewProjectParams, ProjectMaterializer};

/// Answers for `pf new` that skip the matching wizard prompts
#[derive(Debug, Clone, Default, Args)]
pub struct NewArgs {
    /// Name for the new project
    #[arg(long)]
    name: Option<String>,

    /// The root namespace for the project
    #[arg(long)]
    namespace: Option<String>,

    /// The build system to generate
    #[arg(short, long, value_enum)]
    build_system: Option<BuildSystem>,

    /// Store public headers in a separate include/ directory
    #[arg(long, overrides_with = "no_separate_headers")]
    separate_headers: bool,

    /// Keep headers next to their sources
    #[arg(long, overrides_with = "separate_headers")]
    no_separate_headers: bool,

    /// Generate a third_party/ directory
    #[arg(long, overrides_with = "no_third_party")]
    third_party: bool,

    /// Do not generate a third_party/ directory
    #[arg(long, overrides_with = "third_party")]
    no_third_party: bool,

    /// Generate an examples/ directory
    #[arg(long, overrides_with = "no_examples")]
    examples: bool,

    /// Do not generate an examples/ directory
    #[arg(long, overrides_with = "examples")]
    no_examples: bool,
}

impl NewArgs {
    /// Wizard presets for every answer given on the command line
    pub fn presets(&self) -> WizardPresets {
        WizardPresets {
            name: self.name.clone(),
            root_namespace: self.namespace.clone(),
            build_system: self.build_system,
            separate_headers: toggle(self.separate_headers, self.no_separate_headers),
            generate_third_party: toggle(self.third_party, self.no_third_party),
            generate_examples: toggle(self.examples, self.no_examples),
        }
    }
}

/// `--flag` / `--no-flag` pair, `None` when neither was given
const fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Create a new Pitchfork project
pub struct NewCommand {
    base_dir: PathBuf,
    presets: WizardPresets,
}

impl NewCommand {
    /// Create a command placing the project in `base_dir`
    pub const fn new(base_dir: PathBuf, presets: WizardPresets) -> Self {
        Self { base_dir, presets }
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        println!(
            "{} {}",
            style("Creating a new project in").green().bold(),
            style(self.base_dir.display()).cyan().bold()
        );
        println!();

        let mut prompter = TerminalPrompter::new();
        let params = NewProjectWizard::new(&self.base_dir, &mut prompter)
            .with_presets(self.presets)
            .run_to_completion()
            .context("Failed to read project parameters")?;

        let Some(params) = params else {
            println!("{}", style("Project creation cancelled.").dim());
            return Ok(());
        };

        let report = Self::create(&self.base_dir, &params)?;
        Self::print_success(&params, &report);

        Ok(())
    }

    fn create(base_dir: &Path, params: &NewProjectParams) -> Result<MaterializeReport> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Generating project files...");

        let result = ProjectMaterializer::new().and_then(|m| m.materialize(base_dir, params));
        spinner.finish_and_clear();

        result.with_context(|| format!("Failed to create project '{}'", params.name))
    }

    /// Print success message with next steps
    fn print_success(params: &NewProjectParams, report: &MaterializeReport) {
        println!("{}", style("✓ Project created successfully!").green().bold());
        println!();
        for file in &report.files {
            println!("  {} {}", style("+").green(), file.display());
        }
        println!();
        println!("{}", style("Next steps:").bold());
        println!();
        println!("  {} Open the project:", style("1.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("cd {}", report.project_root.display())).cyan()
        );
        println!();
        println!("  {} Finish setting it up:", style("2.").cyan());
        println!("     {} {}", style("$").dim(), style("pf resume").cyan());
        if params.uses_cmake() {
            println!();
            println!("  {} Build and test:", style("3.").cyan());
            println!(
                "     {} {}",
                style("$").dim(),
                style("cmake -B build && cmake --build build && ctest --test-dir build").cyan()
            );
        }
    }
}
