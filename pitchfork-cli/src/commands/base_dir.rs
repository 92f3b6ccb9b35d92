//! Base directory selection

use anyhow::{bail, Context, Result};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

use pitchfork::wizard::{Prompter, TerminalPrompter, TextRequest};
use pitchfork::SettingsStore;

/// Change the directory new projects are created in
pub struct BaseDirCommand {
    path: Option<PathBuf>,
}

impl BaseDirCommand {
    /// Use `path`, or ask for one when `None`
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Execute the command
    pub fn execute(self, settings: &mut SettingsStore) -> Result<()> {
        let chosen = match self.path {
            Some(path) => Some(checked_base_dir(&path)?),
            None => choose_base_dir(&mut TerminalPrompter::new(), settings.base_dir_path())?,
        };

        let Some(path) = chosen else {
            println!("{}", style("Base directory unchanged.").dim());
            return Ok(());
        };

        settings
            .set_base_dir_path(path.clone())
            .context("Failed to save base directory")?;
        println!(
            "{} {}",
            style("✓ Base directory set to").green().bold(),
            style(path.display()).cyan()
        );
        Ok(())
    }
}

/// Base directory for commands that need one
///
/// Uses `flag` (which also carries `PF_BASE_DIR`), then the stored setting.
/// Without either, asks for one and stores the answer. `None` means the user
/// dismissed the prompt.
pub fn resolve_base_dir(
    flag: Option<&Path>,
    settings: &mut SettingsStore,
) -> Result<Option<PathBuf>> {
    if let Some(path) = flag {
        return checked_base_dir(path).map(Some);
    }
    if let Some(path) = settings.base_dir_path() {
        return Ok(Some(path.to_path_buf()));
    }

    println!("{}", style("No base directory has been chosen yet.").yellow());
    let Some(path) = choose_base_dir(&mut TerminalPrompter::new(), None)? else {
        return Ok(None);
    };
    settings
        .set_base_dir_path(path.clone())
        .context("Failed to save base directory")?;
    Ok(Some(path))
}

/// Ask for an existing directory, pre-filled with `current`
pub fn choose_base_dir<P: Prompter + ?Sized>(
    prompter: &mut P,
    current: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let request = TextRequest {
        title: "Base Directory".to_string(),
        prompt: "Directory where new projects will be created".to_string(),
        initial: current.map(|path| path.display().to_string()),
    };
    let validate = |value: &str| {
        if expand_home(value).is_dir() {
            Ok(())
        } else {
            Err("Not an existing directory".to_string())
        }
    };

    let answer = prompter
        .text(&request, &validate)
        .context("Failed to read base directory")?;
    answer
        .map(|value| checked_base_dir(&expand_home(&value)))
        .transpose()
}

/// Absolute form of `path`, which must be an existing directory
fn checked_base_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        bail!("Base directory does not exist: {}", path.display());
    }
    fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve base directory: {}", path.display()))
}

/// Replace a leading `~` with the home directory
fn expand_home(value: &str) -> PathBuf {
    let trimmed = value.trim();
    match (trimmed.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchfork::testing::{Answer, ScriptedPrompter};
    use tempfile::TempDir;

    #[test]
    fn test_choose_existing_directory() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new([Answer::text(&dir.path().display().to_string())]);

        let chosen = choose_base_dir(&mut prompter, None).unwrap();
        assert_eq!(chosen, Some(fs::canonicalize(dir.path()).unwrap()));
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope").display().to_string();
        let mut prompter = ScriptedPrompter::new([
            Answer::text(&missing),
            Answer::text(&dir.path().display().to_string()),
        ]);

        let chosen = choose_base_dir(&mut prompter, None).unwrap();
        assert!(chosen.is_some());
        assert_eq!(prompter.rejections, vec!["Not an existing directory".to_string()]);
    }

    #[test]
    fn test_current_value_is_prefilled() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new([Answer::Dismiss]);

        let chosen = choose_base_dir(&mut prompter, Some(dir.path())).unwrap();
        assert_eq!(chosen, None);
        assert_eq!(
            prompter.initial_texts,
            vec![Some(dir.path().display().to_string())]
        );
    }

    #[test]
    fn test_flag_must_exist() {
        let config = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let mut settings = SettingsStore::open(config.path(), project.path()).unwrap();

        let missing = project.path().join("missing");
        assert!(resolve_base_dir(Some(&missing), &mut settings).is_err());
    }

    #[test]
    fn test_flag_wins_over_setting() {
        let config = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let stored = TempDir::new().unwrap();
        let flagged = TempDir::new().unwrap();
        let mut settings = SettingsStore::open(config.path(), project.path()).unwrap();
        settings
            .set_base_dir_path(stored.path().to_path_buf())
            .unwrap();

        let resolved = resolve_base_dir(Some(flagged.path()), &mut settings).unwrap();
        assert_eq!(resolved, Some(fs::canonicalize(flagged.path()).unwrap()));
        // The flag does not replace the stored setting
        assert_eq!(settings.base_dir_path(), Some(stored.path()));
    }

    #[test]
    fn test_stored_setting_is_used() {
        let config = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let stored = TempDir::new().unwrap();
        let mut settings = SettingsStore::open(config.path(), project.path()).unwrap();
        settings
            .set_base_dir_path(stored.path().to_path_buf())
            .unwrap();

        let resolved = resolve_base_dir(None, &mut settings).unwrap();
        assert_eq!(resolved.as_deref(), Some(stored.path()));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(" /srv/code "), PathBuf::from("/srv/code"));
        assert_eq!(expand_home("~user"), PathBuf::from("~user"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/code"), home.join("code"));
        }
    }
}
