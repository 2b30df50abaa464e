//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, InstalledArgs};
use crate::config::{load_config, Settings};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Exit code for a host where registry access is unavailable.
pub const EXIT_UNAVAILABLE: i32 = 2;

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher resolving implicit config from `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Load settings from the config file, if any.
    pub fn settings(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<Settings> {
        let (config, path) = load_config(&self.working_dir, cli.config.as_deref())?;
        if let Some(path) = path {
            ui.detail(&format!("# config: {}", path.display()));
        }
        Ok(config.settings)
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand means `installed` with defaults.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Installed(args)) => {
                let settings = self.settings(cli, ui)?;
                let cmd = super::installed::InstalledCommand::new(settings, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Check(args)) => {
                let settings = self.settings(cli, ui)?;
                let cmd = super::check::CheckCommand::new(settings, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Catalog(args)) => {
                let cmd = super::catalog::CatalogCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let settings = self.settings(cli, ui)?;
                let cmd =
                    super::installed::InstalledCommand::new(settings, InstalledArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::detect::ErrorPolicy;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.working_dir(), Path::new("/test"));
    }

    #[test]
    fn settings_come_from_working_dir_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "settings:\n  policy: abort\n",
        )
        .unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let cli = Cli::parse_from(["dotnet-detect", "-v"]);
        let mut ui = MockUI::new();

        let settings = dispatcher.settings(&cli, &mut ui).unwrap();
        assert_eq!(settings.policy, ErrorPolicy::Abort);
        assert!(ui.details().iter().any(|d| d.contains(CONFIG_FILE_NAME)));
    }

    #[test]
    fn dispatch_catalog_succeeds() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let cli = Cli::parse_from(["dotnet-detect", "catalog"]);
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
    }

    #[test]
    fn dispatch_default_runs_installed_against_fixture_config() {
        let temp = TempDir::new().unwrap();
        let fixture = temp.path().join("registry.yml");
        fs::write(&fixture, "windows: false\n").unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let cli = Cli::parse_from([
            "dotnet-detect",
            "installed",
            "--fixture",
            fixture.to_str().unwrap(),
        ]);
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.output().contains("Not a Windows host"));
    }

    #[test]
    fn dispatch_with_missing_explicit_config_fails() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let missing = temp.path().join("nope.yml");
        let cli = Cli::parse_from([
            "dotnet-detect",
            "--config",
            missing.to_str().unwrap(),
            "check",
        ]);
        let mut ui = MockUI::new();

        assert!(dispatcher.dispatch(&cli, &mut ui).is_err());
    }
}
