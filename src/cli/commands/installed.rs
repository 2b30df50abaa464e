//! Installed command implementation.
//!
//! The `dotnet-detect installed` command scans the registry and reports the
//! installed .NET Framework versions.

use crate::catalog::frameworks;
use crate::cli::args::InstalledArgs;
use crate::config::{ReportFormat, Settings};
use crate::detect::{Detector, ErrorPolicy, Report, ScanOptions};
use crate::error::{DetectError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_UNAVAILABLE};
use super::host::HostAccess;

/// The installed command implementation.
pub struct InstalledCommand {
    settings: Settings,
    args: InstalledArgs,
}

impl InstalledCommand {
    /// Create a new installed command.
    pub fn new(settings: Settings, args: InstalledArgs) -> Self {
        Self { settings, args }
    }

    /// Settings after applying command-line overrides.
    pub fn effective_settings(&self) -> Settings {
        Settings {
            policy: self.args.policy.unwrap_or(self.settings.policy),
            format: self.args.format.unwrap_or(self.settings.format),
            view: self.args.view.unwrap_or(self.settings.view),
            hive: self.args.hive.unwrap_or(self.settings.hive),
            backend: self.args.backend.unwrap_or(self.settings.backend),
        }
    }
}

impl Command for InstalledCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.effective_settings();
        let access = HostAccess::open(
            settings.view,
            settings.backend,
            self.args.fixture.as_deref(),
        )?;
        let options = ScanOptions {
            root: settings.hive,
            policy: settings.policy,
        };

        let detector = match Detector::initialize(
            frameworks(),
            access.platform.as_ref(),
            access.store.as_ref(),
            options,
        ) {
            Ok(detector) => detector,
            Err(DetectError::Unavailable { reason }) => {
                ui.error(&format!("Registry access unavailable: {}", reason));
                return Ok(CommandResult::failure(EXIT_UNAVAILABLE));
            }
            Err(e) => return Err(e),
        };

        let report = detector.get_installed();

        match settings.format {
            ReportFormat::Human => show_report(ui, &report, &settings),
            ReportFormat::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| DetectError::Other(e.into()))?;
                ui.message(&json);
            }
            ReportFormat::Legacy => {
                let json = serde_json::to_string(&report.to_legacy())
                    .map_err(|e| DetectError::Other(e.into()))?;
                ui.message(&json);
            }
        }

        Ok(CommandResult::success())
    }
}

/// Render a report for people.
fn show_report(ui: &mut dyn UserInterface, report: &Report, settings: &Settings) {
    let quiet = !ui.output_mode().shows_status();

    if !quiet {
        ui.show_header("Installed .NET Framework versions");
    }
    ui.detail(&format!(
        "# hive: {}, policy: {}",
        settings.hive, settings.policy
    ));

    if !report.applicable {
        if !quiet {
            ui.message("Not a Windows host; nothing to detect.");
        }
        return;
    }

    if report.matches.is_empty() && !quiet {
        ui.message("No .NET Framework versions detected.");
    }

    for m in &report.matches {
        if quiet {
            ui.message(&m.label);
        } else {
            ui.success(&m.label);
        }
    }

    for fault in &report.faults {
        ui.warning(&format!("{}: {}", fault.label, fault.message));
    }

    if report.aborted && settings.policy == ErrorPolicy::Abort {
        ui.warning("Scan stopped at the first failed read (policy: abort).");
    }
}
