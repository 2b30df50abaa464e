//! Check command implementation.
//!
//! The `dotnet-detect check` command reports whether detection can run on
//! this host without scanning anything.

use crate::cli::args::CheckArgs;
use crate::config::Settings;
use crate::detect::{eligibility, Eligibility};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_UNAVAILABLE};
use super::host::HostAccess;

/// The check command implementation.
pub struct CheckCommand {
    settings: Settings,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(settings: Settings, args: CheckArgs) -> Self {
        Self { settings, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let view = self.args.view.unwrap_or(self.settings.view);
        let backend = self.args.backend.unwrap_or(self.settings.backend);
        let access = HostAccess::open(view, backend, self.args.fixture.as_deref())?;

        match eligibility(access.platform.as_ref(), access.store.as_ref()) {
            Eligibility::Available { store } => {
                ui.success("Registry access available");
                ui.detail(&format!("# store: {}", store));
                Ok(CommandResult::success())
            }
            Eligibility::NotApplicable => {
                ui.message("Not a Windows host; detection reports nothing here.");
                Ok(CommandResult::success())
            }
            Eligibility::Unavailable { reason } => {
                ui.error(&format!("Registry access unavailable: {}", reason));
                Ok(CommandResult::failure(EXIT_UNAVAILABLE))
            }
        }
    }
}
