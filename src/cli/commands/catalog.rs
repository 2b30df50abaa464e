//! Catalog command implementation.
//!
//! The `dotnet-detect catalog` command lists the built-in reference table.

use crate::catalog::{frameworks, Catalog, VersionDescriptor};
use crate::cli::args::CatalogArgs;
use crate::error::{DetectError, Result};
use crate::ui::theme::{should_use_colors, DetectTheme};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The catalog command implementation.
pub struct CatalogCommand {
    args: CatalogArgs,
}

impl CatalogCommand {
    /// Create a new catalog command.
    pub fn new(args: CatalogArgs) -> Self {
        Self { args }
    }

    /// Descriptors selected by `--label`, or the whole table.
    fn selected(&self, catalog: &Catalog<'static>) -> Vec<&'static VersionDescriptor> {
        match &self.args.label {
            Some(label) => catalog.find(label),
            None => catalog.descriptors().iter().collect(),
        }
    }
}

impl Command for CatalogCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = Catalog::new(frameworks());
        let selected = self.selected(&catalog);

        if let Some(label) = &self.args.label {
            if selected.is_empty() {
                ui.error(&format!("Unknown version label: {}", label));
                ui.message("Known labels:");
                for known in catalog.labels() {
                    ui.message(&format!("  {}", known));
                }
                return Ok(CommandResult::failure(1));
            }
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&selected)
                .map_err(|e| DetectError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = if should_use_colors() {
            DetectTheme::new()
        } else {
            DetectTheme::plain()
        };

        ui.show_header("Known .NET Framework releases");
        let mut current: Option<&str> = None;
        for descriptor in selected {
            if current != Some(descriptor.label) {
                ui.message(&format!("  {}", theme.highlight.apply_to(descriptor.label)));
                current = Some(descriptor.label);
            }
            ui.message(&format!(
                "    {}\\{} = {}",
                theme.dim.apply_to(descriptor.probe_path),
                descriptor.probe_key,
                descriptor.expected_value
            ));
        }
        ui.detail(&format!(
            "# {} descriptors, {} releases",
            catalog.len(),
            catalog.labels().len()
        ));

        Ok(CommandResult::success())
    }
}
