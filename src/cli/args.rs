//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ReportFormat;
use crate::detect::ErrorPolicy;
use crate::store::{Backend, Hive, RegView};

/// dotnet-detect - Report installed .NET Framework versions.
#[derive(Debug, Parser)]
#[command(name = "dotnet-detect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./dotnet-detect.yml)
    #[arg(short, long, global = true, env = "DOTNET_DETECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report installed .NET Framework versions (default)
    Installed(InstalledArgs),

    /// Check whether registry access is available on this host
    Check(CheckArgs),

    /// List the known .NET Framework releases and their registry markers
    Catalog(CatalogArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `installed` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstalledArgs {
    /// Report format: human, json, legacy
    #[arg(long)]
    pub format: Option<ReportFormat>,

    /// Fault handling: isolate (keep scanning) or abort (stop at first fault)
    #[arg(long)]
    pub policy: Option<ErrorPolicy>,

    /// Registry view: default, 64, 32
    #[arg(long)]
    pub view: Option<RegView>,

    /// Root hive: HKLM, HKCU
    #[arg(long)]
    pub hive: Option<Hive>,

    /// Registry backend: api, reg-exe
    #[arg(long)]
    pub backend: Option<Backend>,

    /// Read registry values from a YAML fixture instead of the host
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Registry view: default, 64, 32
    #[arg(long)]
    pub view: Option<RegView>,

    /// Registry backend: api, reg-exe
    #[arg(long)]
    pub backend: Option<Backend>,

    /// Check against a YAML fixture instead of the host
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

/// Arguments for the `catalog` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CatalogArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show only descriptors for this label
    #[arg(long)]
    pub label: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
