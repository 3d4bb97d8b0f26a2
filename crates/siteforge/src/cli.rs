//! Clap derive structures for the `siteforge` CLI.
//!
//! Kept free of other crate modules so `build.rs` can include it for man
//! page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// siteforge -- create a site, bind it to templates, and claim devices
#[derive(Debug, Parser)]
#[command(
    name = "siteforge",
    version,
    about = "Provision sites and claim inventory devices in one pass",
    long_about = "Creates a site in a cloud-managed network organization, attaches it to\n\
        the configured WLAN template, applies site variables, and assigns\n\
        devices from the unassigned inventory pool.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, env = "SITEFORGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Organization profile to use
    #[arg(long, short = 'p', env = "SITEFORGE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "SITEFORGE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Organization id (overrides profile)
    #[arg(long, env = "SITEFORGE_ORG", global = true)]
    pub org: Option<String>,

    /// API token
    #[arg(long, env = "SITEFORGE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SITEFORGE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SITEFORGE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a site and assign devices to it
    #[command(alias = "b")]
    Build(BuildArgs),

    /// List devices in the unassigned inventory pool
    #[command(alias = "inv")]
    Inventory,

    /// List existing sites in the organization
    Sites,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Site name (prompted for when omitted)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Device list file, one MAC per line (overrides profile)
    #[arg(long, short = 'd')]
    pub devices: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
