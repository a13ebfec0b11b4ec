//! Clap derive structures for the `labres` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// labres -- laboratory access reservations from the command line
#[derive(Debug, Parser)]
#[command(
    name = "labres",
    version,
    about = "Reserve laboratory access from the command line",
    long_about = "Browse and create laboratory access reservations.\n\n\
        Talks to the reservation service REST API (default\n\
        http://localhost:8080/api). Profiles live in config.toml.",
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
    /// Service profile to use
    #[arg(long, short = 'p', env = "LABRES_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Reservation service base URL (overrides profile)
    #[arg(long, short = 's', env = "LABRES_SERVICE", global = true)]
    pub service: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LABRES_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "LABRES_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "LABRES_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one reservation ID per line (scripting)
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List active reservations (not yet elapsed)
    #[command(alias = "current", alias = "ls")]
    Active,

    /// List past reservations within a date range
    Past(PastArgs),

    /// Create a reservation (prompts for missing fields when interactive)
    #[command(alias = "new")]
    Create(CreateArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Reservations ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PastArgs {
    /// First day of the range (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of the range (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Student ID
    #[arg(long)]
    pub student_id: Option<String>,

    /// Laboratory ("Lab 1" .. "Lab 4")
    #[arg(long, short = 'l')]
    pub lab: Option<String>,

    /// Reservation time, on the hour ("YYYY-MM-DD HH:00", 08:00-22:00)
    #[arg(long, short = 't')]
    pub time: Option<String>,

    /// Never prompt; fail on missing fields instead
    #[arg(long)]
    pub no_input: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write an initial config file (prompts when interactive)
    Init {
        /// Profile name
        #[arg(long)]
        name: Option<String>,

        /// Reservation service base URL
        #[arg(long)]
        service_url: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
