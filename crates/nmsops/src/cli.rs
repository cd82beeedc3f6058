//! Clap derive structures for the `nmsops` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use nmsops_core::{AggregationMode, DurationPreset};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nmsops -- operator console for network device management
#[derive(Debug, Parser)]
#[command(
    name = "nmsops",
    version,
    about = "Manage network devices, discovery and telemetry from the command line",
    long_about = "Operator console for the nmsops device-management backend.\n\n\
        Lists and provisions devices, manages credential and discovery\n\
        profiles, and charts per-device disk and CPU telemetry.",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "NMSOPS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "NMSOPS_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NMSOPS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "NMSOPS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "NMSOPS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

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
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and provision devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage credential profiles
    #[command(alias = "cred")]
    Credentials(CredentialsArgs),

    /// Manage and run discovery profiles
    #[command(alias = "disc")]
    Discovery(DiscoveryArgs),

    /// Validate and expand target address sets (offline)
    Targets(TargetsArgs),

    /// Query disk and CPU telemetry for a device
    #[command(alias = "tm")]
    Telemetry(TelemetryArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices, sorted by address
    #[command(alias = "ls")]
    List,

    /// Mark devices as provisioned
    Provision {
        /// Device IP addresses
        #[arg(required = true, value_name = "IP")]
        devices: Vec<String>,
    },

    /// Set the provisioning state of devices
    Set {
        /// Device IP addresses
        #[arg(required = true, value_name = "IP")]
        devices: Vec<String>,

        /// Desired provisioning state
        #[arg(long, action = clap::ArgAction::Set)]
        provisioned: bool,
    },

    /// Flip the provisioning state of the selected devices
    Toggle {
        /// Device IP addresses
        #[arg(value_name = "IP", required_unless_present = "all")]
        devices: Vec<String>,

        /// Select every listed device (clears the selection if all are given)
        #[arg(long, conflicts_with = "devices")]
        all: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CREDENTIALS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CredentialsCommand {
    /// List credential profiles
    #[command(alias = "ls")]
    List,

    /// Create a credential profile (password is prompted)
    Create(CredentialFields),

    /// Replace a credential profile (password is prompted)
    Update {
        /// Credential profile ID
        id: i64,

        #[command(flatten)]
        fields: CredentialFields,
    },

    /// Delete a credential profile
    #[command(alias = "rm")]
    Delete {
        /// Credential profile ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct CredentialFields {
    /// Host name or address the credentials log into
    #[arg(long)]
    pub hostname: String,

    /// Port (0-65535)
    #[arg(long, default_value = "22")]
    pub port: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "NMSOPS_CREDENTIAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DISCOVERY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DiscoveryArgs {
    #[command(subcommand)]
    pub command: DiscoveryCommand,
}

#[derive(Debug, Subcommand)]
pub enum DiscoveryCommand {
    /// List discovery profiles
    #[command(alias = "ls")]
    List,

    /// Show one discovery profile
    Get {
        /// Discovery profile ID
        id: i64,

        /// List every target address
        #[arg(long)]
        expand: bool,
    },

    /// Create a discovery profile
    Create {
        /// Targets: comma-separated IPs, or a CIDR block with --cidr
        #[arg(long)]
        targets: String,

        /// Interpret --targets as a CIDR block
        #[arg(long)]
        cidr: bool,

        /// Credential profile IDs (repeat or comma-separate)
        #[arg(long = "credential", short = 'c', value_delimiter = ',')]
        credentials: Vec<i64>,
    },

    /// Update a discovery profile
    Update {
        /// Discovery profile ID
        id: i64,

        /// Replacement targets
        #[arg(long)]
        targets: Option<String>,

        /// Interpret --targets as a CIDR block
        #[arg(long, requires = "targets")]
        cidr: bool,

        /// Replacement credential profile IDs
        #[arg(long = "credential", short = 'c', value_delimiter = ',')]
        credentials: Vec<i64>,
    },

    /// Delete a discovery profile
    #[command(alias = "rm")]
    Delete {
        /// Discovery profile ID
        id: i64,
    },

    /// Start a discovery run
    Run {
        /// Discovery profile ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TARGETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TargetsArgs {
    #[command(subcommand)]
    pub command: TargetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TargetsCommand {
    /// Validate a target set and print the resolved addresses
    Resolve {
        /// Comma-separated IPs, or a CIDR block with --cidr
        text: String,

        /// Interpret the input as a CIDR block
        #[arg(long)]
        cidr: bool,

        /// Materialize every address of a CIDR block
        #[arg(long)]
        expand: bool,

        /// Expansion ceiling (overrides profile)
        #[arg(long)]
        ceiling: Option<u64>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TELEMETRY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TelemetryArgs {
    #[command(subcommand)]
    pub command: TelemetryCommand,
}

#[derive(Debug, Subcommand)]
pub enum TelemetryCommand {
    /// Disk and CPU series for one device
    Show {
        /// Device IP address
        #[arg(value_name = "IP")]
        device: String,

        /// Window ending now: 1h, 6h, 24h, 2d, 7d
        #[arg(long, short = 'd', default_value = "1h")]
        duration: DurationPreset,

        /// Aggregation: avg, min, max, sum, count
        #[arg(long, short = 'a', default_value = "avg")]
        aggregation: AggregationMode,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key (server, timeout, expansion_ceiling, insecure,
        /// ca_cert, disk_counter, cpu_counter)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
