//! CLI argument parsing using clap derive

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use deployer_core::DEFAULT_LOG_LEVEL;
use deployer_meta::{METRIC_CONFIG_PATH, duration};

/// Deployer - Check autoscaling group deployments before they run
#[derive(Parser, Debug)]
#[command(name = "deployer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve and validate a deployment manifest
    ///
    /// Loads the manifest, applies command-line overrides, validates the
    /// target stack and prints a summary of what would be deployed.
    ///
    /// Examples:
    ///   deployer check --manifest manifest.yaml --stack artd
    ///   deployer check -m manifest.yaml -s artd --disable-metrics
    ///   deployer check -m manifest.yaml -s artd --json
    Check(CheckArgs),

    /// Generate shell completions
    ///
    /// Outputs completion script for your shell.
    ///
    /// Examples:
    ///   deployer completions bash > ~/.local/share/bash-completion/completions/deployer
    ///   deployer completions zsh > ~/.zfunc/_deployer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Overrides for a single deployment run
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    /// Path of the deployment manifest
    #[arg(short, long, env = "DEPLOYER_MANIFEST")]
    pub manifest: PathBuf,

    /// AMI used in every region instead of the manifest's ami_id
    #[arg(long)]
    pub ami: Option<String>,

    /// Environment of the stack
    #[arg(long, env = "DEPLOYER_ENV")]
    pub env: Option<String>,

    /// Name of the stack to deploy
    #[arg(short, long, env = "DEPLOYER_STACK", default_value = "")]
    pub stack: String,

    /// Role ARN assumed for every stack
    #[arg(long, env = "DEPLOYER_ASSUME_ROLE")]
    pub assume_role: Option<String>,

    /// How long the deployment may run
    #[arg(long, default_value = "60m", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Deploy only to this region
    #[arg(short, long, env = "DEPLOYER_REGION")]
    pub region: Option<String>,

    /// Ask for confirmation before deploying
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub confirm: bool,

    /// Turn off Slack notifications
    #[arg(long)]
    pub slack_off: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "DEPLOYER_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Extra tags added to instances (comma separated key=value)
    #[arg(long)]
    pub extra_tags: Option<String>,

    /// Extra variables passed to ansible
    #[arg(long)]
    pub ansible_extra_vars: Option<String>,

    /// Instance type used in every region instead of the manifest's
    #[arg(long)]
    pub override_instance_type: Option<String>,

    /// Do not record deployment metrics
    #[arg(long)]
    pub disable_metrics: bool,

    /// Release notes for this deployment
    #[arg(long)]
    pub release_notes: Option<String>,

    /// Base64-encoded release notes
    #[arg(long, conflicts_with = "release_notes")]
    pub release_notes_base64: Option<String>,

    /// Use the manifest's capacity instead of the running group's
    #[arg(long)]
    pub force_manifest_capacity: bool,

    /// Health-check polling interval (e.g. 30s, 1m)
    #[arg(long, value_parser = parse_duration)]
    pub polling_interval: Option<Duration>,

    /// Path of the metrics configuration file
    #[arg(long, default_value = METRIC_CONFIG_PATH)]
    pub metrics_config: PathBuf,

    /// Print the prepared deployment as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_duration(input: &str) -> Result<Duration, String> {
    duration::parse(input).map_err(|e| e.to_string())
}
