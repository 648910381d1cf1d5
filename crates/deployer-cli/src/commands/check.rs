//! Check command implementation

use colored::Colorize;
use deployer_core::{PreparedDeployment, RunConfig, prepare, summary};

use crate::cli::CheckArgs;
use crate::error::Result;

/// Run the check command
pub fn run_check(args: CheckArgs) -> Result<()> {
    let json = args.json;
    let prepared = prepare(args.into_run_config())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prepared)?);
    } else {
        print_report(&prepared);
    }
    Ok(())
}

fn print_report(prepared: &PreparedDeployment) {
    if !prepared.warnings.is_empty() {
        println!("{}:", "Warnings".yellow().bold());
        for warning in &prepared.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
        println!();
    }

    print!("{}", summary::render(&prepared.config));
    println!();
    println!(
        "{} stack {} is ready to deploy",
        "OK".green().bold(),
        prepared.config.run.stack.cyan()
    );
}

impl CheckArgs {
    /// Convert parsed flags into run overrides.
    ///
    /// Empty strings and a zero polling interval count as unset.
    pub fn into_run_config(self) -> RunConfig {
        RunConfig {
            manifest: self.manifest,
            ami: non_empty(self.ami),
            env: non_empty(self.env),
            stack: self.stack,
            assume_role: non_empty(self.assume_role),
            timeout: self.timeout,
            region: non_empty(self.region),
            confirm: self.confirm,
            slack_off: self.slack_off,
            log_level: self.log_level,
            extra_tags: non_empty(self.extra_tags),
            ansible_extra_vars: non_empty(self.ansible_extra_vars),
            override_instance_type: non_empty(self.override_instance_type),
            disable_metrics: self.disable_metrics,
            release_notes: non_empty(self.release_notes),
            release_notes_base64: non_empty(self.release_notes_base64),
            force_manifest_capacity: self.force_manifest_capacity,
            polling_interval: self.polling_interval.filter(|d| !d.is_zero()),
            metrics_config: self.metrics_config,
            ..RunConfig::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
