//! Load, resolve and validate a deployment in one pass
//!
//! Every failure is returned to the caller; nothing here terminates the
//! process.

use deployer_fs::NormalizedPath;
use deployer_meta::ManifestLoader;
use serde::Serialize;

use crate::config::{ResolvedConfiguration, Resolver, RunConfig};
use crate::userdata::{ResolvedUserdata, select_provider};
use crate::validate::{ValidationError, ValidationWarning, Validator};
use crate::Result;

/// A configuration that passed validation, ready for deployment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedDeployment {
    pub config: ResolvedConfiguration,
    pub warnings: Vec<ValidationWarning>,
    /// Userdata of the active stack
    pub userdata: ResolvedUserdata,
}

/// Prepare a deployment from command-line values.
///
/// Loads the manifest, checks the command-line rules, loads the metrics
/// configuration when metrics are enabled, resolves, validates, and
/// resolves the active stack's userdata.
pub fn prepare(run: RunConfig) -> Result<PreparedDeployment> {
    let loader = ManifestLoader::new();
    let validator = Validator::new();

    let (global, stacks) = loader.load(&NormalizedPath::new(&run.manifest))?;

    // Command-line rules come before any metrics parse error
    validator.validate_run(&run)?;

    let metrics = if run.disable_metrics {
        None
    } else {
        loader.load_metric_config(&NormalizedPath::new(&run.metrics_config))?
    };

    let config = Resolver::new()
        .resolve(run, global, stacks)
        .with_metric_config(metrics.unwrap_or_default());

    let warnings = validator.validate(&config)?;

    let stack = config
        .active_stack()
        .ok_or_else(|| ValidationError::StackNotFound {
            stack: config.run.stack.clone(),
        })?;
    let provider = select_provider(stack.userdata.as_ref(), &config.global.userdata);
    tracing::debug!(kind = %provider.kind(), path = provider.path(), "Resolving userdata");
    let userdata = provider.provide()?;

    tracing::info!(
        stack = %stack.stack,
        env = config.env(),
        regions = stack.regions.len(),
        warnings = warnings.len(),
        "Deployment configuration is valid"
    );

    Ok(PreparedDeployment {
        config,
        warnings,
        userdata,
    })
}
