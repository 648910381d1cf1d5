//! Merging command-line overrides with the manifest

use std::time::Duration;

use deployer_meta::{GlobalConfig, MetricConfig, StackSpec};
use serde::Serialize;

use super::run::{DEFAULT_POLLING_INTERVAL, RunConfig};

/// The merged configuration consumed by the validator and by everything
/// that acts on a deployment.
///
/// Built once by [`Resolver::resolve`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    /// Command-line values with `env` and `polling_interval` back-filled
    pub run: RunConfig,

    /// Manifest-wide name, default userdata and tags
    pub global: GlobalConfig,

    /// Metrics settings; default when metrics are disabled or unconfigured
    pub metrics: MetricConfig,

    /// Every stack in the manifest, after the assume-role broadcast
    pub stacks: Vec<StackSpec>,
}

impl ResolvedConfiguration {
    /// The stack selected by `run.stack`, if the manifest contains one.
    ///
    /// The first stack with a matching name wins.
    pub fn active_stack(&self) -> Option<&StackSpec> {
        self.stacks.iter().find(|s| s.stack == self.run.stack)
    }

    /// Resolved environment label, empty when neither source sets one.
    pub fn env(&self) -> &str {
        self.run.env.as_deref().unwrap_or_default()
    }

    /// Resolved health-check polling interval.
    pub fn polling_interval(&self) -> Duration {
        self.run.polling_interval.unwrap_or(DEFAULT_POLLING_INTERVAL)
    }

    /// Attach the metrics configuration loaded alongside the manifest.
    pub fn with_metric_config(mut self, metrics: MetricConfig) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Merges a [`RunConfig`] with a loaded manifest.
///
/// Resolution never fails; invalid combinations are left for the
/// [`Validator`](crate::Validator) to report.
#[derive(Debug, Clone, Default)]
pub struct Resolver;

impl Resolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the configuration for one run.
    ///
    /// In order:
    /// 1. `run` and `global` are carried over unchanged
    /// 2. a command-line `assume_role` overwrites the role of every stack
    /// 3. the first stack named `run.stack` becomes the active stack
    /// 4. an unset `env` is taken from the active stack
    /// 5. an unset or zero `polling_interval` is taken from the active stack, or
    ///    from the default
    pub fn resolve(
        &self,
        mut run: RunConfig,
        global: GlobalConfig,
        mut stacks: Vec<StackSpec>,
    ) -> ResolvedConfiguration {
        if let Some(role) = &run.assume_role {
            tracing::debug!(role = %role, stacks = stacks.len(), "Broadcasting assume-role override");
            for stack in &mut stacks {
                stack.assume_role = Some(role.clone());
            }
        }

        let active = stacks.iter().find(|s| s.stack == run.stack);
        if active.is_none() {
            tracing::debug!(stack = %run.stack, "No stack in the manifest matches the target");
        }

        if run.env.is_none() {
            run.env = active
                .map(|s| s.env.clone())
                .filter(|env| !env.is_empty());
        }

        // Zero counts as unset
        let interval = run
            .polling_interval
            .filter(|d| !d.is_zero())
            .or_else(|| active.and_then(|s| s.polling_interval))
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_POLLING_INTERVAL);
        run.polling_interval = Some(interval);

        tracing::debug!(
            stack = %run.stack,
            env = run.env.as_deref().unwrap_or_default(),
            polling_interval = ?run.polling_interval,
            "Resolved run configuration"
        );

        ResolvedConfiguration {
            run,
            global,
            metrics: MetricConfig::default(),
            stacks,
        }
    }
}
