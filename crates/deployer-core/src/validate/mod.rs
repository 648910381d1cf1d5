//! Fail-fast validation of a resolved configuration
//!
//! Rules run in a fixed order and the first violation is returned, so the
//! order below decides which error a user sees when several apply:
//!
//! 1. a target stack is selected
//! 2. a raw AMI id is only given together with a region
//! 3. the metrics configuration file exists, unless metrics are disabled
//! 4. plain and base64 release notes are not both given
//! 5. the target stack exists in the manifest
//! 6. stack-scoped rules for the active stack only (see [`stack`])
//! 7. metrics region and storage are named, unless metrics are disabled
//! 8. the polling interval is at least [`MIN_POLLING_INTERVAL`] and below the timeout
//!
//! Warnings never fail validation; they are logged and returned.

mod error;
mod stack;

use std::fmt;

use deployer_fs::NormalizedPath;
use serde::Serialize;

use crate::config::{MIN_POLLING_INTERVAL, ResolvedConfiguration, RunConfig};

pub use error::ValidationError;

/// Kinds of non-fatal findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A lifecycle hook without a heartbeat timeout may stall for a long time
    MissingHeartbeatTimeout,
    /// Capacity does not satisfy `min <= desired <= max`
    UnorderedCapacity,
}

/// A finding that is reported but does not block the deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub kind: WarningKind,
    /// Stack the warning belongs to
    pub stack: String,
    pub message: String,
}

impl ValidationWarning {
    /// Log the warning and append it to `warnings`.
    fn record(warnings: &mut Vec<ValidationWarning>, kind: WarningKind, stack: &str, message: String) {
        tracing::warn!(stack, ?kind, "{}", message);
        warnings.push(ValidationWarning {
            kind,
            stack: stack.to_string(),
            message,
        });
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stack, self.message)
    }
}

/// Validates a [`ResolvedConfiguration`].
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check the rules that depend only on command-line values (1 to 4).
    ///
    /// [`validate`](Self::validate) runs these first as well. They need no
    /// manifest or metrics content.
    pub fn validate_run(&self, run: &RunConfig) -> Result<(), ValidationError> {
        if run.stack.is_empty() {
            return Err(ValidationError::StackNotSelected);
        }

        // A raw image id is region-specific
        if let Some(ami) = run
            .ami
            .as_deref()
            .filter(|ami| run.region.is_none() && ami.starts_with("ami-"))
        {
            return Err(ValidationError::AmiRequiresRegion {
                ami: ami.to_string(),
            });
        }

        if !run.disable_metrics && !NormalizedPath::new(&run.metrics_config).is_file() {
            return Err(ValidationError::MetricsConfigMissing {
                path: run.metrics_config.clone(),
            });
        }

        if run.release_notes.is_some() && run.release_notes_base64.is_some() {
            return Err(ValidationError::ConflictingReleaseNotes);
        }

        Ok(())
    }

    /// Check every rule in order and return the first violation.
    ///
    /// On success, returns the warnings collected along the way.
    pub fn validate(
        &self,
        config: &ResolvedConfiguration,
    ) -> Result<Vec<ValidationWarning>, ValidationError> {
        let run = &config.run;
        let mut warnings = Vec::new();

        self.validate_run(run)?;

        let active = config
            .active_stack()
            .ok_or_else(|| ValidationError::StackNotFound {
                stack: run.stack.clone(),
            })?;
        stack::check_stack(active, run, &mut warnings)?;

        if !run.disable_metrics {
            if config.metrics.region.is_empty() {
                return Err(ValidationError::MissingMetricsRegion);
            }
            if config.metrics.storage.name.is_empty() {
                return Err(ValidationError::MissingMetricsStorage);
            }
        }

        let interval = config.polling_interval();
        if interval < MIN_POLLING_INTERVAL {
            return Err(ValidationError::PollingIntervalTooShort {
                interval,
                minimum: MIN_POLLING_INTERVAL,
            });
        }
        if interval >= run.timeout {
            return Err(ValidationError::PollingIntervalNotBelowTimeout {
                interval,
                timeout: run.timeout,
            });
        }

        Ok(warnings)
    }
}
