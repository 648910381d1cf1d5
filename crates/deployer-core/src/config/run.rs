//! Values collected from the command surface

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use deployer_meta::{METRIC_CONFIG_PATH, duration};
use serde::Serialize;

/// How long a deployment may run before it is abandoned.
pub const DEFAULT_DEPLOYMENT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Health-check polling interval used when neither the command line nor the
/// active stack sets one.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(60);

/// Smallest accepted health-check polling interval.
pub const MIN_POLLING_INTERVAL: Duration = Duration::from_secs(5);

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Override values for one deployment run.
///
/// Unset overrides are `None`; they are back-filled from the manifest by the
/// [`Resolver`](super::Resolver).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    /// Path of the manifest file
    pub manifest: PathBuf,

    /// AMI used for every region instead of the per-region `ami_id`
    pub ami: Option<String>,

    pub env: Option<String>,

    /// Name of the stack to deploy
    pub stack: String,

    /// Role ARN assumed for every stack
    pub assume_role: Option<String>,

    #[serde(serialize_with = "duration::serialize")]
    pub timeout: Duration,

    pub start_timestamp: DateTime<Utc>,

    /// Restrict the deployment to a single region
    pub region: Option<String>,

    pub confirm: bool,
    pub slack_off: bool,
    pub log_level: String,
    pub extra_tags: Option<String>,
    pub ansible_extra_vars: Option<String>,
    pub override_instance_type: Option<String>,
    pub disable_metrics: bool,
    pub release_notes: Option<String>,
    pub release_notes_base64: Option<String>,
    pub force_manifest_capacity: bool,

    #[serde(serialize_with = "duration::serde_opt::serialize")]
    pub polling_interval: Option<Duration>,

    /// Location of the metrics configuration file
    pub metrics_config: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::new(),
            ami: None,
            env: None,
            stack: String::new(),
            assume_role: None,
            timeout: DEFAULT_DEPLOYMENT_TIMEOUT,
            start_timestamp: Utc::now(),
            region: None,
            confirm: true,
            slack_off: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            extra_tags: None,
            ansible_extra_vars: None,
            override_instance_type: None,
            disable_metrics: false,
            release_notes: None,
            release_notes_base64: None,
            force_manifest_capacity: false,
            polling_interval: None,
            metrics_config: PathBuf::from(METRIC_CONFIG_PATH),
        }
    }
}
