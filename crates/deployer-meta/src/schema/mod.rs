//! Manifest schema
//!
//! A manifest describes every stack of a service and the regions each stack
//! deploys into:
//!
//! ```yaml
//! name: hello
//! userdata:
//!   type: local
//!   path: scripts/userdata.sh
//! tags:
//!   - project=hello
//! stacks:
//!   - stack: artd
//!     account: dev
//!     env: dev
//!     replacement_type: BlueGreen
//!     iam_instance_profile: app-hello-profile
//!     capacity: { min: 1, max: 2, desired: 1 }
//!     regions:
//!       - region: ap-northeast-2
//!         instance_type: t3.medium
//!         ami_id: ami-01288945bd24ed49a
//! ```
//!
//! Optional fields are modelled as `Option`; an empty string in the document
//! counts as "not set".

mod manifest;
mod metrics;
mod region;
mod stack;

pub use manifest::{DeploymentManifest, GlobalConfig, UserdataSpec};
pub use metrics::{METRIC_CONFIG_PATH, MetricConfig, MetricStorage};
pub use region::RegionSpec;
pub use stack::{
    AlarmSpec, DEFAULT_SPOT_ALLOCATION_STRATEGY, BlockDeviceSpec, CapacitySpec, InstanceMarketOptions, LifecycleCallbacks,
    LifecycleHookSpec, LifecycleHooks, MixedInstancesPolicy, ScalingPolicy, SpotOptions,
    StackSpec,
};

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating blank values as absent.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
