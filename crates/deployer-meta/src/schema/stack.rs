//! Stack definitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::empty_as_none;
use super::{RegionSpec, UserdataSpec};

/// Allocation strategy assumed when a mixed instances policy names none.
pub const DEFAULT_SPOT_ALLOCATION_STRATEGY: &str = "lowest-price";

/// One independently deployable autoscaling-group unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSpec {
    /// Stack name, matched against `--stack`
    pub stack: String,
    pub account: String,
    pub env: String,
    pub replacement_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub userdata: Option<UserdataSpec>,

    pub iam_instance_profile: String,
    pub ansible_tags: String,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub assume_role: Option<String>,

    pub ebs_optimized: bool,
    pub instance_market_options: InstanceMarketOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed_instances_policy: Option<MixedInstancesPolicy>,

    pub block_devices: Vec<BlockDeviceSpec>,
    pub capacity: CapacitySpec,

    /// Scaling policies, referenced by name from alarms
    pub autoscaling: Vec<ScalingPolicy>,
    pub alarms: Vec<AlarmSpec>,

    pub lifecycle_callbacks: LifecycleCallbacks,
    pub lifecycle_hooks: LifecycleHooks,

    pub regions: Vec<RegionSpec>,

    /// Overrides the run-wide health-check polling interval
    #[serde(
        with = "crate::duration::serde_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub polling_interval: Option<Duration>,
}

impl StackSpec {
    /// Create an otherwise empty stack with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            stack: name.into(),
            ..Self::default()
        }
    }
}

/// On-demand vs. spot purchasing for the launch template
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceMarketOptions {
    /// Only `spot` is meaningful; absent means on-demand
    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub market_type: Option<String>,
    pub spot_options: SpotOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_duration_minutes: Option<u32>,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub instance_interruption_behavior: Option<String>,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_price: Option<String>,

    /// `one-time` or `persistent`
    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub spot_instance_type: Option<String>,
}

/// Mix of on-demand and spot capacity inside one autoscaling group
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MixedInstancesPolicy {
    pub enabled: bool,

    pub override_instance_types: Vec<String>,

    pub on_demand_percentage: u32,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub spot_allocation_strategy: Option<String>,

    pub spot_instance_pools: u32,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub spot_max_price: Option<String>,
}

impl MixedInstancesPolicy {
    /// The allocation strategy in force, defaulting to `lowest-price`.
    pub fn effective_allocation_strategy(&self) -> &str {
        self.spot_allocation_strategy
            .as_deref()
            .unwrap_or(DEFAULT_SPOT_ALLOCATION_STRATEGY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDeviceSpec {
    pub device_name: String,
    /// Size in GiB
    pub volume_size: u32,
    pub volume_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacitySpec {
    pub min: u32,
    pub max: u32,
    pub desired: u32,
}

impl CapacitySpec {
    /// Whether `min <= desired <= max` holds.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.desired && self.desired <= self.max
    }
}

impl std::fmt::Display for CapacitySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min={} desired={} max={}",
            self.min, self.desired, self.max
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingPolicy {
    pub name: String,
    pub adjustment_type: String,
    pub scaling_adjustment: i64,
    pub cooldown: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmSpec {
    pub name: String,
    pub namespace: String,
    pub metric: String,
    pub statistic: String,
    pub comparison: String,
    pub threshold: f64,
    pub period: u32,
    pub evaluation_periods: u32,
    /// Names of scaling policies triggered by this alarm
    pub alarm_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleCallbacks {
    pub pre_terminate_past_clusters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleHooks {
    pub launch_transition: Vec<LifecycleHookSpec>,
    pub terminate_transition: Vec<LifecycleHookSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleHookSpec {
    pub lifecycle_hook_name: String,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_result: Option<String>,

    /// Seconds; absent or zero means the provider default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartbeat_timeout: Option<u32>,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_metadata: Option<String>,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_target_arn: Option<String>,

    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub role_arn: Option<String>,
}
