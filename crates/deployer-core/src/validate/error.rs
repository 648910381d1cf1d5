//! Invariant violations reported by the validator

use std::path::PathBuf;
use std::time::Duration;

use deployer_meta::duration;

fn human(d: &Duration) -> String {
    duration::format(*d)
}

/// The first invariant a resolved configuration violates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("you should choose at least one stack")]
    StackNotSelected,

    #[error("one ami id cannot be used in different regions: {ami}")]
    AmiRequiresRegion { ami: String },

    #[error("no metrics configuration file exists at {path}")]
    MetricsConfigMissing { path: PathBuf },

    #[error("you cannot specify the release-notes and release-notes-base64 at the same time")]
    ConflictingReleaseNotes,

    #[error("stack '{stack}' does not exist in the manifest")]
    StackNotFound { stack: String },

    #[error("autoscaling policy doesn't have a name")]
    UnnamedScalingPolicy,

    #[error("no scaling policy exists for action '{action}' of alarm '{alarm}'")]
    UnknownAlarmAction { alarm: String, action: String },

    #[error("no valid market type: {market_type}")]
    InvalidMarketType { market_type: String },

    #[error("block_duration_minutes should be one of [ 60, 120, 180, 240, 300, 360 ], got {minutes}")]
    InvalidBlockDuration { minutes: u32 },

    #[error("persistent spot instance type is not allowed with terminate interruption behavior")]
    PersistentSpotWithTerminate,

    #[error("name of device is required")]
    MissingDeviceName,

    #[error("not available volume type for {device}: {volume_type}")]
    UnsupportedVolumeType { device: String, volume_type: String },

    #[error("volume size of st1 type should be at least 500GiB, {device} has {size}GiB")]
    St1VolumeTooSmall { device: String, size: u32 },

    #[error("device names are duplicated: {device}")]
    DuplicateDeviceName { device: String },

    #[error("role_arn is needed if `notification_target_arn` is not empty: {hook}")]
    MissingHookRoleArn { hook: String },

    #[error("notification_target_arn is needed if `role_arn` is not empty: {hook}")]
    MissingHookTargetArn { hook: String },

    #[error("you have to specify at least one ami id for region {region}")]
    MissingAmi { region: String },

    #[error("you have to specify the instance type for region {region}")]
    MissingInstanceType { region: String },

    #[error("you can only set spot_instance_pools with lowest-price spot_allocation_strategy, got {strategy}")]
    SpotPoolsRequireLowestPrice { strategy: String },

    #[error("you have to set at least one instance type to use in override")]
    MissingOverrideInstanceTypes,

    #[error("you do not specify the region for metrics")]
    MissingMetricsRegion,

    #[error("you do not specify the name of storage for metrics")]
    MissingMetricsStorage,

    #[error("polling interval cannot be smaller than {}", human(.minimum))]
    PollingIntervalTooShort { interval: Duration, minimum: Duration },

    #[error(
        "polling interval {} should be lower than the timeout {}",
        human(.interval),
        human(.timeout)
    )]
    PollingIntervalNotBelowTimeout { interval: Duration, timeout: Duration },
}
