//! Deployment manifest schema and loading.
//!
//! This crate defines the in-memory model of a multi-stack, multi-region
//! autoscaling-group deployment manifest and loads it from disk.

pub mod duration;
pub mod error;
pub mod loader;
pub mod schema;

pub use error::{Error, Result};
pub use loader::ManifestLoader;
pub use schema::{
    AlarmSpec, BlockDeviceSpec, CapacitySpec, DEFAULT_SPOT_ALLOCATION_STRATEGY, DeploymentManifest,
    GlobalConfig, InstanceMarketOptions, LifecycleCallbacks, LifecycleHookSpec, LifecycleHooks,
    METRIC_CONFIG_PATH, MetricConfig, MetricStorage, MixedInstancesPolicy, RegionSpec,
    ScalingPolicy, SpotOptions, StackSpec, UserdataSpec,
};
