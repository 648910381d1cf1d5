//! Rules scoped to the active stack
//!
//! Only the stack selected for this run is checked; other stacks in the
//! manifest are deployed by other runs and validated then.

use std::collections::HashSet;

use deployer_meta::{
    BlockDeviceSpec, DEFAULT_SPOT_ALLOCATION_STRATEGY, InstanceMarketOptions, LifecycleHookSpec,
    MixedInstancesPolicy, RegionSpec, StackSpec,
};

use super::{ValidationError, ValidationWarning, WarningKind};
use crate::config::RunConfig;

/// Volume types a block device may use.
pub const VOLUME_TYPES: [&str; 4] = ["io1", "gp2", "st1", "sc1"];

/// Smallest st1 volume, in GiB.
pub const ST1_MIN_SIZE_GIB: u32 = 500;

/// Longest spot block duration, in minutes.
pub const MAX_BLOCK_DURATION_MINUTES: u32 = 360;

type Result<T> = std::result::Result<T, ValidationError>;

pub(super) fn check_stack(
    stack: &StackSpec,
    run: &RunConfig,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    check_scaling(stack)?;
    check_market_options(&stack.instance_market_options)?;
    check_block_devices(&stack.block_devices)?;
    check_lifecycle_hooks(stack, warnings)?;
    check_regions(&stack.regions, run.ami.as_deref())?;
    if let Some(policy) = stack.mixed_instances_policy.as_ref().filter(|p| p.enabled) {
        check_mixed_instances(policy)?;
    }

    if !stack.capacity.is_ordered() {
        ValidationWarning::record(
            warnings,
            WarningKind::UnorderedCapacity,
            &stack.stack,
            format!("capacity should satisfy min <= desired <= max ({})", stack.capacity),
        );
    }
    Ok(())
}

/// Scaling policies need names, and alarms may only trigger existing policies.
fn check_scaling(stack: &StackSpec) -> Result<()> {
    let mut policies = HashSet::new();
    for policy in &stack.autoscaling {
        if policy.name.is_empty() {
            return Err(ValidationError::UnnamedScalingPolicy);
        }
        policies.insert(policy.name.as_str());
    }

    for alarm in &stack.alarms {
        if let Some(action) = alarm
            .alarm_actions
            .iter()
            .find(|action| !policies.contains(action.as_str()))
        {
            return Err(ValidationError::UnknownAlarmAction {
                alarm: alarm.name.clone(),
                action: action.clone(),
            });
        }
    }
    Ok(())
}

fn check_market_options(options: &InstanceMarketOptions) -> Result<()> {
    let Some(market_type) = options.market_type.as_deref() else {
        return Ok(());
    };
    if market_type != "spot" {
        return Err(ValidationError::InvalidMarketType {
            market_type: market_type.to_string(),
        });
    }

    let spot = &options.spot_options;
    if let Some(minutes) = spot.block_duration_minutes {
        if minutes == 0 || minutes % 60 != 0 || minutes > MAX_BLOCK_DURATION_MINUTES {
            return Err(ValidationError::InvalidBlockDuration { minutes });
        }
    }

    if spot.spot_instance_type.as_deref() == Some("persistent")
        && spot.instance_interruption_behavior.as_deref() == Some("terminate")
    {
        return Err(ValidationError::PersistentSpotWithTerminate);
    }
    Ok(())
}

fn check_block_devices(devices: &[BlockDeviceSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for device in devices {
        if device.device_name.is_empty() {
            return Err(ValidationError::MissingDeviceName);
        }

        if !VOLUME_TYPES.contains(&device.volume_type.as_str()) {
            return Err(ValidationError::UnsupportedVolumeType {
                device: device.device_name.clone(),
                volume_type: device.volume_type.clone(),
            });
        }

        if device.volume_type == "st1" && device.volume_size < ST1_MIN_SIZE_GIB {
            return Err(ValidationError::St1VolumeTooSmall {
                device: device.device_name.clone(),
                size: device.volume_size,
            });
        }

        if !seen.insert(device.device_name.as_str()) {
            return Err(ValidationError::DuplicateDeviceName {
                device: device.device_name.clone(),
            });
        }
    }
    Ok(())
}

fn check_lifecycle_hooks(stack: &StackSpec, warnings: &mut Vec<ValidationWarning>) -> Result<()> {
    let hooks = &stack.lifecycle_hooks;
    for hook in hooks.launch_transition.iter().chain(&hooks.terminate_transition) {
        check_hook(hook)?;

        if hook.heartbeat_timeout.unwrap_or(0) == 0 {
            ValidationWarning::record(
                warnings,
                WarningKind::MissingHeartbeatTimeout,
                &stack.stack,
                format!(
                    "lifecycle hook '{}' has no heartbeat timeout; the transition may wait a long time",
                    hook.lifecycle_hook_name
                ),
            );
        }
    }
    Ok(())
}

/// A notification target and the role that publishes to it come as a pair.
fn check_hook(hook: &LifecycleHookSpec) -> Result<()> {
    match (&hook.notification_target_arn, &hook.role_arn) {
        (Some(_), None) => Err(ValidationError::MissingHookRoleArn {
            hook: hook.lifecycle_hook_name.clone(),
        }),
        (None, Some(_)) => Err(ValidationError::MissingHookTargetArn {
            hook: hook.lifecycle_hook_name.clone(),
        }),
        _ => Ok(()),
    }
}

fn check_regions(regions: &[RegionSpec], global_ami: Option<&str>) -> Result<()> {
    for region in regions {
        if global_ami.is_none() && region.ami_id.is_none() {
            return Err(ValidationError::MissingAmi {
                region: region.region.clone(),
            });
        }

        if region.instance_type.is_empty() {
            return Err(ValidationError::MissingInstanceType {
                region: region.region.clone(),
            });
        }
    }
    Ok(())
}

fn check_mixed_instances(policy: &MixedInstancesPolicy) -> Result<()> {
    let strategy = policy.effective_allocation_strategy();
    if strategy != DEFAULT_SPOT_ALLOCATION_STRATEGY && policy.spot_instance_pools > 0 {
        return Err(ValidationError::SpotPoolsRequireLowestPrice {
            strategy: strategy.to_string(),
        });
    }

    if policy.override_instance_types.is_empty() {
        return Err(ValidationError::MissingOverrideInstanceTypes);
    }
    Ok(())
}
