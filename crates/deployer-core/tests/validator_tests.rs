//! Validation rules, their boundaries and their order

use std::path::PathBuf;
use std::time::Duration;

use deployer_core::{
    ResolvedConfiguration, Resolver, RunConfig, ValidationError, Validator, WarningKind,
};
use deployer_meta::{
    BlockDeviceSpec, CapacitySpec, GlobalConfig, InstanceMarketOptions, MetricConfig,
    MetricStorage, MixedInstancesPolicy, RegionSpec, SpotOptions, StackSpec,
};
use deployer_test_utils::{ManifestFixture, SAMPLE_METRIC_CONFIG};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn valid_stack(name: &str) -> StackSpec {
    StackSpec {
        env: "dev".into(),
        capacity: CapacitySpec {
            min: 1,
            max: 2,
            desired: 1,
        },
        regions: vec![RegionSpec {
            region: "ap-northeast-2".into(),
            instance_type: "t3.medium".into(),
            ami_id: Some("ami-01288945bd24ed49a".into()),
            ..Default::default()
        }],
        ..StackSpec::named(name)
    }
}

fn base_run() -> RunConfig {
    RunConfig {
        stack: "artd".into(),
        disable_metrics: true,
        ..RunConfig::default()
    }
}

fn resolve(run: RunConfig, stacks: Vec<StackSpec>) -> ResolvedConfiguration {
    Resolver::new().resolve(run, GlobalConfig::default(), stacks)
}

fn validate_stack(stack: StackSpec) -> Result<(), ValidationError> {
    Validator::new()
        .validate(&resolve(base_run(), vec![stack]))
        .map(|_| ())
}

fn with_devices(devices: Vec<BlockDeviceSpec>) -> StackSpec {
    StackSpec {
        block_devices: devices,
        ..valid_stack("artd")
    }
}

fn device(name: &str, volume_type: &str, size: u32) -> BlockDeviceSpec {
    BlockDeviceSpec {
        device_name: name.into(),
        volume_type: volume_type.into(),
        volume_size: size,
    }
}

fn with_spot(spot: SpotOptions) -> StackSpec {
    StackSpec {
        instance_market_options: InstanceMarketOptions {
            market_type: Some("spot".into()),
            spot_options: spot,
        },
        ..valid_stack("artd")
    }
}

#[test]
fn valid_configuration_passes_without_warnings() {
    let warnings = Validator::new()
        .validate(&resolve(base_run(), vec![valid_stack("artd")]))
        .unwrap();
    assert!(warnings.is_empty());
}

// ============================================================================
// Global rules
// ============================================================================

#[test]
fn stack_must_be_selected_before_anything_else() {
    let run = RunConfig {
        stack: String::new(),
        release_notes: Some("x".into()),
        release_notes_base64: Some("eQ==".into()),
        ..base_run()
    };
    let err = Validator::new()
        .validate(&resolve(run, vec![valid_stack("artd")]))
        .unwrap_err();
    assert_eq!(err, ValidationError::StackNotSelected);
}

#[rstest]
#[case::raw_ami_without_region(Some("ami-0abc"), None, false)]
#[case::raw_ami_with_region(Some("ami-0abc"), Some("us-east-1"), true)]
#[case::non_id_ami_without_region(Some("hello-base-image"), None, true)]
#[case::no_ami(None, None, true)]
fn global_ami_needs_a_region(
    #[case] ami: Option<&str>,
    #[case] region: Option<&str>,
    #[case] ok: bool,
) {
    let run = RunConfig {
        ami: ami.map(str::to_string),
        region: region.map(str::to_string),
        ..base_run()
    };
    let result = Validator::new().validate(&resolve(run, vec![valid_stack("artd")]));
    if ok {
        assert!(result.is_ok(), "{result:?}");
    } else {
        assert_eq!(
            result.unwrap_err(),
            ValidationError::AmiRequiresRegion {
                ami: "ami-0abc".into()
            }
        );
    }
}

#[test]
fn enabled_metrics_require_the_config_file() {
    let fixture = ManifestFixture::new();
    let run = RunConfig {
        disable_metrics: false,
        metrics_config: fixture.metric_config_path(),
        ..base_run()
    };
    let err = Validator::new()
        .validate(&resolve(run, vec![valid_stack("artd")]))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::MetricsConfigMissing {
            path: fixture.metric_config_path()
        }
    );
}

#[rstest]
#[case::missing_region("", "deployer-metrics", Some(ValidationError::MissingMetricsRegion))]
#[case::missing_storage("ap-northeast-2", "", Some(ValidationError::MissingMetricsStorage))]
#[case::complete("ap-northeast-2", "deployer-metrics", None)]
fn enabled_metrics_need_region_and_storage(
    #[case] region: &str,
    #[case] storage: &str,
    #[case] expected: Option<ValidationError>,
) {
    let fixture = ManifestFixture::new().with_metric_config(SAMPLE_METRIC_CONFIG);
    let run = RunConfig {
        disable_metrics: false,
        metrics_config: fixture.metric_config_path(),
        ..base_run()
    };
    let config = resolve(run, vec![valid_stack("artd")]).with_metric_config(MetricConfig {
        enabled: true,
        region: region.into(),
        storage: MetricStorage {
            kind: "dynamodb".into(),
            name: storage.into(),
        },
    });

    let result = Validator::new().validate(&config).map(|_| ());
    assert_eq!(result.err(), expected);
}

#[test]
fn disabled_metrics_skip_metric_rules() {
    let run = RunConfig {
        metrics_config: PathBuf::from("/definitely/not/here/metrics.yaml"),
        ..base_run()
    };
    assert!(Validator::new()
        .validate(&resolve(run, vec![valid_stack("artd")]))
        .is_ok());
}

#[test]
fn release_notes_are_mutually_exclusive_regardless_of_stack() {
    let broken = with_devices(vec![device("/dev/xvdb", "st1", 100)]);
    let run = RunConfig {
        release_notes: Some("x".into()),
        release_notes_base64: Some("y".into()),
        ..base_run()
    };
    let err = Validator::new()
        .validate(&resolve(run, vec![broken]))
        .unwrap_err();
    assert_eq!(err, ValidationError::ConflictingReleaseNotes);
}

#[test]
fn either_release_note_alone_is_fine() {
    for (plain, encoded) in [(Some("x"), None), (None, Some("eA=="))] {
        let run = RunConfig {
            release_notes: plain.map(str::to_string),
            release_notes_base64: encoded.map(str::to_string),
            ..base_run()
        };
        assert!(Validator::new()
            .validate(&resolve(run, vec![valid_stack("artd")]))
            .is_ok());
    }
}

#[test]
fn unknown_target_stack_is_reported() {
    let run = RunConfig {
        stack: "missing".into(),
        ..base_run()
    };
    let err = Validator::new()
        .validate(&resolve(run, vec![valid_stack("artd")]))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::StackNotFound {
            stack: "missing".into()
        }
    );
}

#[test]
fn inactive_stacks_are_not_validated() {
    let other = StackSpec {
        block_devices: vec![device("/dev/xvdb", "st1", 1)],
        regions: vec![RegionSpec::default()],
        ..StackSpec::named("other")
    };
    assert!(Validator::new()
        .validate(&resolve(base_run(), vec![valid_stack("artd"), other]))
        .is_ok());
}

// ============================================================================
// Stack rules
// ============================================================================

#[test]
fn scaling_policies_need_names() {
    let mut stack = valid_stack("artd");
    stack.autoscaling.push(Default::default());
    assert_eq!(validate_stack(stack), Err(ValidationError::UnnamedScalingPolicy));
}

#[rstest]
#[case::one_hour(Some(60), true)]
#[case::ninety_minutes(Some(90), false)]
#[case::six_hours(Some(360), true)]
#[case::seven_hours(Some(420), false)]
#[case::zero(Some(0), false)]
#[case::unset(None, true)]
fn spot_block_duration(#[case] minutes: Option<u32>, #[case] ok: bool) {
    let stack = with_spot(SpotOptions {
        block_duration_minutes: minutes,
        ..Default::default()
    });
    let result = validate_stack(stack);
    if ok {
        assert_eq!(result, Ok(()));
    } else {
        assert_eq!(
            result,
            Err(ValidationError::InvalidBlockDuration {
                minutes: minutes.unwrap()
            })
        );
    }
}

#[test]
fn market_type_must_be_spot() {
    let mut stack = valid_stack("artd");
    stack.instance_market_options.market_type = Some("on-demand".into());
    assert_eq!(
        validate_stack(stack),
        Err(ValidationError::InvalidMarketType {
            market_type: "on-demand".into()
        })
    );
}

#[rstest]
#[case("persistent", "terminate", false)]
#[case("persistent", "stop", true)]
#[case("one-time", "terminate", true)]
fn persistent_spot_cannot_terminate(
    #[case] spot_type: &str,
    #[case] behavior: &str,
    #[case] ok: bool,
) {
    let stack = with_spot(SpotOptions {
        spot_instance_type: Some(spot_type.into()),
        instance_interruption_behavior: Some(behavior.into()),
        ..Default::default()
    });
    let expected = if ok {
        Ok(())
    } else {
        Err(ValidationError::PersistentSpotWithTerminate)
    };
    assert_eq!(validate_stack(stack), expected);
}

#[rstest]
#[case::st1_below_minimum(vec![device("/dev/xvdb", "st1", 400)], Some(ValidationError::St1VolumeTooSmall { device: "/dev/xvdb".into(), size: 400 }))]
#[case::st1_at_minimum(vec![device("/dev/xvdb", "st1", 500)], None)]
#[case::sc1_small(vec![device("/dev/xvdb", "sc1", 100)], None)]
#[case::unsupported_type(vec![device("/dev/xvdb", "gp3", 100)], Some(ValidationError::UnsupportedVolumeType { device: "/dev/xvdb".into(), volume_type: "gp3".into() }))]
#[case::missing_name(vec![device("", "gp2", 8)], Some(ValidationError::MissingDeviceName))]
#[case::duplicate(vec![device("/dev/xvda", "gp2", 8), device("/dev/xvda", "io1", 20)], Some(ValidationError::DuplicateDeviceName { device: "/dev/xvda".into() }))]
fn block_devices(#[case] devices: Vec<BlockDeviceSpec>, #[case] expected: Option<ValidationError>) {
    assert_eq!(validate_stack(with_devices(devices)).err(), expected);
}

#[test]
fn regions_need_an_instance_type() {
    let mut stack = valid_stack("artd");
    stack.regions[0].instance_type.clear();
    assert_eq!(
        validate_stack(stack),
        Err(ValidationError::MissingInstanceType {
            region: "ap-northeast-2".into()
        })
    );
}

#[test]
fn regions_need_an_ami_unless_given_globally() {
    let mut stack = valid_stack("artd");
    stack.regions[0].ami_id = None;
    assert_eq!(
        validate_stack(stack.clone()),
        Err(ValidationError::MissingAmi {
            region: "ap-northeast-2".into()
        })
    );

    let run = RunConfig {
        ami: Some("ami-0abc".into()),
        region: Some("ap-northeast-2".into()),
        ..base_run()
    };
    assert!(Validator::new().validate(&resolve(run, vec![stack])).is_ok());
}

#[rstest]
#[case::defaults_to_lowest_price(None, 2, vec!["c5.large"], None)]
#[case::other_strategy_with_pools(Some("capacity-optimized"), 2, vec!["c5.large"], Some(ValidationError::SpotPoolsRequireLowestPrice { strategy: "capacity-optimized".into() }))]
#[case::other_strategy_without_pools(Some("capacity-optimized"), 0, vec!["c5.large"], None)]
#[case::no_overrides(None, 0, vec![], Some(ValidationError::MissingOverrideInstanceTypes))]
fn mixed_instances_policy(
    #[case] strategy: Option<&str>,
    #[case] pools: u32,
    #[case] overrides: Vec<&str>,
    #[case] expected: Option<ValidationError>,
) {
    let stack = StackSpec {
        mixed_instances_policy: Some(MixedInstancesPolicy {
            enabled: true,
            spot_allocation_strategy: strategy.map(str::to_string),
            spot_instance_pools: pools,
            override_instance_types: overrides.into_iter().map(str::to_string).collect(),
            ..Default::default()
        }),
        ..valid_stack("artd")
    };
    assert_eq!(validate_stack(stack).err(), expected);
}

#[test]
fn disabled_mixed_instances_policy_is_ignored() {
    let stack = StackSpec {
        mixed_instances_policy: Some(MixedInstancesPolicy::default()),
        ..valid_stack("artd")
    };
    assert_eq!(validate_stack(stack), Ok(()));
}

#[test]
fn stack_rules_run_in_order() {
    // Both a bad block device and a region without instance type;
    // block devices are checked first.
    let mut stack = with_devices(vec![device("/dev/xvdb", "magnetic", 8)]);
    stack.regions[0].instance_type.clear();
    assert!(matches!(
        validate_stack(stack),
        Err(ValidationError::UnsupportedVolumeType { .. })
    ));
}

#[test]
fn unordered_capacity_is_only_a_warning() {
    let stack = StackSpec {
        capacity: CapacitySpec {
            min: 3,
            max: 2,
            desired: 1,
        },
        ..valid_stack("artd")
    };
    let warnings = Validator::new()
        .validate(&resolve(base_run(), vec![stack]))
        .unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::UnorderedCapacity);
    assert_eq!(warnings[0].stack, "artd");
}

// ============================================================================
// Polling
// ============================================================================

#[rstest]
#[case::below_minimum(3, false)]
#[case::at_minimum(5, true)]
#[case::one_below_timeout(3599, true)]
#[case::equal_to_timeout(3600, false)]
fn polling_interval_bounds(#[case] secs: u64, #[case] ok: bool) {
    let run = RunConfig {
        polling_interval: Some(Duration::from_secs(secs)),
        timeout: Duration::from_secs(3600),
        ..base_run()
    };
    let result = Validator::new().validate(&resolve(run, vec![valid_stack("artd")]));
    assert_eq!(result.is_ok(), ok, "{result:?}");
}

#[test]
fn polling_interval_errors_name_the_bound() {
    let run = RunConfig {
        polling_interval: Some(Duration::from_secs(3)),
        ..base_run()
    };
    let err = Validator::new()
        .validate(&resolve(run, vec![valid_stack("artd")]))
        .unwrap_err();
    assert_eq!(err.to_string(), "polling interval cannot be smaller than 5s");

    let run = RunConfig {
        polling_interval: Some(Duration::from_secs(600)),
        timeout: Duration::from_secs(600),
        ..base_run()
    };
    let err = Validator::new()
        .validate(&resolve(run, vec![valid_stack("artd")]))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::PollingIntervalNotBelowTimeout {
            interval: Duration::from_secs(600),
            timeout: Duration::from_secs(600)
        }
    );
}

#[test]
fn alarm_actions_must_name_a_policy() {
    let mut stack = valid_stack("artd");
    stack.alarms.push(deployer_meta::AlarmSpec {
        name: "cpu-high".into(),
        alarm_actions: vec!["scale_out".into()],
        ..Default::default()
    });
    assert_eq!(
        validate_stack(stack.clone()),
        Err(ValidationError::UnknownAlarmAction {
            alarm: "cpu-high".into(),
            action: "scale_out".into()
        })
    );

    stack.autoscaling.push(deployer_meta::ScalingPolicy {
        name: "scale_out".into(),
        ..Default::default()
    });
    assert_eq!(validate_stack(stack), Ok(()));
}

#[test]
fn command_line_rules_need_no_manifest() {
    let validator = Validator::new();
    assert_eq!(validator.validate_run(&base_run()), Ok(()));

    let run = RunConfig {
        ami: Some("ami-0abc".into()),
        ..base_run()
    };
    assert_eq!(
        validator.validate_run(&run),
        Err(ValidationError::AmiRequiresRegion {
            ami: "ami-0abc".into()
        })
    );
}
