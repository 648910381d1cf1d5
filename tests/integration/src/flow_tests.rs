//! End-to-end flow across the workspace crates
//!
//! Drives the loader, resolver, validator, userdata providers and summary
//! one step at a time against fixtures on disk.

use std::time::Duration;

use deployer_core::{
    ResolvedUserdata, Resolver, RunConfig, UserdataKind, ValidationError, Validator, prepare,
    select_provider, summary,
};
use deployer_fs::NormalizedPath;
use deployer_meta::ManifestLoader;
use deployer_test_utils::ManifestFixture;
use pretty_assertions::assert_eq;

fn run_for(fixture: &ManifestFixture, manifest: &str, stack: &str) -> RunConfig {
    RunConfig {
        manifest: fixture.join(manifest),
        metrics_config: fixture.metric_config_path(),
        stack: stack.into(),
        ..RunConfig::default()
    }
}

#[test]
fn step_by_step_flow_matches_prepare() {
    let fixture = ManifestFixture::sample();
    let run = run_for(&fixture, "manifest.yaml", "artd");
    let loader = ManifestLoader::new();

    let (global, stacks) = loader
        .load(&NormalizedPath::new(&run.manifest))
        .unwrap();
    assert_eq!(global.name, "hello");
    assert_eq!(stacks.len(), 2);

    let metrics = loader
        .load_metric_config(&NormalizedPath::new(&run.metrics_config))
        .unwrap()
        .unwrap();
    let config = Resolver::new()
        .resolve(run.clone(), global, stacks)
        .with_metric_config(metrics);
    let warnings = Validator::new().validate(&config).unwrap();
    assert!(warnings.is_empty());

    let stack = config.active_stack().unwrap();
    let provider = select_provider(stack.userdata.as_ref(), &config.global.userdata);
    assert_eq!(provider.kind(), UserdataKind::Local);
    let userdata = provider.provide().unwrap();

    let prepared = prepare(run).unwrap();
    // Only the run timestamp may differ between the two paths
    assert_eq!(prepared.config.stacks, config.stacks);
    assert_eq!(prepared.config.env(), config.env());
    assert_eq!(prepared.config.polling_interval(), config.polling_interval());
    assert_eq!(prepared.userdata, userdata);
}

#[test]
fn summary_reflects_resolved_values() {
    let fixture = ManifestFixture::sample();
    let run = RunConfig {
        env: Some("qa".into()),
        region: Some("ap-northeast-2".into()),
        timeout: Duration::from_secs(30 * 60),
        ..run_for(&fixture, "manifest.yaml", "artd")
    };

    let prepared = prepare(run).unwrap();
    let text = summary::render(&prepared.config);

    assert!(text.contains("[ artd ]"), "{text}");
    assert!(text.contains("30 min"), "{text}");
    assert!(text.contains("90 sec"), "{text}");
    assert!(text.contains("t3.medium"), "{text}");
    assert!(text.lines().any(|l| l.starts_with("env") && l.ends_with(": qa")), "{text}");
}

#[test]
fn toml_manifest_goes_through_the_same_flow() {
    let fixture = ManifestFixture::new()
        .with_file("scripts/boot.sh", "#!/bin/sh\n")
        .with_metric_config(deployer_test_utils::SAMPLE_METRIC_CONFIG);
    let script = fixture.join("scripts/boot.sh");
    let manifest = format!(
        r#"
name = "toml-app"
tags = ["project=toml-app"]

[userdata]
type = "local"
path = '{}'

[[stacks]]
stack = "web"
env = "stage"
polling_interval = "20s"

[stacks.capacity]
min = 1
max = 3
desired = 2

[[stacks.regions]]
region = "eu-west-1"
instance_type = "m5.large"
ami_id = "ami-0123456789abcdef0"
"#,
        script.display()
    );
    let fixture = fixture.with_file("manifest.toml", &manifest);

    let prepared = prepare(run_for(&fixture, "manifest.toml", "web")).unwrap();

    assert_eq!(prepared.config.global.name, "toml-app");
    assert_eq!(prepared.config.env(), "stage");
    assert_eq!(prepared.config.polling_interval(), Duration::from_secs(20));
    assert_eq!(
        prepared.userdata,
        ResolvedUserdata::Encoded {
            content: "IyEvYmluL3NoCg==".into()
        }
    );
}

#[test]
fn json_manifest_with_s3_userdata() {
    let fixture = ManifestFixture::new()
        .with_metric_config(deployer_test_utils::SAMPLE_METRIC_CONFIG)
        .with_file(
            "manifest.json",
            r#"{
  "name": "json-app",
  "userdata": { "type": "s3", "path": "s3://bucket/userdata.sh" },
  "stacks": [
    {
      "stack": "api",
      "env": "prod",
      "capacity": { "min": 1, "max": 1, "desired": 1 },
      "regions": [
        { "region": "us-east-1", "instance_type": "t3.small", "ami_id": "ami-0aaaaaaaaaaaaaaaa" }
      ]
    }
  ]
}"#,
        );

    let prepared = prepare(run_for(&fixture, "manifest.json", "api")).unwrap();

    assert_eq!(
        prepared.userdata,
        ResolvedUserdata::ObjectReference {
            path: "s3://bucket/userdata.sh".into()
        }
    );
}

#[test]
fn prepared_deployment_serializes_for_scripting() {
    let fixture = ManifestFixture::sample();

    let prepared = prepare(run_for(&fixture, "manifest.yaml", "artd")).unwrap();
    let json = serde_json::to_value(&prepared).unwrap();

    assert_eq!(json["config"]["run"]["env"], "dev");
    assert_eq!(json["config"]["run"]["polling_interval"], "1m30s");
    assert_eq!(json["config"]["run"]["timeout"], "1h");
    assert_eq!(json["config"]["global"]["name"], "hello");
    assert_eq!(json["userdata"]["source"], "encoded");
}

#[test]
fn role_override_reaches_every_stack_but_only_active_is_validated() {
    let fixture = ManifestFixture::sample();
    let run = RunConfig {
        assume_role: Some("arn:aws:iam::123456789012:role/ci".into()),
        ..run_for(&fixture, "manifest.yaml", "batch")
    };

    let prepared = prepare(run).unwrap();

    for stack in &prepared.config.stacks {
        assert_eq!(
            stack.assume_role.as_deref(),
            Some("arn:aws:iam::123456789012:role/ci")
        );
    }
    assert_eq!(prepared.config.active_stack().unwrap().stack, "batch");
}

#[test]
fn validation_failure_stops_before_userdata() {
    // Userdata points nowhere, but validation fails first
    let fixture = ManifestFixture::new()
        .with_metric_config(deployer_test_utils::SAMPLE_METRIC_CONFIG)
        .with_manifest(
            r#"
name: broken
userdata:
  type: local
  path: /nowhere/userdata.sh
stacks:
  - stack: web
    env: dev
    block_devices:
      - device_name: /dev/xvda
        volume_size: 8
        volume_type: standard
    regions:
      - region: us-east-1
        instance_type: t3.micro
        ami_id: ami-0bbbbbbbbbbbbbbbb
"#,
        );

    let err = prepare(run_for(&fixture, "manifest.yaml", "web")).unwrap_err();

    assert!(
        matches!(
            err,
            deployer_core::Error::Validation(ValidationError::UnsupportedVolumeType { .. })
        ),
        "{err:?}"
    );
}
