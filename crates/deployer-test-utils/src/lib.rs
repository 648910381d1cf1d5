//! Manifest fixtures for tests.
//!
//! [`ManifestFixture`] owns a temporary directory holding a manifest, an
//! optional metrics configuration and userdata scripts, so tests can drive
//! the loader and the full pipeline against real files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A manifest with two stacks: `artd` (single region, fully specified) and
/// `batch` (spot instances, two regions, inherits the global userdata).
pub const SAMPLE_MANIFEST: &str = r#"
name: hello
userdata:
  type: local
  path: scripts/userdata.sh
tags:
  - project=hello
  - repo=hello-deploy
stacks:
  - stack: artd
    account: dev
    env: dev
    replacement_type: BlueGreen
    iam_instance_profile: app-hello-profile
    ansible_tags: all
    ebs_optimized: true
    polling_interval: 90s
    block_devices:
      - device_name: /dev/xvda
        volume_size: 100
        volume_type: gp2
      - device_name: /dev/xvdb
        volume_size: 500
        volume_type: st1
    capacity:
      min: 1
      max: 2
      desired: 1
    autoscaling:
      - name: scale_out
        adjustment_type: ChangeInCapacity
        scaling_adjustment: 1
        cooldown: 60
      - name: scale_in
        adjustment_type: ChangeInCapacity
        scaling_adjustment: -1
        cooldown: 180
    alarms:
      - name: scale_out_on_util
        namespace: AWS/EC2
        metric: CPUUtilization
        statistic: Average
        comparison: GreaterThanOrEqualToThreshold
        threshold: 50
        period: 120
        evaluation_periods: 2
        alarm_actions:
          - scale_out
    lifecycle_hooks:
      launch_transition:
        - lifecycle_hook_name: hello-launch-hook
          default_result: CONTINUE
          heartbeat_timeout: 30
          notification_target_arn: arn:aws:sns:ap-northeast-2:123456789012:hello
          role_arn: arn:aws:iam::123456789012:role/hello-hook
    regions:
      - region: ap-northeast-2
        instance_type: t3.medium
        ssh_key: hello-key
        ami_id: ami-01288945bd24ed49a
        use_public_subnets: true
        vpc: vpc-artd_apnortheast2
        security_groups:
          - hello-artd_apnortheast2
        healthcheck_target_group: hello-artdapne2-ext
        target_groups:
          - hello-artdapne2-ext
        availability_zones:
          - ap-northeast-2a
          - ap-northeast-2c

  - stack: batch
    account: prod
    env: prod
    replacement_type: BlueGreen
    iam_instance_profile: app-batch-profile
    instance_market_options:
      market_type: spot
      spot_options:
        block_duration_minutes: 180
        instance_interruption_behavior: terminate
        max_price: "0.2"
        spot_instance_type: one-time
    capacity:
      min: 2
      max: 4
      desired: 2
    regions:
      - region: ap-northeast-2
        instance_type: c5.large
        ami_id: ami-0a1b2c3d4e5f60718
      - region: us-east-1
        instance_type: c5.large
        ami_id: ami-0f9e8d7c6b5a40312
"#;

/// A metrics configuration that satisfies validation.
pub const SAMPLE_METRIC_CONFIG: &str = r#"
enabled: true
region: ap-northeast-2
storage:
  type: dynamodb
  name: deployer-metrics
"#;

/// Userdata script referenced by [`SAMPLE_MANIFEST`].
pub const SAMPLE_USERDATA: &str = "#!/bin/bash\necho 'hello'\n";

/// A temporary working directory populated with deployment files.
pub struct ManifestFixture {
    dir: TempDir,
}

impl ManifestFixture {
    /// Creates an empty fixture directory.
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new()
            .unwrap_or_else(|e| panic!("ManifestFixture: failed to create temp dir: {e}"));
        Self { dir }
    }

    /// Creates a fixture with [`SAMPLE_MANIFEST`], [`SAMPLE_METRIC_CONFIG`]
    /// and the userdata script the manifest references.
    ///
    /// The manifest's userdata path is rewritten to the script's absolute
    /// location so the fixture works from any working directory.
    pub fn sample() -> Self {
        let fixture = Self::new().with_file("scripts/userdata.sh", SAMPLE_USERDATA);
        let userdata = fixture.join("scripts/userdata.sh");
        let manifest = SAMPLE_MANIFEST.replace(
            "path: scripts/userdata.sh",
            &format!("path: '{}'", userdata.display()),
        );
        fixture
            .with_manifest(&manifest)
            .with_metric_config(SAMPLE_METRIC_CONFIG)
    }

    /// Writes `manifest.yaml`.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("manifest.yaml", content)
    }

    /// Writes `metrics.yaml`.
    pub fn with_metric_config(self, content: &str) -> Self {
        self.with_file("metrics.yaml", content)
    }

    /// Writes an arbitrary file relative to the fixture root.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("ManifestFixture: failed to create {parent:?}: {e}"));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("ManifestFixture: failed to write {path:?}: {e}"));
        self
    }

    /// Root of the fixture directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file inside the fixture.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.join("manifest.yaml")
    }

    pub fn metric_config_path(&self) -> PathBuf {
        self.join("metrics.yaml")
    }
}

impl Default for ManifestFixture {
    fn default() -> Self {
        Self::new()
    }
}
