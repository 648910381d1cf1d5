//! Per-region deployment target

use serde::{Deserialize, Serialize};

use super::empty_as_none;

/// One AWS region a stack deploys into.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionSpec {
    pub region: String,
    pub use_public_subnets: bool,
    pub instance_type: String,
    pub ssh_key: String,

    /// May be omitted when a global AMI is passed on the command line
    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ami_id: Option<String>,

    pub vpc: String,
    pub security_groups: Vec<String>,

    #[serde(rename = "healthcheck_load_balancer")]
    pub healthcheck_lb: String,
    pub healthcheck_target_group: String,

    pub target_groups: Vec<String>,
    #[serde(rename = "loadbalancers")]
    pub load_balancers: Vec<String>,
    pub availability_zones: Vec<String>,
}

impl RegionSpec {
    /// Name of the resource used for health checks, preferring the target group.
    pub fn healthcheck_target(&self) -> Option<&str> {
        [&self.healthcheck_target_group, &self.healthcheck_lb]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
    }
}
