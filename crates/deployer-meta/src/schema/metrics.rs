//! Metrics configuration file
//!
//! Only its presence and the fields validated before a deployment are
//! modelled; the reporting itself happens elsewhere.

use serde::{Deserialize, Serialize};

/// Default location of the metrics configuration file.
pub const METRIC_CONFIG_PATH: &str = "metrics.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub storage: MetricStorage,
}

/// Where collected metrics are stored
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricStorage {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub name: String,
}
