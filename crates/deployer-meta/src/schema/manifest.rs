//! Top-level manifest document

use serde::{Deserialize, Serialize};

use super::StackSpec;
use super::empty_as_none;

/// Where a stack's instance userdata script comes from.
///
/// `type: s3` selects object storage; any other type, or none, selects a
/// local file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserdataSpec {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,
}

impl UserdataSpec {
    pub fn new(kind: Option<&str>, path: Option<&str>) -> Self {
        Self {
            kind: kind.map(str::to_string),
            path: path.map(str::to_string),
        }
    }

    /// Fill every unset field from `default`, field by field.
    pub fn or_default_from(&self, default: &UserdataSpec) -> UserdataSpec {
        UserdataSpec {
            kind: self.kind.clone().or_else(|| default.kind.clone()),
            path: self.path.clone().or_else(|| default.path.clone()),
        }
    }
}

/// The parsed manifest document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeploymentManifest {
    #[serde(default)]
    pub name: String,

    /// Userdata used by stacks that do not declare their own
    #[serde(default)]
    pub userdata: UserdataSpec,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Stacks in document order
    #[serde(default)]
    pub stacks: Vec<StackSpec>,
}

impl DeploymentManifest {
    /// Split the manifest into its global fields and its stack list.
    pub fn into_parts(self) -> (GlobalConfig, Vec<StackSpec>) {
        let global = GlobalConfig {
            name: self.name,
            userdata: self.userdata,
            tags: self.tags,
        };
        (global, self.stacks)
    }
}

/// Manifest-wide settings shared by every stack.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub name: String,
    pub userdata: UserdataSpec,
    pub tags: Vec<String>,
}
