use crate::{Action, IssueKind, PackageAction};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The distributable `socket.yml` document.
///
/// Field order here is the key order of the rendered YAML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocketYml {
    pub version: u32,
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub issue_rules: BTreeMap<IssueKind, Action>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deferred_package_rules: Vec<SocketPackageRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SocketPackageRule {
    pub name: String,
    pub version: String,
    pub action: PackageAction,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Expiry as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}
